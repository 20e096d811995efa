use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

extern crate pacejka_core;
use pacejka_core::prelude::*;
use pacejka_core::resources::list_resources;

/// Resource subdirectory holding the bundled coefficient files
const COEFFS_RESOURCE_DIR: &str = "coeffs";

/// Pacejka tyre model: force vs. longitudinal slip curves for one wheel.
/// After running `cargo build --release`, run with
/// ```bash
/// ./target/release/pacejka-cli --alpha 2,5,8 --weight 1500
/// ```
/// For the bundled Bakker coefficients with camber, run with
/// ```bash
/// ./target/release/pacejka-cli --alpha 2,5,8 --weight 1500 --gamma 1.5 --coeffs-file bakker.yaml
/// ```
/// A `--coeffs-file` that exists on disk takes precedence over a bundled file
/// of the same name.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct PacejkaApi {
    #[clap(long, value_parser, allow_hyphen_values = true)]
    /// Slip angle(s) in degrees, comma separated (e.g. 2,5,8)
    alpha: String,
    #[clap(long, value_parser, allow_hyphen_values = true)]
    /// Vehicle mass in kg
    weight: f64,
    #[clap(long, value_parser, default_value_t = 0.0, allow_hyphen_values = true)]
    /// Camber angle in degrees
    gamma: f64,
    #[clap(long, value_parser)]
    /// Path to coefficient file (yaml or json), or the name of a bundled file
    /// (simple.yaml, bakker.yaml); bundled simple coefficients if omitted
    coeffs_file: Option<PathBuf>,
    #[clap(long, value_parser, default_value_t = DEFAULT_MU)]
    /// Road friction coefficient, used by the simple coefficient schema
    mu: f64,
    #[clap(long, value_parser, default_value = DEFAULT_OUTPUT_DIR)]
    /// Directory the charts are written to, created if missing
    output_dir: PathBuf,
    #[clap(long, value_parser, default_value_t = DEFAULT_SWEEP_POINTS)]
    /// Number of slip ratio samples between 0 and 1
    points: usize,
    #[clap(long, value_parser)]
    /// How to return results: `summary` or `json`
    res_fmt: Option<String>,
    #[clap(long, action)]
    /// Fail instead of plotting when any force value is NaN or infinite
    strict: bool,
}

#[derive(Debug, Deserialize, Serialize)]
struct PacejkaResults {
    coefficients: String,
    wheel_load_n: f64,
    conditions: Vec<ConditionSummary>,
    outputs: Vec<PathBuf>,
}

impl PacejkaResults {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(&self)?)
    }

    pub fn to_summary(&self) -> String {
        let mut lines = vec![
            format!("coefficients: {}", self.coefficients),
            format!("wheel load: {:.2} N", self.wheel_load_n),
            format!("{:>12} {:>16} {:>16}", "alpha [deg]", "peak |Fx| [N]", "peak |Fy| [N]"),
        ];
        for c in &self.conditions {
            lines.push(format!(
                "{:>12} {:>16.2} {:>16.2}",
                c.slip_angle_deg, c.peak_fx_n, c.peak_fy_n
            ));
        }
        for path in &self.outputs {
            lines.push(format!("wrote {}", path.display()));
        }
        lines.join("\n")
    }
}

/// Parse a comma separated list of slip angles in degrees
fn parse_slip_angles(alpha: &str) -> anyhow::Result<Vec<f64>> {
    if alpha.trim().is_empty() {
        bail!(TyreError::InvalidInput(
            "at least one slip angle is required".into()
        ));
    }
    alpha
        .split(',')
        .map(|a| {
            let a = a.trim();
            match a.parse::<f64>() {
                Ok(deg) if deg.is_finite() => Ok(deg),
                _ => bail!(TyreError::InvalidInput(format!(
                    "slip angle {a:?} is not a finite number"
                ))),
            }
        })
        .collect()
}

fn load_tyre(api: &PacejkaApi) -> anyhow::Result<TyreModel> {
    match &api.coeffs_file {
        Some(path) if path.exists() => TyreModel::from_file(path, api.mu),
        Some(path) => {
            let name = path.to_str().unwrap_or_default();
            let bundled = list_resources(COEFFS_RESOURCE_DIR);
            if !bundled.iter().any(|b| b == name) {
                bail!(TyreError::InvalidInput(format!(
                    "coefficient file {path:?} not found and not bundled (bundled: {})",
                    bundled.join(", ")
                )));
            }
            log::debug!("using bundled coefficients {name}");
            TyreModel::new(
                TyreCoefficients::from_resource(Path::new(COEFFS_RESOURCE_DIR).join(name))?,
                api.mu,
            )
        }
        None => TyreModel::new(
            TyreCoefficients::from_resource(Path::new(COEFFS_RESOURCE_DIR).join("simple.yaml"))?,
            api.mu,
        ),
    }
}

pub fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let api = PacejkaApi::parse();

    let res_fmt = api.res_fmt.clone().unwrap_or_else(|| String::from("summary"));
    if res_fmt != "summary" && res_fmt != "json" {
        bail!(TyreError::InvalidInput(format!(
            "invalid option `{res_fmt}` for `--res-fmt`, expected `summary` or `json`"
        )));
    }

    let slip_angles_deg = parse_slip_angles(&api.alpha)?;
    let camber_rad = api.gamma.to_radians();

    let vehicle = VehicleModel::new(api.weight)?;
    let tyre = load_tyre(&api).context("Could not build tyre model")?;
    let sweep = SlipSweep::linspace(api.points)?;
    log::debug!("{} coefficients, camber {camber_rad:.4} rad", tyre.variant_name());

    let curves = ConditionSweep::new(&tyre, &vehicle, &sweep, slip_angles_deg, camber_rad)?.run()?;
    if api.strict {
        curves.ensure_finite()?;
    }

    let renderer = CurveRenderer::new(&api.output_dir)?;
    let outputs = renderer.render(&sweep, &curves)?;

    let res = PacejkaResults {
        coefficients: tyre.variant_name().to_string(),
        wheel_load_n: curves.wheel_load_n,
        conditions: curves.summary(),
        outputs: outputs.to_vec(),
    };
    if res_fmt == "json" {
        println!("{}", res.to_json()?);
    } else {
        println!("{}", res.to_summary());
    }
    Ok(())
}
