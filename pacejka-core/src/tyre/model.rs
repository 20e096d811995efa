//! Tyre force model: longitudinal and lateral force over a slip sweep.

use super::coefficients::*;
use super::magic_formula::*;
use crate::imports::*;
use crate::params::*;

/// Coefficient schema bound to the formula that evaluates it. Fixed when the
/// model is built; evaluation never inspects the record shape again.
#[derive(Debug, Clone, PartialEq)]
enum FormulaBinding {
    Simple { coeffs: SimpleCoefficients, mu: f64 },
    Bakker(BakkerCoefficients),
}

/// Load-dependent Bakker factors for one axis at a given vertical load.
struct BakkerFactors {
    b: f64,
    c: f64,
    d: f64,
    e: f64,
}

/// Pacejka Magic Formula tyre.
///
/// Stateless apart from the immutable coefficients: every method is a pure
/// function of its arguments. Degenerate coefficient combinations (for
/// example `C D == 0`) produce NaN/Inf in the output rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct TyreModel {
    binding: FormulaBinding,
}

impl TyreModel {
    /// # Arguments
    /// * `coefficients` - coefficient record, simple or Bakker schema
    /// * `mu` - road friction coefficient, only used by the simple schema
    pub fn new(coefficients: TyreCoefficients, mu: f64) -> anyhow::Result<Self> {
        if !(mu.is_finite() && mu > 0.0) {
            bail!(TyreError::InvalidInput(format!(
                "friction coefficient must be positive and finite, got {mu}"
            )));
        }
        coefficients.validate()?;
        let binding = match coefficients {
            TyreCoefficients::Simple(coeffs) => FormulaBinding::Simple { coeffs, mu },
            TyreCoefficients::Bakker(coeffs) => FormulaBinding::Bakker(coeffs),
        };
        let model = Self { binding };
        log::debug!("bound {} coefficients to tyre model", model.variant_name());
        Ok(model)
    }

    /// Load coefficients from a yaml or json file and bind them.
    pub fn from_file<P: AsRef<Path>>(filepath: P, mu: f64) -> anyhow::Result<Self> {
        let coefficients = TyreCoefficients::from_file(filepath.as_ref())?;
        Self::new(coefficients, mu)
    }

    pub fn variant_name(&self) -> &'static str {
        match &self.binding {
            FormulaBinding::Simple { .. } => "simple",
            FormulaBinding::Bakker(_) => "bakker",
        }
    }

    /// Peak longitudinal force D at vertical load `fz` (N)
    pub fn peak_force_longitudinal(&self, fz: f64) -> f64 {
        match &self.binding {
            FormulaBinding::Simple { coeffs, mu } => mu * fz * coeffs.longitudinal.d_factor,
            FormulaBinding::Bakker(coeffs) => {
                bakker_peak(&coeffs.longitudinal, fz / N_PER_KN)
            }
        }
    }

    /// Peak lateral force D at vertical load `fz` (N), before combined-slip
    /// de-rating and camber shifts
    pub fn peak_force_lateral(&self, fz: f64) -> f64 {
        match &self.binding {
            FormulaBinding::Simple { coeffs, mu } => mu * fz * coeffs.lateral.d_factor,
            FormulaBinding::Bakker(coeffs) => bakker_peak(&coeffs.lateral, fz / N_PER_KN),
        }
    }

    /// Longitudinal force Fx (N) at each slip ratio in `slip`.
    ///
    /// # Arguments
    /// * `slip` - longitudinal slip ratios
    /// * `fz` - vertical load, N
    pub fn longitudinal_force(&self, slip: &Array1<f64>, fz: f64) -> Array1<f64> {
        let fx = match &self.binding {
            FormulaBinding::Simple { coeffs, mu } => {
                let axis = &coeffs.longitudinal;
                let d = mu * fz * axis.d_factor;
                let b = axis.b / (axis.c * d);
                magic_formula_arr(slip.view(), b, axis.c, d, axis.e)
            }
            FormulaBinding::Bakker(coeffs) => {
                let f = bakker_longitudinal(&coeffs.longitudinal, fz / N_PER_KN);
                magic_formula_warped_arr(slip.view(), f.b, f.c, f.d, f.e)
            }
        };
        warn_if_non_finite("longitudinal", &fx);
        fx
    }

    /// Lateral force Fy (N) at slip angle `alpha`, aligned element-wise with
    /// the longitudinal slip ratios in `slip`.
    ///
    /// The simple schema de-rates the lateral peak linearly with longitudinal
    /// slip and ignores camber. The Bakker schema applies camber shifts and
    /// does not depend on longitudinal slip, so its result is one value
    /// repeated over the sweep.
    ///
    /// # Arguments
    /// * `alpha` - slip angle, rad
    /// * `slip` - longitudinal slip ratios
    /// * `fz` - vertical load, N
    /// * `camber` - camber angle, rad
    pub fn lateral_force(
        &self,
        alpha: f64,
        slip: &Array1<f64>,
        fz: f64,
        camber: f64,
    ) -> Array1<f64> {
        let fy = match &self.binding {
            FormulaBinding::Simple { coeffs, mu } => {
                let axis = &coeffs.lateral;
                if camber != 0.0 {
                    log::debug!("simple coefficients ignore camber ({camber} rad)");
                }
                let d0 = mu * fz * axis.d_factor;
                let b = axis.b / (axis.c * d0);
                slip.mapv(|kappa| {
                    let d = d0 * (1.0 - axis.combined_reduction * kappa).max(0.0);
                    magic_formula(alpha, b, axis.c, d, axis.e)
                })
            }
            FormulaBinding::Bakker(coeffs) => {
                let fz_kn = fz / N_PER_KN;
                let f = bakker_lateral(&coeffs.lateral, &coeffs.camber, fz_kn, camber);
                let cam = &coeffs.camber;
                let shift_h = cam.a9 * camber;
                let shift_v = (cam.a10 * fz_kn.powi(2) + cam.a11 * fz_kn) * camber;
                let phi = warp(alpha + shift_h, f.b, f.e);
                let fy = magic_formula_warped(phi, f.b, f.c, f.d) + shift_v;
                Array1::from_elem(slip.len(), fy)
            }
        };
        warn_if_non_finite("lateral", &fy);
        fy
    }
}

fn bakker_peak(axis: &BakkerAxis, fz_kn: f64) -> f64 {
    axis.a1 * fz_kn.powi(2) + axis.a2 * fz_kn
}

fn bakker_curvature(axis: &BakkerAxis, fz_kn: f64) -> f64 {
    axis.a6 * fz_kn.powi(2) + axis.a7 * fz_kn + axis.a8
}

fn bakker_longitudinal(axis: &BakkerAxis, fz_kn: f64) -> BakkerFactors {
    let c = axis.c;
    let d = bakker_peak(axis, fz_kn);
    let b = (axis.a3 * fz_kn.powi(2) + axis.a4 * fz_kn) / (c * d * (axis.a5 * fz_kn).exp());
    let e = bakker_curvature(axis, fz_kn);
    BakkerFactors { b, c, d, e }
}

fn bakker_lateral(
    axis: &BakkerAxis,
    camber_coeffs: &CamberCoefficients,
    fz_kn: f64,
    camber: f64,
) -> BakkerFactors {
    let c = axis.c;
    let d = bakker_peak(axis, fz_kn);
    // cornering stiffness BCD saturates with load
    let bcd = axis.a3 * (axis.a4 * (axis.a5 * fz_kn).atan()).sin();
    let b = bcd / (c * d) * (1.0 - camber_coeffs.a12 * camber.abs());
    let e = bakker_curvature(axis, fz_kn);
    BakkerFactors { b, c, d, e }
}

fn warn_if_non_finite(channel: &str, force: &Array1<f64>) {
    let n_bad = force.iter().filter(|f| !f.is_finite()).count();
    if n_bad > 0 {
        log::warn!(
            "{n_bad} of {} {channel} force values are not finite; check coefficients for C*D == 0",
            force.len()
        );
    }
}
