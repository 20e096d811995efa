//! Module that evaluates the tyre model over a slip sweep for a list of
//! slip-angle conditions.

use rayon::prelude::*;

use crate::imports::*;
use crate::sweep::{ForceSeries, SlipSweep};
use crate::tyre::TyreModel;
use crate::utils::ndarrmaxabs;
use crate::vehicle::VehicleModel;

/// One force-vs-slip evaluation per slip angle, all sharing the same wheel
/// load, camber, and sweep.
#[derive(Debug, Clone)]
pub struct ConditionSweep<'a> {
    tyre: &'a TyreModel,
    vehicle: &'a VehicleModel,
    sweep: &'a SlipSweep,
    slip_angles_deg: Vec<f64>,
    camber_rad: f64,
}

impl<'a> ConditionSweep<'a> {
    /// Repeated slip angles are evaluated once, at their first position.
    ///
    /// # Arguments
    /// * `slip_angles_deg` - at least one slip angle, deg
    /// * `camber_rad` - camber angle applied to every condition, rad
    pub fn new(
        tyre: &'a TyreModel,
        vehicle: &'a VehicleModel,
        sweep: &'a SlipSweep,
        slip_angles_deg: Vec<f64>,
        camber_rad: f64,
    ) -> anyhow::Result<Self> {
        ensure!(
            !slip_angles_deg.is_empty(),
            TyreError::InvalidInput("at least one slip angle is required".into())
        );
        let n_given = slip_angles_deg.len();
        let mut unique: Vec<f64> = Vec::with_capacity(n_given);
        for alpha in slip_angles_deg {
            if !unique.contains(&alpha) {
                unique.push(alpha);
            }
        }
        if unique.len() < n_given {
            log::debug!("dropped {} repeated slip angle(s)", n_given - unique.len());
        }
        let slip_angles_deg = unique;
        Ok(Self {
            tyre,
            vehicle,
            sweep,
            slip_angles_deg,
            camber_rad,
        })
    }

    /// Evaluate every condition. Conditions are independent and run in
    /// parallel; results keep the order of `slip_angles_deg`.
    pub fn run(&self) -> anyhow::Result<ForceCurves> {
        let fz = self.vehicle.wheel_load();
        let slip = self.sweep.values();
        log::info!(
            "evaluating {} condition(s) over {} slip points at Fz = {:.2} N",
            self.slip_angles_deg.len(),
            self.sweep.len(),
            fz
        );

        let evaluated: Vec<(f64, Array1<f64>, Array1<f64>)> = self
            .slip_angles_deg
            .par_iter()
            .map(|&alpha_deg| {
                let fx = self.tyre.longitudinal_force(slip, fz);
                let fy =
                    self.tyre
                        .lateral_force(alpha_deg.to_radians(), slip, fz, self.camber_rad);
                (alpha_deg, fx, fy)
            })
            .collect();

        let mut longitudinal = ForceSeries::new(self.sweep.len());
        let mut lateral = ForceSeries::new(self.sweep.len());
        for (alpha_deg, fx, fy) in evaluated {
            longitudinal.push(alpha_deg, fx)?;
            lateral.push(alpha_deg, fy)?;
        }
        Ok(ForceCurves {
            wheel_load_n: fz,
            camber_rad: self.camber_rad,
            longitudinal,
            lateral,
        })
    }
}

/// Peak forces of one condition
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConditionSummary {
    pub slip_angle_deg: f64,
    /// Largest finite |Fx| over the sweep, N
    pub peak_fx_n: f64,
    /// Largest finite |Fy| over the sweep, N
    pub peak_fy_n: f64,
}

/// Output of a [ConditionSweep]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ForceCurves {
    /// Vertical load per wheel, N
    pub wheel_load_n: f64,
    pub camber_rad: f64,
    pub longitudinal: ForceSeries,
    pub lateral: ForceSeries,
}

impl SerdeAPI for ForceCurves {
    fn init(&mut self) -> anyhow::Result<()> {
        self.longitudinal.init()?;
        self.lateral.init()?;
        ensure!(
            self.longitudinal.sweep_len() == self.lateral.sweep_len(),
            TyreError::InvalidInput(format!(
                "longitudinal curves have {} samples, lateral curves have {}",
                self.longitudinal.sweep_len(),
                self.lateral.sweep_len()
            ))
        );
        Ok(())
    }
}

impl ForceCurves {
    /// Peak forces per condition, in condition order
    pub fn summary(&self) -> Vec<ConditionSummary> {
        self.longitudinal
            .iter()
            .zip(self.lateral.iter())
            .map(|(fx, fy)| ConditionSummary {
                slip_angle_deg: fx.slip_angle_deg,
                peak_fx_n: ndarrmaxabs(&fx.force_n),
                peak_fy_n: ndarrmaxabs(&fy.force_n),
            })
            .collect()
    }

    /// Fail with [TyreError::DomainError] if any force value is NaN or
    /// infinite.
    pub fn ensure_finite(&self) -> anyhow::Result<()> {
        for (channel, series) in [("longitudinal", &self.longitudinal), ("lateral", &self.lateral)] {
            for curve in series {
                let n_bad = curve.force_n.iter().filter(|f| !f.is_finite()).count();
                ensure!(
                    n_bad == 0,
                    TyreError::DomainError(format!(
                        "{n_bad} non-finite {channel} force value(s) at α = {}°",
                        curve.slip_angle_deg
                    ))
                );
            }
        }
        Ok(())
    }
}
