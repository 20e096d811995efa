//! Module containing the slip sweep and the per-condition force series
//! computed over it.

use crate::imports::*;
use crate::utils::{ndarrallfinite, ndarrmaxabs, ndarrstrictlyincreasing};

/// Ordered longitudinal slip ratios in [0, 1], the independent variable of
/// every force curve.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlipSweep {
    slip: Array1<f64>,
}

impl SerdeAPI for SlipSweep {
    fn init(&mut self) -> anyhow::Result<()> {
        Self::check(&self.slip)
    }
}

impl SlipSweep {
    pub fn new(slip: Array1<f64>) -> anyhow::Result<Self> {
        Self::check(&slip)?;
        Ok(Self { slip })
    }

    /// `n_points` evenly spaced slip ratios from 0 to 1 inclusive
    pub fn linspace(n_points: usize) -> anyhow::Result<Self> {
        Self::new(Array1::linspace(0.0, 1.0, n_points))
    }

    fn check(slip: &Array1<f64>) -> anyhow::Result<()> {
        if slip.is_empty() {
            bail!(TyreError::InvalidInput("slip sweep is empty".into()));
        }
        if !slip.iter().all(|k| (0.0..=1.0).contains(k)) {
            bail!(TyreError::InvalidInput(format!(
                "slip ratios must lie in [0, 1], got {slip}"
            )));
        }
        if !ndarrstrictlyincreasing(slip) {
            bail!(TyreError::InvalidInput(
                "slip ratios must be strictly increasing".into()
            ));
        }
        Ok(())
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.slip
    }

    /// Slip in percent, for chart axes
    pub fn percent(&self) -> Array1<f64> {
        &self.slip * 100.0
    }

    pub fn len(&self) -> usize {
        self.slip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slip.is_empty()
    }
}

/// Force samples for one slip-angle condition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ForceCurve {
    /// Slip angle labelling the curve, deg
    pub slip_angle_deg: f64,
    /// Force aligned index-for-index with the sweep, N
    pub force_n: Array1<f64>,
}

impl ForceCurve {
    /// Legend label for the curve
    pub fn label(&self) -> String {
        format!("α = {}°", self.slip_angle_deg)
    }
}

/// Force curves keyed by slip angle, kept in insertion order so that chart
/// legends come out in the order the conditions were given.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ForceSeries {
    sweep_len: usize,
    curves: Vec<ForceCurve>,
}

impl SerdeAPI for ForceSeries {
    fn init(&mut self) -> anyhow::Result<()> {
        for curve in &self.curves {
            Self::check_len(self.sweep_len, curve.slip_angle_deg, &curve.force_n)?;
        }
        Ok(())
    }
}

impl ForceSeries {
    /// Empty series for curves of `sweep_len` samples
    pub fn new(sweep_len: usize) -> Self {
        Self {
            sweep_len,
            curves: Vec::new(),
        }
    }

    fn check_len(sweep_len: usize, slip_angle_deg: f64, force_n: &Array1<f64>) -> anyhow::Result<()> {
        ensure!(
            force_n.len() == sweep_len,
            TyreError::InvalidInput(format!(
                "force series for α = {slip_angle_deg}° has {} samples, sweep has {sweep_len}",
                force_n.len()
            ))
        );
        Ok(())
    }

    pub fn push(&mut self, slip_angle_deg: f64, force_n: Array1<f64>) -> anyhow::Result<()> {
        Self::check_len(self.sweep_len, slip_angle_deg, &force_n)?;
        self.curves.push(ForceCurve {
            slip_angle_deg,
            force_n,
        });
        Ok(())
    }

    /// First curve labelled with `slip_angle_deg`
    pub fn get(&self, slip_angle_deg: f64) -> Option<&Array1<f64>> {
        self.curves
            .iter()
            .find(|c| c.slip_angle_deg == slip_angle_deg)
            .map(|c| &c.force_n)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForceCurve> {
        self.curves.iter()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn sweep_len(&self) -> usize {
        self.sweep_len
    }

    pub fn all_finite(&self) -> bool {
        self.curves.iter().all(|c| ndarrallfinite(&c.force_n))
    }

    /// Largest finite |force| over all curves, NaN if there is none
    pub fn peak_abs(&self) -> f64 {
        self.curves
            .iter()
            .map(|c| ndarrmaxabs(&c.force_n))
            .fold(f64::NAN, f64::max)
    }
}

impl<'a> IntoIterator for &'a ForceSeries {
    type Item = &'a ForceCurve;
    type IntoIter = std::slice::Iter<'a, ForceCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}
