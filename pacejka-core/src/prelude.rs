//! Convenience re-exports for downstream crates.

pub use crate::error::TyreError;
pub use crate::params::*;
pub use crate::render::CurveRenderer;
pub use crate::simulation::{ConditionSweep, ConditionSummary, ForceCurves};
pub use crate::sweep::{ForceCurve, ForceSeries, SlipSweep};
pub use crate::traits::{ApproxEq, SerdeAPI};
pub use crate::tyre::{
    BakkerAxis, BakkerCoefficients, CamberCoefficients, SimpleAxis, SimpleCoefficients,
    SimpleLateralAxis, TyreCoefficients, TyreModel,
};
pub use crate::vehicle::VehicleModel;
