//! Crate containing the Pacejka "Magic Formula" tyre model, a minimal vehicle
//! load model, and rendering of force-vs-slip curves.
//! # Features:
//! - resources: bundle the coefficient files in `resources/` into the binary

pub mod error;
pub mod imports;
pub mod params;
pub mod prelude;
pub mod render;
#[cfg(feature = "resources")]
pub mod resources;
pub mod simulation;
pub mod sweep;
pub mod traits;
pub mod tyre;
pub mod utils;
pub mod vehicle;
