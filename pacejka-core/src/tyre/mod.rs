//! Pacejka "Magic Formula" tyre model: coefficient records, the formula
//! itself, and the force model that binds one to the other.

pub mod coefficients;
pub mod magic_formula;
pub mod model;

pub use coefficients::*;
pub use model::TyreModel;
