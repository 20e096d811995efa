//! Error taxonomy for the tyre model.

use thiserror::Error;

/// Typed root causes carried inside `anyhow::Error` chains.
///
/// Callers that need to branch on the failure class can use
/// `err.downcast_ref::<TyreError>()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TyreError {
    /// Bad caller input: non-positive mass, empty slip-angle list, malformed sweep.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Coefficient record is missing fields, has wrong types, or matches no schema.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Non-finite force values where the caller asked for finite results.
    #[error("domain error: {0}")]
    DomainError(String),
}
