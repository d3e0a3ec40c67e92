//! Settlement domain error types

use core_kernel::{MoneyError, PortError};
use thiserror::Error;

/// Errors surfaced by settlement operations
///
/// All variants propagate directly to the caller with no local recovery;
/// the domain performs no I/O beyond its ports.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced settlement, user, or household does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The entity belongs to a different household than the caller's
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Opening a settlement when every balance is already zero
    #[error("All balances are zero - nothing to settle")]
    NothingToSettle,

    /// An illegal lifecycle transition, e.g. finalizing a settlement
    /// that is not OPEN
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Overflow during balance aggregation
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// An error propagated unmodified from the persistence collaborator
    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for SettlementError {
    /// Port-level "not found" classifies as the domain's NotFound; every
    /// other port error passes through untouched.
    fn from(error: PortError) -> Self {
        if error.is_not_found() {
            SettlementError::NotFound(error.to_string())
        } else {
            SettlementError::Port(error)
        }
    }
}
