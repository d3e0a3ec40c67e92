//! Expense domain error types

use core_kernel::PortError;
use thiserror::Error;

/// Errors surfaced by expense operations
///
/// All variants propagate directly to the caller; there is no local
/// recovery or retry in this domain.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Malformed or incomplete input (empty member set, unresolved member,
    /// missing or negative fixed amount, non-positive total)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced expense, user, or household does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The entity belongs to a different household than the caller's
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// An error propagated unmodified from the persistence collaborator
    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for ExpenseError {
    /// Port-level "not found" classifies as the domain's NotFound; every
    /// other port error passes through untouched.
    fn from(error: PortError) -> Self {
        if error.is_not_found() {
            ExpenseError::NotFound(error.to_string())
        } else {
            ExpenseError::Port(error)
        }
    }
}
