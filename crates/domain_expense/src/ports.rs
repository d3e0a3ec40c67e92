//! Expense Domain Ports
//!
//! The `ExpensePort` trait defines what the expense domain needs from its
//! data source. The whole aggregate (expense plus shares) is read and
//! written as a unit: share replacement is an atomic aggregate update,
//! never a per-row patch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_kernel::{DomainPort, ExpenseId, HouseholdId, PortError, UserId};

use crate::expense::Expense;

/// Persistence seam for expense aggregates
#[async_trait]
pub trait ExpensePort: DomainPort {
    /// Persists a new expense with its shares as one atomic write
    async fn insert(&self, expense: Expense) -> Result<(), PortError>;

    /// Replaces a stored expense aggregate wholesale
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the expense does not exist.
    async fn update(&self, expense: Expense) -> Result<(), PortError>;

    /// Retrieves an expense with its shares
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the expense does not exist.
    async fn find_by_id(&self, id: ExpenseId) -> Result<Expense, PortError>;

    /// Enumerates a household's ACTIVE expenses, newest first
    ///
    /// With `created_after` set, only expenses created strictly after that
    /// instant are returned - the lower bound of a settlement period.
    async fn active_by_household(
        &self,
        household_id: HouseholdId,
        created_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Expense>, PortError>;

    /// Enumerates the ACTIVE expenses paid by one user, newest first
    async fn active_by_payer(&self, payer_id: UserId) -> Result<Vec<Expense>, PortError>;
}
