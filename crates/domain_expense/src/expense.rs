//! The expense aggregate and its shares

use chrono::{DateTime, Utc};
use core_kernel::{Cents, ExpenseId, ExpenseShareId, HouseholdId, UserId};
use serde::{Deserialize, Serialize};

/// How an expense amount is divided among the participating members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    /// Divided evenly, remainder cents going to the lowest user ids
    Equal,
    /// Each member is charged a caller-supplied amount
    Fixed,
}

/// Lifecycle status of an expense
///
/// Expenses are never hard-deleted; a deleted expense stays on record but
/// is excluded from listings and balance aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Active,
    Deleted,
}

/// The portion of an expense charged to one member
///
/// Owned exclusively by its expense; carries no reference back to the
/// parent. One share exists per distinct participating user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseShare {
    /// Unique share identifier
    pub id: ExpenseShareId,
    /// The user this share charges
    pub user_id: UserId,
    /// Charged amount, >= 0
    pub amount_cents: Cents,
}

impl ExpenseShare {
    /// Creates a new share
    pub fn new(user_id: UserId, amount_cents: Cents) -> Self {
        Self {
            id: ExpenseShareId::new_v7(),
            user_id,
            amount_cents,
        }
    }
}

/// A shared expense paid by one household member
///
/// # Invariants
///
/// - `amount_cents` is positive
/// - for EQUAL splits the share amounts sum exactly to `amount_cents`
///   (FIXED splits are taken as supplied and not re-verified)
/// - shares are replaced wholesale, never patched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense identifier
    pub id: ExpenseId,
    /// Owning household
    pub household_id: HouseholdId,
    /// The member who paid
    pub payer_id: UserId,
    /// Total paid amount in cents, positive
    pub amount_cents: Cents,
    /// Free-text description
    pub description: String,
    /// How the amount is divided
    pub split_type: SplitType,
    /// Lifecycle status
    pub status: ExpenseStatus,
    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
    /// Per-member shares, exclusively owned
    pub shares: Vec<ExpenseShare>,
}

impl Expense {
    /// Creates a new active expense with its shares
    pub fn new(
        household_id: HouseholdId,
        payer_id: UserId,
        amount_cents: Cents,
        description: impl Into<String>,
        split_type: SplitType,
        shares: Vec<ExpenseShare>,
    ) -> Self {
        Self {
            id: ExpenseId::new_v7(),
            household_id,
            payer_id,
            amount_cents,
            description: description.into(),
            split_type,
            status: ExpenseStatus::Active,
            created_at: Utc::now(),
            shares,
        }
    }

    /// Returns true while the expense counts toward balances
    pub fn is_active(&self) -> bool {
        matches!(self.status, ExpenseStatus::Active)
    }

    /// Sum of all share amounts
    pub fn shares_total(&self) -> Cents {
        self.shares.iter().map(|s| s.amount_cents).sum()
    }

    /// Replaces the share set wholesale
    pub fn replace_shares(&mut self, shares: Vec<ExpenseShare>) {
        self.shares = shares;
    }

    /// Soft-deletes the expense
    pub fn soft_delete(&mut self) {
        self.status = ExpenseStatus::Deleted;
    }
}
