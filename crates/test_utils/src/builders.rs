//! Test data builders
//!
//! Builder patterns for constructing test data with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use core_kernel::{Cents, ExpenseId, HouseholdId, UserId};
use domain_expense::{compute_shares, Expense, ExpenseShare, ExpenseStatus, SplitType};

/// Builder for expense aggregates
///
/// Defaults to an active 1000-cent expense with a single share charging
/// the payer; `split_equally_among` recomputes the shares through the
/// split calculator so the exact-sum invariant holds.
pub struct ExpenseBuilder {
    household_id: HouseholdId,
    payer_id: UserId,
    amount_cents: Cents,
    description: String,
    split_type: SplitType,
    status: ExpenseStatus,
    created_at: DateTime<Utc>,
    shares: Vec<ExpenseShare>,
}

impl ExpenseBuilder {
    /// Creates a builder for an expense in the given household
    pub fn new(household_id: HouseholdId, payer_id: UserId) -> Self {
        Self {
            household_id,
            payer_id,
            amount_cents: Cents::new(1000),
            description: "Test expense".into(),
            split_type: SplitType::Equal,
            status: ExpenseStatus::Active,
            created_at: Utc::now(),
            shares: vec![ExpenseShare::new(payer_id, Cents::new(1000))],
        }
    }

    /// Sets the total amount (shares are not recomputed)
    pub fn with_amount(mut self, cents: i64) -> Self {
        self.amount_cents = Cents::new(cents);
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the creation timestamp
    pub fn created_at(mut self, instant: DateTime<Utc>) -> Self {
        self.created_at = instant;
        self
    }

    /// Marks the expense soft-deleted
    pub fn deleted(mut self) -> Self {
        self.status = ExpenseStatus::Deleted;
        self
    }

    /// Replaces the shares with an exact equal split over `members`
    pub fn split_equally_among(mut self, members: &[UserId]) -> Self {
        let amounts = compute_shares(self.amount_cents, SplitType::Equal, members, None)
            .expect("builder split must be valid");
        self.split_type = SplitType::Equal;
        self.shares = amounts
            .into_iter()
            .map(|(user_id, cents)| ExpenseShare::new(user_id, cents))
            .collect();
        self
    }

    /// Replaces the shares with explicit per-member amounts
    pub fn with_fixed_shares(mut self, shares: &[(UserId, i64)]) -> Self {
        self.split_type = SplitType::Fixed;
        self.shares = shares
            .iter()
            .map(|(user_id, cents)| ExpenseShare::new(*user_id, Cents::new(*cents)))
            .collect();
        self
    }

    /// Builds the expense
    pub fn build(self) -> Expense {
        Expense {
            id: ExpenseId::from_uuid(Uuid::new_v4()),
            household_id: self.household_id,
            payer_id: self.payer_id,
            amount_cents: self.amount_cents,
            description: self.description,
            split_type: self.split_type,
            status: self.status,
            created_at: self.created_at,
            shares: self.shares,
        }
    }
}
