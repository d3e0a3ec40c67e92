//! Expense view models exposed to the API layer

use chrono::{DateTime, Utc};
use core_kernel::{Cents, ExpenseId, ExpenseShareId, HouseholdId, UserId};
use serde::Serialize;

use crate::expense::{ExpenseStatus, SplitType};

/// A user as rendered in expense responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A household as rendered in expense responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseholdView {
    pub household_id: HouseholdId,
    pub name: String,
}

/// One member's share of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareView {
    pub share_id: ExpenseShareId,
    pub user_id: UserId,
    pub amount_cents: Cents,
}

/// A full expense response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseView {
    pub id: ExpenseId,
    pub household: HouseholdView,
    pub payer: UserView,
    pub amount_cents: Cents,
    pub description: String,
    #[serde(rename = "type")]
    pub split_type: SplitType,
    pub status: ExpenseStatus,
    pub created_at: DateTime<Utc>,
    pub shares: Vec<ShareView>,
}
