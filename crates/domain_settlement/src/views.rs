//! Settlement view models exposed to the API layer

use chrono::{DateTime, Utc};
use core_kernel::{Cents, HouseholdId, SettlementId, UserId};
use serde::Serialize;

use crate::settlement::SettlementStatus;

/// A user as rendered in settlement responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// One user's net position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBalanceView {
    pub user_id: UserId,
    pub user_name: String,
    pub net_cents: Cents,
}

/// One proposed payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferView {
    pub from_user_id: UserId,
    pub from_user_name: String,
    pub to_user_id: UserId,
    pub to_user_name: String,
    pub amount_cents: Cents,
}

/// A live, unpersisted balance computation
///
/// Produced by the side-effect-free preview; carries no settlement
/// identity because nothing was snapshotted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancePreview {
    pub household_id: HouseholdId,
    pub as_of: DateTime<Utc>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: DateTime<Utc>,
    pub balances: Vec<UserBalanceView>,
    pub transfers: Vec<TransferView>,
}

/// A persisted settlement rendered for the API layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementView {
    pub settlement_id: SettlementId,
    pub household_id: HouseholdId,
    pub status: SettlementStatus,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub created_by: UserView,
    pub balances: Vec<UserBalanceView>,
    pub transfers: Vec<TransferView>,
}
