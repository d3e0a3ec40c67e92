//! The settlement aggregate and its lifecycle state machine

use chrono::{DateTime, Utc};
use core_kernel::{Cents, HouseholdId, SettlementId, SettlementPeriod, UserId};
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;

/// Lifecycle status of a settlement
///
/// OPEN settlements may be discarded and replaced; FINALIZED is terminal
/// and anchors the next balance period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    Open,
    Finalized,
}

/// A frozen per-user net balance owned by exactly one settlement
///
/// Positive `net_cents` means the user is owed money (creditor), negative
/// means the user owes (debtor). The set for one settlement sums to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementBalance {
    pub user_id: UserId,
    pub net_cents: Cents,
}

/// A frozen proposed payment owned by exactly one settlement
///
/// Transfers are recommendations only; no payment is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    pub from_user: UserId,
    pub to_user: UserId,
    pub amount_cents: Cents,
}

/// A persisted snapshot event that closes out a balance period
///
/// The aggregate exclusively owns its balance and transfer snapshots;
/// deleting a settlement cascades to both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique settlement identifier
    pub id: SettlementId,
    /// Owning household
    pub household_id: HouseholdId,
    /// The member who opened the settlement
    pub created_by: UserId,
    /// Lifecycle status
    pub status: SettlementStatus,
    /// Period lower bound (exclusive); None means since inception
    pub period_start: Option<DateTime<Utc>>,
    /// Period upper bound - the instant balances were computed
    pub period_end: DateTime<Utc>,
    /// When the settlement record was created
    pub created_at: DateTime<Utc>,
    /// Frozen balance snapshot, exclusively owned
    pub balances: Vec<SettlementBalance>,
    /// Frozen transfer proposals, exclusively owned
    pub transfers: Vec<SettlementTransfer>,
}

impl Settlement {
    /// Creates a new OPEN settlement snapshotting the given period,
    /// balances, and transfers
    pub fn open(
        household_id: HouseholdId,
        created_by: UserId,
        period: &SettlementPeriod,
        balances: Vec<SettlementBalance>,
        transfers: Vec<SettlementTransfer>,
    ) -> Self {
        Self {
            id: SettlementId::new_v7(),
            household_id,
            created_by,
            status: SettlementStatus::Open,
            period_start: period.start,
            period_end: period.end,
            created_at: Utc::now(),
            balances,
            transfers,
        }
    }

    /// Returns true while the settlement can still be replaced or finalized
    pub fn is_open(&self) -> bool {
        matches!(self.status, SettlementStatus::Open)
    }

    /// Transitions OPEN -> FINALIZED
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidState` unless the settlement is
    /// currently OPEN. FINALIZED never reverts.
    pub fn finalize(&mut self) -> Result<(), SettlementError> {
        match self.status {
            SettlementStatus::Open => {
                self.status = SettlementStatus::Finalized;
                Ok(())
            }
            SettlementStatus::Finalized => Err(SettlementError::InvalidState(
                "Settlement not open".into(),
            )),
        }
    }

    /// Sum of the balance snapshot; zero for a closed ledger
    pub fn balances_total(&self) -> Cents {
        self.balances.iter().map(|b| b.net_cents).sum()
    }
}
