//! The balance aggregator
//!
//! Scans a household's active expenses over a settlement period and
//! produces a net balance per user: the payer of each expense is credited
//! its full amount and every share's user is debited that share. Because
//! each expense's shares sum exactly to its amount, the values of the
//! returned map always sum to exactly zero.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use core_kernel::{Cents, HouseholdId, SettlementPeriod, UserId};
use domain_expense::ExpensePort;

use crate::error::SettlementError;
use crate::ports::SettlementPort;

/// Computes net balances over the period anchored by the last finalized
/// settlement
pub struct BalanceAggregator {
    settlements: Arc<dyn SettlementPort>,
    expenses: Arc<dyn ExpensePort>,
}

impl BalanceAggregator {
    /// Creates the aggregator over its ports
    pub fn new(settlements: Arc<dyn SettlementPort>, expenses: Arc<dyn ExpensePort>) -> Self {
        Self {
            settlements,
            expenses,
        }
    }

    /// Determines the current balance period for a household
    ///
    /// The start is the `period_end` of the most recently finalized
    /// settlement, or None when nothing has ever been finalized. The end
    /// is measured as "now" at call time - compute the period once and
    /// pass it to every step that must agree on the window.
    #[instrument(skip(self))]
    pub async fn determine_period(
        &self,
        household_id: HouseholdId,
    ) -> Result<SettlementPeriod, SettlementError> {
        let last_finalized = self.settlements.latest_finalized(household_id).await?;
        let end = Utc::now();

        Ok(match last_finalized {
            Some(settlement) => SettlementPeriod {
                start: Some(settlement.period_end),
                end,
            },
            None => SettlementPeriod::since_inception(end),
        })
    }

    /// Computes net balances for every user touched by an active expense
    /// in the period
    ///
    /// A user who is both payer and shareholder nets correctly via
    /// independent credit and debit. Zero balances are kept; users who
    /// never appear in the period have no entry at all.
    #[instrument(skip(self, period))]
    pub async fn balances_in_period(
        &self,
        household_id: HouseholdId,
        period: &SettlementPeriod,
    ) -> Result<HashMap<UserId, Cents>, SettlementError> {
        let expenses = self
            .expenses
            .active_by_household(household_id, period.start)
            .await?;

        let mut balances: HashMap<UserId, Cents> = HashMap::new();
        for expense in expenses.iter().filter(|e| period.contains(e.created_at)) {
            let payer = balances.entry(expense.payer_id).or_insert(Cents::ZERO);
            *payer = payer.checked_add(expense.amount_cents)?;

            for share in &expense.shares {
                let charged = balances.entry(share.user_id).or_insert(Cents::ZERO);
                *charged = charged.checked_sub(share.amount_cents)?;
            }
        }

        debug!(users = balances.len(), "Balances aggregated");
        Ok(balances)
    }
}
