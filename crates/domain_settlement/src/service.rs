//! Settlement application service
//!
//! Orchestrates the settlement lifecycle over the persistence and
//! directory ports and assembles the view models returned to the API
//! layer. Each operation runs as a single request-scoped unit of work:
//! either every write of `open_settlement` commits, or none do.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use core_kernel::{Cents, SettlementId, UserId};
use domain_expense::ExpensePort;
use domain_household::{Caller, HouseholdPort, User, UserDirectoryPort};

use crate::balance::BalanceAggregator;
use crate::error::SettlementError;
use crate::ports::SettlementPort;
use crate::settlement::{Settlement, SettlementBalance, SettlementTransfer};
use crate::simplify::simplify;
use crate::views::{BalancePreview, SettlementView, TransferView, UserBalanceView, UserView};

/// Upper bound on settlement history reads
const HISTORY_LIMIT: usize = 25;

/// Application service for the settlement lifecycle
pub struct SettlementService {
    settlements: Arc<dyn SettlementPort>,
    users: Arc<dyn UserDirectoryPort>,
    households: Arc<dyn HouseholdPort>,
    aggregator: BalanceAggregator,
}

impl SettlementService {
    /// Creates the service over its ports
    pub fn new(
        settlements: Arc<dyn SettlementPort>,
        expenses: Arc<dyn ExpensePort>,
        users: Arc<dyn UserDirectoryPort>,
        households: Arc<dyn HouseholdPort>,
    ) -> Self {
        let aggregator = BalanceAggregator::new(Arc::clone(&settlements), expenses);
        Self {
            settlements,
            users,
            households,
            aggregator,
        }
    }

    /// Side-effect-free balance preview
    ///
    /// Runs aggregation and simplification fresh on every call and never
    /// touches persisted settlement rows.
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn compute_balance(
        &self,
        caller: Caller,
    ) -> Result<BalancePreview, SettlementError> {
        let period = self.aggregator.determine_period(caller.household_id).await?;
        let balances = self
            .aggregator
            .balances_in_period(caller.household_id, &period)
            .await?;
        let transfers = simplify(&balances);

        let users = self.resolve_users(balance_user_ids(&balances)).await?;
        Ok(BalancePreview {
            household_id: caller.household_id,
            as_of: Utc::now(),
            period_start: period.start,
            period_end: period.end,
            balances: balance_views(&balances, &users),
            transfers: transfers
                .iter()
                .map(|t| transfer_view(t.from_user, t.to_user, t.amount_cents, &users))
                .collect(),
        })
    }

    /// Opens a settlement, snapshotting current balances and transfers
    ///
    /// Any existing OPEN settlement for the household is deleted first -
    /// a destructive replace, cascading its snapshots. Fails with
    /// `NothingToSettle` when every balance is already zero, persisting
    /// nothing.
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn open_settlement(
        &self,
        caller: Caller,
    ) -> Result<SettlementView, SettlementError> {
        let household = self.households.find_household(caller.household_id).await?;

        // One period for both aggregation and the snapshot
        let period = self.aggregator.determine_period(household.id).await?;
        let balances = self
            .aggregator
            .balances_in_period(household.id, &period)
            .await?;

        if balances.values().all(Cents::is_zero) {
            return Err(SettlementError::NothingToSettle);
        }

        if let Some(open) = self.settlements.find_open(household.id).await? {
            debug!(settlement_id = %open.id, "Replacing existing open settlement");
            self.settlements.delete(open.id).await?;
        }

        let transfers = simplify(&balances);

        // Snapshot in user-id order so persisted rows are deterministic
        let mut balance_rows: Vec<SettlementBalance> = balances
            .iter()
            .map(|(user_id, net_cents)| SettlementBalance {
                user_id: *user_id,
                net_cents: *net_cents,
            })
            .collect();
        balance_rows.sort_by_key(|b| b.user_id);

        let transfer_rows: Vec<SettlementTransfer> = transfers
            .iter()
            .map(|t| SettlementTransfer {
                from_user: t.from_user,
                to_user: t.to_user,
                amount_cents: t.amount_cents,
            })
            .collect();

        let settlement = Settlement::open(
            household.id,
            caller.user_id,
            &period,
            balance_rows,
            transfer_rows,
        );
        self.settlements.insert(settlement.clone()).await?;

        debug!(settlement_id = %settlement.id, "Settlement opened");
        self.build_view(&settlement).await
    }

    /// Returns the household's current OPEN settlement
    ///
    /// Does not compute a fresh preview.
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn recent_settlement(
        &self,
        caller: Caller,
    ) -> Result<SettlementView, SettlementError> {
        let open = self
            .settlements
            .find_open(caller.household_id)
            .await?
            .ok_or_else(|| SettlementError::NotFound("Open settlement not found".into()))?;
        self.build_view(&open).await
    }

    /// Lists the household's settlements in any state, newest first
    ///
    /// A bounded read of at most 25 records, not a live computation.
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn settlement_history(
        &self,
        caller: Caller,
    ) -> Result<Vec<SettlementView>, SettlementError> {
        let settlements = self
            .settlements
            .history(caller.household_id, HISTORY_LIMIT)
            .await?;

        let mut views = Vec::with_capacity(settlements.len());
        for settlement in &settlements {
            views.push(self.build_view(settlement).await?);
        }
        Ok(views)
    }

    /// Transitions a settlement OPEN -> FINALIZED
    ///
    /// The finalized settlement's `period_end` anchors the start of the
    /// household's next balance period.
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn finalize_settlement(
        &self,
        caller: Caller,
        settlement_id: SettlementId,
    ) -> Result<SettlementView, SettlementError> {
        let mut settlement = self.settlements.find_by_id(settlement_id).await?;
        if settlement.household_id != caller.household_id {
            return Err(SettlementError::AccessDenied(
                "Settlement belongs to a different household".into(),
            ));
        }

        settlement.finalize()?;
        self.settlements.update(settlement.clone()).await?;

        debug!(%settlement_id, "Settlement finalized");
        self.build_view(&settlement).await
    }

    /// Renders a persisted settlement, resolving user names in bulk
    async fn build_view(
        &self,
        settlement: &Settlement,
    ) -> Result<SettlementView, SettlementError> {
        let mut ids: Vec<UserId> = settlement.balances.iter().map(|b| b.user_id).collect();
        ids.extend(settlement.transfers.iter().map(|t| t.from_user));
        ids.extend(settlement.transfers.iter().map(|t| t.to_user));
        ids.push(settlement.created_by);

        let users = self.resolve_users(ids).await?;
        let creator = users.get(&settlement.created_by).ok_or_else(|| {
            SettlementError::NotFound(format!("User {} not found", settlement.created_by))
        })?;

        Ok(SettlementView {
            settlement_id: settlement.id,
            household_id: settlement.household_id,
            status: settlement.status,
            period_start: settlement.period_start,
            period_end: settlement.period_end,
            created_at: settlement.created_at,
            created_by: UserView {
                id: creator.id,
                email: creator.email.clone(),
                first_name: creator.first_name.clone(),
                last_name: creator.last_name.clone(),
            },
            balances: settlement
                .balances
                .iter()
                .map(|b| UserBalanceView {
                    user_id: b.user_id,
                    user_name: display_name(&users, b.user_id),
                    net_cents: b.net_cents,
                })
                .collect(),
            transfers: settlement
                .transfers
                .iter()
                .map(|t| transfer_view(t.from_user, t.to_user, t.amount_cents, &users))
                .collect(),
        })
    }

    /// Bulk user resolution into a lookup map
    async fn resolve_users(
        &self,
        ids: Vec<UserId>,
    ) -> Result<HashMap<UserId, User>, SettlementError> {
        let users = self.users.find_users(&ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

/// The user ids appearing in a balance map
fn balance_user_ids(balances: &HashMap<UserId, Cents>) -> Vec<UserId> {
    balances.keys().copied().collect()
}

/// Balance views in ascending user-id order
fn balance_views(
    balances: &HashMap<UserId, Cents>,
    users: &HashMap<UserId, User>,
) -> Vec<UserBalanceView> {
    let mut views: Vec<UserBalanceView> = balances
        .iter()
        .map(|(user_id, net_cents)| UserBalanceView {
            user_id: *user_id,
            user_name: display_name(users, *user_id),
            net_cents: *net_cents,
        })
        .collect();
    views.sort_by_key(|v| v.user_id);
    views
}

/// Renders one transfer with both party names resolved
fn transfer_view(
    from_user: UserId,
    to_user: UserId,
    amount_cents: Cents,
    users: &HashMap<UserId, User>,
) -> TransferView {
    TransferView {
        from_user_id: from_user,
        from_user_name: display_name(users, from_user),
        to_user_id: to_user,
        to_user_name: display_name(users, to_user),
        amount_cents,
    }
}

/// Full name when the directory resolves the id, the id's display form
/// otherwise
fn display_name(users: &HashMap<UserId, User>, id: UserId) -> String {
    users
        .get(&id)
        .map(User::full_name)
        .unwrap_or_else(|| id.to_string())
}
