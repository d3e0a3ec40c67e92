//! Settlement Domain Ports
//!
//! The `SettlementPort` trait defines what the settlement lifecycle needs
//! from its data source. The aggregate (settlement plus balance and
//! transfer snapshots) is read and written as a unit; deleting a
//! settlement cascades to its children.

use async_trait::async_trait;
use core_kernel::{DomainPort, HouseholdId, PortError, SettlementId};

use crate::settlement::Settlement;

/// Persistence seam for settlement aggregates
#[async_trait]
pub trait SettlementPort: DomainPort {
    /// Persists a new settlement with its snapshots as one atomic write
    async fn insert(&self, settlement: Settlement) -> Result<(), PortError>;

    /// Replaces a stored settlement aggregate wholesale
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the settlement does not exist.
    async fn update(&self, settlement: Settlement) -> Result<(), PortError>;

    /// Deletes a settlement, cascading its balances and transfers
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the settlement does not exist.
    async fn delete(&self, id: SettlementId) -> Result<(), PortError>;

    /// Retrieves a settlement with its snapshots
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the settlement does not exist.
    async fn find_by_id(&self, id: SettlementId) -> Result<Settlement, PortError>;

    /// Finds the household's OPEN settlement, if any
    ///
    /// At most one exists per household at any time.
    async fn find_open(&self, household_id: HouseholdId)
        -> Result<Option<Settlement>, PortError>;

    /// Finds the household's most recently finalized settlement, by
    /// `period_end` descending
    async fn latest_finalized(
        &self,
        household_id: HouseholdId,
    ) -> Result<Option<Settlement>, PortError>;

    /// Lists up to `limit` of the household's settlements in any state,
    /// most recently created first
    async fn history(
        &self,
        household_id: HouseholdId,
        limit: usize,
    ) -> Result<Vec<Settlement>, PortError>;
}
