//! Household Domain Ports
//!
//! Port interfaces for the identity and household collaborators. The
//! ledger only reads through these: user resolution in bulk by id set,
//! and household lookup. Adapters may be backed by a database, an
//! external identity provider, or the in-memory test backend.

use async_trait::async_trait;
use core_kernel::{DomainPort, HouseholdId, PortError, UserId};

use crate::household::Household;
use crate::user::User;

/// Resolution of user identifiers to user records
#[async_trait]
pub trait UserDirectoryPort: DomainPort {
    /// Retrieves a single user
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the id does not resolve.
    async fn find_user(&self, id: UserId) -> Result<User, PortError>;

    /// Retrieves multiple users by id
    ///
    /// Unknown ids are silently omitted from the result; callers that
    /// require every id to resolve must compare lengths themselves.
    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, PortError>;
}

/// Lookup of household records
#[async_trait]
pub trait HouseholdPort: DomainPort {
    /// Retrieves a household
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the household does not exist.
    async fn find_household(&self, id: HouseholdId) -> Result<Household, PortError>;
}
