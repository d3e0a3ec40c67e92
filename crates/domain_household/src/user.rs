//! Users and the explicit caller context

use core_kernel::{HouseholdId, UserId};
use serde::{Deserialize, Serialize};

/// A resolved member of a household, as supplied by the identity collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Email address (the identity collaborator's login key)
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl User {
    /// Creates a new user record
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name used in balance and transfer views
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The authenticated caller and their active household
///
/// Replaces the ambient security-context lookup of the original design:
/// every core operation takes the caller explicitly. The authorization
/// layer is expected to have validated the pair before the core is
/// invoked; the core still enforces household ownership of the entities
/// it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// The user invoking the operation
    pub user_id: UserId,
    /// The caller's active household
    pub household_id: HouseholdId,
}

impl Caller {
    /// Creates a caller context
    pub fn new(user_id: UserId, household_id: HouseholdId) -> Self {
        Self {
            user_id,
            household_id,
        }
    }
}
