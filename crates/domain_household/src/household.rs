//! Household records

use core_kernel::HouseholdId;
use serde::{Deserialize, Serialize};

/// The group of users sharing expenses and settling balances together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    /// Unique household identifier
    pub id: HouseholdId,
    /// Display name
    pub name: String,
}

impl Household {
    /// Creates a new household record
    pub fn new(id: HouseholdId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
