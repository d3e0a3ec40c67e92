//! In-memory port adapters
//!
//! Mutex-backed adapters implementing every domain port. Each method
//! takes the lock once, so individual operations are atomic - the same
//! all-or-nothing unit-of-work contract a database-backed adapter
//! provides per transaction. Insertion order is preserved, which keeps
//! history reads deterministic.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{
    DomainPort, ExpenseId, HouseholdId, PortError, SettlementId, UserId,
};
use domain_expense::{Expense, ExpensePort};
use domain_household::{Household, HouseholdPort, User, UserDirectoryPort};
use domain_settlement::{Settlement, SettlementPort, SettlementStatus};

/// In-memory user directory
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    /// Adds a user to the directory
    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

impl DomainPort for InMemoryUserDirectory {}

#[async_trait]
impl UserDirectoryPort for InMemoryUserDirectory {
    async fn find_user(&self, id: UserId) -> Result<User, PortError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, PortError> {
        let users = self.users.lock().unwrap();
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| users.iter().find(|u| u.id == *id).cloned())
            .collect())
    }
}

/// In-memory household store
#[derive(Default)]
pub struct InMemoryHouseholds {
    households: Mutex<Vec<Household>>,
}

impl InMemoryHouseholds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with households
    pub fn with_households(households: Vec<Household>) -> Self {
        Self {
            households: Mutex::new(households),
        }
    }

    /// Adds a household to the store
    pub fn seed(&self, household: Household) {
        self.households.lock().unwrap().push(household);
    }
}

impl DomainPort for InMemoryHouseholds {}

#[async_trait]
impl HouseholdPort for InMemoryHouseholds {
    async fn find_household(&self, id: HouseholdId) -> Result<Household, PortError> {
        self.households
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Household", id))
    }
}

/// In-memory expense store
#[derive(Default)]
pub struct InMemoryExpenses {
    expenses: Mutex<Vec<Expense>>,
}

impl InMemoryExpenses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expense directly, bypassing the service layer
    pub fn seed(&self, expense: Expense) {
        self.expenses.lock().unwrap().push(expense);
    }

    /// Number of stored expenses, any status
    pub fn len(&self) -> usize {
        self.expenses.lock().unwrap().len()
    }

    /// Returns true when the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainPort for InMemoryExpenses {}

#[async_trait]
impl ExpensePort for InMemoryExpenses {
    async fn insert(&self, expense: Expense) -> Result<(), PortError> {
        let mut expenses = self.expenses.lock().unwrap();
        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(PortError::conflict(format!(
                "Expense {} already exists",
                expense.id
            )));
        }
        expenses.push(expense);
        Ok(())
    }

    async fn update(&self, expense: Expense) -> Result<(), PortError> {
        let mut expenses = self.expenses.lock().unwrap();
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(stored) => {
                *stored = expense;
                Ok(())
            }
            None => Err(PortError::not_found("Expense", expense.id)),
        }
    }

    async fn find_by_id(&self, id: ExpenseId) -> Result<Expense, PortError> {
        self.expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Expense", id))
    }

    async fn active_by_household(
        &self,
        household_id: HouseholdId,
        created_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Expense>, PortError> {
        let mut matching: Vec<Expense> = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.household_id == household_id && e.is_active())
            .filter(|e| created_after.map_or(true, |after| e.created_at > after))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn active_by_payer(&self, payer_id: UserId) -> Result<Vec<Expense>, PortError> {
        let mut matching: Vec<Expense> = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.payer_id == payer_id && e.is_active())
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

/// In-memory settlement store
#[derive(Default)]
pub struct InMemorySettlements {
    settlements: Mutex<Vec<Settlement>>,
}

impl InMemorySettlements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a settlement directly, bypassing the service layer
    pub fn seed(&self, settlement: Settlement) {
        self.settlements.lock().unwrap().push(settlement);
    }

    /// Number of stored settlements, any state
    pub fn len(&self) -> usize {
        self.settlements.lock().unwrap().len()
    }

    /// Returns true when the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainPort for InMemorySettlements {}

#[async_trait]
impl SettlementPort for InMemorySettlements {
    async fn insert(&self, settlement: Settlement) -> Result<(), PortError> {
        let mut settlements = self.settlements.lock().unwrap();
        if settlements.iter().any(|s| s.id == settlement.id) {
            return Err(PortError::conflict(format!(
                "Settlement {} already exists",
                settlement.id
            )));
        }
        settlements.push(settlement);
        Ok(())
    }

    async fn update(&self, settlement: Settlement) -> Result<(), PortError> {
        let mut settlements = self.settlements.lock().unwrap();
        match settlements.iter_mut().find(|s| s.id == settlement.id) {
            Some(stored) => {
                *stored = settlement;
                Ok(())
            }
            None => Err(PortError::not_found("Settlement", settlement.id)),
        }
    }

    async fn delete(&self, id: SettlementId) -> Result<(), PortError> {
        let mut settlements = self.settlements.lock().unwrap();
        let before = settlements.len();
        settlements.retain(|s| s.id != id);
        if settlements.len() == before {
            return Err(PortError::not_found("Settlement", id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SettlementId) -> Result<Settlement, PortError> {
        self.settlements
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Settlement", id))
    }

    async fn find_open(
        &self,
        household_id: HouseholdId,
    ) -> Result<Option<Settlement>, PortError> {
        Ok(self
            .settlements
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.household_id == household_id && s.status == SettlementStatus::Open)
            .cloned())
    }

    async fn latest_finalized(
        &self,
        household_id: HouseholdId,
    ) -> Result<Option<Settlement>, PortError> {
        Ok(self
            .settlements
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                s.household_id == household_id && s.status == SettlementStatus::Finalized
            })
            .max_by_key(|s| s.period_end)
            .cloned())
    }

    async fn history(
        &self,
        household_id: HouseholdId,
        limit: usize,
    ) -> Result<Vec<Settlement>, PortError> {
        let mut matching: Vec<Settlement> = self
            .settlements
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.household_id == household_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}
