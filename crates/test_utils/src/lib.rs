//! Shared test utilities for the household ledger
//!
//! Provides deterministic in-memory adapters for every port, builder
//! patterns for constructing test data with sensible defaults, and
//! common fixtures.

pub mod memory;
pub mod builders;
pub mod fixtures;

pub use memory::{
    InMemoryExpenses, InMemoryHouseholds, InMemorySettlements, InMemoryUserDirectory,
};
pub use builders::ExpenseBuilder;
pub use fixtures::{household, ordered_users, user};
