//! Core Kernel - Foundational types and utilities for the household ledger
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Integer-cents money with overflow-checked arithmetic (no floats, no rounding)
//! - Settlement period temporal types
//! - Strongly-typed identifiers
//! - Port infrastructure for the persistence seam

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Cents, MoneyError};
pub use temporal::{SettlementPeriod, TemporalError};
pub use identifiers::{
    UserId, HouseholdId, ExpenseId, ExpenseShareId, SettlementId,
};
pub use ports::{PortError, DomainPort};
