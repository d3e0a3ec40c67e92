//! Expense Domain - shared household expenses and their splits
//!
//! An expense records that one member paid an amount on behalf of the
//! household; its shares record how much of that amount each participating
//! member is charged. The aggregate invariant is exact-sum splitting:
//! the shares of an EQUAL split always sum to the expense amount with no
//! rounding loss (the remainder cents go to the lowest user ids).
//!
//! Expenses exclusively own their shares. Shares are replaced wholesale on
//! update, never patched, and expenses are soft-deleted, never removed.

pub mod expense;
pub mod split;
pub mod ports;
pub mod service;
pub mod views;
pub mod error;

pub use expense::{Expense, ExpenseShare, ExpenseStatus, SplitType};
pub use split::compute_shares;
pub use ports::ExpensePort;
pub use service::{ExpenseService, NewExpense, ShareSpec, UpdateExpense};
pub use views::{ExpenseView, HouseholdView, ShareView, UserView};
pub use error::ExpenseError;
