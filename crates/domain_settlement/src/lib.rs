//! Settlement Domain - closing out the household ledger
//!
//! Periodically the household "settles": net balances are computed over the
//! period since the last finalized settlement, reduced to a small set of
//! point-to-point transfers, and frozen as a settlement snapshot. The
//! settlement lifecycle is a two-state machine (OPEN -> FINALIZED) whose
//! finalization anchors the period boundary of the next balance
//! calculation.
//!
//! # Invariants
//!
//! - a settlement's balance snapshot sums to exactly zero (closed ledger)
//! - its transfers, summed per user, reproduce those balances
//! - at most one OPEN settlement exists per household
//! - FINALIZED is terminal

pub mod settlement;
pub mod balance;
pub mod simplify;
pub mod ports;
pub mod service;
pub mod views;
pub mod error;

pub use settlement::{Settlement, SettlementBalance, SettlementStatus, SettlementTransfer};
pub use balance::BalanceAggregator;
pub use simplify::{simplify, TransferProposal};
pub use ports::SettlementPort;
pub use service::SettlementService;
pub use views::{BalancePreview, SettlementView, TransferView, UserBalanceView, UserView};
pub use error::SettlementError;
