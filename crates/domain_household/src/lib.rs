//! Household Domain - identity and household collaborator interface
//!
//! Identity, authentication, and membership management live outside this
//! core. This crate specifies what the ledger consumes from them: resolved
//! users, household records, and the explicit caller context every core
//! operation takes instead of reading a process-wide security context.

pub mod user;
pub mod household;
pub mod ports;

pub use user::{Caller, User};
pub use household::Household;
pub use ports::{HouseholdPort, UserDirectoryPort};
