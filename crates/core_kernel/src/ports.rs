//! Ports infrastructure for the persistence seam
//!
//! Each domain defines its own port trait over this foundation; adapters
//! (a SQL database, the in-memory test backend) implement those traits.
//! The core performs no network I/O of its own: whatever error a port
//! returns is surfaced to the caller unmodified, with no local retry.
//!
//! Adapters own transactional atomicity - a write either fully commits
//! or fails as a unit.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// A unified error type that all port implementations must use, ensuring
/// consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The stored data is malformed or inconsistent
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data (e.g. a uniqueness violation)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal adapter error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker to ensure they are thread-safe and
/// usable behind `Arc<dyn Port>` in async contexts.
pub trait DomainPort: Send + Sync + 'static {}
