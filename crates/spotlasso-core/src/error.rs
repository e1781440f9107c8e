//! Error types for the selection engine.

use crate::region::RegionId;
use thiserror::Error;

/// Errors surfaced by region and point operations.
///
/// Every variant is recoverable: the session stays usable after any of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("Invalid spot template: {0}")]
    InvalidTemplate(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Region not found: {0}")]
    NotFound(RegionId),
    #[error("Another region is already being drawn")]
    AlreadyDrafting,
    #[error("No spot template loaded")]
    NotReady,
    #[error("Invalid vertex ring: {0}")]
    InvalidRing(String),
    #[error("Malformed annotation state: {0}")]
    MalformedState(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;
