//! Error taxonomy for the todo service.
//!
//! # Design
//! Two categories and nothing more: the caller sent something unusable
//! (`InvalidBody`, `InvalidTitle`, `InvalidId`) or the store failed
//! (`Storage`). A well-formed identifier that matches no document is *not*
//! an error anywhere in the service — update and delete report success on
//! zero matches.

use std::fmt;

/// Errors surfaced by the todo service.
///
/// The `Display` text of the validation variants is the exact message sent
/// back in the JSON error body. `Storage` keeps the driver's message for the
/// log line; the response body carries an operation-specific summary instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The request body could not be read or decoded as JSON.
    InvalidBody,

    /// The title was empty after decoding.
    InvalidTitle,

    /// The identifier does not parse as a storage key.
    InvalidId,

    /// The persistence layer failed. Never retried; surfaced immediately.
    Storage(String),
}

impl TodoError {
    /// Wraps any storage-layer failure, keeping only its message.
    pub fn storage(err: impl fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// True for the variants that are the caller's fault (HTTP 400).
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoError::InvalidBody => write!(f, "Invalid request body"),
            TodoError::InvalidTitle => write!(f, "Title is required"),
            TodoError::InvalidId => write!(f, "Invalid ID"),
            TodoError::Storage(msg) => write!(f, "storage failure: {msg}"),
        }
    }
}

impl std::error::Error for TodoError {}
