//! Error types for the Folio document store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Validation failures are raised before any transient resource exists;
//! every later failure still releases the transient collection before
//! propagating.

use crate::document::DocId;
use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Folio document store
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied page request is malformed (zero page size,
    /// skip overflow, empty collection name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Creating a sort index failed
    #[error("Index creation failed on '{collection}.{index}': {reason}")]
    IndexCreation {
        /// Collection the index was created on
        collection: String,
        /// Index name
        index: String,
        /// What went wrong
        reason: String,
    },

    /// Copying the match set into the transient collection failed
    #[error("Materialization error: {0}")]
    Materialization(String),

    /// Mapping a stored row to a typed record failed, including a
    /// projected `_id` that no longer resolves in the base collection
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Named collection does not exist
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Collection name already taken
    #[error("Collection already exists: {0}")]
    CollectionExists(String),

    /// Document id already present in the collection
    #[error("Duplicate document id {id} in collection '{collection}'")]
    DuplicateId {
        /// Owning collection
        collection: String,
        /// The conflicting id
        id: DocId,
    },

    /// Field path could not be parsed
    #[error("Invalid field path: {0}")]
    InvalidPath(String),

    /// Engine-internal storage fault
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// True when re-running the same query may succeed (the documented
    /// staleness window between materialization and hydration)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Mapping(_))
    }
}
