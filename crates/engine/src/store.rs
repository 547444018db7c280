//! DocumentStore: the storage-engine contract
//!
//! The pagination pipeline consumes a storage engine exclusively through
//! this trait; it never sees the engine's internals. Any engine that can
//! create and drop collections, maintain a named index incrementally, and
//! walk that index with skip/limit can back the pipeline.
//!
//! ## Semantics
//!
//! - `scan` returns the match set in engine-native, UNORDERED scan order.
//! - `find_sorted` walks the named index in the requested direction,
//!   skipping `skip` entries and yielding at most `limit`; windows past
//!   the end are empty, never an error.
//! - `create_index` and `insert_bulk` create the target collection when
//!   it does not exist yet. Read operations fail with
//!   `CollectionNotFound` instead.
//! - Indexes are maintained on insert: creating an index before a bulk
//!   load is cheaper than creating it after, and the pipeline depends on
//!   that ordering.

use crate::index::{IndexSpec, SortDirection};
use crate::predicate::Predicate;
use folio_core::{DocId, Document, Result};

/// Capability contract for a document storage engine
pub trait DocumentStore: Send + Sync {
    /// Create an empty collection
    ///
    /// # Errors
    /// `CollectionExists` when the name is already taken.
    fn create_collection(&self, name: &str) -> Result<()>;

    /// Drop a collection and everything in it
    ///
    /// Returns `true` when the collection existed. Dropping an absent
    /// collection is not an error; cleanup paths call this blindly.
    fn drop_collection(&self, name: &str) -> Result<bool>;

    /// Whether a collection with this name exists
    fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Names of all collections, sorted
    fn collection_names(&self) -> Result<Vec<String>>;

    /// Create an index on a collection (creating the collection if needed)
    ///
    /// # Errors
    /// `IndexCreation` when the index name is already taken on that
    /// collection.
    fn create_index(&self, collection: &str, spec: IndexSpec) -> Result<()>;

    /// Insert a batch of documents (creating the collection if needed)
    ///
    /// All maintained indexes are updated per document. Returns the number
    /// of documents inserted.
    ///
    /// # Errors
    /// `DuplicateId` when an id is already present; the batch is applied
    /// atomically (nothing is inserted on error).
    fn insert_bulk(&self, collection: &str, docs: Vec<Document>) -> Result<usize>;

    /// All documents matching the predicate, in unordered scan order
    fn scan(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Document>>;

    /// Ordered traversal of a named index with skip/limit
    fn find_sorted(
        &self,
        collection: &str,
        index: &str,
        direction: SortDirection,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document>>;

    /// Point lookup by document id
    fn find_by_id(&self, collection: &str, id: &DocId) -> Result<Option<Document>>;

    /// Delete a document by id, updating all indexes
    ///
    /// Returns `true` when the document existed.
    fn delete(&self, collection: &str, id: &DocId) -> Result<bool>;

    /// Number of documents matching the predicate
    fn count(&self, collection: &str, predicate: &Predicate) -> Result<usize> {
        Ok(self.scan(collection, predicate)?.len())
    }
}
