//! FolioDB - Embedded document store with disposable sort-index pagination
//!
//! FolioDB answers "give me page N of this match set, sorted by an
//! arbitrary expression" against a document collection that has no index
//! on that expression. Matching documents are copied into a transient
//! collection carrying a single-purpose sort index, the page is pulled
//! with an ordered skip/limit traversal, and the transient collection is
//! dropped before the call returns, on every exit path.
//!
//! # Quick Start
//!
//! ```
//! use foliodb::{paginate, Document, DocumentStore, MemoryEngine, PageQuery, Predicate};
//!
//! let engine = MemoryEngine::new();
//! engine.insert_bulk(
//!     "people",
//!     vec![
//!         Document::new(1i64).with("name", "Noor").with("age", 22),
//!         Document::new(2i64).with("name", "Ada").with("age", 22),
//!         Document::new(3i64).with("name", "Max").with("age", 31),
//!     ],
//! )?;
//!
//! let query = PageQuery::new("people", Predicate::eq("age", 22)?, "name")?.page(0, 10);
//! let page: Vec<Document> = paginate(&engine, &query)?;
//! assert_eq!(page[0].get("name"), Some(&"Ada".into()));
//! # Ok::<(), foliodb::Error>(())
//! ```

pub use folio_core::{DocId, Document, Error, FieldPath, Result, Value, ID_FIELD};
pub use folio_engine::{
    DocumentStore, IndexSpec, KeyExtract, MemoryEngine, Predicate, SortDirection,
};
pub use folio_paginate::{
    paginate, FromDocument, PageQuery, Strategy, TransientCollection, ORDER_BY_FIELD,
    SORT_INDEX, TRANSIENT_PREFIX,
};
