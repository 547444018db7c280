//! folio-paginate: sorted pages without a persistent sort index
//!
//! ## Design
//!
//! A base collection can answer "which documents match?" through its own
//! indexes, but not "give me page N sorted by an arbitrary expression"
//! unless an index on that exact expression exists. Building a permanent
//! index for a transient sort is wasteful, so [`paginate`] materializes
//! the match set into a disposable collection instead:
//!
//! 1. acquire a uniquely named transient collection (scoped handle)
//! 2. create the ascending sort index on it, before any insert
//! 3. copy the match set in (full documents, or an `{_id, order_by}`
//!    projection, per [`Strategy`])
//! 4. walk the index with skip/limit to pull the requested window
//! 5. hydrate rows into typed records via [`FromDocument`]
//! 6. drop the transient collection, on every exit path
//!
//! The pipeline holds no state across calls and is side-effect-free from
//! the caller's viewpoint: the base collection is only read, and no
//! transient artifact survives the call, success or failure.
//!
//! ## Example
//!
//! ```
//! use folio_core::Document;
//! use folio_engine::{DocumentStore, MemoryEngine, Predicate, SortDirection};
//! use folio_paginate::{paginate, PageQuery, Strategy};
//!
//! let engine = MemoryEngine::new();
//! engine.insert_bulk(
//!     "people",
//!     (0..30)
//!         .map(|i| {
//!             Document::new(i as i64)
//!                 .with("name", format!("person-{:02}", 29 - i))
//!                 .with("age", 20 + (i as i64 % 3))
//!         })
//!         .collect(),
//! )?;
//!
//! let query = PageQuery::new("people", Predicate::eq("age", 21)?, "name")?
//!     .direction(SortDirection::Ascending)
//!     .page(1, 4)
//!     .strategy(Strategy::ProjectedCopy);
//!
//! let page: Vec<Document> = paginate(&engine, &query)?;
//! assert!(page.len() <= 4);
//! # Ok::<(), folio_core::Error>(())
//! ```

mod extract;
mod hydrate;
mod materialize;
mod query;
mod sort_index;
mod transient;

pub use hydrate::FromDocument;
pub use materialize::Strategy;
pub use query::PageQuery;
pub use sort_index::{ORDER_BY_FIELD, SORT_INDEX};
pub use transient::{TransientCollection, TRANSIENT_PREFIX};

use folio_core::Result;
use folio_engine::DocumentStore;
use tracing::debug;

/// Retrieve one sorted page of the match set
///
/// Validates the request, then runs the transient-collection pipeline.
/// The page is at most `page_size` records, in the requested order;
/// a window past the end of the match set is an empty vector, never an
/// error.
///
/// # Errors
/// - `Validation`: bad page window; nothing was created
/// - `IndexCreation`, `Materialization`: pipeline-stage failures
/// - `Mapping`: a projected id vanished from the base collection
///   (retryable; re-run the query)
///
/// All failure paths release the transient collection before returning.
pub fn paginate<T, E>(engine: &E, query: &PageQuery) -> Result<Vec<T>>
where
    T: FromDocument,
    E: DocumentStore + ?Sized,
{
    let (skip, limit) = query.window()?;

    let tmp = transient::TransientCollection::acquire(engine)?;
    let outcome = run_pipeline(engine, &tmp, query, skip, limit);
    let released = tmp.release();

    // The pipeline error is the actionable one; the release already ran.
    let page = outcome?;
    released?;
    Ok(page)
}

fn run_pipeline<T, E>(
    engine: &E,
    tmp: &TransientCollection<'_, E>,
    query: &PageQuery,
    skip: usize,
    limit: usize,
) -> Result<Vec<T>>
where
    T: FromDocument,
    E: DocumentStore + ?Sized,
{
    sort_index::build_sort_index(engine, tmp, query.strategy, &query.sort_by)?;
    let copied = materialize::materialize(
        engine,
        tmp,
        &query.collection,
        &query.predicate,
        &query.sort_by,
        query.strategy,
    )?;
    let rows = extract::extract_page(engine, tmp, query.direction, skip, limit)?;
    debug!(
        collection = %query.collection,
        copied,
        page_index = query.page_index,
        rows = rows.len(),
        "extracted page"
    );
    hydrate::hydrate(engine, &query.collection, rows, query.strategy)
}
