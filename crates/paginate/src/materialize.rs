//! Materialization: copying the match set into the transient collection
//!
//! One pipeline serves both strategies; they differ only in how much of
//! each matching document crosses into the transient collection:
//!
//! - [`Strategy::FullCopy`] copies documents unmodified. Cost is
//!   O(matches × document size); extraction needs no second lookup.
//! - [`Strategy::ProjectedCopy`] copies `{_id, order_by}` where
//!   `order_by` is the evaluated sort key (first expression value).
//!   Strictly cheaper for large documents with small sort keys; hydration
//!   re-fetches full documents later.
//!
//! Inserts run in bounded batches so a large match set never buffers
//! twice in memory on the write side.

use crate::sort_index::ORDER_BY_FIELD;
use crate::transient::TransientCollection;
use folio_core::{Document, Error, FieldPath, Result};
use folio_engine::{DocumentStore, Predicate};
use tracing::debug;

/// Rows per bulk insert into the transient collection
const INSERT_BATCH: usize = 1024;

/// How much data the materializer copies per matching document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Copy full documents into the transient collection
    FullCopy,
    /// Copy only `{_id, order_by}`; hydrate from the base collection
    ProjectedCopy,
}

/// Copy the base match set into the transient collection
///
/// The sort index must already exist on the transient collection. Returns
/// the number of documents copied.
///
/// # Errors
/// `Materialization` when the base collection does not exist or the scan
/// fails; propagated, never swallowed.
pub(crate) fn materialize<E>(
    engine: &E,
    tmp: &TransientCollection<'_, E>,
    base: &str,
    predicate: &Predicate,
    sort_by: &FieldPath,
    strategy: Strategy,
) -> Result<u64>
where
    E: DocumentStore + ?Sized,
{
    let matches = engine
        .scan(base, predicate)
        .map_err(|e| Error::Materialization(format!("scan of '{}' failed: {}", base, e)))?;

    let mut copied: u64 = 0;
    let mut batch = Vec::with_capacity(INSERT_BATCH.min(matches.len()));
    for doc in matches {
        let row = match strategy {
            Strategy::FullCopy => doc,
            Strategy::ProjectedCopy => {
                let order_by = sort_by.eval_first(&doc);
                Document::new(doc.id().clone()).with(ORDER_BY_FIELD, order_by)
            }
        };
        batch.push(row);
        if batch.len() == INSERT_BATCH {
            copied += flush(engine, tmp, &mut batch)?;
        }
    }
    if !batch.is_empty() {
        copied += flush(engine, tmp, &mut batch)?;
    }

    debug!(
        base,
        transient = tmp.name(),
        copied,
        strategy = ?strategy,
        "materialized match set"
    );
    Ok(copied)
}

fn flush<E>(
    engine: &E,
    tmp: &TransientCollection<'_, E>,
    batch: &mut Vec<Document>,
) -> Result<u64>
where
    E: DocumentStore + ?Sized,
{
    let rows = std::mem::take(batch);
    let inserted = engine
        .insert_bulk(tmp.name(), rows)
        .map_err(|e| Error::Materialization(format!("bulk insert failed: {}", e)))?;
    Ok(inserted as u64)
}
