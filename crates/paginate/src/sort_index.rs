//! Sort index construction on the transient collection
//!
//! The index is created BEFORE any document enters the transient
//! collection. That ordering is a hard precondition of the pipeline, not
//! an optimization: the engine maintains indexes incrementally on insert,
//! so building first means the bulk copy pays for index maintenance as it
//! streams and no separate rebuild pass ever runs.

use crate::materialize::Strategy;
use crate::transient::TransientCollection;
use folio_core::{FieldPath, Result};
use folio_engine::{DocumentStore, IndexSpec};

/// Name of the single sort index on every transient collection
pub const SORT_INDEX: &str = "order_by";

/// Projection field holding the evaluated sort key (projected-copy only)
pub const ORDER_BY_FIELD: &str = "order_by";

/// Create the ascending sort index on an (empty) transient collection
///
/// Full-copy rows carry complete documents, so the index evaluates the
/// caller's sort expression directly. Projected-copy rows carry only
/// `{_id, order_by}` with the expression already evaluated during
/// materialization, so the index reads the stored field verbatim: a
/// second expression evaluation would fan out array-valued keys again
/// and order the two strategies differently.
pub(crate) fn build_sort_index<E>(
    engine: &E,
    tmp: &TransientCollection<'_, E>,
    strategy: Strategy,
    sort_by: &FieldPath,
) -> Result<()>
where
    E: DocumentStore + ?Sized,
{
    let spec = match strategy {
        Strategy::FullCopy => IndexSpec::new(SORT_INDEX, sort_by.clone()),
        Strategy::ProjectedCopy => IndexSpec::field(SORT_INDEX, ORDER_BY_FIELD),
    };
    engine.create_index(tmp.name(), spec)
}
