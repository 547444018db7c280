//! Page extraction from the transient sort index
//!
//! An ordered traversal of the `order_by` index with skip/limit. Ties in
//! the sort key fall back to insertion order within the transient
//! collection, which follows the base engine's unordered scan order.
//! That order is stable within one call, but NOT guaranteed to match
//! base-collection order across calls. Callers needing a total order
//! should sort by a unique expression.

use crate::sort_index::SORT_INDEX;
use crate::transient::TransientCollection;
use folio_core::{Document, Result};
use folio_engine::{DocumentStore, SortDirection};

/// Pull one page window out of the transient collection, in sort order
///
/// Returns fewer than `limit` rows (possibly zero) when the window runs
/// past the end of the index; an empty page is never an error.
pub(crate) fn extract_page<E>(
    engine: &E,
    tmp: &TransientCollection<'_, E>,
    direction: SortDirection,
    skip: usize,
    limit: usize,
) -> Result<Vec<Document>>
where
    E: DocumentStore + ?Sized,
{
    engine.find_sorted(tmp.name(), SORT_INDEX, direction, skip, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::{materialize, Strategy};
    use crate::sort_index::build_sort_index;
    use folio_core::FieldPath;
    use folio_engine::{MemoryEngine, Predicate};

    fn prepared(engine: &MemoryEngine) -> TransientCollection<'_, MemoryEngine> {
        let docs = (0..7)
            .map(|i| Document::new(i as i64).with("n", i as i64))
            .collect();
        engine.insert_bulk("base", docs).unwrap();

        let tmp = TransientCollection::acquire(engine).unwrap();
        let sort_by = FieldPath::parse("n").unwrap();
        build_sort_index(engine, &tmp, Strategy::FullCopy, &sort_by).unwrap();
        materialize(engine, &tmp, "base", &Predicate::All, &sort_by, Strategy::FullCopy)
            .unwrap();
        tmp
    }

    fn ns(rows: &[Document]) -> Vec<i64> {
        rows.iter()
            .map(|d| d.get("n").unwrap().as_int().unwrap())
            .collect()
    }

    #[test]
    fn test_window_in_both_directions() {
        let engine = MemoryEngine::new();
        let tmp = prepared(&engine);

        let asc = extract_page(&engine, &tmp, SortDirection::Ascending, 2, 3).unwrap();
        assert_eq!(ns(&asc), vec![2, 3, 4]);

        let desc = extract_page(&engine, &tmp, SortDirection::Descending, 0, 3).unwrap();
        assert_eq!(ns(&desc), vec![6, 5, 4]);
    }

    #[test]
    fn test_partial_and_empty_windows() {
        let engine = MemoryEngine::new();
        let tmp = prepared(&engine);

        let tail = extract_page(&engine, &tmp, SortDirection::Ascending, 6, 3).unwrap();
        assert_eq!(ns(&tail), vec![6]);

        let past = extract_page(&engine, &tmp, SortDirection::Ascending, 40, 3).unwrap();
        assert!(past.is_empty());
    }
}
