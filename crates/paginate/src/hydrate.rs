//! Hydration: turning extracted rows into typed records
//!
//! Full-copy rows already hold complete documents and map straight
//! through the [`FromDocument`] impl. Projected-copy rows hold only
//! `{_id, order_by}`, so each id is re-fetched from the base collection
//! first (a point lookup per row).
//!
//! An id that no longer resolves means the document was deleted between
//! materialization and extraction. That is surfaced as a retryable
//! `Mapping` error, never silently skipped: a short page would hide the
//! consistency gap from the caller, who must decide between accepting a
//! stale page and re-running the query.

use crate::materialize::Strategy;
use folio_core::{Document, Error, Result};
use folio_engine::DocumentStore;

/// Mapping contract from stored documents to typed records
///
/// `Document` implements it trivially, so callers that want raw documents
/// can paginate without defining a record type.
pub trait FromDocument: Sized {
    /// Build a record from a stored document
    ///
    /// # Errors
    /// `Mapping` when required fields are missing or of the wrong type.
    fn from_document(doc: &Document) -> Result<Self>;
}

impl FromDocument for Document {
    fn from_document(doc: &Document) -> Result<Self> {
        Ok(doc.clone())
    }
}

/// Map extracted rows to typed records, re-fetching projections
pub(crate) fn hydrate<T, E>(
    engine: &E,
    base: &str,
    rows: Vec<Document>,
    strategy: Strategy,
) -> Result<Vec<T>>
where
    T: FromDocument,
    E: DocumentStore + ?Sized,
{
    match strategy {
        Strategy::FullCopy => rows.iter().map(T::from_document).collect(),
        Strategy::ProjectedCopy => rows
            .iter()
            .map(|row| {
                let full = engine.find_by_id(base, row.id())?.ok_or_else(|| {
                    Error::Mapping(format!(
                        "document {} vanished from '{}' between materialization and hydration",
                        row.id(),
                        base
                    ))
                })?;
                T::from_document(&full)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Value;
    use folio_engine::MemoryEngine;

    #[derive(Debug, PartialEq)]
    struct Person {
        name: String,
        age: i64,
    }

    impl FromDocument for Person {
        fn from_document(doc: &Document) -> Result<Self> {
            let name = doc
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Mapping("missing field 'name'".into()))?
                .to_string();
            let age = doc
                .get("age")
                .and_then(Value::as_int)
                .ok_or_else(|| Error::Mapping("missing field 'age'".into()))?;
            Ok(Person { name, age })
        }
    }

    fn person_doc(id: i64) -> Document {
        Document::new(id).with("name", format!("p{}", id)).with("age", 20 + id)
    }

    #[test]
    fn test_full_copy_maps_directly() {
        let engine = MemoryEngine::new();
        let rows = vec![person_doc(1), person_doc(2)];
        let people: Vec<Person> = hydrate(&engine, "people", rows, Strategy::FullCopy).unwrap();
        assert_eq!(
            people,
            vec![
                Person { name: "p1".into(), age: 21 },
                Person { name: "p2".into(), age: 22 },
            ]
        );
    }

    #[test]
    fn test_projected_copy_refetches_from_base() {
        let engine = MemoryEngine::new();
        engine
            .insert_bulk("people", vec![person_doc(1), person_doc(2)])
            .unwrap();

        // projection rows carry no payload fields
        let rows = vec![Document::new(2i64), Document::new(1i64)];
        let people: Vec<Person> =
            hydrate(&engine, "people", rows, Strategy::ProjectedCopy).unwrap();
        assert_eq!(people[0].name, "p2");
        assert_eq!(people[1].name, "p1");
    }

    #[test]
    fn test_vanished_id_is_mapping_error() {
        let engine = MemoryEngine::new();
        engine.insert_bulk("people", vec![person_doc(1)]).unwrap();

        let rows = vec![Document::new(99i64)];
        let err = hydrate::<Person, _>(&engine, "people", rows, Strategy::ProjectedCopy)
            .unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_mapping_failure_propagates() {
        let engine = MemoryEngine::new();
        let rows = vec![Document::new(1i64)]; // no fields at all
        let err = hydrate::<Person, _>(&engine, "people", rows, Strategy::FullCopy)
            .unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
    }
}
