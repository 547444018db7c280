//! Sort indexes over one collection
//!
//! An index maps an extracted key value to document ids and supports
//! ordered traversal in either direction with skip/limit. The key
//! extraction rule ([`KeyExtract`]) is fixed at creation and applied to
//! every document inserted afterward, so indexes created before a bulk
//! load are maintained incrementally instead of needing a rebuild pass.
//!
//! Entries order by `(Value::cmp_total, insertion sequence)`: equal sort
//! keys keep the order documents entered the collection. Callers must not
//! rely on any particular tie order beyond that stability.

use folio_core::{DocId, Document, Error, FieldPath, Result, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Traversal direction for ordered index scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest key first
    Ascending,
    /// Largest key first
    Descending,
}

/// How an index extracts its sort key from a document
///
/// Expression evaluation applies array fan-out (the first resolved value
/// wins), so a key that is itself an `Array` would unwrap once per
/// evaluation. Verbatim field access exists for rows whose key was
/// already evaluated upstream and must not be evaluated again.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyExtract {
    /// Evaluate a path expression (first value, array fan-out applies)
    Expr(FieldPath),
    /// Read a top-level field as stored, no expression evaluation
    Field(String),
}

impl fmt::Display for KeyExtract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyExtract::Expr(path) => write!(f, "{}", path),
            KeyExtract::Field(field) => write!(f, "{}", field),
        }
    }
}

/// Declaration of an index: name, key extraction rule, uniqueness
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpec {
    /// Index name, unique per collection
    pub name: String,
    /// Key extraction rule, fixed at creation
    pub key: KeyExtract,
    /// Reject duplicate key values
    pub unique: bool,
}

impl IndexSpec {
    /// Non-unique index on the given key expression
    pub fn new(name: impl Into<String>, key: FieldPath) -> Self {
        IndexSpec {
            name: name.into(),
            key: KeyExtract::Expr(key),
            unique: false,
        }
    }

    /// Non-unique index reading a top-level field verbatim
    pub fn field(name: impl Into<String>, field: impl Into<String>) -> Self {
        IndexSpec {
            name: name.into(),
            key: KeyExtract::Field(field.into()),
            unique: false,
        }
    }

    /// Mark the index unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Index entry key: extracted value plus insertion sequence
///
/// The sequence component makes every key distinct, which keeps equal
/// sort values in insertion order and lets `BTreeMap` hold duplicates.
#[derive(Debug, Clone)]
pub(crate) struct IndexKey {
    value: Value,
    seq: u64,
}

impl IndexKey {
    fn new(value: Value, seq: u64) -> Self {
        IndexKey { value, seq }
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp_total(&other.value)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// One maintained index over a collection
#[derive(Debug)]
pub(crate) struct Index {
    spec: IndexSpec,
    entries: BTreeMap<IndexKey, DocId>,
}

impl Index {
    pub(crate) fn new(spec: IndexSpec) -> Self {
        Index {
            spec,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// Extract the key for a document, Null when nothing resolves
    pub(crate) fn key_for(&self, doc: &Document) -> Value {
        match &self.spec.key {
            KeyExtract::Expr(path) => path.eval_first(doc),
            KeyExtract::Field(field) => doc.get(field).cloned().unwrap_or(Value::Null),
        }
    }

    /// Add an entry for a newly inserted document
    pub(crate) fn insert(&mut self, collection: &str, doc: &Document, seq: u64) -> Result<()> {
        let key = self.key_for(doc);
        if self.spec.unique && self.contains_value(&key) {
            return Err(Error::Storage(format!(
                "unique index '{}' on '{}' rejected duplicate key {:?}",
                self.spec.name, collection, key
            )));
        }
        self.entries.insert(IndexKey::new(key, seq), doc.id().clone());
        Ok(())
    }

    /// Drop the entry for a removed document
    pub(crate) fn remove(&mut self, doc: &Document, seq: u64) {
        let key = IndexKey::new(self.key_for(doc), seq);
        self.entries.remove(&key);
    }

    pub(crate) fn contains_value(&self, value: &Value) -> bool {
        let low = IndexKey::new(value.clone(), 0);
        let high = IndexKey::new(value.clone(), u64::MAX);
        self.entries.range(low..=high).next().is_some()
    }

    /// Ordered traversal with skip/limit, yielding document ids
    pub(crate) fn scan(
        &self,
        direction: SortDirection,
        skip: usize,
        limit: usize,
    ) -> Vec<DocId> {
        let ids = self.entries.values().cloned();
        match direction {
            SortDirection::Ascending => ids.skip(skip).take(limit).collect(),
            SortDirection::Descending => ids.rev().skip(skip).take(limit).collect(),
        }
    }
}
