//! Document and identifier types
//!
//! ## Design
//!
//! A [`Document`] is an ordered mapping from field name to [`Value`],
//! plus a [`DocId`] that is immutable once inserted and unique within its
//! owning collection.
//!
//! The `_id` field name is reserved: it never lives in the field map, so
//! no code path can mutate the id after construction. Sort expressions
//! still resolve `_id`: `FieldPath` special-cases it and yields
//! [`DocId::to_value`].

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Reserved field name that resolves to the document id
pub const ID_FIELD: &str = "_id";

/// Unique identifier for a document within one collection
///
/// Ids are totally ordered (variant rank, then value) so they can key
/// ordered containers directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocId {
    /// Numeric id
    Int(i64),
    /// String id
    String(String),
    /// Random UUID v4 id
    Uuid(Uuid),
}

impl DocId {
    /// Create a new random UUID id
    pub fn random() -> Self {
        DocId::Uuid(Uuid::new_v4())
    }

    /// Represent this id as a [`Value`] (for sort expressions over `_id`)
    pub fn to_value(&self) -> Value {
        match self {
            DocId::Int(n) => Value::Int(*n),
            DocId::String(s) => Value::String(s.clone()),
            DocId::Uuid(u) => Value::String(u.to_string()),
        }
    }
}

impl From<i64> for DocId {
    fn from(n: i64) -> Self {
        DocId::Int(n)
    }
}

impl From<i32> for DocId {
    fn from(n: i32) -> Self {
        DocId::Int(n as i64)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId::String(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        DocId::String(s)
    }
}

impl From<Uuid> for DocId {
    fn from(u: Uuid) -> Self {
        DocId::Uuid(u)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Int(n) => write!(f, "{}", n),
            DocId::String(s) => write!(f, "{}", s),
            DocId::Uuid(u) => write!(f, "{}", u),
        }
    }
}

/// A single document: id plus ordered field map
///
/// # Example
///
/// ```
/// use folio_core::{DocId, Document, Value};
///
/// let doc = Document::new(1)
///     .with("name", "Alice")
///     .with("age", 22);
/// assert_eq!(doc.get("age"), Some(&Value::Int(22)));
/// assert_eq!(doc.id(), &DocId::Int(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocId,
    fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document with the given id
    pub fn new(id: impl Into<DocId>) -> Self {
        Document {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Document id
    pub fn id(&self) -> &DocId {
        &self.id
    }

    /// Set a field (builder pattern)
    ///
    /// Setting the reserved `_id` name is a no-op; the id is fixed at
    /// construction.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field (mutating); returns the previous value if any
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let field = field.into();
        if field == ID_FIELD {
            return None;
        }
        self.fields.insert(field, value.into())
    }

    /// Get a field value
    ///
    /// `_id` is not a stored field; use [`Document::id`] or a `FieldPath`
    /// expression to resolve it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Remove a field; the reserved `_id` cannot be removed
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        if field == ID_FIELD {
            return None;
        }
        self.fields.remove(field)
    }

    /// Number of fields, excluding the implicit `_id`
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are set (the id always exists)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}
