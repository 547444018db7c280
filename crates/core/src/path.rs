//! Field paths: the sort-expression language
//!
//! A [`FieldPath`] locates values inside a document using a sequence of
//! key and index segments:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Object property | `name` |
//! | `key1.key2` | Nested property | `address.city` |
//! | `key[n]` | Property then array index | `items[0]` |
//! | `$.key` | Leading `$.` accepted and stripped | `$.name` |
//!
//! ## Evaluation
//!
//! [`FieldPath::eval`] returns every value the path resolves to. A key
//! segment applied to an array fans out over the elements, so `tags.len`
//! against `{"tags": [{"len": 1}, {"len": 2}]}` yields two values.
//! [`FieldPath::eval_first`] takes the first value and substitutes
//! `Value::Null` when the path resolves to nothing, which makes documents
//! missing the sort field group first in ascending order.
//!
//! The reserved `_id` name resolves to the document id.

use crate::document::{Document, ID_FIELD};
use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object property access
    Key(String),
    /// Array index access
    Index(usize),
}

/// A path into a document, used as the sort-key expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse a path from its string form
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`] on empty segments, bad index
    /// brackets, or an empty path.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.strip_prefix("$.").or_else(|| raw.strip_prefix('$')).unwrap_or(raw);
        if trimmed.is_empty() {
            return Err(Error::InvalidPath(format!("empty path: {:?}", raw)));
        }

        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            let (key, rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if key.is_empty() {
                return Err(Error::InvalidPath(format!(
                    "empty segment in path: {:?}",
                    raw
                )));
            }
            segments.push(PathSegment::Key(key.to_string()));

            let mut rest = rest;
            while let Some(inner) = rest.strip_prefix('[') {
                let close = inner.find(']').ok_or_else(|| {
                    Error::InvalidPath(format!("unclosed index in path: {:?}", raw))
                })?;
                let idx: usize = inner[..close].parse().map_err(|_| {
                    Error::InvalidPath(format!("bad array index in path: {:?}", raw))
                })?;
                segments.push(PathSegment::Index(idx));
                rest = &inner[close + 1..];
            }
            if !rest.is_empty() {
                return Err(Error::InvalidPath(format!(
                    "trailing characters in path: {:?}",
                    raw
                )));
            }
        }
        Ok(FieldPath { segments })
    }

    /// Path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Evaluate against a document, returning all matching values
    pub fn eval(&self, doc: &Document) -> Vec<Value> {
        let mut segments = self.segments.iter();

        let roots: Vec<&Value> = match segments.next() {
            Some(PathSegment::Key(k)) if k == ID_FIELD => {
                // _id is scalar; deeper segments resolve to nothing
                if self.segments.len() == 1 {
                    return vec![doc.id().to_value()];
                }
                return Vec::new();
            }
            Some(PathSegment::Key(k)) => match doc.get(k) {
                Some(v) => vec![v],
                None => return Vec::new(),
            },
            Some(PathSegment::Index(_)) | None => return Vec::new(),
        };

        let mut current = roots;
        for segment in segments {
            let mut next = Vec::new();
            for value in current {
                match (segment, value) {
                    (PathSegment::Key(k), Value::Object(map)) => {
                        if let Some(v) = map.get(k) {
                            next.push(v);
                        }
                    }
                    // Key against an array fans out over object elements
                    (PathSegment::Key(k), Value::Array(items)) => {
                        for item in items {
                            if let Value::Object(map) = item {
                                if let Some(v) = map.get(k) {
                                    next.push(v);
                                }
                            }
                        }
                    }
                    (PathSegment::Index(i), Value::Array(items)) => {
                        if let Some(v) = items.get(*i) {
                            next.push(v);
                        }
                    }
                    _ => {}
                }
            }
            if next.is_empty() {
                return Vec::new();
            }
            current = next;
        }

        // A terminal array fans out into its elements
        if current.len() == 1 {
            if let Value::Array(items) = current[0] {
                return items.to_vec();
            }
        }
        current.into_iter().cloned().collect()
    }

    /// First value at the path, or `Value::Null` when nothing resolves
    pub fn eval_first(&self, doc: &Document) -> Value {
        self.eval(doc).into_iter().next().unwrap_or(Value::Null)
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", k)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
