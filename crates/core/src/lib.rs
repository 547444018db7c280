//! folio-core: data model for the Folio document store
//!
//! This crate defines the foundational types shared by the engine and
//! the pagination pipeline:
//!
//! - [`Value`]: canonical dynamically-typed field value, with the
//!   engine-wide total order used by every sort index
//! - [`Document`] / [`DocId`]: identified, ordered field maps
//! - [`FieldPath`]: the sort-expression language
//! - [`Error`] / [`Result`]: the single error taxonomy

pub mod document;
pub mod error;
pub mod json;
pub mod path;
pub mod value;

pub use document::{DocId, Document, ID_FIELD};
pub use error::{Error, Result};
pub use path::{FieldPath, PathSegment};
pub use value::Value;
