//! folio-engine: storage-engine contract and reference implementation
//!
//! This crate defines the seam between the pagination pipeline and
//! whatever storage engine backs it:
//!
//! - [`DocumentStore`]: the capability contract (collection CRUD, named
//!   incremental indexes, unordered predicate scan, ordered skip/limit
//!   index traversal, point lookup)
//! - [`Predicate`]: engine-native match conditions
//! - [`IndexSpec`] / [`SortDirection`]: index declarations and traversal
//! - [`MemoryEngine`]: the in-memory reference engine

pub mod index;
pub mod memory;
pub mod predicate;
pub mod store;

pub use index::{IndexSpec, KeyExtract, SortDirection};
pub use memory::MemoryEngine;
pub use predicate::Predicate;
pub use store::DocumentStore;
