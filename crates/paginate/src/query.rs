//! Page requests and their validation
//!
//! Validation runs before any transient resource is created: a rejected
//! request leaves the engine untouched.

use crate::materialize::Strategy;
use folio_core::{Error, FieldPath, Result};
use folio_engine::{Predicate, SortDirection};

/// One page request against a base collection
///
/// # Example
///
/// ```
/// use folio_engine::{Predicate, SortDirection};
/// use folio_paginate::{PageQuery, Strategy};
///
/// let query = PageQuery::new("people", Predicate::eq("age", 22)?, "name")?
///     .direction(SortDirection::Ascending)
///     .page(0, 10)
///     .strategy(Strategy::ProjectedCopy);
/// # Ok::<(), folio_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Base collection to query (read-only from this subsystem)
    pub collection: String,
    /// Match condition selecting the result set
    pub predicate: Predicate,
    /// Expression producing the sort key per document
    pub sort_by: FieldPath,
    /// Requested sort order
    pub direction: SortDirection,
    /// 0-based page index
    pub page_index: u64,
    /// Rows per page; must be positive
    pub page_size: u64,
    /// How much data to copy into the transient collection
    pub strategy: Strategy,
}

impl PageQuery {
    /// Build a query with defaults: ascending, page 0 of 10, full copy
    pub fn new(
        collection: impl Into<String>,
        predicate: Predicate,
        sort_by: &str,
    ) -> Result<Self> {
        Ok(PageQuery {
            collection: collection.into(),
            predicate,
            sort_by: FieldPath::parse(sort_by)?,
            direction: SortDirection::Ascending,
            page_index: 0,
            page_size: 10,
            strategy: Strategy::FullCopy,
        })
    }

    /// Set the sort direction (builder pattern)
    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set page index and size (builder pattern)
    pub fn page(mut self, page_index: u64, page_size: u64) -> Self {
        self.page_index = page_index;
        self.page_size = page_size;
        self
    }

    /// Set the materialization strategy (builder pattern)
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate the request and compute the extraction window
    ///
    /// Returns `(skip, limit)` for the ordered index traversal.
    ///
    /// # Errors
    /// `Validation` on an empty collection name, zero page size, or a
    /// `page_index × page_size` product that overflows.
    pub fn window(&self) -> Result<(usize, usize)> {
        if self.collection.is_empty() {
            return Err(Error::Validation("collection name is empty".into()));
        }
        if self.page_size == 0 {
            return Err(Error::Validation(
                "page_size must be greater than zero".into(),
            ));
        }
        let skip = self
            .page_index
            .checked_mul(self.page_size)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "page window overflows: page_index {} x page_size {}",
                    self.page_index, self.page_size
                ))
            })?;
        let skip = usize::try_from(skip).map_err(|_| {
            Error::Validation(format!("page window {} exceeds addressable range", skip))
        })?;
        let limit = usize::try_from(self.page_size).map_err(|_| {
            Error::Validation(format!(
                "page_size {} exceeds addressable range",
                self.page_size
            ))
        })?;
        Ok((skip, limit))
    }
}
