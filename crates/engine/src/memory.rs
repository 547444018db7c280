//! MemoryEngine: reference in-memory document store
//!
//! ## Design
//!
//! One `RwLock` guards the collection registry. Readers (scan, sorted
//! find, point lookup) take the shared lock; writers take the exclusive
//! lock, so concurrent pagination calls can read the same base collection
//! while another caller mutates it. Staleness between a read and a later
//! point lookup is possible and accepted; the pagination layer surfaces
//! it as a retryable mapping error.
//!
//! ## Scan order
//!
//! `scan` iterates a `HashMap`, so the match set comes back in no
//! particular order. Nothing may rely on scan order; sort indexes exist
//! precisely because scans are unordered.

use crate::index::{Index, IndexSpec, SortDirection};
use crate::predicate::Predicate;
use crate::store::DocumentStore;
use folio_core::{DocId, Document, Error, Result, Value};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

fn duplicate_key(index: &str, collection: &str, key: &Value) -> Error {
    Error::Storage(format!(
        "unique index '{}' on '{}' rejected duplicate key {:?}",
        index, collection, key
    ))
}

struct Stored {
    seq: u64,
    doc: Document,
}

#[derive(Default)]
struct Collection {
    next_seq: u64,
    docs: HashMap<DocId, Stored>,
    indexes: BTreeMap<String, Index>,
}

impl Collection {
    fn insert_all(&mut self, name: &str, docs: Vec<Document>) -> Result<usize> {
        // Validate the whole batch before touching state: insert_bulk is
        // atomic per the DocumentStore contract.
        let mut batch_ids = HashSet::new();
        for doc in &docs {
            if self.docs.contains_key(doc.id()) || !batch_ids.insert(doc.id().clone()) {
                return Err(Error::DuplicateId {
                    collection: name.to_string(),
                    id: doc.id().clone(),
                });
            }
        }
        for index in self.indexes.values() {
            if index.spec().unique {
                // Duplicate detection must use the index's own key order:
                // cmp_total treats Int(1) and Float(1.0) as one key even
                // though they are not ==.
                let mut keys: Vec<Value> = docs.iter().map(|doc| index.key_for(doc)).collect();
                keys.sort_by(|a, b| a.cmp_total(b));
                for pair in keys.windows(2) {
                    if pair[0].cmp_total(&pair[1]) == Ordering::Equal {
                        return Err(duplicate_key(&index.spec().name, name, &pair[0]));
                    }
                }
                for key in &keys {
                    if index.contains_value(key) {
                        return Err(duplicate_key(&index.spec().name, name, key));
                    }
                }
            }
        }

        let count = docs.len();
        for doc in docs {
            let seq = self.next_seq;
            self.next_seq += 1;
            for index in self.indexes.values_mut() {
                index.insert(name, &doc, seq)?;
            }
            self.docs.insert(doc.id().clone(), Stored { seq, doc });
        }
        Ok(count)
    }
}

/// In-memory implementation of [`DocumentStore`]
///
/// Send + Sync; a single instance can back many concurrent pagination
/// calls. All state is process-local and gone on drop.
#[derive(Default)]
pub struct MemoryEngine {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryEngine {
    fn create_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(Error::CollectionExists(name.to_string()));
        }
        debug!(collection = name, "creating collection");
        collections.insert(name.to_string(), Collection::default());
        Ok(())
    }

    fn drop_collection(&self, name: &str) -> Result<bool> {
        let existed = self.collections.write().remove(name).is_some();
        if existed {
            debug!(collection = name, "dropped collection");
        }
        Ok(existed)
    }

    fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(name))
    }

    fn collection_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn create_index(&self, collection: &str, spec: IndexSpec) -> Result<()> {
        let mut collections = self.collections.write();
        let coll = collections.entry(collection.to_string()).or_default();
        if coll.indexes.contains_key(&spec.name) {
            return Err(Error::IndexCreation {
                collection: collection.to_string(),
                index: spec.name,
                reason: "index name already exists".to_string(),
            });
        }
        debug!(
            collection,
            index = %spec.name,
            key = %spec.key,
            "creating index"
        );
        let mut index = Index::new(spec);
        // Index existing documents in insertion order so late index
        // creation still yields a correct ordering.
        let mut stored: Vec<&Stored> = coll.docs.values().collect();
        stored.sort_by_key(|s| s.seq);
        for s in stored {
            index.insert(collection, &s.doc, s.seq)?;
        }
        coll.indexes.insert(index.spec().name.clone(), index);
        Ok(())
    }

    fn insert_bulk(&self, collection: &str, docs: Vec<Document>) -> Result<usize> {
        let mut collections = self.collections.write();
        let coll = collections.entry(collection.to_string()).or_default();
        coll.insert_all(collection, docs)
    }

    fn scan(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let coll = collections
            .get(collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;
        Ok(coll
            .docs
            .values()
            .filter(|s| predicate.matches(&s.doc))
            .map(|s| s.doc.clone())
            .collect())
    }

    fn find_sorted(
        &self,
        collection: &str,
        index: &str,
        direction: SortDirection,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let coll = collections
            .get(collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;
        let idx = coll.indexes.get(index).ok_or_else(|| {
            Error::Storage(format!(
                "no index '{}' on collection '{}'",
                index, collection
            ))
        })?;
        let ids = idx.scan(direction, skip, limit);
        // Index entries always point at live documents; both are updated
        // under the same write lock.
        ids.iter()
            .map(|id| {
                coll.docs
                    .get(id)
                    .map(|s| s.doc.clone())
                    .ok_or_else(|| {
                        Error::Storage(format!(
                            "index '{}' on '{}' points at missing id {}",
                            index, collection, id
                        ))
                    })
            })
            .collect()
    }

    fn find_by_id(&self, collection: &str, id: &DocId) -> Result<Option<Document>> {
        let collections = self.collections.read();
        let coll = collections
            .get(collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;
        Ok(coll.docs.get(id).map(|s| s.doc.clone()))
    }

    fn delete(&self, collection: &str, id: &DocId) -> Result<bool> {
        let mut collections = self.collections.write();
        let coll = collections
            .get_mut(collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;
        match coll.docs.remove(id) {
            Some(stored) => {
                for index in coll.indexes.values_mut() {
                    index.remove(&stored.doc, stored.seq);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
