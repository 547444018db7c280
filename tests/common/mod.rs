//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from any test file.

#![allow(dead_code)]

use foliodb::{
    DocId, Document, DocumentStore, Error, FromDocument, IndexSpec, MemoryEngine, Predicate,
    Result, SortDirection, Value, TRANSIENT_PREFIX,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;

// ============================================================================
// Person - the typed record used across suites
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl FromDocument for Person {
    fn from_document(doc: &Document) -> Result<Self> {
        let id = match doc.id() {
            DocId::Int(n) => *n,
            other => return Err(Error::Mapping(format!("unexpected id {}", other))),
        };
        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Mapping("missing field 'name'".into()))?
            .to_string();
        let age = doc
            .get("age")
            .and_then(Value::as_int)
            .ok_or_else(|| Error::Mapping("missing field 'age'".into()))?;
        Ok(Person { id, name, age })
    }
}

// ============================================================================
// Dataset builders
// ============================================================================

/// Seed `people` with 25 records, ages spread over 18..40 with exactly
/// five of age 22, inserted in a seeded-random order.
pub fn seed_people(engine: &MemoryEngine) -> Vec<Person> {
    let mut people: Vec<Person> = (0..25)
        .map(|i| Person {
            id: i as i64,
            // names count down so name order differs from id order
            name: format!("name-{:02}", 24 - i),
            age: if i % 5 == 0 {
                22
            } else {
                // keep 22 exclusive to the branch above
                match 18 + (i as i64 % 22) {
                    22 => 23,
                    age => age,
                }
            },
        })
        .collect();

    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    people.shuffle(&mut rng);

    let docs = people
        .iter()
        .map(|p| {
            Document::new(p.id)
                .with("name", p.name.clone())
                .with("age", p.age)
        })
        .collect();
    engine.insert_bulk("people", docs).unwrap();
    people
}

/// Everyone in the dataset with the given age, sorted by name ascending.
pub fn expected_by_name(people: &[Person], age: i64) -> Vec<Person> {
    let mut matched: Vec<Person> = people.iter().filter(|p| p.age == age).cloned().collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));
    matched
}

pub fn transient_names(engine: &impl DocumentStore) -> Vec<String> {
    engine
        .collection_names()
        .unwrap()
        .into_iter()
        .filter(|n| n.starts_with(TRANSIENT_PREFIX))
        .collect()
}

pub fn assert_no_transients(engine: &impl DocumentStore) {
    let leaked = transient_names(engine);
    assert!(leaked.is_empty(), "leaked transient collections: {:?}", leaked);
}

// ============================================================================
// FlakyStore - failure injection at each pipeline stage
// ============================================================================

/// Which operation to fail with an injected storage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    None,
    CreateCollection,
    CreateIndex,
    InsertBulk,
    Scan,
    FindSorted,
    /// Point lookups return `Ok(None)` as if the document was deleted.
    VanishOnLookup,
}

/// A `DocumentStore` wrapper that fails one chosen operation.
///
/// Seeding goes through [`FlakyStore::inner`] so only the pipeline hits
/// the fail point.
pub struct FlakyStore {
    pub inner: MemoryEngine,
    pub fail: FailPoint,
}

impl FlakyStore {
    pub fn new(fail: FailPoint) -> Self {
        FlakyStore {
            inner: MemoryEngine::new(),
            fail,
        }
    }

    fn injected(&self, op: &str) -> Error {
        Error::Storage(format!("injected failure in {}", op))
    }
}

impl DocumentStore for FlakyStore {
    fn create_collection(&self, name: &str) -> Result<()> {
        if self.fail == FailPoint::CreateCollection {
            return Err(self.injected("create_collection"));
        }
        self.inner.create_collection(name)
    }

    fn drop_collection(&self, name: &str) -> Result<bool> {
        self.inner.drop_collection(name)
    }

    fn collection_exists(&self, name: &str) -> Result<bool> {
        self.inner.collection_exists(name)
    }

    fn collection_names(&self) -> Result<Vec<String>> {
        self.inner.collection_names()
    }

    fn create_index(&self, collection: &str, spec: IndexSpec) -> Result<()> {
        if self.fail == FailPoint::CreateIndex {
            return Err(self.injected("create_index"));
        }
        self.inner.create_index(collection, spec)
    }

    fn insert_bulk(&self, collection: &str, docs: Vec<Document>) -> Result<usize> {
        if self.fail == FailPoint::InsertBulk {
            return Err(self.injected("insert_bulk"));
        }
        self.inner.insert_bulk(collection, docs)
    }

    fn scan(&self, collection: &str, predicate: &Predicate) -> Result<Vec<Document>> {
        if self.fail == FailPoint::Scan {
            return Err(self.injected("scan"));
        }
        self.inner.scan(collection, predicate)
    }

    fn find_sorted(
        &self,
        collection: &str,
        index: &str,
        direction: SortDirection,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Document>> {
        if self.fail == FailPoint::FindSorted {
            return Err(self.injected("find_sorted"));
        }
        self.inner.find_sorted(collection, index, direction, skip, limit)
    }

    fn find_by_id(&self, collection: &str, id: &DocId) -> Result<Option<Document>> {
        if self.fail == FailPoint::VanishOnLookup {
            return Ok(None);
        }
        self.inner.find_by_id(collection, id)
    }

    fn delete(&self, collection: &str, id: &DocId) -> Result<bool> {
        self.inner.delete(collection, id)
    }
}
