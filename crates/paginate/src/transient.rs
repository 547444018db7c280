//! Transient collections: scoped, disposable sort workspaces
//!
//! ## Design
//!
//! A [`TransientCollection`] is the handle returned by `acquire`: it owns
//! a uniquely named collection that exists for exactly one pagination
//! call. The name never travels as a bare string; every pipeline stage
//! goes through the handle.
//!
//! Release is unconditional. The happy path calls [`release`] explicitly
//! so drop errors surface to the caller; every other exit path (early
//! `?`, panic) hits the `Drop` impl, which removes the collection
//! best-effort and logs when even that fails. A leaked transient
//! collection is a correctness bug, not acceptable degradation.
//!
//! [`release`]: TransientCollection::release

use folio_core::{Error, Result};
use folio_engine::DocumentStore;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name prefix shared by every transient collection
pub const TRANSIENT_PREFIX: &str = "tmp_";

/// How many random names to try before giving up
const ACQUIRE_ATTEMPTS: usize = 8;

/// Scoped handle to one transient collection
pub struct TransientCollection<'e, E: DocumentStore + ?Sized> {
    engine: &'e E,
    name: String,
    armed: bool,
}

impl<'e, E: DocumentStore + ?Sized> TransientCollection<'e, E> {
    /// Create a transient collection with a collision-resistant name
    ///
    /// The name is `tmp_` plus twelve hex digits of a UUID v4. Creation
    /// reserves the name in the engine's namespace, so a concurrent call
    /// racing on the same name loses cleanly and retries.
    pub fn acquire(engine: &'e E) -> Result<Self> {
        for _ in 0..ACQUIRE_ATTEMPTS {
            let suffix = Uuid::new_v4().simple().to_string();
            let name = format!("{}{}", TRANSIENT_PREFIX, &suffix[..12]);
            match engine.create_collection(&name) {
                Ok(()) => {
                    debug!(collection = %name, "acquired transient collection");
                    return Ok(TransientCollection {
                        engine,
                        name,
                        armed: true,
                    });
                }
                Err(Error::CollectionExists(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(Error::Storage(format!(
            "could not find a free transient collection name after {} attempts",
            ACQUIRE_ATTEMPTS
        )))
    }

    /// Name of the underlying collection
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drop the underlying collection, reporting failure
    ///
    /// Consumes the handle and disarms the `Drop` guard. Dropping a
    /// partially populated or empty collection is the normal case.
    pub fn release(mut self) -> Result<()> {
        self.armed = false;
        debug!(collection = %self.name, "releasing transient collection");
        self.engine.drop_collection(&self.name).map(|_| ())
    }
}

impl<E: DocumentStore + ?Sized> Drop for TransientCollection<'_, E> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Reached on early returns and panics; release() disarms.
        if let Err(e) = self.engine.drop_collection(&self.name) {
            warn!(
                collection = %self.name,
                error = %e,
                "failed to drop transient collection during cleanup"
            );
        }
    }
}
