//! Durable-storage seam for the extract store.
//!
//! The store keeps everything in memory and mirrors it into named slots on
//! a backend. Backends are dumb key-value holders: no cross-slot atomicity,
//! no schema awareness. Payloads are JSON arrays with ISO-8601 dates.

use async_trait::async_trait;

use crate::error::Result;

/// Slot holding the serialized template collection.
pub const TEMPLATES_SLOT: &str = "extract-templates";

/// Slot holding the serialized result collection.
pub const RESULTS_SLOT: &str = "extract-results";

/// Key-value persistence backend.
///
/// Implementations must tolerate slots that were never written (return
/// `Ok(None)`) and must not interpret payloads.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read a slot's payload, `None` when the slot was never written.
    async fn load(&self, slot: &str) -> Result<Option<String>>;

    /// Write a slot's payload, replacing any previous value.
    async fn store(&self, slot: &str, payload: &str) -> Result<()>;
}
