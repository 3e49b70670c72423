//! In-memory persistence backend for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::backend::StorageBackend;

/// In-memory slot storage.
///
/// Useful for tests and ephemeral sessions; contents are lost on drop.
#[derive(Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot directly, bypassing the trait.
    pub fn put(&self, slot: &str, payload: &str) {
        self.slots
            .write()
            .unwrap()
            .insert(slot.to_string(), payload.to_string());
    }

    /// Read a slot directly, bypassing the trait.
    pub fn get(&self, slot: &str) -> Option<String> {
        self.slots.read().unwrap().get(slot).cloned()
    }

    /// Number of written slots.
    pub fn slot_count(&self) -> usize {
        self.slots.read().unwrap().len()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.read().unwrap().get(slot).cloned())
    }

    async fn store(&self, slot: &str, payload: &str) -> Result<()> {
        self.slots
            .write()
            .unwrap()
            .insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("extract-templates").await.unwrap(), None);

        backend.store("extract-templates", "[]").await.unwrap();
        assert_eq!(
            backend.load("extract-templates").await.unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(backend.slot_count(), 1);
    }

    #[tokio::test]
    async fn test_store_replaces() {
        let backend = MemoryBackend::new();
        backend.store("slot", "a").await.unwrap();
        backend.store("slot", "b").await.unwrap();
        assert_eq!(backend.load("slot").await.unwrap(), Some("b".to_string()));
    }
}
