//! Test doubles and fixtures.
//!
//! Kept in the library (not `#[cfg(test)]`) so integration tests and host
//! applications can reuse them.

use async_trait::async_trait;

use crate::error::{PreviewError, Result};
use crate::traits::backend::StorageBackend;
use crate::types::template::{FieldSchema, FieldType};

/// Backend that fails on demand, for exercising persistence errors.
pub struct FailingBackend {
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingBackend {
    /// Fail every read and write.
    pub fn new() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
        }
    }

    /// Fail writes only; reads return empty slots.
    pub fn writes() -> Self {
        Self {
            fail_reads: false,
            fail_writes: true,
        }
    }

    /// Fail reads only; writes are discarded successfully.
    pub fn reads() -> Self {
        Self {
            fail_reads: true,
            fail_writes: false,
        }
    }

    fn failure(op: &str, slot: &str) -> PreviewError {
        PreviewError::Storage(format!("injected {op} failure for slot '{slot}'").into())
    }
}

impl Default for FailingBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for FailingBackend {
    async fn load(&self, slot: &str) -> Result<Option<String>> {
        if self.fail_reads {
            Err(Self::failure("read", slot))
        } else {
            Ok(None)
        }
    }

    async fn store(&self, slot: &str, _payload: &str) -> Result<()> {
        if self.fail_writes {
            Err(Self::failure("write", slot))
        } else {
            Ok(())
        }
    }
}

/// A representative field set covering every field type.
pub fn sample_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::new("company name", FieldType::Text),
        FieldSchema::new("contract amount", FieldType::Number),
        FieldSchema::new("signing date", FieldType::Date),
        FieldSchema::new("status", FieldType::Select).with_options(["draft", "signed", "expired"]),
        FieldSchema::new("summary", FieldType::Textarea),
        FieldSchema::new("renewable", FieldType::Boolean),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_backend_modes() {
        let both = FailingBackend::new();
        assert!(both.load("x").await.is_err());
        assert!(both.store("x", "").await.is_err());

        let writes = FailingBackend::writes();
        assert_eq!(writes.load("x").await.unwrap(), None);
        assert!(writes.store("x", "").await.is_err());

        let reads = FailingBackend::reads();
        assert!(reads.load("x").await.is_err());
        assert!(reads.store("x", "").await.is_ok());
    }

    #[test]
    fn test_sample_fields_cover_all_types() {
        let fields = sample_fields();
        assert_eq!(fields.len(), 6);
        assert!(fields.iter().any(|f| f.field_type == FieldType::Select));
    }
}
