//! Extraction results and the paged history view.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Extracted values keyed by field name, in template field order.
pub type ExtractData = IndexMap<String, serde_json::Value>;

/// One completed extraction run's output.
///
/// `template_id` is a non-owning back-reference; the store guarantees it
/// points at an existing template for the whole life of the result
/// (cascade deletion removes results with their template).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResult {
    /// Unique result id
    pub id: String,

    /// Template this run used
    pub template_id: String,

    /// Source document identifier
    pub file_id: String,

    /// Extracted values keyed by field name
    pub data: ExtractData,

    /// Overall confidence in [0, 1]
    pub confidence: f32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for saving a new extraction result.
///
/// The store assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewExtractResult {
    pub template_id: String,
    pub file_id: String,
    pub data: ExtractData,
    pub confidence: f32,
}

impl NewExtractResult {
    /// Create a result input for a template and source file.
    pub fn new(template_id: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            file_id: file_id.into(),
            data: ExtractData::new(),
            confidence: 0.0,
        }
    }

    /// Set the extracted data map.
    pub fn with_data(mut self, data: ExtractData) -> Self {
        self.data = data;
        self
    }

    /// Set the confidence score, clamped to [0, 1].
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// Partial update applied to a stored result.
#[derive(Debug, Clone, Default)]
pub struct ResultUpdate {
    pub data: Option<ExtractData>,
    pub confidence: Option<f32>,
}

impl ResultUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the data map.
    pub fn data(mut self, data: ExtractData) -> Self {
        self.data = Some(data);
        self
    }

    /// Replace the confidence score, clamped to [0, 1].
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}

/// A page of extraction history, newest first.
///
/// Derived view over the result store's ordering; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractHistory {
    /// The requested page slice
    pub results: Vec<ExtractResult>,

    /// Total results in the store, across all pages
    pub total: usize,

    /// 1-indexed page number as requested
    pub page: usize,

    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        let result = NewExtractResult::new("t1", "f1").with_confidence(1.7);
        assert_eq!(result.confidence, 1.0);
        let update = ResultUpdate::new().confidence(-0.2);
        assert_eq!(update.confidence, Some(0.0));
    }

    #[test]
    fn test_data_preserves_field_order() {
        let mut data = ExtractData::new();
        data.insert("zeta".into(), serde_json::json!(1));
        data.insert("alpha".into(), serde_json::json!(2));
        let keys: Vec<_> = data.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
