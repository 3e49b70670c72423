//! Streaming extraction driver contract.
//!
//! A driver produces a forward-only, single-consumer stream of progress
//! notifications for one extraction run, terminating with exactly one
//! `completed` event carrying the extracted data. Cancellation is
//! consumer-side: drop the stream and the driver's pending work is
//! abandoned at the next suspension point.

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::result::ExtractData;
use crate::types::template::ExtractTemplate;

/// Lifecycle phase of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// Run in progress; `progress` indicates how far along
    Processing,

    /// Terminal event; `data` and `confidence` are populated
    Completed,
}

/// One notification from an extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionEvent {
    pub status: ExtractionStatus,

    /// Completion percentage, 0 to 100, monotonically increasing
    pub progress: u8,

    /// Extracted values, present only on the terminal event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractData>,

    /// Overall confidence in [0, 1], present only on the terminal event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ExtractionEvent {
    /// An in-progress notification.
    pub fn processing(progress: u8) -> Self {
        Self {
            status: ExtractionStatus::Processing,
            progress: progress.min(100),
            data: None,
            confidence: None,
        }
    }

    /// The terminal notification carrying the extracted data.
    pub fn completed(data: ExtractData, confidence: f32) -> Self {
        Self {
            status: ExtractionStatus::Completed,
            progress: 100,
            data: Some(data),
            confidence: Some(confidence.clamp(0.0, 1.0)),
        }
    }

    /// True for the terminal event.
    pub fn is_terminal(&self) -> bool {
        self.status == ExtractionStatus::Completed
    }
}

/// Stream of extraction events for one run.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ExtractionEvent>> + Send>>;

/// Stream of cumulative text snapshots for one streaming text run.
///
/// Each item is the full text produced so far, not a delta; the final item
/// is the complete text. Same single-consumer, drop-to-cancel semantics as
/// [`EventStream`].
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Producer of extraction runs.
///
/// Implementations range from canned mocks to real inference backends; the
/// consumer drives pacing by awaiting each element.
pub trait ExtractionDriver: Send + Sync {
    /// Start an extraction run for a document against a template.
    fn extract(&self, document_id: &str, template: &ExtractTemplate) -> EventStream;

    /// Short identifier for logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let processing = ExtractionEvent::processing(30);
        assert_eq!(processing.status, ExtractionStatus::Processing);
        assert_eq!(processing.progress, 30);
        assert!(!processing.is_terminal());

        let completed = ExtractionEvent::completed(ExtractData::new(), 1.5);
        assert!(completed.is_terminal());
        assert_eq!(completed.progress, 100);
        assert_eq!(completed.confidence, Some(1.0));
    }

    #[test]
    fn test_processing_progress_capped() {
        assert_eq!(ExtractionEvent::processing(250).progress, 100);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&ExtractionStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }
}
