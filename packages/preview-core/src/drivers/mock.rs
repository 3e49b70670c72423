//! Canned extraction driver for development and tests.
//!
//! Streams the fixed progress ladder 0 → 30 → 60 → 90 → completed(100),
//! pausing between steps, then synthesizes data for every template field
//! by its declared type. A real inference backend replaces this behind the
//! same [`ExtractionDriver`] contract.

use std::time::Duration;

use async_stream::stream;
use tracing::debug;

use crate::traits::driver::{EventStream, ExtractionDriver, ExtractionEvent};
use crate::types::result::ExtractData;
use crate::types::template::{ExtractTemplate, FieldSchema, FieldType};

/// Confidence reported on the terminal event.
const MOCK_CONFIDENCE: f32 = 0.85;

/// Progress checkpoints emitted before completion.
const PROGRESS_STEPS: [u8; 4] = [0, 30, 60, 90];

/// Driver producing deterministic canned extraction runs.
#[derive(Debug, Clone)]
pub struct MockDriver {
    step_delay: Duration,
    final_delay: Duration,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(1000),
            final_delay: Duration::from_millis(500),
        }
    }
}

impl MockDriver {
    /// Create a driver with the original pacing (1s steps, 500ms finish).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause between progress steps.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Set the pause before the terminal event.
    pub fn with_final_delay(mut self, delay: Duration) -> Self {
        self.final_delay = delay;
        self
    }

    /// Driver with no pacing, for tests.
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            final_delay: Duration::ZERO,
        }
    }
}

/// Synthesize a value for one field by its declared type.
///
/// Deterministic apart from the `date` rule, which uses today's date.
pub fn synthesize_field(field: &FieldSchema) -> serde_json::Value {
    let name = field.name.to_lowercase();
    match field.field_type {
        FieldType::Text => {
            let value = if name.contains("company") {
                "Acme Holdings Ltd."
            } else if name.contains("contact") {
                "Jane Doe"
            } else if name.contains("address") {
                "123 Example Street, Springfield"
            } else if name.contains("phone") {
                "+1-202-555-0138"
            } else {
                "sample text"
            };
            serde_json::json!(value)
        }
        FieldType::Number => {
            if name.contains("amount") {
                serde_json::json!(100_000)
            } else {
                serde_json::json!(1)
            }
        }
        FieldType::Date => {
            serde_json::json!(chrono::Utc::now().format("%Y-%m-%d").to_string())
        }
        FieldType::Select => {
            let choice = field
                .options
                .as_ref()
                .and_then(|o| o.first().cloned())
                .unwrap_or_else(|| "Option 1".to_string());
            serde_json::json!(choice)
        }
        FieldType::Textarea => serde_json::json!(
            "A longer block of sample content spanning several sentences, carrying the kind of detail a real extraction would return."
        ),
        FieldType::Boolean => serde_json::json!(true),
    }
}

/// Synthesize a full data map for a template, in field order.
pub fn synthesize_data(template: &ExtractTemplate) -> ExtractData {
    template
        .fields
        .iter()
        .map(|f| (f.name.clone(), synthesize_field(f)))
        .collect()
}

impl ExtractionDriver for MockDriver {
    fn extract(&self, document_id: &str, template: &ExtractTemplate) -> EventStream {
        let document_id = document_id.to_string();
        let template = template.clone();
        let step_delay = self.step_delay;
        let final_delay = self.final_delay;

        Box::pin(stream! {
            debug!(document_id = %document_id, template_id = %template.id, "mock extraction started");

            for progress in PROGRESS_STEPS {
                yield Ok(ExtractionEvent::processing(progress));
                tokio::time::sleep(step_delay).await;
            }

            tokio::time::sleep(final_delay).await;
            yield Ok(ExtractionEvent::completed(synthesize_data(&template), MOCK_CONFIDENCE));
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
