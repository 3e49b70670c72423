//! Canned assistant surface: summaries, translation, tags, entities, chat.
//!
//! Companions to [`MockDriver`](crate::drivers::mock::MockDriver) for the
//! non-template AI operations. Text-producing calls stream cumulative
//! snapshots a few characters at a time ([`ChunkStream`]); lookup-style
//! calls resolve once after a simulated delay. A real backend replaces
//! these method-for-method.

use std::time::Duration;

use async_stream::stream;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::traits::driver::ChunkStream;

/// Characters appended per summary chunk.
const SUMMARY_STEP: usize = 5;

/// Characters appended per translation chunk.
const TRANSLATE_STEP: usize = 3;

/// Characters appended per chat chunk.
const CHAT_STEP: usize = 4;

const SUMMARY_TEXT: &str =
    "This document summarizes the main content, covering the key points and principal details.";

const TRANSLATION_EN: &str = "This is a translated text.";
const TRANSLATION_FALLBACK: &str = "Voici le texte traduit.";

/// A recognized entity within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The matched text span
    pub text: String,

    /// Entity label (person, location, amount, ...)
    pub label: String,

    /// Start offset within the document
    pub start: usize,

    /// End offset within the document
    pub end: usize,

    /// Recognition confidence in [0, 1]
    pub confidence: f32,
}

impl Entity {
    /// Create an entity span.
    pub fn new(
        text: impl Into<String>,
        label: impl Into<String>,
        start: usize,
        end: usize,
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Deterministic canned assistant for development and tests.
#[derive(Debug, Clone)]
pub struct MockAssistant {
    chunk_delay: Duration,
    lookup_delay: Duration,
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self {
            chunk_delay: Duration::from_millis(100),
            lookup_delay: Duration::from_millis(1000),
        }
    }
}

impl MockAssistant {
    /// Create an assistant with the default pacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause between text chunks.
    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Set the pause before lookup-style calls resolve.
    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }

    /// Assistant with no pacing, for tests.
    pub fn instant() -> Self {
        Self {
            chunk_delay: Duration::ZERO,
            lookup_delay: Duration::ZERO,
        }
    }

    /// Stream a document summary in growing snapshots.
    pub fn generate_summary(&self, document_id: &str) -> ChunkStream {
        debug!(document_id, "mock summary started");
        stream_text(SUMMARY_TEXT.to_string(), SUMMARY_STEP, self.chunk_delay)
    }

    /// Stream a translation of `text` into the target language.
    ///
    /// The mock ignores the source text and returns a canned string per
    /// target; the contract is the stream shape, not the content.
    pub fn translate(&self, _text: &str, target: &str) -> ChunkStream {
        let translation = if target.starts_with("en") {
            TRANSLATION_EN
        } else {
            TRANSLATION_FALLBACK
        };
        stream_text(translation.to_string(), TRANSLATE_STEP, self.chunk_delay)
    }

    /// Stream an answer to a question about a document.
    pub fn chat(&self, document_id: &str, question: &str) -> ChunkStream {
        debug!(document_id, "mock chat started");
        let answer = format!(
            "Regarding \"{question}\": the document covers this in its main sections, and the relevant details are summarized here."
        );
        stream_text(answer, CHAT_STEP, self.chunk_delay)
    }

    /// Suggest tags for a document.
    pub async fn extract_tags(&self, document_id: &str) -> Result<Vec<String>> {
        debug!(document_id, "mock tag extraction");
        tokio::time::sleep(self.lookup_delay).await;
        Ok(["contract", "agreement", "commercial", "legal"]
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Recognize entities within a document.
    pub async fn extract_entities(&self, document_id: &str) -> Result<Vec<Entity>> {
        debug!(document_id, "mock entity extraction");
        tokio::time::sleep(self.lookup_delay).await;
        Ok(vec![
            Entity::new("Jane Doe", "person", 10, 18, 0.95),
            Entity::new("Springfield", "location", 20, 31, 0.90),
            Entity::new("$100,000", "amount", 35, 43, 0.88),
        ])
    }
}

/// Stream cumulative prefixes of `text`, `step` characters at a time.
///
/// Splits on character boundaries, so multi-byte text is safe.
fn stream_text(text: String, step: usize, delay: Duration) -> ChunkStream {
    Box::pin(stream! {
        let chars: Vec<char> = text.chars().collect();
        let mut end = 0;
        while end < chars.len() {
            end = (end + step.max(1)).min(chars.len());
            yield Ok(chars[..end].iter().collect::<String>());
            tokio::time::sleep(delay).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    async fn collect(stream: ChunkStream) -> Vec<String> {
        stream.map(|c| c.unwrap()).collect().await
    }

    #[tokio::test]
    async fn test_summary_streams_growing_prefixes() {
        let chunks = collect(MockAssistant::instant().generate_summary("doc-1")).await;
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            assert!(pair[1].starts_with(&pair[0]));
            assert!(pair[1].len() > pair[0].len());
        }
        assert_eq!(chunks.last().unwrap(), SUMMARY_TEXT);
    }

    #[tokio::test]
    async fn test_translate_switches_on_target() {
        let english = collect(MockAssistant::instant().translate("source", "en")).await;
        assert_eq!(english.last().unwrap(), TRANSLATION_EN);

        let other = collect(MockAssistant::instant().translate("source", "fr")).await;
        assert_eq!(other.last().unwrap(), TRANSLATION_FALLBACK);
        assert_ne!(english.last(), other.last());
    }

    #[tokio::test]
    async fn test_chat_answer_references_question() {
        let chunks = collect(MockAssistant::instant().chat("doc-1", "payment terms")).await;
        let answer = chunks.last().unwrap();
        assert!(answer.contains("payment terms"));
        // Chunk pacing: first snapshot is a short prefix, not the whole answer
        assert!(chunks[0].chars().count() <= CHAT_STEP);
    }

    #[tokio::test]
    async fn test_multibyte_text_streams_on_char_boundaries() {
        let chunks = collect(stream_text("héllo wörld".to_string(), 2, Duration::ZERO)).await;
        assert_eq!(chunks.last().unwrap(), "héllo wörld");
        assert_eq!(chunks[0], "hé");
    }

    #[tokio::test]
    async fn test_tags_and_entities_resolve_once() {
        let assistant = MockAssistant::instant();

        let tags = assistant.extract_tags("doc-1").await.unwrap();
        assert_eq!(tags.len(), 4);
        assert!(tags.contains(&"contract".to_string()));

        let entities = assistant.extract_entities("doc-1").await.unwrap();
        assert_eq!(entities.len(), 3);
        for entity in &entities {
            assert!(entity.start < entity.end);
            assert!((0.0..=1.0).contains(&entity.confidence));
        }
        assert_eq!(entities[0].label, "person");
    }

    #[test]
    fn test_entity_confidence_clamped() {
        assert_eq!(Entity::new("x", "y", 0, 1, 1.4).confidence, 1.0);
    }
}
