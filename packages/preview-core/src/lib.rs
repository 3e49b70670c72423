//! File Classification and Extraction Core
//!
//! The non-UI heart of a document preview host: classify files into
//! renderer tags, validate incoming file descriptors, manage extraction
//! templates and their results with durable local persistence, and stream
//! incremental extraction events from a pluggable driver.
//!
//! # Design
//!
//! - Classification and validation are pure, total functions
//! - One store owns templates and results so cascade deletion is a single
//!   logical operation from the caller's perspective
//! - Persistence is a seam ([`StorageBackend`]) with memory and JSON-file
//!   implementations; tests inject doubles
//! - Extraction is a seam ([`ExtractionDriver`]) satisfied by both the
//!   canned [`MockDriver`] and the remote [`ExtractClient`]
//! - The assistant surface (summaries, translation, tags, entities, chat)
//!   streams cumulative text snapshots; [`MockAssistant`] is the canned
//!   producer
//!
//! # Usage
//!
//! ```rust,ignore
//! use preview_core::{classify, ExtractStore, JsonFileBackend, MockDriver, ExtractionDriver};
//! use futures::StreamExt;
//!
//! let store = ExtractStore::new(JsonFileBackend::new("./state"));
//! store.load().await;
//!
//! let template = store.create_template(fields, true).await?;
//! let mut events = MockDriver::new().extract("doc-1", &template);
//! while let Some(event) = events.next().await {
//!     // surface progress; persist the terminal event via store.save_result
//! }
//! ```

pub mod ai;
pub mod classify;
pub mod drivers;
pub mod error;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{PreviewError, Result};
pub use traits::{
    backend::{StorageBackend, RESULTS_SLOT, TEMPLATES_SLOT},
    driver::{ChunkStream, EventStream, ExtractionDriver, ExtractionEvent, ExtractionStatus},
};
pub use types::{
    config::{Theme, ViewerConfig, ViewerEvent, MAX_ZOOM, MIN_ZOOM},
    file::{FileMeta, FileRecord, FileType, UnknownFileType},
    result::{ExtractData, ExtractHistory, ExtractResult, NewExtractResult, ResultUpdate},
    template::{ExtractTemplate, FieldSchema, FieldType, TemplateUpdate},
};

// Re-export the classifier and validator
pub use classify::{
    classify, exceeds_size_limit, extensions_for, file_extension, format_file_size, is_data_uri,
    is_supported_type, mime_from_data_uri, validate, Validation, SUPPORTED_EXTENSIONS,
};

// Re-export stores and backends
pub use stores::{ExtractStore, JsonFileBackend, MemoryBackend};

// Re-export drivers
pub use drivers::assistant::{Entity, MockAssistant};
pub use drivers::mock::{synthesize_data, synthesize_field, MockDriver};

// Re-export the remote client
pub use ai::{ExtractClient, ExtractResponse};
