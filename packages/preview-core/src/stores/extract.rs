//! The extract store: templates, results, and their lifecycle rules.
//!
//! One store owns both collections so that deleting a template and its
//! dependent results is a single logical operation. All mutations apply to
//! memory first and then mirror the affected collection into the backend;
//! a persistence failure is surfaced to the caller and recorded in
//! [`ExtractStore::last_error`], but the in-memory change is kept (accepted
//! inconsistency window for a client-side cache, not a transactional log).

use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::{PreviewError, Result};
use crate::traits::backend::{StorageBackend, RESULTS_SLOT, TEMPLATES_SLOT};
use crate::types::result::{ExtractHistory, ExtractResult, NewExtractResult, ResultUpdate};
use crate::types::template::{ExtractTemplate, FieldSchema, TemplateUpdate};

/// Store for extraction templates and results.
///
/// Generic over its persistence backend so tests can inject doubles
/// instead of touching real storage.
pub struct ExtractStore<B: StorageBackend> {
    backend: B,
    templates: RwLock<Vec<ExtractTemplate>>,
    results: RwLock<Vec<ExtractResult>>,
    last_error: RwLock<Option<String>>,
}

impl<B: StorageBackend> ExtractStore<B> {
    /// Create an empty store over a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            templates: RwLock::new(Vec::new()),
            results: RwLock::new(Vec::new()),
            last_error: RwLock::new(None),
        }
    }

    /// Load both collections from the backend.
    ///
    /// Read failures degrade to an empty collection with a logged
    /// diagnostic; startup never fails on bad storage.
    pub async fn load(&self) {
        match self.load_slot::<ExtractTemplate>(TEMPLATES_SLOT).await {
            Ok(templates) => *self.templates.write().unwrap() = templates,
            Err(e) => warn!(slot = TEMPLATES_SLOT, error = %e, "failed to load templates, starting empty"),
        }
        match self.load_slot::<ExtractResult>(RESULTS_SLOT).await {
            Ok(results) => *self.results.write().unwrap() = results,
            Err(e) => warn!(slot = RESULTS_SLOT, error = %e, "failed to load results, starting empty"),
        }
    }

    async fn load_slot<T: serde::de::DeserializeOwned>(&self, slot: &str) -> Result<Vec<T>> {
        match self.backend.load(slot).await? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Create a template with a fresh id and timestamps.
    pub async fn create_template(
        &self,
        fields: Vec<FieldSchema>,
        is_active: bool,
    ) -> Result<ExtractTemplate> {
        self.clear_error();
        let template = ExtractTemplate::new(fields, is_active);
        self.templates.write().unwrap().push(template.clone());
        self.persist_templates().await?;
        Ok(template)
    }

    /// Apply a partial update to a template and bump `updated_at`.
    pub async fn update_template(
        &self,
        id: &str,
        update: TemplateUpdate,
    ) -> Result<ExtractTemplate> {
        self.clear_error();
        let updated = {
            let mut templates = self.templates.write().unwrap();
            let template = templates
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| PreviewError::TemplateNotFound { id: id.to_string() })?;

            if let Some(fields) = update.fields {
                template.fields = fields;
            }
            if let Some(active) = update.is_active {
                template.is_active = active;
            }
            template.updated_at = chrono::Utc::now();
            template.clone()
        };
        self.persist_templates().await?;
        Ok(updated)
    }

    /// Delete a template and cascade to every result referencing it.
    ///
    /// Both in-memory removals happen before any persistence write, so the
    /// visible state never contains a result pointing at a deleted
    /// template.
    pub async fn delete_template(&self, id: &str) -> Result<()> {
        self.clear_error();
        {
            let mut templates = self.templates.write().unwrap();
            let position = templates
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| PreviewError::TemplateNotFound { id: id.to_string() })?;
            templates.remove(position);
        }
        let removed = {
            let mut results = self.results.write().unwrap();
            let before = results.len();
            results.retain(|r| r.template_id != id);
            before - results.len()
        };
        debug!(template_id = id, cascaded = removed, "deleted template");

        self.persist_templates().await?;
        self.persist_results().await?;
        Ok(())
    }

    /// Look up a template by id.
    pub fn template(&self, id: &str) -> Option<ExtractTemplate> {
        self.templates
            .read()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Templates offered for new extraction runs.
    pub fn active_templates(&self) -> Vec<ExtractTemplate> {
        self.templates
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect()
    }

    /// All templates, in creation order.
    pub fn templates(&self) -> Vec<ExtractTemplate> {
        self.templates.read().unwrap().clone()
    }

    /// Number of stored templates.
    pub fn template_count(&self) -> usize {
        self.templates.read().unwrap().len()
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Save a new extraction result at the front of the history.
    ///
    /// Fails with `TemplateNotFound` when the referenced template does not
    /// exist; orphan results cannot be created.
    pub async fn save_result(&self, new: NewExtractResult) -> Result<ExtractResult> {
        self.clear_error();
        if self.template(&new.template_id).is_none() {
            return Err(PreviewError::TemplateNotFound {
                id: new.template_id,
            });
        }

        let now = chrono::Utc::now();
        let result = ExtractResult {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: new.template_id,
            file_id: new.file_id,
            data: new.data,
            confidence: new.confidence.clamp(0.0, 1.0),
            created_at: now,
            updated_at: now,
        };
        // Prepend so iteration order is newest-first
        self.results.write().unwrap().insert(0, result.clone());
        self.persist_results().await?;
        Ok(result)
    }

    /// Apply a partial update to a result and bump `updated_at`.
    pub async fn update_result(&self, id: &str, update: ResultUpdate) -> Result<ExtractResult> {
        self.clear_error();
        let updated = {
            let mut results = self.results.write().unwrap();
            let result = results
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| PreviewError::ResultNotFound { id: id.to_string() })?;

            if let Some(data) = update.data {
                result.data = data;
            }
            if let Some(confidence) = update.confidence {
                result.confidence = confidence.clamp(0.0, 1.0);
            }
            result.updated_at = chrono::Utc::now();
            result.clone()
        };
        self.persist_results().await?;
        Ok(updated)
    }

    /// Delete a result by id.
    pub async fn delete_result(&self, id: &str) -> Result<()> {
        self.clear_error();
        {
            let mut results = self.results.write().unwrap();
            let position = results
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| PreviewError::ResultNotFound { id: id.to_string() })?;
            results.remove(position);
        }
        self.persist_results().await?;
        Ok(())
    }

    /// Results for a template, newest first.
    pub fn results_by_template(&self, template_id: &str) -> Vec<ExtractResult> {
        self.results
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.template_id == template_id)
            .cloned()
            .collect()
    }

    /// Results for a source file, newest first.
    pub fn results_by_file(&self, file_id: &str) -> Vec<ExtractResult> {
        self.results
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.file_id == file_id)
            .cloned()
            .collect()
    }

    /// All results, newest first.
    pub fn results(&self) -> Vec<ExtractResult> {
        self.results.read().unwrap().clone()
    }

    /// Number of stored results.
    pub fn result_count(&self) -> usize {
        self.results.read().unwrap().len()
    }

    /// A page of history, 1-indexed, newest first.
    ///
    /// Out-of-range pages yield an empty slice with the true total.
    pub fn history(&self, page: usize, page_size: usize) -> ExtractHistory {
        let results = self.results.read().unwrap();
        let total = results.len();

        let slice = if page == 0 || page_size == 0 {
            Vec::new()
        } else {
            let start = (page - 1).saturating_mul(page_size);
            results
                .iter()
                .skip(start)
                .take(page_size)
                .cloned()
                .collect()
        };

        ExtractHistory {
            results: slice,
            total,
            page,
            page_size,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Last persistence failure message, if any.
    ///
    /// Mirrors the in-memory/durable divergence so a host can surface it;
    /// cleared at the start of every mutation.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().unwrap().clone()
    }

    /// Clear the recorded persistence failure.
    pub fn clear_error(&self) {
        *self.last_error.write().unwrap() = None;
    }

    async fn persist_templates(&self) -> Result<()> {
        let payload = {
            let templates = self.templates.read().unwrap();
            serde_json::to_string(&*templates)?
        };
        self.write_slot(TEMPLATES_SLOT, payload).await
    }

    async fn persist_results(&self) -> Result<()> {
        let payload = {
            let results = self.results.read().unwrap();
            serde_json::to_string(&*results)?
        };
        self.write_slot(RESULTS_SLOT, payload).await
    }

    async fn write_slot(&self, slot: &str, payload: String) -> Result<()> {
        match self.backend.store(slot, &payload).await {
            Ok(()) => {
                debug!(slot, bytes = payload.len(), "persisted");
                Ok(())
            }
            Err(e) => {
                *self.last_error.write().unwrap() = Some(e.to_string());
                Err(e)
            }
        }
    }
}
