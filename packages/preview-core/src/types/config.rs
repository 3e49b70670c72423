//! Viewer configuration and the rendering collaborator contract.
//!
//! This crate does no rendering. The host consumes a [`FileRecord`] plus a
//! [`ViewerConfig`] and reports back through [`ViewerEvent`] notifications.

use serde::{Deserialize, Serialize};

use crate::types::file::FileRecord;

/// Zoom bounds accepted by hosts.
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Theme mode requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

/// Configuration handed to the rendering host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Theme mode
    pub theme: Theme,

    /// Show toolbar controls
    pub toolbar: bool,

    /// Initial zoom level, clamped to [0.1, 5.0]
    pub zoom: f32,

    /// Enable file preloading
    pub preload: bool,

    /// Maximum file size for preview, in bytes
    pub max_file_size: u64,

    /// Keep rendered previews cached
    pub cache: bool,

    /// Custom CSS class hook for the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Content shown when rendering fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_content: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            toolbar: true,
            zoom: 1.0,
            preload: false,
            max_file_size: 100 * 1024 * 1024,
            cache: true,
            class_name: None,
            fallback_content: None,
        }
    }
}

impl ViewerConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the zoom level, clamped to the supported range.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self
    }

    /// Show or hide the toolbar.
    pub fn with_toolbar(mut self, toolbar: bool) -> Self {
        self.toolbar = toolbar;
        self
    }

    /// Set the preview size limit in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set fallback content for render failures.
    pub fn with_fallback_content(mut self, content: impl Into<String>) -> Self {
        self.fallback_content = Some(content.into());
        self
    }
}

/// Notification emitted by the rendering host back to the embedding app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ViewerEvent {
    /// File finished loading
    Load { file: FileRecord },

    /// Rendering failed
    Error { message: String },

    /// Load progress for large files
    Progress { loaded: u64, total: u64 },

    /// Host is ready to receive a file
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped() {
        assert_eq!(ViewerConfig::new().with_zoom(9.0).zoom, MAX_ZOOM);
        assert_eq!(ViewerConfig::new().with_zoom(0.0).zoom, MIN_ZOOM);
        assert_eq!(ViewerConfig::new().with_zoom(2.5).zoom, 2.5);
    }

    #[test]
    fn test_event_wire_shape() {
        let event = ViewerEvent::Progress { loaded: 10, total: 100 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "progress");
        assert_eq!(json["loaded"], 10);
    }
}
