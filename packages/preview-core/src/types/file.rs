//! Classified file references.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type tag for a previewable file.
///
/// The set is closed: hosts pick a renderer per tag, so new tags require a
/// new renderer on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
    Video,
    Office,
    Xmind,
    Bim,
    Cad,
    Text,
}

impl FileType {
    /// All known file types, in table order.
    pub const ALL: [FileType; 8] = [
        FileType::Pdf,
        FileType::Image,
        FileType::Video,
        FileType::Office,
        FileType::Xmind,
        FileType::Bim,
        FileType::Cad,
        FileType::Text,
    ];

    /// The lowercase tag used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Office => "office",
            FileType::Xmind => "xmind",
            FileType::Bim => "bim",
            FileType::Cad => "cad",
            FileType::Text => "text",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFileType(s.to_string()))
    }
}

/// Error for a file-type tag outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFileType(pub String);

impl fmt::Display for UnknownFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown file type: {}", self.0)
    }
}

impl std::error::Error for UnknownFileType {}

/// A classified reference to a previewable file.
///
/// Records are immutable once classified: re-create via
/// [`FileRecord::from_url`] instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File type tag
    #[serde(rename = "type")]
    pub file_type: FileType,

    /// File URL or data URI
    pub url: String,

    /// Optional file metadata
    #[serde(default, skip_serializing_if = "FileMeta::is_empty")]
    pub meta: FileMeta,
}

impl FileRecord {
    /// Create a record with an explicit type tag.
    pub fn new(file_type: FileType, url: impl Into<String>) -> Self {
        Self {
            file_type,
            url: url.into(),
            meta: FileMeta::default(),
        }
    }

    /// Classify a URL and build its record.
    ///
    /// Uses the metadata's MIME type (or a data-URI's embedded MIME) before
    /// falling back to extension lookup.
    pub fn from_url(url: impl Into<String>, meta: FileMeta) -> Self {
        let url = url.into();
        let mime = meta
            .mime_type
            .clone()
            .or_else(|| crate::classify::mime_from_data_uri(&url));
        let file_type = crate::classify::classify(&url, mime.as_deref());
        Self {
            file_type,
            url,
            meta: FileMeta { mime_type: mime, ..meta },
        }
    }

    /// Attach metadata.
    pub fn with_meta(mut self, meta: FileMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// Metadata attached to a file record.
///
/// `extra` carries any host-specific keys beyond the well-known ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl FileMeta {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.size.is_none()
            && self.mime_type.is_none()
            && self.last_modified.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_round_trip() {
        for t in FileType::ALL {
            assert_eq!(t.as_str().parse::<FileType>().unwrap(), t);
        }
        assert!("zip".parse::<FileType>().is_err());
    }

    #[test]
    fn test_file_type_serde_lowercase() {
        let json = serde_json::to_string(&FileType::Office).unwrap();
        assert_eq!(json, "\"office\"");
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = FileRecord::new(FileType::Pdf, "https://example.com/a.pdf");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "pdf");
        assert_eq!(json["url"], "https://example.com/a.pdf");
    }

    #[test]
    fn test_from_url_prefers_meta_mime() {
        let meta = FileMeta::new().with_mime_type("image/png");
        let record = FileRecord::from_url("https://example.com/download", meta);
        assert_eq!(record.file_type, FileType::Image);
    }
}
