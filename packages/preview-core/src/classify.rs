//! File classification and validation.
//!
//! Pure, total functions: [`classify`] always produces a type tag and
//! [`validate`] always returns a structured verdict. Neither panics on
//! malformed input.

use crate::types::file::FileType;

/// Fixed extension-to-type table, checked in this order.
pub const SUPPORTED_EXTENSIONS: [(FileType, &[&str]); 8] = [
    (FileType::Pdf, &["pdf"]),
    (FileType::Image, &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"]),
    (FileType::Video, &["mp4", "webm", "ogg", "avi", "mov", "m3u8"]),
    (FileType::Office, &["docx", "xlsx", "pptx", "doc", "xls", "ppt"]),
    (FileType::Xmind, &["xmind"]),
    (FileType::Bim, &["ifc", "gltf", "glb"]),
    (FileType::Cad, &["dwg", "dxf"]),
    (FileType::Text, &["txt", "md", "json", "xml", "html", "css", "js", "ts"]),
];

/// Recognized extensions for a file type.
pub fn extensions_for(file_type: FileType) -> &'static [&'static str] {
    SUPPORTED_EXTENSIONS
        .iter()
        .find(|(t, _)| *t == file_type)
        .map(|(_, exts)| *exts)
        .unwrap_or(&[])
}

/// Extract the lowercased extension from a URL or filename.
///
/// Looks at the last path segment's last dot. Returns an empty string when
/// there is no extension: a dotless segment is not treated as its own
/// extension, so a URL ending in `/mp4` classifies as `text`, not video.
pub fn file_extension(url: &str) -> String {
    let filename = url.rsplit('/').next().unwrap_or("");
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Classify a URL into a file type, using a MIME hint when available.
///
/// MIME rules take priority over the extension table; anything unrecognized
/// falls back to [`FileType::Text`].
pub fn classify(url: &str, mime_hint: Option<&str>) -> FileType {
    if let Some(mime) = mime_hint {
        if mime.starts_with("image/") {
            return FileType::Image;
        }
        if mime.starts_with("video/") {
            return FileType::Video;
        }
        if mime == "application/pdf" {
            return FileType::Pdf;
        }
        if mime.contains("officedocument") || mime.contains("msword") || mime.contains("excel") {
            return FileType::Office;
        }
    }

    let extension = file_extension(url);
    for (file_type, extensions) in SUPPORTED_EXTENSIONS {
        if extensions.contains(&extension.as_str()) {
            return file_type;
        }
    }

    FileType::Text
}

/// True when the tag names one of the known file types.
pub fn is_supported_type(tag: &str) -> bool {
    FileType::ALL.iter().any(|t| t.as_str() == tag)
}

/// Structured verdict from [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Self { valid: true, error: None }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(reason.into()),
        }
    }

    /// Convert the verdict into a `Result`, for callers that propagate
    /// with `?`.
    pub fn into_result(self) -> crate::error::Result<()> {
        match self.error {
            None => Ok(()),
            Some(reason) => Err(crate::error::PreviewError::ValidationFailed { reason }),
        }
    }
}

/// Validate an unclassified file descriptor as received from a host.
///
/// Checks in order, short-circuiting on the first failure: non-empty URL,
/// non-empty type tag, type tag within the known set.
pub fn validate(file_type: &str, url: &str) -> Validation {
    if url.is_empty() {
        return Validation::fail("file URL is required");
    }
    if file_type.is_empty() {
        return Validation::fail("file type is required");
    }
    if !is_supported_type(file_type) {
        return Validation::fail(format!("file type '{file_type}' is not supported"));
    }
    Validation::ok()
}

/// True for `data:` URIs.
pub fn is_data_uri(url: &str) -> bool {
    url.starts_with("data:")
}

/// Extract the MIME type from a data URI, if present.
pub fn mime_from_data_uri(url: &str) -> Option<String> {
    let rest = url.strip_prefix("data:")?;
    let end = rest.find([';', ',']).unwrap_or(rest.len());
    let mime = &rest[..end];
    if mime.is_empty() {
        None
    } else {
        Some(mime.to_string())
    }
}

/// Format a byte count as a human-readable size (1024-based, 2 decimals).
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    // Trim trailing zeros the way "%.2f then parseFloat" would
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// True when a file exceeds the configured preview limit.
pub fn exceeds_size_limit(file_size: u64, max_size: u64) -> bool {
    file_size > max_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_extension_classifies() {
        for (expected, extensions) in SUPPORTED_EXTENSIONS {
            for ext in extensions {
                let url = format!("https://example.com/files/sample.{ext}");
                assert_eq!(classify(&url, None), expected, "extension {ext}");
            }
        }
    }

    #[test]
    fn test_unknown_extension_defaults_to_text() {
        assert_eq!(classify("https://example.com/archive.zip", None), FileType::Text);
        assert_eq!(classify("https://example.com/no-extension", None), FileType::Text);
        assert_eq!(classify("", None), FileType::Text);
    }

    #[test]
    fn test_mime_hint_beats_extension() {
        // image/* wins regardless of extension
        assert_eq!(
            classify("https://example.com/report.pdf", Some("image/png")),
            FileType::Image
        );
        assert_eq!(
            classify("https://example.com/clip.bin", Some("video/mp4")),
            FileType::Video
        );
        assert_eq!(
            classify("https://example.com/doc", Some("application/pdf")),
            FileType::Pdf
        );
        assert_eq!(
            classify(
                "https://example.com/doc",
                Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            ),
            FileType::Office
        );
        assert_eq!(classify("https://example.com/doc", Some("application/msword")), FileType::Office);
    }

    #[test]
    fn test_unmatched_mime_falls_back_to_extension() {
        assert_eq!(
            classify("https://example.com/model.dwg", Some("application/octet-stream")),
            FileType::Cad
        );
    }

    #[test]
    fn test_extension_is_case_folded() {
        assert_eq!(classify("https://example.com/SCAN.PDF", None), FileType::Pdf);
        assert_eq!(file_extension("https://example.com/A.JPEG"), "jpeg");
    }

    #[test]
    fn test_extension_uses_last_path_segment() {
        assert_eq!(file_extension("https://example.com/v1.2/manual.pdf"), "pdf");
        assert_eq!(file_extension("https://example.com/v1.2/manual"), "");
    }

    #[test]
    fn test_dotless_segment_is_not_an_extension() {
        // A path ending in a bare type-ish word has no extension to match
        assert_eq!(file_extension("https://example.com/videos/mp4"), "");
        assert_eq!(classify("https://example.com/videos/mp4", None), FileType::Text);
        // A MIME hint still classifies such URLs correctly
        assert_eq!(
            classify("https://example.com/videos/mp4", Some("video/mp4")),
            FileType::Video
        );
    }

    #[test]
    fn test_validate_checks_in_order() {
        let missing_url = validate("pdf", "");
        assert!(!missing_url.valid);
        assert!(missing_url.error.unwrap().contains("URL"));

        let missing_type = validate("", "https://example.com/a.pdf");
        assert!(!missing_type.valid);
        assert!(missing_type.error.unwrap().contains("type"));

        let unknown = validate("spreadsheet", "https://example.com/a.xls");
        assert!(!unknown.valid);
        assert!(unknown.error.unwrap().contains("spreadsheet"));

        assert!(validate("cad", "https://example.com/a.dwg").valid);
    }

    #[test]
    fn test_validation_into_result() {
        assert!(validate("pdf", "https://example.com/a.pdf").into_result().is_ok());
        let err = validate("weird", "https://example.com/a").into_result().unwrap_err();
        assert!(matches!(
            err,
            crate::error::PreviewError::ValidationFailed { .. }
        ));
    }

    #[test]
    fn test_data_uri_mime() {
        assert!(is_data_uri("data:image/png;base64,iVBOR"));
        assert_eq!(
            mime_from_data_uri("data:image/png;base64,iVBOR"),
            Some("image/png".to_string())
        );
        assert_eq!(mime_from_data_uri("data:,plain"), None);
        assert_eq!(mime_from_data_uri("https://example.com"), None);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }

    #[test]
    fn test_exceeds_size_limit() {
        assert!(exceeds_size_limit(101, 100));
        assert!(!exceeds_size_limit(100, 100));
    }
}
