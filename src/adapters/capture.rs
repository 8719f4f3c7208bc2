//! Local file capture: Implementation of DocumentCapture.
//!
//! Stands in for the camera/file picker. The "scan" is just the file the
//! user points at; the result is a `file://` URL the viewer can open.

use std::path::Path;

use crate::ports::{CaptureError, CapturedDocument, DocumentCapture};

/// Fallback label when the user leaves it blank.
pub const DEFAULT_DOCUMENT_LABEL: &str = "Medical Report";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileCapture;

impl LocalFileCapture {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCapture for LocalFileCapture {
    fn capture(&self, source: &Path, label: &str) -> Result<CapturedDocument, CaptureError> {
        if !source.exists() {
            return Err(CaptureError::NotFound(source.display().to_string()));
        }
        let meta = std::fs::metadata(source)?;
        if !meta.is_file() {
            return Err(CaptureError::NotAFile(source.display().to_string()));
        }

        let absolute = std::fs::canonicalize(source)?;
        let label = if label.trim().is_empty() {
            DEFAULT_DOCUMENT_LABEL.to_string()
        } else {
            label.trim().to_string()
        };

        tracing::info!(bytes = meta.len(), "Captured document '{label}'");

        Ok(CapturedDocument {
            url: format!("file://{}", absolute.display()),
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_existing_file() {
        let path = std::env::temp_dir().join(format!("careflow-capture-{}.txt", std::process::id()));
        std::fs::write(&path, b"scan").expect("write temp file");

        let doc = LocalFileCapture::new()
            .capture(&path, "  ")
            .expect("capture should succeed");
        assert!(doc.url.starts_with("file://"));
        assert_eq!(doc.label, DEFAULT_DOCUMENT_LABEL);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_capture_missing_file() {
        let err = LocalFileCapture::new()
            .capture(Path::new("/definitely/not/here.pdf"), "x")
            .expect_err("must fail");
        assert!(matches!(err, CaptureError::NotFound(_)));
    }

    #[test]
    fn test_capture_directory_rejected() {
        let err = LocalFileCapture::new()
            .capture(&std::env::temp_dir(), "x")
            .expect_err("must fail");
        assert!(matches!(err, CaptureError::NotAFile(_)));
    }
}
