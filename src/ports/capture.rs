//! Document capture port: file picker / camera scan producing a viewable URL.

use std::path::Path;

/// A captured document ready to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedDocument {
    /// Viewable location of the captured file.
    pub url: String,
    /// User-supplied label.
    pub label: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait DocumentCapture: Send + Sync {
    /// Capture the document at `source` under `label`.
    ///
    /// # Errors
    /// Returns `CaptureError` if the source cannot be read.
    fn capture(&self, source: &Path, label: &str) -> Result<CapturedDocument, CaptureError>;
}
