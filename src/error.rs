//! Error types for the papers2html library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Papers2HtmlError`] is **fatal**. The build cannot proceed at all
//!   (invalid configuration, unreadable manifest, output directory cannot be
//!   created). Returned as `Err(Papers2HtmlError)` from the `build_site*`
//!   functions.
//!
//! * [`DocumentError`] is **non-fatal**. One paper could not be read or
//!   written, but the rest of the batch is fine. Stored inside
//!   [`crate::output::DocumentResult`] so a single missing file never costs
//!   the other pages.
//!
//! The Markdown transformer and the front-matter extractor have no error type
//! at all: malformed input degrades to literal text.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the papers2html library.
///
/// Per-document failures use [`DocumentError`] and are stored in
/// [`crate::output::DocumentResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Papers2HtmlError {
    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Manifest errors ───────────────────────────────────────────────────
    /// The manifest file could not be read.
    #[error("Failed to read manifest '{path}': {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not a JSON array of document entries.
    #[error("Manifest '{path}' is not valid: {source}\nExpected a JSON array of {{file, number, title, description}} records.")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Build outcome ─────────────────────────────────────────────────────
    /// Some documents built but at least one failed.
    ///
    /// Returned by [`crate::output::BuildOutput::into_result`] when the
    /// caller wants to treat any document failure as an error.
    #[error("{failed}/{total} documents failed to build")]
    PartialFailure {
        built: usize,
        failed: usize,
        total: usize,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document.
///
/// The build continues with the remaining documents.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// The Markdown source does not exist.
    #[error("Source file not found: '{path}'")]
    SourceNotFound { path: PathBuf },

    /// The process may not read the Markdown source.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Reading the source failed for another reason (e.g. not UTF-8).
    #[error("Failed to read '{path}': {detail}")]
    SourceReadFailed { path: PathBuf, detail: String },

    /// The HTML page could not be written.
    #[error("Failed to write '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}

impl DocumentError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_read(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => DocumentError::SourceNotFound { path },
            std::io::ErrorKind::PermissionDenied => DocumentError::PermissionDenied { path },
            _ => DocumentError::SourceReadFailed {
                path,
                detail: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn partial_failure_display() {
        let e = Papers2HtmlError::PartialFailure {
            built: 8,
            failed: 1,
            total: 9,
        };
        let msg = e.to_string();
        assert!(msg.contains("1/9"), "got: {msg}");
    }

    #[test]
    fn invalid_config_display() {
        let e = Papers2HtmlError::InvalidConfig("no documents".into());
        assert_eq!(e.to_string(), "Invalid configuration: no documents");
    }

    #[test]
    fn output_dir_display_names_path() {
        let e = Papers2HtmlError::OutputDirFailed {
            path: PathBuf::from("website/papers"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("website/papers"));
    }

    #[test]
    fn read_error_classification() {
        let not_found = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(
            DocumentError::from_read("a.md", &not_found),
            DocumentError::SourceNotFound {
                path: PathBuf::from("a.md")
            }
        );

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            DocumentError::from_read("a.md", &denied),
            DocumentError::PermissionDenied { .. }
        ));

        let invalid = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let e = DocumentError::from_read("a.md", &invalid);
        assert!(e.to_string().contains("valid UTF-8"), "got: {e}");
    }

    #[test]
    fn document_error_serialises() {
        let e = DocumentError::WriteFailed {
            path: PathBuf::from("out/a.html"),
            detail: "disk full".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("WriteFailed"));
        assert!(json.contains("disk full"));
    }
}
