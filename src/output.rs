//! Result types returned by the build entry points.
//!
//! Everything here is `Serialize` so `papers2html --json` can dump a full
//! build report without a parallel set of DTOs.

use crate::error::{DocumentError, Papers2HtmlError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Front-matter key/value pairs of one document.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// is sorted by key so debug and JSON output are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentMetadata(BTreeMap<String, String>);

impl DocumentMetadata {
    /// Insert a pair, replacing any earlier value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, treating an empty string as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DocumentMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Self::default();
        for (k, v) in iter {
            meta.insert(k, v);
        }
        meta
    }
}

/// A fully rendered page, before it is written anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    /// Front-matter of the source document.
    pub metadata: DocumentMetadata,
    /// The Markdown body as an HTML fragment.
    pub content: String,
    /// The complete HTML document (fragment merged into the page shell).
    pub html: String,
}

/// Outcome of building a single document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// Position of the document in the manifest (0-indexed).
    pub index: usize,
    /// Source file name as listed in the manifest.
    pub file: String,
    /// Where the page was (or would have been) written.
    pub output_path: PathBuf,
    /// Front-matter extracted from the source; empty on failure.
    pub metadata: DocumentMetadata,
    /// Byte length of the written HTML page; 0 on failure.
    pub html_len: usize,
    /// Wall-clock time spent on this document.
    pub duration_ms: u64,
    /// Set when the document could not be built.
    pub error: Option<DocumentError>,
}

impl DocumentResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate counters for a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Documents listed in the manifest.
    pub total: usize,
    /// Documents written successfully.
    pub built: usize,
    /// Documents that failed.
    pub failed: usize,
    /// Wall-clock time for the whole build.
    pub duration_ms: u64,
}

/// Everything a build produced.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    /// Per-document results in manifest order.
    pub documents: Vec<DocumentResult>,
    pub stats: BuildStats,
}

impl BuildOutput {
    /// Iterate over the documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter(|d| !d.is_success())
    }

    /// Treat any per-document failure as a fatal error.
    pub fn into_result(self) -> Result<Self, Papers2HtmlError> {
        if self.stats.failed > 0 {
            return Err(Papers2HtmlError::PartialFailure {
                built: self.stats.built,
                failed: self.stats.failed,
                total: self.stats.total,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: usize, error: Option<DocumentError>) -> DocumentResult {
        DocumentResult {
            index,
            file: format!("{index:02}.md"),
            output_path: PathBuf::from(format!("{index:02}.html")),
            metadata: DocumentMetadata::default(),
            html_len: 0,
            duration_ms: 0,
            error,
        }
    }

    #[test]
    fn metadata_insert_overwrites() {
        let mut meta = DocumentMetadata::default();
        meta.insert("version", "1.0.0");
        meta.insert("version", "1.0.1");
        assert_eq!(meta.get("version"), Some("1.0.1"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn metadata_non_empty_treats_blank_as_absent() {
        let meta: DocumentMetadata = [("thesis", ""), ("author", "A")].into_iter().collect();
        assert_eq!(meta.non_empty("thesis"), None);
        assert_eq!(meta.non_empty("author"), Some("A"));
        assert_eq!(meta.non_empty("missing"), None);
    }

    #[test]
    fn metadata_serialises_as_plain_object() {
        let meta: DocumentMetadata = [("title", "Foo"), ("author", "Bar")].into_iter().collect();
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"author":"Bar","title":"Foo"}"#);
    }

    #[test]
    fn into_result_ok_without_failures() {
        let out = BuildOutput {
            documents: vec![result(0, None)],
            stats: BuildStats {
                total: 1,
                built: 1,
                failed: 0,
                duration_ms: 3,
            },
        };
        assert!(out.into_result().is_ok());
    }

    #[test]
    fn into_result_err_on_failure() {
        let out = BuildOutput {
            documents: vec![
                result(0, None),
                result(
                    1,
                    Some(DocumentError::SourceNotFound {
                        path: PathBuf::from("01.md"),
                    }),
                ),
            ],
            stats: BuildStats {
                total: 2,
                built: 1,
                failed: 1,
                duration_ms: 3,
            },
        };
        assert_eq!(out.failures().count(), 1);
        let err = out.into_result().unwrap_err();
        assert!(err.to_string().contains("1/2"), "got: {err}");
    }
}
