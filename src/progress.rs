//! Progress-callback trait for per-document build events.
//!
//! Inject an [`Arc<dyn BuildProgressCallback>`] via
//! [`crate::config::BuildConfigBuilder::progress_callback`] to receive events
//! as each paper is read, rendered and written. The CLI uses this to drive its
//! progress bar; library callers can forward events anywhere without the
//! build layer knowing how.
//!
//! # Example
//!
//! ```rust
//! use papers2html::{BuildConfig, BuildProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct Counter(AtomicUsize);
//!
//! impl BuildProgressCallback for Counter {
//!     fn on_document_complete(&self, _index: usize, _total: usize, file: &str, html_len: usize) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{file}: {html_len} bytes");
//!     }
//! }
//!
//! let config = BuildConfig::builder()
//!     .progress_callback(Arc::new(Counter(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the build as it processes each document.
///
/// Documents are built concurrently, so the per-document methods may be
/// called from several tasks at once and in any order. All methods default to
/// no-ops.
pub trait BuildProgressCallback: Send + Sync {
    /// Called once before any document is read.
    fn on_build_start(&self, total: usize) {
        let _ = total;
    }

    /// Called before a document's source is read.
    ///
    /// `index` is the 0-indexed manifest position.
    fn on_document_start(&self, index: usize, total: usize, file: &str) {
        let _ = (index, total, file);
    }

    /// Called after a page was written; `html_len` is its size in bytes.
    fn on_document_complete(&self, index: usize, total: usize, file: &str, html_len: usize) {
        let _ = (index, total, file, html_len);
    }

    /// Called when a document could not be built.
    fn on_document_error(&self, index: usize, total: usize, file: &str, error: &str) {
        let _ = (index, total, file, error);
    }

    /// Called once after every document has been attempted.
    fn on_build_complete(&self, total: usize, success_count: usize) {
        let _ = (total, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BuildProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BuildConfig`].
pub type ProgressCallback = Arc<dyn BuildProgressCallback>;
