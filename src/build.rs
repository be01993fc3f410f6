//! Eager (whole-site) build entry points.
//!
//! [`build_site`] reads every document in the manifest, renders it and writes
//! the page, collecting a [`DocumentResult`] per document. A document that
//! fails (missing source, unwritable output) is recorded and skipped; the
//! rest of the batch carries on. Use [`crate::stream::build_stream`] to
//! receive results as they complete instead.

use crate::config::BuildConfig;
use crate::error::{DocumentError, Papers2HtmlError};
use crate::manifest::DocumentEntry;
use crate::output::{BuildOutput, BuildStats, DocumentMetadata, DocumentResult, RenderedPage};
use crate::pipeline::{frontmatter, input, markdown, page, write};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Build every document in `config.documents`.
///
/// # Returns
/// `Ok(BuildOutput)` once all documents were attempted, even if some failed
/// (check `output.stats.failed`, or call [`BuildOutput::into_result`]).
///
/// # Errors
/// Returns `Err(Papers2HtmlError)` only when the output directory cannot be
/// created.
pub async fn build_site(config: &BuildConfig) -> Result<BuildOutput, Papers2HtmlError> {
    let start = Instant::now();
    let total = config.documents.len();
    info!(
        "Building {} documents from {} into {}",
        total,
        config.source_dir.display(),
        config.output_dir.display()
    );

    ensure_output_dir(config).await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_build_start(total);
    }

    let mut documents: Vec<DocumentResult> =
        stream::iter(config.documents.iter().enumerate().map(|(index, entry)| {
            build_document_with_progress(index, entry, config)
        }))
        .buffer_unordered(config.concurrency)
        .collect()
        .await;

    // Completion order is arbitrary; report in manifest order.
    documents.sort_by_key(|d| d.index);

    let built = documents.iter().filter(|d| d.is_success()).count();
    let stats = BuildStats {
        total,
        built,
        failed: total - built,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Build complete: {} papers built, {} errors ({}ms)",
        stats.built, stats.failed, stats.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_build_complete(total, built);
    }

    Ok(BuildOutput { documents, stats })
}

/// Synchronous wrapper around [`build_site`].
///
/// Creates a temporary tokio runtime internally; do not call it from inside
/// an async context.
pub fn build_site_sync(config: &BuildConfig) -> Result<BuildOutput, Papers2HtmlError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Papers2HtmlError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(build_site(config))
}

/// Build a single document: read, render, write.
///
/// Never returns an error; a failure is recorded in
/// [`DocumentResult::error`].
pub async fn build_document(index: usize, entry: &DocumentEntry, config: &BuildConfig) -> DocumentResult {
    let start = Instant::now();
    let output_path = config.output_path(entry);

    let outcome = async {
        let markdown = input::read_source(&config.source_path(entry)).await?;
        let rendered = render_document(entry, &markdown, config);
        write::write_page(&output_path, &rendered.html).await?;
        Ok::<_, DocumentError>(rendered)
    }
    .await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match outcome {
        Ok(rendered) => {
            debug!(
                "Built {} -> {} in {}ms",
                entry.file,
                output_path.display(),
                duration_ms
            );
            DocumentResult {
                index,
                file: entry.file.clone(),
                output_path,
                metadata: rendered.metadata,
                html_len: rendered.html.len(),
                duration_ms,
                error: None,
            }
        }
        Err(e) => {
            warn!("Error building {}: {}", entry.file, e);
            DocumentResult {
                index,
                file: entry.file.clone(),
                output_path,
                metadata: DocumentMetadata::default(),
                html_len: 0,
                duration_ms,
                error: Some(e),
            }
        }
    }
}

/// Render one document without touching the file system.
///
/// Front-matter extraction and Markdown conversion both run on the raw
/// source; neither depends on the other.
pub fn render_document(entry: &DocumentEntry, source: &str, config: &BuildConfig) -> RenderedPage {
    let metadata = frontmatter::extract_metadata(source);
    let content = markdown::markdown_to_html(source);
    let html = page::render_page(entry, &content, &metadata, &config.defaults, &config.site);
    RenderedPage {
        metadata,
        content,
        html,
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────

pub(crate) async fn ensure_output_dir(config: &BuildConfig) -> Result<(), Papers2HtmlError> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| Papers2HtmlError::OutputDirFailed {
            path: config.output_dir.clone(),
            source: e,
        })
}

/// [`build_document`] wrapped in the configured progress callbacks.
pub(crate) async fn build_document_with_progress(
    index: usize,
    entry: &DocumentEntry,
    config: &BuildConfig,
) -> DocumentResult {
    let total = config.documents.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_start(index, total, &entry.file);
    }

    let result = build_document(index, entry, config).await;

    if let Some(ref cb) = config.progress_callback {
        match &result.error {
            None => cb.on_document_complete(index, total, &entry.file, result.html_len),
            Some(e) => cb.on_document_error(index, total, &entry.file, &e.to_string()),
        }
    }
    result
}
