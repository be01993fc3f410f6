//! Streaming build API: emit document results as they complete.
//!
//! Unlike the eager [`crate::build::build_site`], which returns only after
//! every document was attempted, [`build_stream`] yields one item per
//! document via a `Stream`. Items arrive in completion order; sort by
//! [`DocumentResult::index`] if manifest order matters.

use crate::build::{build_document_with_progress, ensure_output_dir};
use crate::config::BuildConfig;
use crate::error::{DocumentError, Papers2HtmlError};
use crate::output::DocumentResult;
use futures::stream::{self, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of document results.
pub type DocumentStream = Pin<Box<dyn Stream<Item = Result<DocumentResult, DocumentError>> + Send>>;

/// Build every document in `config.documents`, streaming results as they are
/// written.
///
/// Progress callbacks fire per document exactly as for
/// [`crate::build::build_site`]; the build-level start and complete events
/// are not emitted, since the caller decides when the stream is finished.
///
/// # Returns
/// - `Ok(DocumentStream)`: a stream of `Result<DocumentResult, DocumentError>`
/// - `Err(Papers2HtmlError)`: the output directory could not be created
///
/// # Example
/// ```rust,no_run
/// use papers2html::{build_stream, BuildConfig};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BuildConfig::default();
/// let mut stream = build_stream(&config).await?;
/// while let Some(doc) = stream.next().await {
///     match doc {
///         Ok(d) => println!("{}: {} bytes", d.file, d.html_len),
///         Err(e) => eprintln!("Error: {e}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn build_stream(config: &BuildConfig) -> Result<DocumentStream, Papers2HtmlError> {
    info!(
        "Starting streaming build of {} documents into {}",
        config.documents.len(),
        config.output_dir.display()
    );

    ensure_output_dir(config).await?;

    let concurrency = config.concurrency;
    let config = Arc::new(config.clone());
    let jobs: Vec<_> = config.documents.iter().cloned().enumerate().collect();

    let s = stream::iter(jobs.into_iter().map(move |(index, entry)| {
        let cfg = Arc::clone(&config);
        async move {
            let mut result = build_document_with_progress(index, &entry, &cfg).await;
            match result.error.take() {
                None => Ok(result),
                Some(err) => Err(err),
            }
        }
    }))
    .buffer_unordered(concurrency);

    Ok(Box::pin(s))
}
