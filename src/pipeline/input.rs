//! Input resolution: read one Markdown source from disk.
//!
//! Failures are classified into [`DocumentError`] variants so the report can
//! tell "file missing" apart from "no permission" or "not UTF-8", and the
//! batch simply moves on to the next paper.

use crate::error::DocumentError;
use std::path::Path;
use tracing::debug;

/// Read the Markdown source at `path`.
pub async fn read_source(path: &Path) -> Result<String, DocumentError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DocumentError::from_read(path, &e))?;
    debug!("Read {} ({} bytes)", path.display(), text.len());
    Ok(text)
}
