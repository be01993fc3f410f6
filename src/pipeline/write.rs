//! Output: write a rendered page to disk.
//!
//! Pages are written to a sibling temp file and renamed into place, so a
//! crash or a full disk never leaves a half-written page for the web server
//! to serve.

use crate::error::DocumentError;
use std::path::Path;
use tracing::debug;

/// Atomically write `html` to `path`.
pub async fn write_page(path: &Path, html: &str) -> Result<(), DocumentError> {
    let failed = |e: std::io::Error| DocumentError::WriteFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    };

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, html).await.map_err(failed)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(failed(e));
    }

    debug!("Wrote {} ({} bytes)", path.display(), html.len());
    Ok(())
}
