//! # papers2html
//!
//! Build the LogLine paper series from Markdown into standalone HTML pages.
//!
//! ## Why this crate?
//!
//! The papers are written in a small, predictable Markdown dialect with a
//! `key: value` front-matter block. A full CommonMark engine is not needed;
//! an ordered chain of regex rewrite stages handles exactly that dialect and
//! keeps fenced code untouched. Each page embeds its stylesheet, so the output
//! directory can be published as-is.
//!
//! ## Pipeline Overview
//!
//! ```text
//! manifest entry
//!  │
//!  ├─ 1. Input     read <source_dir>/<file> (tokio::fs)
//!  ├─ 2. Metadata  front-matter → DocumentMetadata
//!  ├─ 3. Markdown  ordered rewrite stages → HTML fragment
//!  ├─ 4. Page      fragment + metadata + defaults → full HTML document
//!  └─ 5. Write     <output_dir>/<stem>.html (temp file + rename)
//! ```
//!
//! Documents run concurrently; a failure in one is recorded in its
//! [`DocumentResult`] and the batch carries on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use papers2html::{build_site, BuildConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BuildConfig::builder()
//!         .source_dir("docs/papers/LogLine_Papers_v1.0.1")
//!         .output_dir("website/papers")
//!         .build()?;
//!     let output = build_site(&config).await?;
//!     eprintln!(
//!         "Build complete: {} papers built, {} errors",
//!         output.stats.built, output.stats.failed
//!     );
//!     Ok(())
//! }
//! ```
//!
//! The two core transforms are plain functions on `&str`:
//!
//! ```rust
//! use papers2html::{extract_metadata, markdown_to_html};
//!
//! let src = "---\ntitle: Foo\nversion: 1.0.1\n---\n\nBody";
//! assert_eq!(extract_metadata(src).get("title"), Some("Foo"));
//! assert_eq!(markdown_to_html(src), "<p>Body</p>");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `papers2html` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! papers2html = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod build;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use build::{build_document, build_site, build_site_sync, render_document};
pub use config::{BuildConfig, BuildConfigBuilder, PageDefaults, SiteConfig};
pub use error::{DocumentError, Papers2HtmlError};
pub use manifest::{default_manifest, load_manifest, parse_manifest, DocumentEntry};
pub use output::{BuildOutput, BuildStats, DocumentMetadata, DocumentResult, RenderedPage};
pub use pipeline::frontmatter::extract_metadata;
pub use pipeline::markdown::markdown_to_html;
pub use progress::{BuildProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{build_stream, DocumentStream};
