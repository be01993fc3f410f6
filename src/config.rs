//! Configuration types for a site build.
//!
//! All build behaviour is controlled through [`BuildConfig`], built via its
//! [`BuildConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share configs across tasks and to diff two runs.

use crate::error::Papers2HtmlError;
use crate::manifest::{default_manifest, DocumentEntry};
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Configuration for building HTML pages from the paper sources.
///
/// # Example
/// ```rust
/// use papers2html::BuildConfig;
///
/// let config = BuildConfig::builder()
///     .source_dir("docs/papers")
///     .output_dir("website/papers")
///     .concurrency(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BuildConfig {
    /// Directory holding the Markdown sources. Default: `docs/papers/LogLine_Papers_v1.0.1`.
    pub source_dir: PathBuf,

    /// Directory the HTML pages are written to. Created if missing. Default: `website/papers`.
    pub output_dir: PathBuf,

    /// Documents to build, in report order. Default: [`default_manifest`].
    pub documents: Vec<DocumentEntry>,

    /// Documents built at once. Default: 4.
    ///
    /// Each document is a read, two string passes and a write, so this only
    /// bounds how many files are open at a time.
    pub concurrency: usize,

    /// Byline values used when a document's front-matter omits them.
    pub defaults: PageDefaults,

    /// Site-wide strings of the page shell.
    pub site: SiteConfig,

    /// Receives per-document events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs/papers/LogLine_Papers_v1.0.1"),
            output_dir: PathBuf::from("website/papers"),
            documents: default_manifest(),
            concurrency: 4,
            defaults: PageDefaults::default(),
            site: SiteConfig::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("source_dir", &self.source_dir)
            .field("output_dir", &self.output_dir)
            .field("documents", &self.documents.len())
            .field("concurrency", &self.concurrency)
            .field("defaults", &self.defaults)
            .field("site", &self.site)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BuildProgressCallback>"),
            )
            .finish()
    }
}

impl BuildConfig {
    /// Create a new builder for `BuildConfig`.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the Markdown source for `entry`.
    pub fn source_path(&self, entry: &DocumentEntry) -> PathBuf {
        self.source_dir.join(&entry.file)
    }

    /// Path of the generated page for `entry`.
    pub fn output_path(&self, entry: &DocumentEntry) -> PathBuf {
        self.output_dir.join(entry.output_file_name())
    }
}

/// Builder for [`BuildConfig`].
#[derive(Debug)]
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn documents(mut self, documents: Vec<DocumentEntry>) -> Self {
        self.config.documents = documents;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn defaults(mut self, defaults: PageDefaults) -> Self {
        self.config.defaults = defaults;
        self
    }

    pub fn site(mut self, site: SiteConfig) -> Self {
        self.config.site = site;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BuildConfig, Papers2HtmlError> {
        let c = &self.config;
        if c.documents.is_empty() {
            return Err(Papers2HtmlError::InvalidConfig(
                "No documents to build".into(),
            ));
        }
        if c.concurrency == 0 {
            return Err(Papers2HtmlError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &c.documents {
            let name = entry.output_file_name();
            if !seen.insert(name.clone()) {
                return Err(Papers2HtmlError::InvalidConfig(format!(
                    "Two documents would both be written to '{}'",
                    name.display()
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Page shell values ────────────────────────────────────────────────────

/// Byline fallbacks for documents whose front-matter is silent.
///
/// An empty front-matter value counts as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDefaults {
    pub author: String,
    pub institution: String,
    pub version: String,
    pub date: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            author: "Dan Voulez".into(),
            institution: "The LogLine Foundation".into(),
            version: "1.0.1".into(),
            date: "February 05, 2026".into(),
        }
    }
}

/// Site-wide strings rendered into every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Suffix of the `<title>` element.
    pub site_name: String,
    /// Organisation line in the footer.
    pub organisation: String,
    /// Repository link in the footer.
    pub repository_url: String,
    /// Target of the "back" link in the header.
    pub back_href: String,
    /// Text of the "back" link.
    pub back_label: String,
    /// Keywords prepended to the lower-cased title in `<meta name="keywords">`.
    pub keywords: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "LogLine Foundation".into(),
            organisation: "The LogLine Foundation".into(),
            repository_url: "https://github.com/LogLine-Foundation/Ethics-is-Efficient".into(),
            back_href: "../index.html".into(),
            back_label: "← Back to All Papers".into(),
            keywords: "LogLine, accountability, security, protocol".into(),
        }
    }
}
