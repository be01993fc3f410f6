//! The build manifest: which papers to convert and how to label them.
//!
//! The LogLine series is a fixed, hand-curated list, so it ships compiled in
//! ([`default_manifest`]). A JSON file with the same record shape can replace
//! it ([`load_manifest`]) without rebuilding the binary:
//!
//! ```json
//! [
//!   {
//!     "file": "00_Prologue_Ethics_is_Efficient.md",
//!     "number": "PAPER 00 • PROLOGUE",
//!     "title": "Ethics is Efficient",
//!     "description": "One-page thesis and system invariants."
//!   }
//! ]
//! ```

use crate::error::Papers2HtmlError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One document to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Markdown file name, relative to the source directory.
    pub file: String,
    /// Short label shown above the title, e.g. `PAPER IV`.
    pub number: String,
    /// Display title.
    pub title: String,
    /// One-line summary used for the `<meta name="description">` tag.
    pub description: String,
}

impl DocumentEntry {
    pub fn new(
        file: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            number: number.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// File name of the generated page: the source name with an `.html`
    /// extension.
    pub fn output_file_name(&self) -> PathBuf {
        let name = Path::new(&self.file)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.file));
        name.with_extension("html")
    }
}

/// The nine papers of the LogLine series, in reading order.
pub fn default_manifest() -> Vec<DocumentEntry> {
    vec![
        DocumentEntry::new(
            "00_Prologue_Ethics_is_Efficient.md",
            "PAPER 00 • PROLOGUE",
            "Ethics is Efficient",
            "One-page thesis and system invariants. The foundation of LogLine's architectural philosophy.",
        ),
        DocumentEntry::new(
            "01_From_Silicon_to_User.md",
            "PAPER 0",
            "From Silicon to User",
            "Economic rationale: accountability reduces total cost through structural constraints.",
        ),
        DocumentEntry::new(
            "02_I_The_LogLine_Protocol.md",
            "PAPER I",
            "The LogLine Protocol",
            "The 9-field tuple. Ghost records. Threat model. The core mechanism for accountability.",
        ),
        DocumentEntry::new(
            "03_II_JSON_Atomic.md",
            "PAPER II",
            "JSON✯Atomic",
            "Deterministic canonicalization. Same meaning = same bytes. Cryptographic stability.",
        ),
        DocumentEntry::new(
            "04_III_LLLV.md",
            "PAPER III",
            "LLLV",
            "Ledger and Proof Vectors. Proof-carrying retrieval. Evidence capsules.",
        ),
        DocumentEntry::new(
            "05_IV_TDLN.md",
            "PAPER IV",
            "TDLN",
            "Deterministic Translation of Natural Language. Policy compilation. Consent protocol.",
        ),
        DocumentEntry::new(
            "06_V_SIRP.md",
            "PAPER V",
            "SIRP",
            "Secure Intent Routing Protocol. Network transport. Capsules. Cryptographic receipts.",
        ),
        DocumentEntry::new(
            "07_Hardware_as_Text_and_Power.md",
            "SYNTHESIS",
            "Hardware as Text and Power",
            "Substrate theory: signed text becomes structural power at the silicon level.",
        ),
        DocumentEntry::new(
            "08_Chip_as_Code.md",
            "PAPER VI",
            "Chip as Code",
            "Computational realization. Hardware as backend. Policy execution in silicon.",
        ),
    ]
}

/// Parse a manifest from a JSON string.
pub fn parse_manifest(json: &str) -> Result<Vec<DocumentEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read a JSON manifest from disk.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<DocumentEntry>, Papers2HtmlError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Papers2HtmlError::ManifestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_manifest(&json).map_err(|e| Papers2HtmlError::ManifestParse {
        path: path.to_path_buf(),
        source: e,
    })
}
