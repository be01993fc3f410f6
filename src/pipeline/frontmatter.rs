//! Front-matter: the `---`-delimited `key: value` block at the top of a paper.
//!
//! Papers carry their byline in a tiny YAML-like header:
//!
//! ```text
//! ---
//! title: Ethics is Efficient
//! author: "Dan Voulez"
//! version: 1.0.1
//! ---
//! ```
//!
//! This is deliberately *not* YAML. Values are plain strings, nothing is
//! nested, and a malformed line is skipped rather than rejected, so a stray
//! comment in the header never costs the reader the whole page.

use crate::output::DocumentMetadata;

/// The delimiter line that opens and closes a front-matter block.
const DELIMITER: &str = "---";

/// A front-matter block split off the top of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Text between the delimiter lines (no trailing newline).
    pub interior: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split a leading front-matter block off `text`.
///
/// The first line must be exactly `---` and a later line must be exactly
/// `---`. Returns `None` when either delimiter is missing; an unterminated
/// block is ordinary text, not front-matter.
pub fn split_front_matter(text: &str) -> Option<FrontMatter<'_>> {
    let rest = text
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix('\n'))?;

    // The block may be empty: "---\n---\n".
    let mut offset = 0usize;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches('\n') == DELIMITER {
            let interior = rest[..offset].strip_suffix('\n').unwrap_or(&rest[..offset]);
            return Some(FrontMatter {
                interior,
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    None
}

/// Extract the front-matter mapping from a raw document.
///
/// Never fails: a document without front-matter yields an empty mapping.
/// Later duplicates of a key overwrite earlier ones.
pub fn extract_metadata(markdown: &str) -> DocumentMetadata {
    let text = normalise_line_endings(markdown);
    let mut metadata = DocumentMetadata::default();

    let Some(front) = split_front_matter(&text) else {
        return metadata;
    };

    for line in front.interior.lines() {
        if let Some((key, value)) = parse_line(line) {
            metadata.insert(key, value);
        }
    }
    metadata
}

/// Parse one `key: value` line. Lines without a colon or with an empty key
/// are ignored.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(value.trim())))
}

/// Strip one layer of matching `"…"` or `'…'` quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

pub(crate) fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}
