//! Markdown → HTML: an ordered chain of text rewrites.
//!
//! The papers use a small, predictable subset of Markdown (headings, emphasis,
//! lists, tables, quotes, fenced code, links). Rather than a full CommonMark
//! parser this module runs a fixed sequence of regex and line-scanner passes,
//! each a pure `&str → String` function that can be tested on its own.
//!
//! ## Stage Order
//!
//! Order matters: later patterns would happily match the output of earlier
//! ones. Fenced code is lifted out first and replaced by placeholder tokens
//! so no inline rule can reach it; list markers are consumed before emphasis
//! so `* item` never turns into `<em>`; headings run before the bare `---`
//! rule so nothing else sees a `#` line.
//!
//! Paragraph wrapping runs while code is still behind its placeholders, so a
//! blank line inside a fence never splits the `<pre>` into two blocks and a
//! newline inside one never becomes `<br>`. The stored blocks are substituted
//! back as the very last step.
//!
//! ## Leniency
//!
//! Nothing here can fail. Unrecognised syntax is emitted as literal text, and
//! an unterminated fence swallows the rest of the document as code.

use super::frontmatter::{normalise_line_endings, split_front_matter};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

/// Convert a Markdown document into an HTML fragment.
///
/// Stages (applied in order):
/// 0. Normalise line endings (CRLF → LF)
/// 1. Strip a leading front-matter block and one following blank line
/// 2. Lift fenced code blocks out behind placeholder tokens
/// 3. `#`…`####` headings → `<h1>`…`<h4>`
/// 4. `---` lines → `<hr>`
/// 5. `> ` runs → `<blockquote>`
/// 6. Pipe tables → `<table>`
/// 7. `- ` / `* ` runs → `<ul>`
/// 8. `***`, `**`, `*` emphasis
/// 9. Inline `` `code` ``
/// 10. `[text](url)` links
/// 11. Wrap remaining text blocks in `<p>`
/// 12. Substitute the protected code blocks back in
pub fn markdown_to_html(markdown: &str) -> String {
    let s = normalise_line_endings(markdown);
    let s = strip_front_matter(&s);
    let (s, code) = protect_code_blocks(s);
    let s = convert_headers(&s);
    let s = convert_horizontal_rules(&s);
    let s = convert_blockquotes(&s);
    let s = convert_tables(&s);
    let s = convert_lists(&s);
    let s = convert_emphasis(&s);
    let s = convert_inline_code(&s);
    let s = convert_links(&s);
    let s = wrap_paragraphs(&s);
    code.restore(&s)
}

// ── Stage 1: Strip front-matter ──────────────────────────────────────────────

fn strip_front_matter(input: &str) -> &str {
    match split_front_matter(input) {
        Some(front) => front.body.strip_prefix('\n').unwrap_or(front.body),
        None => input,
    }
}

// ── Stage 2: Protect fenced code blocks ──────────────────────────────────────

/// Opening fence, optional language tag, then everything up to the next fence
/// (or the end of the document when the fence is never closed).
static RE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([^\n]*)\n(.*?)(?:```|\z)").unwrap());

static RE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{E000}CODEBLOCK(\d+)\x{E001}").unwrap());

/// Private-use code points delimit placeholders so they cannot collide with
/// real prose or with any Markdown rule.
fn placeholder(index: usize) -> String {
    format!("\u{E000}CODEBLOCK{index}\u{E001}")
}

/// Rendered `<pre><code>` blocks, indexed by placeholder number.
#[derive(Debug, Default)]
struct ProtectedBlocks {
    blocks: Vec<String>,
}

impl ProtectedBlocks {
    /// Store `html` and return the token that stands in for it.
    fn protect(&mut self, html: String) -> String {
        let token = placeholder(self.blocks.len());
        self.blocks.push(html);
        token
    }

    /// Replace every placeholder in `text` with its stored block.
    ///
    /// Single pass: restored code is never rescanned. Tokens with an unknown
    /// index are left untouched.
    fn restore(&self, text: &str) -> String {
        if self.blocks.is_empty() {
            return text.to_string();
        }
        RE_PLACEHOLDER
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.blocks.get(i))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

fn protect_code_blocks(input: &str) -> (String, ProtectedBlocks) {
    let mut protected = ProtectedBlocks::default();
    let text = RE_FENCE
        .replace_all(input, |caps: &Captures<'_>| {
            let code = escape_code(&caps[2]);
            protected.protect(format!("<pre><code>{}</code></pre>", code.trim()))
        })
        .into_owned();
    trace!("protected {} fenced code blocks", protected.blocks.len());
    (text, protected)
}

/// Escape only `&`, `<` and `>`; quotes inside code stay as written.
fn escape_code(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Stage 3: Headers ─────────────────────────────────────────────────────────

/// One to four hashes and at least one space. The lazy body plus the optional
/// closing run means `## Title ##` → `Title` while `## C#` keeps its `#`.
static RE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,4})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").unwrap());

fn convert_headers(input: &str) -> String {
    RE_HEADER
        .replace_all(input, |caps: &Captures<'_>| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", caps[2].trim())
        })
        .into_owned()
}

// ── Stage 4: Horizontal rules ────────────────────────────────────────────────

static RE_HR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^---$").unwrap());

fn convert_horizontal_rules(input: &str) -> String {
    RE_HR.replace_all(input, "<hr>").into_owned()
}

// ── Stage 5: Blockquotes ─────────────────────────────────────────────────────

fn convert_blockquotes(input: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut quote: Vec<&str> = Vec::new();

    for line in input.split('\n') {
        if let Some(text) = line.strip_prefix("> ") {
            quote.push(text);
            continue;
        }
        flush_quote(&mut quote, &mut out);
        out.push(line.to_string());
    }
    flush_quote(&mut quote, &mut out);

    out.join("\n")
}

fn flush_quote(quote: &mut Vec<&str>, out: &mut Vec<String>) {
    if !quote.is_empty() {
        out.push(format!("<blockquote>{}</blockquote>", quote.join(" ")));
        quote.clear();
    }
}

// ── Stage 6: Tables ──────────────────────────────────────────────────────────

/// A header row, a separator row, then at least one data row.
fn convert_tables(input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let has_separator = lines.get(i + 1).is_some_and(|next| is_separator_row(next));

        if is_table_row(line) && !is_separator_row(line) && has_separator {
            let rows = lines[i + 2..]
                .iter()
                .take_while(|row| is_table_row(row))
                .count();
            if rows > 0 {
                out.push(render_table(line, &lines[i + 2..i + 2 + rows]));
                i += 2 + rows;
                continue;
            }
        }

        out.push(line.to_string());
        i += 1;
    }

    out.join("\n")
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.len() > 2
}

fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim_end();
    is_table_row(trimmed)
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Split a row into trimmed cells, dropping the empties the outer pipes make.
fn split_cells(row: &str) -> Vec<&str> {
    let trimmed = row.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn render_row(row: &str, cell_tag: &str) -> String {
    let cells: String = split_cells(row)
        .into_iter()
        .map(|cell| format!("<{cell_tag}>{cell}</{cell_tag}>"))
        .collect();
    format!("<tr>{cells}</tr>")
}

fn render_table(header: &str, rows: &[&str]) -> String {
    let body: Vec<String> = rows.iter().map(|row| render_row(row, "td")).collect();
    format!(
        "<table>\n<thead>\n{}\n</thead>\n<tbody>\n{}\n</tbody>\n</table>",
        render_row(header, "th"),
        body.join("\n")
    )
}

// ── Stage 7: Unordered lists ─────────────────────────────────────────────────

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .filter(|item| !item.is_empty())
}

fn convert_lists(input: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in input.split('\n') {
        match list_item(line) {
            Some(item) => {
                if !in_list {
                    out.push("<ul>".to_string());
                    in_list = true;
                }
                out.push(format!("<li>{item}</li>"));
            }
            None => {
                if in_list {
                    out.push("</ul>".to_string());
                    in_list = false;
                }
                out.push(line.to_string());
            }
        }
    }
    if in_list {
        out.push("</ul>".to_string());
    }

    out.join("\n")
}

// ── Stage 8: Emphasis ────────────────────────────────────────────────────────

static RE_BOLD_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*(.*?)\*\*\*").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());

/// Leftmost shortest spans on a single line, strongest marker first.
/// Nested or paragraph-spanning emphasis is not recognised.
fn convert_emphasis(input: &str) -> String {
    let s = RE_BOLD_ITALIC.replace_all(input, "<strong><em>${1}</em></strong>");
    let s = RE_BOLD.replace_all(&s, "<strong>${1}</strong>");
    RE_ITALIC.replace_all(&s, "<em>${1}</em>").into_owned()
}

// ── Stage 9: Inline code ─────────────────────────────────────────────────────

static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

fn convert_inline_code(input: &str) -> String {
    RE_INLINE_CODE
        .replace_all(input, "<code>${1}</code>")
        .into_owned()
}

// ── Stage 10: Links ──────────────────────────────────────────────────────────

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

fn convert_links(input: &str) -> String {
    RE_LINK
        .replace_all(input, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

// ── Stage 11: Paragraphs ─────────────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

/// Blocks that are already block-level HTML (or a code placeholder).
static RE_BLOCK_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:<(?:h[1-6]|blockquote|ul|ol|pre|hr|table|div)|\x{E000})").unwrap()
});

fn wrap_paragraphs(input: &str) -> String {
    RE_BLANK_LINES
        .split(input)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if RE_BLOCK_LEVEL.is_match(block) {
                block.to_string()
            } else {
                format!("<p>{}</p>", block.replace('\n', "<br>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ── Tests ────────────────────────────────────────────────────────────────────
