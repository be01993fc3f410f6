//! Page shell: merge a rendered fragment and its front-matter into a
//! standalone HTML document.
//!
//! Every paper shares one dark, single-column layout with an embedded
//! stylesheet, so each output file can be opened directly from disk with no
//! build tooling on the website side.

use crate::config::{PageDefaults, SiteConfig};
use crate::manifest::DocumentEntry;
use crate::output::DocumentMetadata;
use std::borrow::Cow;

/// Stylesheet embedded in every page.
pub const PAGE_STYLE: &str = include_str!("../../assets/paper.css");

/// Render the full HTML page for one document.
///
/// `author`, `institution`, `version` and `date` fall back to `defaults` when
/// the front-matter omits them or leaves them empty. The thesis line appears
/// only when the front-matter has a non-empty `thesis`.
pub fn render_page(
    entry: &DocumentEntry,
    content: &str,
    metadata: &DocumentMetadata,
    defaults: &PageDefaults,
    site: &SiteConfig,
) -> String {
    let byline = |key: &str, fallback: &str| -> String {
        escape_html(metadata.non_empty(key).unwrap_or(fallback)).into_owned()
    };

    let author = byline("author", defaults.author.as_str());
    let institution = byline("institution", defaults.institution.as_str());
    let version = byline("version", defaults.version.as_str());
    let date = byline("date", defaults.date.as_str());
    let thesis = metadata
        .non_empty("thesis")
        .map(|t| format!("\n                <p><strong>Thesis:</strong> {}</p>", escape_html(t)))
        .unwrap_or_default();

    let title = escape_html(&entry.title);
    let keywords = escape_html(&format!("{}, {}", site.keywords, entry.title.to_lowercase())).into_owned();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description}">
    <meta name="keywords" content="{keywords}">
    <title>{title} - {site_name}</title>
    <style>
{style}    </style>
</head>
<body>
    <header>
        <div class="container">
            <a href="{back_href}" class="back-link">{back_label}</a>
            <div class="paper-number">{number}</div>
            <h1>{title}</h1>
            <div class="paper-meta">
                <p><strong>Author:</strong> {author}</p>
                <p><strong>Institution:</strong> {institution}</p>
                <p><strong>Version:</strong> {version}</p>
                <p><strong>Date:</strong> {date}</p>{thesis}
            </div>
        </div>
    </header>

    <article>
        <div class="container">
            <div id="markdown-content">
{content}
            </div>
        </div>
    </article>

    <footer>
        <div class="container">
            <p>{organisation}</p>
            <p><a href="{repository_url}">{repository_label}</a></p>
        </div>
    </footer>
</body>
</html>
"#,
        description = escape_html(&entry.description),
        site_name = escape_html(&site.site_name),
        style = PAGE_STYLE,
        back_href = escape_html(&site.back_href),
        back_label = escape_html(&site.back_label),
        number = escape_html(&entry.number),
        organisation = escape_html(&site.organisation),
        repository_url = escape_html(&site.repository_url),
        repository_label = escape_html(repository_label(&site.repository_url)),
    )
}

/// The footer shows the repository owner, not the full URL.
fn repository_label(url: &str) -> &str {
    let bare = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    match bare.match_indices('/').nth(1) {
        Some((i, _)) => &bare[..i],
        None => bare,
    }
}

/// Escape text for element content and double-quoted attributes.
///
/// Borrows when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
