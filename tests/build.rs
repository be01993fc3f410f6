//! Integration tests for the build layer.
//!
//! Every test works in its own temporary directory: sources are written to
//! `<tmp>/src`, pages land in `<tmp>/out` (created by the build).

use futures::StreamExt;
use papers2html::{
    build_site, build_site_sync, build_stream, BuildConfig, BuildProgressCallback, DocumentEntry,
    DocumentError, Papers2HtmlError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const PROLOGUE: &str = "---\n\
title: Ethics is Efficient\n\
author: \"Ada Lovelace\"\n\
thesis: Accountability is cheaper\n\
---\n\
\n\
# Ethics is Efficient\n\
\n\
Some **bold** claim.\n\
\n\
```rust\n\
let x = a < b && c;\n\
```\n";

const PROTOCOL: &str = "## The Tuple\n\
\n\
| Field | Meaning |\n\
|---|---|\n\
| who | actor |\n\
\n\
- one\n\
- two\n";

struct Fixture {
    _tmp: TempDir,
    src: PathBuf,
    out: PathBuf,
}

fn fixture(files: &[(&str, &str)]) -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let out = tmp.path().join("out");
    fs::create_dir_all(&src).unwrap();
    for (name, body) in files {
        fs::write(src.join(name), body).unwrap();
    }
    Fixture { _tmp: tmp, src, out }
}

fn entries(files: &[&str]) -> Vec<DocumentEntry> {
    files
        .iter()
        .enumerate()
        .map(|(i, f)| DocumentEntry::new(*f, format!("PAPER {i}"), format!("Title {i}"), "Desc"))
        .collect()
}

fn config(fx: &Fixture, docs: Vec<DocumentEntry>) -> BuildConfig {
    BuildConfig::builder()
        .source_dir(&fx.src)
        .output_dir(&fx.out)
        .documents(docs)
        .concurrency(2)
        .build()
        .unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

// ── build_site ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn builds_every_document_into_output_dir() {
    let fx = fixture(&[("00_Prologue.md", PROLOGUE), ("01_Protocol.md", PROTOCOL)]);
    let cfg = config(&fx, entries(&["00_Prologue.md", "01_Protocol.md"]));

    let output = build_site(&cfg).await.unwrap();

    assert_eq!(output.stats.total, 2);
    assert_eq!(output.stats.built, 2);
    assert_eq!(output.stats.failed, 0);

    let prologue = read(&fx.out.join("00_Prologue.html"));
    assert!(prologue.starts_with("<!DOCTYPE html>"));
    assert!(prologue.contains("<title>Title 0 - LogLine Foundation</title>"));
    assert!(prologue.contains("<p><strong>Author:</strong> Ada Lovelace</p>"));
    assert!(prologue.contains("<p><strong>Thesis:</strong> Accountability is cheaper</p>"));
    assert!(prologue.contains("<h1>Ethics is Efficient</h1>"));
    assert!(prologue.contains("<p>Some <strong>bold</strong> claim.</p>"));
    assert!(prologue.contains("<pre><code>let x = a &lt; b &amp;&amp; c;</code></pre>"));
    assert!(!prologue.contains("title: Ethics"));

    let protocol = read(&fx.out.join("01_Protocol.html"));
    assert!(protocol.contains("<h2>The Tuple</h2>"));
    assert!(protocol.contains("<th>Field</th><th>Meaning</th>"));
    assert!(protocol.contains("<tr><td>who</td><td>actor</td></tr>"));
    assert!(protocol.contains("<ul>\n<li>one</li>\n<li>two</li>\n</ul>"));
    // no front-matter: every byline value comes from the defaults
    assert!(protocol.contains("<p><strong>Author:</strong> Dan Voulez</p>"));
    assert!(!protocol.contains("Thesis:"));
}

#[tokio::test]
async fn missing_source_is_counted_and_batch_continues() {
    let fx = fixture(&[("a.md", "# A"), ("c.md", "# C")]);
    let cfg = config(&fx, entries(&["a.md", "b.md", "c.md"]));

    let output = build_site(&cfg).await.unwrap();

    assert_eq!(output.stats.built, 2);
    assert_eq!(output.stats.failed, 1);
    assert!(fx.out.join("a.html").exists());
    assert!(!fx.out.join("b.html").exists());
    assert!(fx.out.join("c.html").exists());

    let failed: Vec<_> = output.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].file, "b.md");
    assert!(matches!(
        failed[0].error,
        Some(DocumentError::SourceNotFound { .. })
    ));

    let err = output.into_result().unwrap_err();
    assert!(matches!(
        err,
        Papers2HtmlError::PartialFailure { built: 2, failed: 1, total: 3 }
    ));
}

#[tokio::test]
async fn results_follow_manifest_order() {
    let names: Vec<String> = (0..8).map(|i| format!("{i:02}.md")).collect();
    let files: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "Body")).collect();
    let fx = fixture(&files);
    // reversed so manifest order differs from any directory order
    let manifest: Vec<&str> = names.iter().rev().map(String::as_str).collect();
    let cfg = BuildConfig::builder()
        .source_dir(&fx.src)
        .output_dir(&fx.out)
        .documents(entries(&manifest))
        .concurrency(8)
        .build()
        .unwrap();

    let output = build_site(&cfg).await.unwrap();

    let reported: Vec<&str> = output.documents.iter().map(|d| d.file.as_str()).collect();
    assert_eq!(reported, manifest);
    for (i, doc) in output.documents.iter().enumerate() {
        assert_eq!(doc.index, i);
    }
}

#[tokio::test]
async fn existing_pages_are_overwritten() {
    let fx = fixture(&[("a.md", "new body")]);
    fs::create_dir_all(&fx.out).unwrap();
    fs::write(fx.out.join("a.html"), "stale").unwrap();
    let cfg = config(&fx, entries(&["a.md"]));

    build_site(&cfg).await.unwrap();

    let html = read(&fx.out.join("a.html"));
    assert!(html.contains("<p>new body</p>"));
    assert!(!fx.out.join("a.html.tmp").exists());
}

#[tokio::test]
async fn output_dir_that_is_a_file_is_fatal() {
    let fx = fixture(&[("a.md", "body")]);
    fs::write(fx.src.join("blocker"), "not a dir").unwrap();
    let cfg = BuildConfig::builder()
        .source_dir(&fx.src)
        .output_dir(fx.src.join("blocker"))
        .documents(entries(&["a.md"]))
        .build()
        .unwrap();

    let err = build_site(&cfg).await.unwrap_err();
    assert!(matches!(err, Papers2HtmlError::OutputDirFailed { .. }));
}

// ── Progress callbacks ───────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    started: AtomicUsize,
    doc_starts: AtomicUsize,
    completed: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    finished: Mutex<Option<(usize, usize)>>,
}

impl BuildProgressCallback for Recorder {
    fn on_build_start(&self, total: usize) {
        self.started.store(total, Ordering::SeqCst);
    }

    fn on_document_start(&self, _index: usize, _total: usize, _file: &str) {
        self.doc_starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_document_complete(&self, _index: usize, _total: usize, file: &str, html_len: usize) {
        assert!(html_len > 0);
        self.completed.lock().unwrap().push(file.to_string());
    }

    fn on_document_error(&self, _index: usize, _total: usize, file: &str, error: &str) {
        self.errors.lock().unwrap().push(format!("{file}: {error}"));
    }

    fn on_build_complete(&self, total: usize, success_count: usize) {
        *self.finished.lock().unwrap() = Some((total, success_count));
    }
}

#[tokio::test]
async fn callbacks_see_every_document() {
    let fx = fixture(&[("a.md", "# A"), ("b.md", "# B")]);
    let recorder = Arc::new(Recorder::default());
    let cfg = BuildConfig::builder()
        .source_dir(&fx.src)
        .output_dir(&fx.out)
        .documents(entries(&["a.md", "b.md", "missing.md"]))
        .progress_callback(recorder.clone())
        .build()
        .unwrap();

    build_site(&cfg).await.unwrap();

    assert_eq!(recorder.started.load(Ordering::SeqCst), 3);
    assert_eq!(recorder.doc_starts.load(Ordering::SeqCst), 3);
    let mut completed = recorder.completed.lock().unwrap().clone();
    completed.sort();
    assert_eq!(completed, vec!["a.md", "b.md"]);
    let errors = recorder.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("missing.md: "), "got {errors:?}");
    assert_eq!(*recorder.finished.lock().unwrap(), Some((3, 2)));
}

// ── Streaming ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stream_yields_one_item_per_document() {
    let fx = fixture(&[("a.md", "# A"), ("b.md", "# B")]);
    let cfg = config(&fx, entries(&["a.md", "gone.md", "b.md"]));

    let items: Vec<_> = build_stream(&cfg).await.unwrap().collect().await;

    assert_eq!(items.len(), 3);
    let mut ok: Vec<usize> = items
        .iter()
        .filter_map(|r| r.as_ref().ok().map(|d| d.index))
        .collect();
    ok.sort();
    assert_eq!(ok, vec![0, 2]);

    let errs: Vec<_> = items.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], DocumentError::SourceNotFound { .. }));
    assert!(fx.out.join("b.html").exists());
}

#[test]
fn stream_runs_under_tokio_test_block_on() {
    let fx = fixture(&[("only.md", "Body")]);
    let cfg = config(&fx, entries(&["only.md"]));

    let first = tokio_test::block_on(async {
        let mut stream = build_stream(&cfg).await.unwrap();
        stream.next().await
    });

    let doc = first.expect("one item").unwrap();
    assert_eq!(doc.file, "only.md");
    assert_eq!(doc.output_path, fx.out.join("only.html"));
}

// ── Sync wrapper ─────────────────────────────────────────────────────────────

#[test]
fn build_site_sync_outside_runtime() {
    let fx = fixture(&[("a.md", "---\nversion: 2.0.0\n---\nBody")]);
    let cfg = config(&fx, entries(&["a.md"]));

    let output = build_site_sync(&cfg).unwrap();

    assert_eq!(output.stats.built, 1);
    assert_eq!(output.documents[0].metadata.get("version"), Some("2.0.0"));
    let html = read(&fx.out.join("a.html"));
    assert!(html.contains("<p><strong>Version:</strong> 2.0.0</p>"));
}
