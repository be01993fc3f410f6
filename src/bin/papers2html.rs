//! CLI binary for papers2html.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `BuildConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use papers2html::{
    build_site, default_manifest, extract_metadata, load_manifest, BuildConfig,
    BuildProgressCallback, DocumentEntry, ProgressCallback,
};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per document.
/// Documents complete out of order, so timings are keyed by manifest index.
struct CliProgressCallback {
    bar: ProgressBar,
    start_times: Mutex<HashMap<usize, Instant>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new(total: usize) -> Arc<Self> {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>2}/{len} papers  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Building");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    fn elapsed(&self, index: usize) -> String {
        let ms = self
            .start_times
            .lock()
            .ok()
            .and_then(|mut t| t.remove(&index))
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);
        dim(&format!("{ms}ms"))
    }
}

impl BuildProgressCallback for CliProgressCallback {
    fn on_build_start(&self, total: usize) {
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Building {total} papers…"))
        ));
    }

    fn on_document_start(&self, index: usize, _total: usize, file: &str) {
        if let Ok(mut t) = self.start_times.lock() {
            t.insert(index, Instant::now());
        }
        self.bar.set_message(file.to_string());
    }

    fn on_document_complete(&self, index: usize, _total: usize, file: &str, html_len: usize) {
        let html_name = DocumentEntry::new(file, "", "", "").output_file_name();
        self.bar.println(format!(
            "  {} Built {} -> {}  {}  {}",
            green("✓"),
            file,
            html_name.display(),
            dim(&format!("{html_len:>6} bytes")),
            self.elapsed(index),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, index: usize, _total: usize, file: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} Error building {}: {}  {}",
            red("✗"),
            file,
            red(error),
            self.elapsed(index),
        ));
        self.bar.inc(1);
    }

    fn on_build_complete(&self, _total: usize, _success_count: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Build the LogLine series with the default layout
  papers2html

  # Custom source and output directories
  papers2html --source docs/papers/LogLine_Papers_v1.0.1 --output website/papers

  # Build a different set of documents
  papers2html --manifest papers.json

  # Show each document's front-matter, write nothing
  papers2html --inspect-only

  # Machine-readable report, non-zero exit on any failure
  papers2html --json --strict > build.json

MANIFEST FORMAT:
  A JSON array of {"file", "number", "title", "description"} records.
  "file" is relative to --source; the page is written to
  <output>/<file stem>.html.

ENVIRONMENT VARIABLES:
  PAPERS2HTML_SOURCE       Markdown source directory
  PAPERS2HTML_OUTPUT       HTML output directory
  PAPERS2HTML_MANIFEST     JSON manifest path
  PAPERS2HTML_CONCURRENCY  Documents built at once
  RUST_LOG                 Overrides the log filter (e.g. papers2html=debug)
"#;

/// Build the LogLine paper series from Markdown into standalone HTML pages.
#[derive(Parser, Debug)]
#[command(
    name = "papers2html",
    version,
    about = "Build the LogLine paper series from Markdown into standalone HTML pages",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory holding the Markdown sources.
    #[arg(long, env = "PAPERS2HTML_SOURCE", default_value = "docs/papers/LogLine_Papers_v1.0.1")]
    source: PathBuf,

    /// Directory the HTML pages are written to (created if missing).
    #[arg(short, long, env = "PAPERS2HTML_OUTPUT", default_value = "website/papers")]
    output: PathBuf,

    /// JSON manifest replacing the built-in paper list.
    #[arg(short, long, env = "PAPERS2HTML_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Number of documents built at once.
    #[arg(short, long, env = "PAPERS2HTML_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Print the build report as JSON on stdout.
    #[arg(long, env = "PAPERS2HTML_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PAPERS2HTML_NO_PROGRESS")]
    no_progress: bool,

    /// Print each document's front-matter only, write nothing.
    #[arg(long)]
    inspect_only: bool,

    /// Exit non-zero if any document fails to build.
    #[arg(long, env = "PAPERS2HTML_STRICT")]
    strict: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAPERS2HTML_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAPERS2HTML_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already reports each document; keep library INFO
    // logs out of its way unless asked for.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let documents = match cli.manifest {
        Some(ref path) => load_manifest(path).context("Failed to load manifest")?,
        None => default_manifest(),
    };

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        return inspect(&cli.source, &documents, cli.json).await;
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new(documents.len());
        Some(cb as Arc<dyn BuildProgressCallback>)
    } else {
        None
    };

    let mut builder = BuildConfig::builder()
        .source_dir(&cli.source)
        .output_dir(&cli.output)
        .documents(documents)
        .concurrency(cli.concurrency);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run build ────────────────────────────────────────────────────────
    let output = build_site(&config).await.context("Build failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        // Without the bar nobody has printed the per-document lines yet.
        if !show_progress {
            for doc in &output.documents {
                match doc.error {
                    None => eprintln!(
                        "{} Built {} -> {}",
                        green("✓"),
                        doc.file,
                        doc.output_path.display()
                    ),
                    Some(ref e) => eprintln!("{} Error building {}: {}", red("✗"), doc.file, e),
                }
            }
        }
        let stats = &output.stats;
        eprintln!(
            "{} Build complete: {} papers built, {} errors  {}",
            if stats.failed == 0 { green("✔") } else { cyan("⚠") },
            bold(&stats.built.to_string()),
            if stats.failed == 0 {
                stats.failed.to_string()
            } else {
                red(&stats.failed.to_string())
            },
            dim(&format!("{}ms", stats.duration_ms)),
        );
    }

    if cli.strict {
        output.into_result().context("Build finished with errors")?;
    }

    Ok(())
}

/// Print the front-matter of every document without building anything.
async fn inspect(source: &Path, documents: &[DocumentEntry], json: bool) -> Result<()> {
    let mut report = Vec::with_capacity(documents.len());
    for entry in documents {
        let path = source.join(&entry.file);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        report.push((entry, extract_metadata(&raw)));
    }

    if json {
        let value: Vec<serde_json::Value> = report
            .iter()
            .map(|(entry, meta)| {
                serde_json::json!({
                    "file": entry.file,
                    "title": entry.title,
                    "metadata": meta,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("Failed to serialize metadata")?
        );
        return Ok(());
    }

    for (entry, meta) in &report {
        println!("{}  {}", bold(&entry.file), dim(&entry.number));
        if meta.is_empty() {
            println!("  {}", dim("(no front-matter)"));
        }
        for (key, value) in meta.iter() {
            println!("  {:<12} {}", format!("{key}:"), value);
        }
    }
    Ok(())
}
