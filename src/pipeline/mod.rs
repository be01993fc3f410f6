//! Pipeline stages for Markdown-to-HTML page builds.
//!
//! Each submodule implements exactly one step. The two middle stages are
//! pure string functions with no I/O, so they can be called from anywhere
//! (tests, other tools) without a runtime.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ frontmatter ──┐
//!   │                     ├──▶ page ──▶ write
//!   └────▶ markdown ──────┘
//! (read)   (metadata / fragment)  (shell)  (atomic)
//! ```
//!
//! 1. [`input`]: read the Markdown source, classifying I/O failures
//! 2. [`frontmatter`]: extract the leading `key: value` block
//! 3. [`markdown`]: ordered rewrite stages producing an HTML fragment
//! 4. [`page`]: merge fragment and metadata into the page shell
//! 5. [`write`]: temp-file-and-rename write of the finished page

pub mod frontmatter;
pub mod input;
pub mod markdown;
pub mod page;
pub mod write;
