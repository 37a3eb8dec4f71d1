//! # sitepatch
//!
//! Batch-patch the static HTML pages of a small file-conversion site, refresh
//! its `ads.txt`, and drive the external Office/PDF converters it relies on.
//!
//! ## Why this crate?
//!
//! The site is a flat directory of hand-edited pages. SEO tags, ad scripts,
//! consent-manager scripts and the English localisation are all applied by
//! rewriting those pages in place. Each rewrite has to be safe to run again:
//! a guard decides per file whether there is anything to do, so a second run
//! reports "skipped" instead of stacking duplicate tags.
//!
//! ## Pipeline Overview
//!
//! ```text
//! public/*.html
//!  │
//!  ├─ 1. List       non-recursive, *.html, sorted by name
//!  ├─ 2. Load       whole file as UTF-8
//!  ├─ 3. Guard      marker present/absent, or "did anything change?"
//!  ├─ 4. Rules      literal / regex / anchored insert, in order
//!  ├─ 5. Save       overwrite in place
//!  └─ 6. Report     per-file status + counters (RunSummary)
//! ```
//!
//! One bad file never stops the batch; only a missing site directory or an
//! invalid tables file is fatal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitepatch::{run_operation, OperationKind, PatchConfig, SiteTables};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PatchConfig::builder().site_dir("public").build()?;
//!     let tables = SiteTables::builtin();
//!     let summary = run_operation(OperationKind::AdFixAdd, &tables, &config)?;
//!     eprintln!("{} updated, {} skipped, {} errors",
//!         summary.updated, summary.skipped, summary.errored);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sitepatch` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ```toml
//! sitepatch = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod ads_txt;
pub mod batch;
pub mod bridge;
pub mod config;
pub mod error;
pub mod operations;
pub mod output;
pub mod payloads;
pub mod pipeline;
pub mod progress;
pub mod tables;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use ads_txt::{update_ads_txt, update_ads_txt_sync, AdsTxtUpdate};
pub use batch::{run_batch, run_operation, Transform};
pub use bridge::{run_bridge, run_bridge_sync, BridgeKind};
pub use config::{AdsTxtConfig, BridgeConfig, PatchConfig, PatchConfigBuilder};
pub use error::{BridgeError, FileError, PatchError};
pub use operations::{OperationKind, SiteOperation};
pub use output::{FileResult, FileStatus, RunSummary};
pub use pipeline::patch::{Guard, Patch, PatchOutcome, SkipReason};
pub use pipeline::rule::{Position, TransformRule};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use tables::{SeoRecord, SiteTables, Translation};
