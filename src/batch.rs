//! The batch driver: enumerate → guard → transform → save → report.
//!
//! Files are processed one at a time in name order. A failure on one file is
//! recorded in its [`FileResult`](crate::output::FileResult) and the batch
//! moves on; only problems that make the whole run impossible (missing site
//! directory, bad rule pattern) are returned as [`PatchError`].

use crate::config::PatchConfig;
use crate::error::{FileError, PatchError};
use crate::operations::{OperationKind, SiteOperation};
use crate::output::{FileStatus, RunSummary};
use crate::pipeline::input::{self, Document};
use crate::pipeline::patch::PatchOutcome;
use crate::tables::SiteTables;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A per-document rewrite the batch driver can run.
///
/// [`SiteOperation`] is the production implementation; the trait exists so
/// other rewrites (and failing ones in tests) can reuse the driver.
pub trait Transform {
    /// Name used in logs and the summary.
    fn label(&self) -> &str;

    /// Decide what to do with the text of `file_name`.
    ///
    /// # Errors
    /// A [`FileError`] fails this file only; the batch continues.
    fn transform(&self, file_name: &str, text: &str) -> Result<PatchOutcome, FileError>;
}

/// Run a built-in site operation over `config.site_dir`.
///
/// # Errors
/// Returns `Err(PatchError)` only for fatal errors: missing site directory or
/// a rule pattern that does not compile. Per-file errors are in the summary.
pub fn run_operation(
    kind: OperationKind,
    tables: &SiteTables,
    config: &PatchConfig,
) -> Result<RunSummary, PatchError> {
    let op = SiteOperation::new(kind, tables, config)?;
    run_batch(&op, config)
}

/// Run any [`Transform`] over every `*.html` file in `config.site_dir`.
///
/// # Errors
/// [`PatchError::SiteDirNotFound`] / [`PatchError::ListFailed`] if the
/// directory cannot be listed.
pub fn run_batch(transform: &dyn Transform, config: &PatchConfig) -> Result<RunSummary, PatchError> {
    let started = Instant::now();
    let files = input::list_html_files(&config.site_dir)?;
    let total = files.len();
    info!(
        "{}: {} HTML files in {}",
        transform.label(),
        total,
        config.site_dir.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut summary = RunSummary::new(transform.label());
    for (i, path) in files.iter().enumerate() {
        let index = i + 1;
        let name = input::file_name(path);
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(index, total, &name);
        }

        let status = process_file(transform, path);
        log_status(&name, &status);

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_complete(index, total, &name, &status);
        }
        summary.record(name, status);
    }
    summary.duration_ms = started.elapsed().as_millis() as u64;

    info!(
        "{}: {} updated, {} skipped, {} errors in {}ms",
        summary.operation, summary.updated, summary.skipped, summary.errored, summary.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(&summary);
    }
    Ok(summary)
}

/// Load, transform and save one file. Never fails: errors become a status.
fn process_file(transform: &dyn Transform, path: &Path) -> FileStatus {
    let result = Document::load(path).and_then(|mut doc| {
        let name = doc.name();
        match transform.transform(&name, &doc.text)? {
            PatchOutcome::Apply(text) => {
                doc.overwrite(text)?;
                Ok(FileStatus::Updated)
            }
            PatchOutcome::Skip(reason) => Ok(FileStatus::Skipped { reason }),
            PatchOutcome::MissingAnchor(anchor) => Ok(FileStatus::MissingAnchor { anchor }),
        }
    });
    result.unwrap_or_else(|error| FileStatus::Failed { error })
}

fn log_status(name: &str, status: &FileStatus) {
    match status {
        FileStatus::Updated => info!("Updated {}", name),
        FileStatus::Skipped { reason } => debug!("Skipping {} ({})", name, reason),
        FileStatus::MissingAnchor { anchor } => warn!("{} has no {} tag", name, anchor),
        FileStatus::Failed { error } => warn!("Error: {}", error),
    }
}
