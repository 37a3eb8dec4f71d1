//! Result types of a batch run.

use crate::error::FileError;
use crate::pipeline::patch::SkipReason;
use serde::{Deserialize, Serialize};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// The file was rewritten.
    Updated,
    /// The guard decided there was nothing to do.
    Skipped { reason: SkipReason },
    /// The anchor the rule needs is not in the file. Nothing was written.
    MissingAnchor { anchor: String },
    /// Reading, transforming or writing failed.
    Failed { error: FileError },
}

impl FileStatus {
    /// Short label used in logs and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Updated => "updated",
            FileStatus::Skipped { .. } => "skipped",
            FileStatus::MissingAnchor { .. } => "warning",
            FileStatus::Failed { .. } => "error",
        }
    }
}

/// Outcome for one file, in batch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub file: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Counts and per-file results of one run.
///
/// `skipped` includes files with a missing anchor: they are soft failures
/// and were left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the operation that produced the summary.
    pub operation: String,
    pub updated: usize,
    pub skipped: usize,
    pub errored: usize,
    /// Subset of `skipped` that lacked an anchor.
    pub missing_anchor: usize,
    pub files: Vec<FileResult>,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Self::default()
        }
    }

    /// Add one file's outcome and bump the matching counter.
    pub fn record(&mut self, file: impl Into<String>, status: FileStatus) {
        match &status {
            FileStatus::Updated => self.updated += 1,
            FileStatus::Skipped { .. } => self.skipped += 1,
            FileStatus::MissingAnchor { .. } => {
                self.skipped += 1;
                self.missing_anchor += 1;
            }
            FileStatus::Failed { .. } => self.errored += 1,
        }
        self.files.push(FileResult {
            file: file.into(),
            status,
        });
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// True when no file errored.
    pub fn is_clean(&self) -> bool {
        self.errored == 0
    }
}
