//! Error types for the sitepatch library.
//!
//! Three error types reflect three distinct failure modes:
//!
//! * [`PatchError`] is **fatal**: the operation cannot proceed at all
//!   (site directory missing, tables file invalid, ads.txt download failed).
//!   Returned as `Err(PatchError)` from the top-level entry points.
//!
//! * [`FileError`] is **non-fatal**: a single HTML file could not be read,
//!   transformed or written back. Stored inside
//!   [`crate::output::FileResult`] so the rest of the batch still runs.
//!
//! * [`BridgeError`]: a conversion bridge failed. Every variant maps onto
//!   the process exit code contract through [`BridgeError::exit_code`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// All fatal errors returned by the sitepatch library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum PatchError {
    // ── Site errors ───────────────────────────────────────────────────────
    /// The site directory does not exist or is not a directory.
    #[error("Site directory not found: '{path}'\nPass --site-dir or set SITEPATCH_SITE_DIR.")]
    SiteDirNotFound { path: PathBuf },

    /// Listing the site directory failed.
    #[error("Failed to list '{path}': {source}")]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Table errors ──────────────────────────────────────────────────────
    /// The site tables file could not be read.
    #[error("Failed to read site tables '{path}': {source}")]
    TablesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The site tables file is not valid JSON for [`crate::tables::SiteTables`].
    #[error("Invalid site tables '{path}': {source}")]
    TablesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ── ads.txt errors ────────────────────────────────────────────────────
    /// The ad manager answered 404: the domain is not registered yet.
    #[error("Site '{domain}' is not registered with the ads.txt manager.\nRegister it in the ad dashboard first.")]
    SiteNotRegistered { domain: String },

    /// The download failed for any other reason.
    #[error("Failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Could not write the downloaded ads.txt.
    #[error("Failed to write '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A built-in rule pattern failed to compile.
    #[error("Invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A non-fatal error for a single HTML file.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// Reading the file failed.
    #[error("{file}: read failed: {detail}")]
    ReadFailed { file: String, detail: String },

    /// The file is not valid UTF-8.
    #[error("{file}: not valid UTF-8: {detail}")]
    NotUtf8 { file: String, detail: String },

    /// Writing the transformed text back failed. The file may be truncated.
    #[error("{file}: write failed: {detail}")]
    WriteFailed { file: String, detail: String },

    /// The transform itself failed. The built-in operations never fail;
    /// this is for custom [`Transform`](crate::batch::Transform) implementations.
    #[error("{file}: transform failed: {detail}")]
    TransformFailed { file: String, detail: String },
}

/// Failure of a single conversion bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Wrong arguments or an unsupported input extension.
    #[error("{0}")]
    Usage(String),

    /// The input file does not exist.
    #[error("Input file not found: '{path}'")]
    InputNotFound { path: PathBuf },

    /// The external binary or library is not installed.
    #[error("{dependency} is not available. {hint}")]
    MissingDependency { dependency: String, hint: String },

    /// The external tool ran and exited non-zero.
    #[error("{tool} failed (exit {status}):\n{stderr}")]
    ToolFailed {
        tool: String,
        status: i32,
        stderr: String,
    },

    /// The tool reported success but the expected output is absent.
    #[error("Output was not produced: '{path}'")]
    OutputMissing { path: PathBuf },

    /// The external tool exceeded its time budget and was killed.
    #[error("{tool} timed out after {}s", .elapsed.as_secs())]
    Timeout { tool: String, elapsed: Duration },

    /// Any other unexpected failure.
    #[error("Unexpected conversion error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Usage(_) | BridgeError::InputNotFound { .. } => 1,
            BridgeError::MissingDependency { .. } => 2,
            BridgeError::ToolFailed { .. } => 3,
            BridgeError::OutputMissing { .. } => 4,
            BridgeError::Timeout { .. } => 5,
            BridgeError::Internal(_) => 6,
        }
    }
}
