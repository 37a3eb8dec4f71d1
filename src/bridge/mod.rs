//! Office ↔ PDF conversion bridges.
//!
//! Every bridge is one blocking call to an external program:
//! `(input, output) → Result<PathBuf, BridgeError>`, and
//! [`BridgeError::exit_code`] turns the failure into the process exit code.
//!
//! | Bridge          | Tool                               |
//! |-----------------|------------------------------------|
//! | `office-to-pdf` | LibreOffice, headless              |
//! | `pdf-to-docx`   | pdf2docx (Python)                  |
//! | `pdf-to-pptx`   | pdf2image + python-pptx (Python)   |
//! | `pdf-to-xlsx`   | camelot + pandas/openpyxl (Python) |
//!
//! There is no retry. The child is killed if its timeout elapses.

pub mod drivers;
pub mod office;
pub mod python;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::str::FromStr;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// The available conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BridgeKind {
    OfficeToPdf,
    PdfToDocx,
    PdfToPptx,
    PdfToXlsx,
}

impl BridgeKind {
    pub const ALL: [BridgeKind; 4] = [
        BridgeKind::OfficeToPdf,
        BridgeKind::PdfToDocx,
        BridgeKind::PdfToPptx,
        BridgeKind::PdfToXlsx,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BridgeKind::OfficeToPdf => "office-to-pdf",
            BridgeKind::PdfToDocx => "pdf-to-docx",
            BridgeKind::PdfToPptx => "pdf-to-pptx",
            BridgeKind::PdfToXlsx => "pdf-to-xlsx",
        }
    }
}

impl fmt::Display for BridgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| BridgeError::Usage(format!("Unknown bridge '{s}'")))
    }
}

/// Run one conversion.
///
/// Returns the path of the produced file, which is `output`.
///
/// # Errors
/// See [`BridgeError`]; every variant maps to a fixed exit code.
pub async fn run_bridge(
    kind: BridgeKind,
    input: &Path,
    output: &Path,
    config: &BridgeConfig,
) -> Result<PathBuf, BridgeError> {
    info!("{}: {} → {}", kind, input.display(), output.display());
    match kind {
        BridgeKind::OfficeToPdf => office::office_to_pdf(input, output, config).await,
        BridgeKind::PdfToDocx => {
            python::run_driver("pdf2docx", drivers::PDF_TO_DOCX, input, output, config).await
        }
        BridgeKind::PdfToPptx => {
            python::run_driver("pdf2image/python-pptx", drivers::PDF_TO_PPTX, input, output, config)
                .await
        }
        BridgeKind::PdfToXlsx => {
            python::run_driver("camelot", drivers::PDF_TO_XLSX, input, output, config).await
        }
    }
}

/// Synchronous wrapper around [`run_bridge`].
///
/// # Errors
/// Same as [`run_bridge`]; a runtime that cannot start is [`BridgeError::Internal`].
pub fn run_bridge_sync(
    kind: BridgeKind,
    input: &Path,
    output: &Path,
    config: &BridgeConfig,
) -> Result<PathBuf, BridgeError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BridgeError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(run_bridge(kind, input, output, config))
}

/// Exit code for a bridge result: 0 on success.
pub fn exit_code(result: &Result<PathBuf, BridgeError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────

pub(crate) fn check_input(input: &Path) -> Result<(), BridgeError> {
    if input.is_file() {
        Ok(())
    } else {
        Err(BridgeError::InputNotFound {
            path: input.to_path_buf(),
        })
    }
}

/// Create `dir` and its parents. Returns the topmost directory that did not
/// exist before, so a failed conversion can remove it again.
pub(crate) async fn create_output_dir(dir: &Path) -> Result<Option<PathBuf>, BridgeError> {
    if dir.as_os_str().is_empty() {
        return Ok(None);
    }
    let created = dir
        .ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .last()
        .map(Path::to_path_buf);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| BridgeError::Internal(format!("creating {}: {e}", dir.display())))?;
    Ok(created)
}

/// Undo [`create_output_dir`] after a failed conversion.
pub(crate) async fn remove_created_dir(created: Option<PathBuf>) {
    if let Some(dir) = created {
        if let Err(e) = tokio::fs::remove_dir_all(&dir).await {
            warn!("Could not remove {}: {}", dir.display(), e);
        }
    }
}

pub(crate) struct ToolOutput {
    pub status: ExitStatus,
    pub stderr: String,
}

impl ToolOutput {
    /// Exit code, or -1 when the child was killed by a signal.
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

/// Spawn `cmd`, capture its output and wait at most `limit`.
///
/// A program that cannot be found is a missing dependency. When the limit
/// elapses the child is dropped, and `kill_on_drop` kills it.
pub(crate) async fn run_tool(
    tool: &str,
    hint: &str,
    mut cmd: Command,
    limit: Option<Duration>,
) -> Result<ToolOutput, BridgeError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    debug!("Running {:?}", cmd.as_std());

    let child = cmd.spawn().map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => BridgeError::MissingDependency {
            dependency: tool.to_string(),
            hint: hint.to_string(),
        },
        _ => BridgeError::Internal(format!("spawning {tool}: {e}")),
    })?;

    let wait = child.wait_with_output();
    let output = match limit {
        Some(limit) => tokio::time::timeout(limit, wait)
            .await
            .map_err(|_| BridgeError::Timeout {
                tool: tool.to_string(),
                elapsed: limit,
            })?,
        None => wait.await,
    }
    .map_err(|e| BridgeError::Internal(format!("waiting for {tool}: {e}")))?;

    Ok(ToolOutput {
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
    })
}
