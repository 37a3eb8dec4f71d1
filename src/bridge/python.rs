//! PDF → Office through a Python driver.
//!
//! The interpreter runs one of the [`drivers`](super::drivers) with `-c`.
//! Its exit code is translated back into a [`BridgeError`] so the caller
//! sees the same codes the driver used. Status 1 is the interpreter's own
//! code for an uncaught exception and counts as a tool failure.

use super::{check_input, create_output_dir, remove_created_dir, run_tool};
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::warn;

const HINT: &str = "Install Python 3 or point --python at an interpreter.";

/// Run `driver` on `input`, writing `output`.
///
/// `library` names the Python package the driver depends on; it appears in
/// the error when the driver reports a missing module.
pub async fn run_driver(
    library: &str,
    driver: &str,
    input: &Path,
    output: &Path,
    config: &BridgeConfig,
) -> Result<PathBuf, BridgeError> {
    check_input(input)?;
    let created = create_output_dir(output.parent().unwrap_or(Path::new(""))).await?;

    let tool = config.python.display().to_string();
    let mut cmd = Command::new(&config.python);
    cmd.arg("-c").arg(driver).arg(input).arg(output);

    let result = match run_tool(&tool, HINT, cmd, config.python_timeout).await {
        Ok(run) => match run.code() {
            0 if output.is_file() => Ok(output.to_path_buf()),
            0 | 4 => Err(BridgeError::OutputMissing {
                path: output.to_path_buf(),
            }),
            2 => Err(BridgeError::MissingDependency {
                dependency: library.to_string(),
                hint: run.stderr,
            }),
            status => Err(BridgeError::ToolFailed {
                tool: library.to_string(),
                status,
                stderr: run.stderr,
            }),
        },
        Err(e) => Err(e),
    };

    if result.is_err() {
        remove_partial(output).await;
        remove_created_dir(created).await;
    }
    result
}

/// A failed conversion must not leave a half-written file behind.
async fn remove_partial(output: &Path) {
    if output.exists() {
        if let Err(e) = tokio::fs::remove_file(output).await {
            warn!("Could not remove partial output {}: {}", output.display(), e);
        }
    }
}
