//! Office → PDF through headless LibreOffice.
//!
//! LibreOffice writes `<outdir>/<stem>.pdf` and offers no way to pick the
//! file name, so it converts into a private staging directory next to the
//! requested output and the result is moved into place afterwards. The
//! staging directory is removed on every path, and so are any output
//! directories created for a conversion that failed.

use super::{check_input, create_output_dir, remove_created_dir, run_tool};
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Input extensions LibreOffice is asked to convert (compared lowercased).
pub const OFFICE_EXTENSIONS: &[&str] = &["docx", "xlsx", "pptx", "doc", "xls", "ppt"];

/// Names and install locations tried in order when no binary is configured.
pub const LIBREOFFICE_CANDIDATES: &[&str] = &[
    "libreoffice",
    "soffice",
    "/usr/bin/libreoffice",
    "/usr/bin/soffice",
    "/Applications/LibreOffice.app/Contents/MacOS/soffice",
];

const TOOL: &str = "LibreOffice";
const HINT: &str = "Install LibreOffice or point --libreoffice at its binary.";

pub async fn office_to_pdf(
    input: &Path,
    output: &Path,
    config: &BridgeConfig,
) -> Result<PathBuf, BridgeError> {
    check_extension(input)?;
    check_input(input)?;

    let soffice = find_libreoffice(config.libreoffice.as_deref()).ok_or_else(|| {
        BridgeError::MissingDependency {
            dependency: TOOL.to_string(),
            hint: HINT.to_string(),
        }
    })?;
    debug!("Using LibreOffice at {}", soffice.display());

    let out_dir = output_dir(input, output);
    let created = create_output_dir(&out_dir).await?;

    let result = convert_via_staging(&soffice, input, output, &out_dir, config).await;
    if result.is_err() {
        remove_created_dir(created).await;
    }
    result
}

async fn convert_via_staging(
    soffice: &Path,
    input: &Path,
    output: &Path,
    out_dir: &Path,
    config: &BridgeConfig,
) -> Result<PathBuf, BridgeError> {
    let staging = tempfile::Builder::new()
        .prefix(".sitepatch-")
        .tempdir_in(out_dir)
        .map_err(|e| BridgeError::Internal(format!("creating staging directory: {e}")))?;

    let mut cmd = Command::new(soffice);
    cmd.arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(staging.path())
        .arg(input);

    let run = run_tool(TOOL, HINT, cmd, Some(config.office_timeout)).await?;
    if !run.status.success() {
        return Err(BridgeError::ToolFailed {
            tool: TOOL.to_string(),
            status: run.code(),
            stderr: run.stderr,
        });
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let produced = staging.path().join(format!("{stem}.pdf"));
    if !produced.is_file() {
        return Err(BridgeError::OutputMissing {
            path: output.to_path_buf(),
        });
    }

    move_into_place(&produced, output).await?;
    Ok(output.to_path_buf())
}

fn check_extension(input: &Path) -> Result<(), BridgeError> {
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if OFFICE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(BridgeError::Usage(format!(
            "Unsupported file type: '.{ext}' (supported: .{})",
            OFFICE_EXTENSIONS.join(", .")
        )))
    }
}

/// The output's directory, or the input's when the output is a bare file name.
fn output_dir(input: &Path, output: &Path) -> PathBuf {
    let non_empty = |p: &Path| !p.as_os_str().is_empty();
    output
        .parent()
        .filter(|p| non_empty(p))
        .or_else(|| input.parent().filter(|p| non_empty(p)))
        .unwrap_or(Path::new("."))
        .to_path_buf()
}

/// Locate the LibreOffice binary.
///
/// An explicit path must exist. Otherwise bare names are searched on `PATH`
/// and absolute candidates are checked directly.
pub fn find_libreoffice(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return resolve(path);
    }
    LIBREOFFICE_CANDIDATES
        .iter()
        .find_map(|candidate| resolve(Path::new(candidate)))
}

fn resolve(candidate: &Path) -> Option<PathBuf> {
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(candidate))
        .find(|p| p.is_file())
}

/// Rename, falling back to copy when staging and output sit on different filesystems.
async fn move_into_place(from: &Path, to: &Path) -> Result<(), BridgeError> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|e| BridgeError::Internal(format!("moving PDF to {}: {e}", to.display())))
}
