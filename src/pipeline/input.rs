//! File enumeration and the in-place loader/saver.
//!
//! The site directory is listed once, non-recursively, and only regular
//! files ending in `.html` are kept. Names are sorted so two runs over the
//! same tree visit files in the same order.
//!
//! Saving overwrites the file directly. There is no temp file and no
//! backup: a crash in the middle of a write can leave the file truncated.

use crate::error::{FileError, PatchError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One HTML file and its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    /// Read `path` fully as UTF-8.
    ///
    /// # Errors
    /// [`FileError::ReadFailed`] if the file cannot be read and
    /// [`FileError::NotUtf8`] if its bytes are not valid UTF-8.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|e| FileError::ReadFailed {
            file: file_name(&path),
            detail: match e.kind() {
                ErrorKind::PermissionDenied => "permission denied".to_string(),
                _ => e.to_string(),
            },
        })?;
        let text = String::from_utf8(bytes).map_err(|e| FileError::NotUtf8 {
            file: file_name(&path),
            detail: e.utf8_error().to_string(),
        })?;
        Ok(Self { path, text })
    }

    /// File name without directories.
    pub fn name(&self) -> String {
        file_name(&self.path)
    }

    /// Overwrite the file in place with `text`.
    ///
    /// # Errors
    /// [`FileError::WriteFailed`]; the file may be left truncated.
    pub fn overwrite(&mut self, text: String) -> Result<(), FileError> {
        std::fs::write(&self.path, text.as_bytes()).map_err(|e| FileError::WriteFailed {
            file: self.name(),
            detail: e.to_string(),
        })?;
        self.text = text;
        Ok(())
    }
}

/// List the `*.html` files directly inside `dir`, sorted by name.
///
/// # Errors
/// [`PatchError::SiteDirNotFound`] when `dir` is missing or not a directory,
/// [`PatchError::ListFailed`] when it cannot be read.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>, PatchError> {
    if !dir.is_dir() {
        return Err(PatchError::SiteDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let list_err = |source| PatchError::ListFailed {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if path.is_file() && is_html(&path) {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} HTML files in {}", files.len(), dir.display());
    Ok(files)
}

/// Check if the path has the `.html` extension (case-sensitive, like a `*.html` glob).
pub fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
