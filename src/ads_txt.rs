//! Refresh `ads.txt` from the ad network's ads.txt manager.
//!
//! The manager serves one plain-text file per registered domain. We fetch it
//! and write the body verbatim over the local copy. A 404 means the domain
//! has not been registered with the manager yet, which gets its own error so
//! the CLI can say so.

use crate::config::AdsTxtConfig;
use crate::error::PatchError;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Number of lines shown in the post-update preview.
pub const PREVIEW_LINES: usize = 10;

/// Result of a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdsTxtUpdate {
    pub url: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// Line count of the trimmed body.
    pub line_count: usize,
    /// First [`PREVIEW_LINES`] lines of the trimmed body.
    pub preview: Vec<String>,
}

/// Download ads.txt and overwrite `config.output` with it.
///
/// # Errors
/// [`PatchError::SiteNotRegistered`] on HTTP 404,
/// [`PatchError::DownloadFailed`] on any other transport or HTTP error,
/// [`PatchError::OutputWriteFailed`] if the file cannot be written.
pub async fn update_ads_txt(config: &AdsTxtConfig) -> Result<AdsTxtUpdate, PatchError> {
    let url = config.url();
    info!("Downloading ads.txt from: {}", url);

    let download_err = |reason: String| PatchError::DownloadFailed {
        url: url.clone(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| download_err(e.to_string()))?;

    let response = client.get(&url).send().await.map_err(|e| {
        if e.is_timeout() {
            download_err(format!("timed out after {}s", config.timeout_secs))
        } else {
            download_err(e.to_string())
        }
    })?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(PatchError::SiteNotRegistered {
            domain: config.domain.clone(),
        });
    }
    if !status.is_success() {
        return Err(download_err(format!("HTTP {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| download_err(e.to_string()))?;

    write_ads_txt(config, &url, &body).await
}

/// Synchronous wrapper around [`update_ads_txt`].
///
/// Creates a temporary current-thread tokio runtime internally.
///
/// # Errors
/// Same as [`update_ads_txt`].
pub fn update_ads_txt_sync(config: &AdsTxtConfig) -> Result<AdsTxtUpdate, PatchError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PatchError::DownloadFailed {
            url: config.url(),
            reason: format!("failed to create tokio runtime: {e}"),
        })?
        .block_on(update_ads_txt(config))
}

async fn write_ads_txt(
    config: &AdsTxtConfig,
    url: &str,
    body: &str,
) -> Result<AdsTxtUpdate, PatchError> {
    let path = config.output.clone();
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| PatchError::OutputWriteFailed {
            path: path.clone(),
            source,
        })?;

    let (preview, line_count) = preview(body, PREVIEW_LINES);
    info!("ads.txt written to {} ({} lines)", path.display(), line_count);

    Ok(AdsTxtUpdate {
        url: url.to_string(),
        path,
        bytes: body.len(),
        line_count,
        preview,
    })
}

/// First `n` lines of the trimmed body and the total line count.
pub fn preview(body: &str, n: usize) -> (Vec<String>, usize) {
    let lines: Vec<&str> = body.trim().split('\n').collect();
    let head = lines.iter().take(n).map(|l| l.to_string()).collect();
    (head, lines.len())
}
