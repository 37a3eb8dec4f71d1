//! Configuration types for site patching, conversion bridges and the
//! ads.txt updater.
//!
//! Batch behaviour is controlled through [`PatchConfig`], built via its
//! [`PatchConfigBuilder`]. The bridges read [`BridgeConfig`] and the remote
//! fetch reads [`AdsTxtConfig`]; both are plain structs with documented
//! defaults.

use crate::error::PatchError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default directory holding the site's HTML files.
pub const DEFAULT_SITE_DIR: &str = "public";

/// Default public origin of the site, used for canonical URLs.
pub const DEFAULT_SITE_URL: &str = "https://convert4u.keero.site";

/// Default brand name written into SEO tags and the navbar.
pub const DEFAULT_BRAND: &str = "Convert4U";

/// Navbar brand text replaced by the `seo` operation.
pub const LEGACY_BRAND: &str = "PDF Converter";

/// Configuration for a batch run over the site directory.
///
/// # Example
/// ```rust
/// use sitepatch::PatchConfig;
///
/// let config = PatchConfig::builder()
///     .site_dir("site/public")
///     .site_url("https://example.org")
///     .build()
///     .unwrap();
/// assert_eq!(config.site_url, "https://example.org");
/// ```
#[derive(Clone)]
pub struct PatchConfig {
    /// Directory whose `*.html` files are patched (not recursive). Default: `public`.
    pub site_dir: PathBuf,

    /// Origin used to build canonical and Open Graph URLs, without trailing slash.
    pub site_url: String,

    /// Brand written into the SEO head and the navbar. Default: `Convert4U`.
    pub brand: String,

    /// Navbar brand text that `seo` replaces with [`PatchConfig::brand`].
    pub legacy_brand: String,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            site_url: DEFAULT_SITE_URL.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            legacy_brand: LEGACY_BRAND.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchConfig")
            .field("site_dir", &self.site_dir)
            .field("site_url", &self.site_url)
            .field("brand", &self.brand)
            .field("legacy_brand", &self.legacy_brand)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl PatchConfig {
    /// Create a new builder for `PatchConfig`.
    pub fn builder() -> PatchConfigBuilder {
        PatchConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PatchConfig`].
#[derive(Debug)]
pub struct PatchConfigBuilder {
    config: PatchConfig,
}

impl PatchConfigBuilder {
    pub fn site_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.site_dir = dir.into();
        self
    }

    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.config.site_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.config.brand = brand.into();
        self
    }

    pub fn legacy_brand(mut self, brand: impl Into<String>) -> Self {
        self.config.legacy_brand = brand.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// # Errors
    /// [`PatchError::InvalidConfig`] for an empty brand or a site URL that is
    /// not absolute HTTP(S).
    pub fn build(self) -> Result<PatchConfig, PatchError> {
        let c = &self.config;
        if !(c.site_url.starts_with("http://") || c.site_url.starts_with("https://")) {
            return Err(PatchError::InvalidConfig(format!(
                "site URL must start with http:// or https://, got '{}'",
                c.site_url
            )));
        }
        if c.brand.trim().is_empty() {
            return Err(PatchError::InvalidConfig("brand must not be empty".into()));
        }
        Ok(self.config)
    }
}

// ── Bridges ──────────────────────────────────────────────────────────────

/// Settings shared by the conversion bridges.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Python interpreter that runs the pdf2docx / pptx / camelot drivers. Default: `python3`.
    pub python: PathBuf,

    /// Explicit LibreOffice binary. When `None`, the usual names and install
    /// locations are searched.
    pub libreoffice: Option<PathBuf>,

    /// Hard limit for one LibreOffice conversion. Default: 300 s.
    pub office_timeout: Duration,

    /// Limit for the Python drivers. Default: none (they block until done).
    pub python_timeout: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
            libreoffice: None,
            office_timeout: Duration::from_secs(300),
            python_timeout: None,
        }
    }
}

// ── ads.txt ──────────────────────────────────────────────────────────────

/// Where to fetch `ads.txt` from and where to write it.
#[derive(Debug, Clone)]
pub struct AdsTxtConfig {
    /// Base URL of the ads.txt manager.
    pub base_url: String,
    /// Publisher account at the manager.
    pub account_id: u32,
    /// Registered site domain.
    pub domain: String,
    /// Destination file, overwritten verbatim.
    pub output: PathBuf,
    /// Request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
}

impl Default for AdsTxtConfig {
    fn default() -> Self {
        Self {
            base_url: "https://srv.adstxtmanager.com".to_string(),
            account_id: 19390,
            domain: "keero.site".to_string(),
            output: PathBuf::from(DEFAULT_SITE_DIR).join("ads.txt"),
            timeout_secs: 30,
        }
    }
}

impl AdsTxtConfig {
    /// Full URL of this site's ads.txt at the manager.
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.account_id,
            self.domain
        )
    }
}
