//! CLI binary for sitepatch.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PatchConfig` / `BridgeConfig` / `AdsTxtConfig` and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use sitepatch::config::{DEFAULT_BRAND, DEFAULT_SITE_DIR, DEFAULT_SITE_URL};
use sitepatch::{
    bridge, run_operation, update_ads_txt, AdsTxtConfig, BatchProgressCallback, BridgeConfig,
    BridgeKind, FileStatus, OperationKind, PatchConfig, ProgressCallback, RunSummary, SiteTables,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch plus a log line for
/// every file that was touched or failed.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Also print a line for skipped files.
    show_skipped: bool,
}

impl CliProgressCallback {
    fn new(operation: &str, show_skipped: bool) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix(operation.to_string());
        Arc::new(Self { bar, show_skipped })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_file_start(&self, _index: usize, _total: usize, file: &str) {
        self.bar.set_message(file.to_string());
    }

    fn on_file_complete(&self, _index: usize, _total: usize, file: &str, status: &FileStatus) {
        let line = match status {
            FileStatus::Updated => Some(format!("  {} {}", green("✓"), file)),
            FileStatus::Skipped { reason } if self.show_skipped => {
                Some(format!("  {} {}  {}", dim("·"), file, dim(&reason.to_string())))
            }
            FileStatus::Skipped { .. } => None,
            FileStatus::MissingAnchor { anchor } => Some(format!(
                "  {} {}  {}",
                yellow("⚠"),
                file,
                yellow(&format!("no {anchor} tag"))
            )),
            FileStatus::Failed { error } => {
                Some(format!("  {} {}", red("✗"), red(&error.to_string())))
            }
        };
        if let Some(line) = line {
            self.bar.println(line);
        }
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _summary: &RunSummary) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Add SEO head blocks to every allow-listed page
  sitepatch seo

  # Inject the ad network scripts before </body>
  sitepatch ads --site-dir site/public

  # Add, then remove, the ad-fix stylesheet link
  sitepatch ad-fix add
  sitepatch ad-fix remove

  # Replace consent-manager scripts and switch the pages to English
  sitepatch gatekeeper
  sitepatch locale
  sitepatch translate

  # Refresh ads.txt from the ads.txt manager
  sitepatch ads-txt --account 19390 --domain keero.site

  # Convert a document (exit code follows the bridge contract)
  sitepatch convert office-to-pdf report.docx out/report.pdf
  sitepatch convert pdf-to-xlsx tables.pdf tables.xlsx

  # Machine-readable summary, custom tables
  sitepatch --json --tables tables.json translate

BRIDGE EXIT CODES:
  0  success          3  tool failed (stderr passed through)
  1  bad usage/input  4  output not produced
  2  missing tool     5  timeout
                      6  unexpected error

ENVIRONMENT VARIABLES:
  SITEPATCH_SITE_DIR      Directory with the *.html pages (default: public)
  SITEPATCH_SITE_URL      Origin used for canonical URLs
  SITEPATCH_BRAND         Brand written into SEO tags and the navbar
  SITEPATCH_TABLES        JSON file overriding the built-in SEO/translation tables
  SITEPATCH_PYTHON        Interpreter for the PDF → Office bridges
  SITEPATCH_LIBREOFFICE   LibreOffice binary for office-to-pdf
  RUST_LOG                Overrides the log filter
"#;

/// Patch the site's static HTML pages and run the document converters.
#[derive(Parser, Debug)]
#[command(
    name = "sitepatch",
    version,
    about = "Patch static HTML pages in place and run the Office/PDF converters",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory whose *.html files are patched (not recursive).
    #[arg(long, global = true, env = "SITEPATCH_SITE_DIR", default_value = DEFAULT_SITE_DIR)]
    site_dir: PathBuf,

    /// Public origin of the site, used for canonical and og:url tags.
    #[arg(long, global = true, env = "SITEPATCH_SITE_URL", default_value = DEFAULT_SITE_URL)]
    site_url: String,

    /// Brand name written into SEO tags and the navbar.
    #[arg(long, global = true, env = "SITEPATCH_BRAND", default_value = DEFAULT_BRAND)]
    brand: String,

    /// JSON file with `seo` and/or `translations` tables replacing the built-ins.
    #[arg(long, global = true, env = "SITEPATCH_TABLES")]
    tables: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long, global = true, env = "SITEPATCH_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, global = true, env = "SITEPATCH_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "SITEPATCH_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "SITEPATCH_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace <head> with the SEO block of each allow-listed page.
    Seo,
    /// Insert the ad network scripts before </body>.
    Ads,
    /// Add or remove the ad-fix.css stylesheet link.
    AdFix {
        #[command(subcommand)]
        action: AdFixAction,
    },
    /// Replace consent-manager scripts with the Gatekeeper + Ezoic block.
    Gatekeeper,
    /// Switch html lang and og:locale from Korean to English.
    Locale,
    /// Replace Korean UI strings with their English translations.
    Translate,
    /// Download ads.txt from the ads.txt manager.
    AdsTxt {
        /// Registered site domain.
        #[arg(long, env = "SITEPATCH_ADS_DOMAIN", default_value = "keero.site")]
        domain: String,
        /// Publisher account at the manager.
        #[arg(long, env = "SITEPATCH_ADS_ACCOUNT", default_value_t = 19390)]
        account: u32,
        /// Destination file. Default: <site-dir>/ads.txt.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// HTTP timeout in seconds.
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
    /// Convert one document through an external tool.
    Convert {
        #[arg(value_enum)]
        bridge: BridgeArg,
        input: PathBuf,
        output: PathBuf,
        /// Python interpreter for the pdf-to-* bridges.
        #[arg(long, env = "SITEPATCH_PYTHON", default_value = "python3")]
        python: PathBuf,
        /// LibreOffice binary. Searched on PATH when not given.
        #[arg(long, env = "SITEPATCH_LIBREOFFICE")]
        libreoffice: Option<PathBuf>,
        /// LibreOffice timeout in seconds.
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
    /// Print the active SEO and translation tables as JSON.
    Tables,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum AdFixAction {
    Add,
    Remove,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BridgeArg {
    OfficeToPdf,
    PdfToDocx,
    PdfToPptx,
    PdfToXlsx,
}

impl From<BridgeArg> for BridgeKind {
    fn from(v: BridgeArg) -> Self {
        match v {
            BridgeArg::OfficeToPdf => BridgeKind::OfficeToPdf,
            BridgeArg::PdfToDocx => BridgeKind::PdfToDocx,
            BridgeArg::PdfToPptx => BridgeKind::PdfToPptx,
            BridgeArg::PdfToXlsx => BridgeKind::PdfToXlsx,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces per-file INFO lines unless --verbose.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let operation = match &cli.command {
        Command::Seo => OperationKind::Seo,
        Command::Ads => OperationKind::Ads,
        Command::AdFix {
            action: AdFixAction::Add,
        } => OperationKind::AdFixAdd,
        Command::AdFix {
            action: AdFixAction::Remove,
        } => OperationKind::AdFixRemove,
        Command::Gatekeeper => OperationKind::Gatekeeper,
        Command::Locale => OperationKind::Locale,
        Command::Translate => OperationKind::Translate,
        Command::AdsTxt {
            domain,
            account,
            output,
            timeout,
        } => {
            let config = AdsTxtConfig {
                domain: domain.clone(),
                account_id: *account,
                output: output
                    .clone()
                    .unwrap_or_else(|| cli.site_dir.join("ads.txt")),
                timeout_secs: *timeout,
                ..AdsTxtConfig::default()
            };
            return ads_txt(&cli, &config).await;
        }
        Command::Convert {
            bridge,
            input,
            output,
            python,
            libreoffice,
            timeout,
        } => {
            let config = BridgeConfig {
                python: python.clone(),
                libreoffice: libreoffice.clone(),
                office_timeout: Duration::from_secs(*timeout),
                ..BridgeConfig::default()
            };
            let result = bridge::run_bridge((*bridge).into(), input, output, &config).await;
            let code = bridge::exit_code(&result);
            match result {
                Ok(path) if !cli.quiet => {
                    eprintln!("{} {}", green("✔"), bold(&path.display().to_string()))
                }
                Ok(_) => {}
                Err(e) => eprintln!("{} {}", red("✘"), e),
            }
            std::process::exit(code);
        }
        Command::Tables => {
            let tables = load_tables(&cli)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&tables).context("Failed to serialise tables")?
            );
            return Ok(());
        }
    };

    // ── Page batch ───────────────────────────────────────────────────────
    let tables = load_tables(&cli)?;

    let mut builder = PatchConfig::builder()
        .site_dir(&cli.site_dir)
        .site_url(&cli.site_url)
        .brand(&cli.brand);
    if show_progress {
        let cb = CliProgressCallback::new(operation.as_str(), cli.verbose);
        builder = builder.progress_callback(cb as ProgressCallback);
    }
    let config = builder.build().context("Invalid configuration")?;

    let summary = run_operation(operation, &tables, &config)
        .with_context(|| format!("{operation} failed"))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        print_summary(&summary);
    }

    if !summary.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

async fn ads_txt(cli: &Cli, config: &AdsTxtConfig) -> Result<()> {
    let update = update_ads_txt(config)
        .await
        .context("ads.txt update failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&update).context("Failed to serialise result")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(&update.path.display().to_string()),
            dim(&format!("{} lines, {} bytes", update.line_count, update.bytes))
        );
        for line in &update.preview {
            eprintln!("   {}", dim(line));
        }
        if update.line_count > update.preview.len() {
            eprintln!(
                "   {}",
                dim(&format!("… {} more", update.line_count - update.preview.len()))
            );
        }
    }
    Ok(())
}

fn load_tables(cli: &Cli) -> Result<SiteTables> {
    match &cli.tables {
        Some(path) => SiteTables::from_json_file(path)
            .with_context(|| format!("Failed to load tables from {}", path.display())),
        None => Ok(SiteTables::builtin()),
    }
}

fn print_summary(summary: &RunSummary) {
    let mark = if summary.errored > 0 {
        red("✘")
    } else if summary.missing_anchor > 0 {
        yellow("⚠")
    } else {
        green("✔")
    };
    eprintln!(
        "{} {}: {} updated, {} skipped, {} errors  {}",
        mark,
        bold(&summary.operation),
        bold(&summary.updated.to_string()),
        summary.skipped,
        if summary.errored > 0 {
            red(&summary.errored.to_string())
        } else {
            summary.errored.to_string()
        },
        dim(&format!("{}ms", summary.duration_ms)),
    );
    if summary.missing_anchor > 0 {
        eprintln!(
            "   {}",
            yellow(&format!(
                "{} file(s) skipped for a missing anchor",
                summary.missing_anchor
            ))
        );
    }
}
