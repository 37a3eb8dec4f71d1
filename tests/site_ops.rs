//! Integration tests for the page operations.
//!
//! Each test builds a scratch site directory with `tempfile`, runs one or more
//! operations over it, and checks both the summary and the bytes on disk.

use sitepatch::config::{DEFAULT_BRAND, DEFAULT_SITE_URL, LEGACY_BRAND};
use sitepatch::payloads::{self, navbar_brand};
use sitepatch::{
    run_batch, run_operation, BatchProgressCallback, FileError, FileStatus, OperationKind,
    PatchConfig, PatchOutcome, RunSummary, SiteTables, SkipReason, Transform, Translation,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8">
  <title>old</title>
  <meta property="og:locale" content="ko_KR">
</head>
<body>
  <nav><a class="navbar-brand fw-bold text-primary" href="/">PDF Converter</a></nav>
  <h1>다운로드</h1>
</body>
</html>
"#;

/// Batch logging goes to the test output when `RUST_LOG` is set.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn site(files: &[(&str, &str)]) -> tempfile::TempDir {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        std::fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

fn config(dir: &Path) -> PatchConfig {
    PatchConfig::builder().site_dir(dir).build().unwrap()
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

fn statuses(summary: &RunSummary) -> Vec<&'static str> {
    summary.files.iter().map(|f| f.status.label()).collect()
}

// ── Idempotence ──────────────────────────────────────────────────────────────

#[test]
fn ad_fix_add_is_idempotent_and_reversible() {
    let dir = site(&[("word.html", PAGE)]);
    let config = config(dir.path());
    let tables = SiteTables::builtin();

    let first = run_operation(OperationKind::AdFixAdd, &tables, &config).unwrap();
    assert_eq!(first.updated, 1);
    let after_first = read(dir.path(), "word.html");
    assert_eq!(after_first.matches(payloads::AD_FIX_MARKER).count(), 1);
    assert!(after_first.contains(&format!("{}</head>", payloads::AD_FIX_LINK)));

    let second = run_operation(OperationKind::AdFixAdd, &tables, &config).unwrap();
    assert_eq!((second.updated, second.skipped), (0, 1));
    assert_eq!(read(dir.path(), "word.html"), after_first);

    let removed = run_operation(OperationKind::AdFixRemove, &tables, &config).unwrap();
    assert_eq!(removed.updated, 1);
    assert_eq!(read(dir.path(), "word.html"), PAGE);

    let again = run_operation(OperationKind::AdFixRemove, &tables, &config).unwrap();
    assert_eq!(again.skipped, 1);
}

#[test]
fn gatekeeper_never_duplicates_scripts() {
    let dir = site(&[("merge.html", PAGE)]);
    let config = config(dir.path());
    let tables = SiteTables::builtin();

    run_operation(OperationKind::Gatekeeper, &tables, &config).unwrap();
    run_operation(OperationKind::Gatekeeper, &tables, &config).unwrap();

    let html = read(dir.path(), "merge.html");
    assert_eq!(html.matches("cmp.gatekeeperconsent.com/min.js").count(), 1);
    assert_eq!(html.matches("ezoic/sa.min.js").count(), 1);
    assert_eq!(html.matches("ezstandalone.cmd = ").count(), 1);
    let head = html.find("<head>").unwrap();
    let script = html.find("gatekeeperconsent").unwrap();
    assert!(head < script && script < html.find("</head>").unwrap());
}

#[test]
fn locale_then_rerun_skips() {
    let dir = site(&[("a.html", PAGE)]);
    let config = config(dir.path());
    let tables = SiteTables::builtin();

    let first = run_operation(OperationKind::Locale, &tables, &config).unwrap();
    assert_eq!(first.updated, 1);
    let html = read(dir.path(), "a.html");
    assert!(html.contains(r#"<html lang="en">"#));
    assert!(html.contains(r#"content="en_US""#));

    let second = run_operation(OperationKind::Locale, &tables, &config).unwrap();
    assert_eq!(second.skipped, 1);
}

#[test]
fn locale_leaves_verification_files_alone() {
    let dir = site(&[("google1234.html", PAGE), ("word.html", PAGE)]);
    let summary =
        run_operation(OperationKind::Locale, &SiteTables::builtin(), &config(dir.path())).unwrap();

    assert_eq!((summary.updated, summary.skipped), (1, 1));
    assert_eq!(read(dir.path(), "google1234.html"), PAGE);
    assert!(matches!(
        summary.files[0].status,
        FileStatus::Skipped {
            reason: SkipReason::Excluded(_)
        }
    ));
    assert!(read(dir.path(), "word.html").contains(r#"<html lang="en">"#));
}

// ── SEO ──────────────────────────────────────────────────────────────────────

#[test]
fn seo_covers_every_allow_listed_page() {
    let tables = SiteTables::builtin();
    let mut files: Vec<(&str, &str)> = tables.seo.keys().map(|k| (k.as_str(), PAGE)).collect();
    files.push(("index.html", PAGE));
    let dir = site(&files);
    let config = config(dir.path());

    let summary = run_operation(OperationKind::Seo, &tables, &config).unwrap();
    assert_eq!(summary.updated, tables.seo.len());
    assert_eq!(summary.skipped, 1);
    assert!(summary.is_clean());

    for (name, record) in &tables.seo {
        let html = read(dir.path(), name);
        assert!(html.contains(&record.title), "{name}: title missing");
        assert!(
            html.contains(&payloads::canonical_url(DEFAULT_SITE_URL, name)),
            "{name}: canonical URL missing"
        );
        assert!(html.contains(&navbar_brand(DEFAULT_BRAND)));
        assert!(!html.contains(&navbar_brand(LEGACY_BRAND)));
        assert!(!html.contains("<title>old</title>"));
    }
    assert_eq!(read(dir.path(), "index.html"), PAGE);

    let index = summary
        .files
        .iter()
        .find(|f| f.file == "index.html")
        .unwrap();
    assert_eq!(
        index.status,
        FileStatus::Skipped {
            reason: SkipReason::NotAllowListed
        }
    );

    let rerun = run_operation(OperationKind::Seo, &tables, &config).unwrap();
    assert_eq!(rerun.updated, 0);
}

// ── Missing anchor ───────────────────────────────────────────────────────────

#[test]
fn ads_without_body_close_is_a_soft_failure() {
    let truncated = "<html><head></head><body><p>no closing tag";
    let dir = site(&[("a.html", PAGE), ("b.html", truncated)]);
    let config = config(dir.path());
    let tables = SiteTables::builtin();

    let summary = run_operation(OperationKind::Ads, &tables, &config).unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.missing_anchor, 1);
    assert_eq!(summary.errored, 0);
    assert_eq!(statuses(&summary), ["updated", "warning"]);
    assert_eq!(read(dir.path(), "b.html"), truncated);
    assert!(read(dir.path(), "a.html").contains(&format!("{}</body>", payloads::AD_SCRIPTS)));

    let rerun = run_operation(OperationKind::Ads, &tables, &config).unwrap();
    assert_eq!(rerun.updated, 0);
    assert!(matches!(
        rerun.files[0].status,
        FileStatus::Skipped {
            reason: SkipReason::MarkerPresent(_)
        }
    ));
}

// ── Translation ──────────────────────────────────────────────────────────────

fn tables_with(pairs: &[(&str, &str)]) -> SiteTables {
    SiteTables {
        seo: BTreeMap::new(),
        translations: pairs
            .iter()
            .map(|&(source, target)| Translation {
                source: source.into(),
                target: target.into(),
            })
            .collect(),
    }
}

#[test]
fn non_overlapping_translations_commute() {
    let forward = tables_with(&[("다운로드", "Download"), ("변환", "Convert")]);
    let backward = tables_with(&[("변환", "Convert"), ("다운로드", "Download")]);
    let page = "<p>다운로드</p><button>변환</button><p>다운로드</p>";

    let a = site(&[("p.html", page)]);
    let b = site(&[("p.html", page)]);
    run_operation(OperationKind::Translate, &forward, &config(a.path())).unwrap();
    run_operation(OperationKind::Translate, &backward, &config(b.path())).unwrap();

    let out = read(a.path(), "p.html");
    assert_eq!(out, read(b.path(), "p.html"));
    assert_eq!(out, "<p>Download</p><button>Convert</button><p>Download</p>");
}

#[test]
fn translate_leaves_verification_files_alone() {
    let page = "<p>다운로드</p>";
    let dir = site(&[("google1234abcd.html", page), ("word.html", page)]);
    let tables = SiteTables::builtin();

    let summary = run_operation(OperationKind::Translate, &tables, &config(dir.path())).unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(read(dir.path(), "google1234abcd.html"), page);
    assert!(matches!(
        summary.files[0].status,
        FileStatus::Skipped {
            reason: SkipReason::Excluded(_)
        }
    ));
}

#[test]
fn tables_file_overrides_builtins() {
    let dir = site(&[("p.html", "<p>안녕</p>")]);
    let tables_path = dir.path().join("tables.json");
    std::fs::write(
        &tables_path,
        r#"{ "translations": [ { "source": "안녕", "target": "Hello" } ] }"#,
    )
    .unwrap();

    let tables = SiteTables::from_json_file(&tables_path).unwrap();
    assert!(tables.seo.is_empty());
    run_operation(OperationKind::Translate, &tables, &config(dir.path())).unwrap();
    assert_eq!(read(dir.path(), "p.html"), "<p>Hello</p>");
}

// ── Fault isolation ──────────────────────────────────────────────────────────

/// Appends a comment, but refuses `b.html`.
struct FailsOnB;

impl Transform for FailsOnB {
    fn label(&self) -> &str {
        "fails-on-b"
    }

    fn transform(&self, file_name: &str, text: &str) -> Result<PatchOutcome, FileError> {
        if file_name == "b.html" {
            return Err(FileError::TransformFailed {
                file: file_name.into(),
                detail: "refused".into(),
            });
        }
        Ok(PatchOutcome::Apply(format!("{text}<!-- done -->")))
    }
}

#[test]
fn one_failing_file_does_not_stop_the_batch() {
    let dir = site(&[("a.html", "a"), ("b.html", "b"), ("c.html", "c")]);
    let summary = run_batch(&FailsOnB, &config(dir.path())).unwrap();

    assert_eq!(statuses(&summary), ["updated", "error", "updated"]);
    assert_eq!((summary.updated, summary.errored), (2, 1));
    assert!(!summary.is_clean());
    assert_eq!(read(dir.path(), "a.html"), "a<!-- done -->");
    assert_eq!(read(dir.path(), "b.html"), "b");
    assert_eq!(read(dir.path(), "c.html"), "c<!-- done -->");
}

// ── Progress events ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl BatchProgressCallback for Recorder {
    fn on_batch_start(&self, total_files: usize) {
        self.events.lock().unwrap().push(format!("start {total_files}"));
    }

    fn on_file_complete(&self, index: usize, total: usize, file: &str, status: &FileStatus) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{index}/{total} {file} {}", status.label()));
    }

    fn on_batch_complete(&self, summary: &RunSummary) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {}", summary.total()));
    }
}

#[test]
fn progress_events_arrive_in_file_order() {
    let dir = site(&[("b.html", PAGE), ("a.html", "<html></html>")]);
    let recorder = Arc::new(Recorder::default());
    let config = PatchConfig::builder()
        .site_dir(dir.path())
        .progress_callback(recorder.clone())
        .build()
        .unwrap();

    run_operation(OperationKind::AdFixAdd, &SiteTables::builtin(), &config).unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        ["start 2", "1/2 a.html warning", "2/2 b.html updated", "done 2"]
    );
}
