//! The site maintenance operations.
//!
//! Each [`OperationKind`] is one guard + rule combination over the HTML files
//! of the site directory:
//!
//! | Operation | Guard | Rewrite |
//! |-----------|-------|---------|
//! | `seo` | table entry, then unchanged | replace `<head>…</head>` with a generated SEO head; rename navbar brand |
//! | `ads` | `effectivegatecpm.com` present | ad scripts before `</body>` |
//! | `ad-fix-add` | `ad-fix.css` present | stylesheet link before `</head>` |
//! | `ad-fix-remove` | `ad-fix.css` absent | drop the stylesheet link line |
//! | `gatekeeper` | unchanged | strip consent/Ezoic scripts, re-insert after `<head…>` |
//! | `locale` | unchanged, `google*` excluded | `lang="ko"` → `lang="en"`, `ko_KR` → `en_US` |
//! | `translate` | unchanged, `google*` excluded | translation table, in order |

use crate::batch::Transform;
use crate::config::PatchConfig;
use crate::error::{FileError, PatchError};
use crate::payloads;
use crate::pipeline::patch::{Guard, Patch, PatchOutcome, SkipReason};
use crate::pipeline::rule::{Position, TransformRule};
use crate::tables::SiteTables;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which site operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Seo,
    Ads,
    AdFixAdd,
    AdFixRemove,
    Gatekeeper,
    Locale,
    Translate,
}

impl OperationKind {
    pub const ALL: [OperationKind; 7] = [
        OperationKind::Seo,
        OperationKind::Ads,
        OperationKind::AdFixAdd,
        OperationKind::AdFixRemove,
        OperationKind::Gatekeeper,
        OperationKind::Locale,
        OperationKind::Translate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Seo => "seo",
            OperationKind::Ads => "ads",
            OperationKind::AdFixAdd => "ad-fix-add",
            OperationKind::AdFixRemove => "ad-fix-remove",
            OperationKind::Gatekeeper => "gatekeeper",
            OperationKind::Locale => "locale",
            OperationKind::Translate => "translate",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PatchError::InvalidConfig(format!("unknown operation '{s}'")))
    }
}

/// File-name prefix of search-console verification pages, never translated
/// or relocalised.
const VERIFICATION_PREFIX: &str = "google";

static HEAD_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(payloads::HEAD_BLOCK_PATTERN).unwrap());

/// A ready-to-run operation: compiled rules plus the tables it reads.
#[derive(Debug)]
pub struct SiteOperation<'a> {
    kind: OperationKind,
    tables: &'a SiteTables,
    config: &'a PatchConfig,
    /// Same patch for every file. `None` for `seo`, whose head depends on the file.
    patch: Option<Patch>,
}

impl<'a> SiteOperation<'a> {
    /// Compile the rules for `kind`.
    ///
    /// # Errors
    /// [`PatchError::InvalidPattern`] if a built-in pattern fails to compile.
    pub fn new(
        kind: OperationKind,
        tables: &'a SiteTables,
        config: &'a PatchConfig,
    ) -> Result<Self, PatchError> {
        let patch = match kind {
            OperationKind::Seo => None,
            OperationKind::Ads => Some(Patch::new(
                Guard::SkipIfPresent(payloads::AD_SCRIPTS_MARKER.into()),
                vec![TransformRule::insert_before("</body>", payloads::AD_SCRIPTS)],
            )),
            OperationKind::AdFixAdd => Some(Patch::new(
                Guard::SkipIfPresent(payloads::AD_FIX_MARKER.into()),
                vec![TransformRule::insert_before("</head>", payloads::AD_FIX_LINK)],
            )),
            OperationKind::AdFixRemove => Some(Patch::new(
                Guard::SkipIfAbsent(payloads::AD_FIX_MARKER.into()),
                vec![TransformRule::literal(payloads::AD_FIX_LINK, "")],
            )),
            OperationKind::Gatekeeper => Some(gatekeeper_patch()?),
            OperationKind::Locale => Some(Patch::new(
                Guard::SkipIfUnchanged,
                payloads::LOCALE_REPLACEMENTS
                    .iter()
                    .map(|&(old, new)| TransformRule::literal(old, new))
                    .collect(),
            )),
            OperationKind::Translate => Some(Patch::new(
                Guard::SkipIfUnchanged,
                tables
                    .translations
                    .iter()
                    .map(|t| TransformRule::literal(t.source.as_str(), t.target.as_str()))
                    .collect(),
            )),
        };

        Ok(Self {
            kind,
            tables,
            config,
            patch,
        })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Decide what to do with one document.
    pub fn plan(&self, file_name: &str, text: &str) -> PatchOutcome {
        match self.kind {
            OperationKind::Seo => {
                let Some(record) = self.tables.seo_record(file_name) else {
                    return PatchOutcome::Skip(SkipReason::NotAllowListed);
                };
                let head =
                    payloads::seo_head(file_name, record, &self.config.site_url, &self.config.brand);
                let patch = Patch::new(
                    Guard::SkipIfUnchanged,
                    vec![
                        TransformRule::RegexReplace {
                            pattern: HEAD_BLOCK.clone(),
                            replacement: head,
                            limit: 0,
                            required: true,
                        },
                        TransformRule::literal(
                            payloads::navbar_brand(&self.config.legacy_brand),
                            payloads::navbar_brand(&self.config.brand),
                        ),
                    ],
                );
                patch.apply(text)
            }
            OperationKind::Translate | OperationKind::Locale
                if file_name.starts_with(VERIFICATION_PREFIX) =>
            {
                PatchOutcome::Skip(SkipReason::Excluded("verification file".into()))
            }
            _ => self
                .patch
                .as_ref()
                .map(|p| p.apply(text))
                .unwrap_or(PatchOutcome::Skip(SkipReason::Unchanged)),
        }
    }
}

impl Transform for SiteOperation<'_> {
    fn label(&self) -> &str {
        self.kind.as_str()
    }

    fn transform(&self, file_name: &str, text: &str) -> Result<PatchOutcome, FileError> {
        Ok(self.plan(file_name, text))
    }
}

/// Strip every known copy of the consent/Ezoic scripts, then insert a fresh
/// block right after the first `<head…>` tag.
fn gatekeeper_patch() -> Result<Patch, PatchError> {
    let mut rules = payloads::GATEKEEPER_CLEANUP_PATTERNS
        .iter()
        .map(|p| TransformRule::regex(p, "", true))
        .collect::<Result<Vec<_>, _>>()?;
    rules.push(TransformRule::insert_at_pattern(
        payloads::HEAD_OPEN_PATTERN,
        true,
        payloads::gatekeeper_block(),
        Position::After,
    )?);
    Ok(Patch::new(Guard::SkipIfUnchanged, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{SeoRecord, Translation};
    use std::collections::BTreeMap;

    const PAGE: &str = "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n  <title>Old</title>\n</head>\n<body>\n  <a class=\"navbar-brand fw-bold text-primary\" href=\"/\">PDF Converter</a>\n</body>\n</html>\n";

    fn apply(kind: OperationKind, file: &str, text: &str) -> PatchOutcome {
        let tables = SiteTables::builtin();
        let config = PatchConfig::default();
        SiteOperation::new(kind, &tables, &config)
            .unwrap()
            .plan(file, text)
    }

    fn applied(outcome: PatchOutcome) -> String {
        match outcome {
            PatchOutcome::Apply(s) => s,
            other => panic!("expected apply, got {other:?}"),
        }
    }

    #[test]
    fn operation_names_round_trip() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.as_str().parse::<OperationKind>().unwrap(), kind);
        }
        assert!("nope".parse::<OperationKind>().is_err());
    }

    #[test]
    fn seo_rewrites_head_and_brand() {
        let out = applied(apply(OperationKind::Seo, "word.html", PAGE));
        assert!(out.contains("<title>PDF to Word Converter - Free Online Tool | Convert4U</title>"));
        assert!(out.contains(r#"<link rel="canonical" href="https://convert4u.keero.site/word.html">"#));
        assert!(!out.contains("<title>Old</title>"));
        assert!(out.contains(r#"href="/">Convert4U</a>"#));
        assert!(out.starts_with("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n  <meta charset"));
    }

    #[test]
    fn seo_is_stable_on_second_run() {
        let once = applied(apply(OperationKind::Seo, "word.html", PAGE));
        assert_eq!(
            apply(OperationKind::Seo, "word.html", &once),
            PatchOutcome::Skip(SkipReason::Unchanged)
        );
    }

    #[test]
    fn seo_skips_pages_outside_table() {
        assert_eq!(
            apply(OperationKind::Seo, "index.html", PAGE),
            PatchOutcome::Skip(SkipReason::NotAllowListed)
        );
    }

    #[test]
    fn seo_without_head_is_missing_anchor() {
        assert!(matches!(
            apply(OperationKind::Seo, "word.html", "<html><body></body></html>"),
            PatchOutcome::MissingAnchor(_)
        ));
    }

    #[test]
    fn seo_uses_configured_site_url() {
        let mut seo = BTreeMap::new();
        seo.insert(
            "a.html".to_string(),
            SeoRecord {
                title: "A $1".into(),
                description: "d".into(),
                keywords: "k".into(),
            },
        );
        let tables = SiteTables {
            seo,
            translations: Vec::new(),
        };
        let config = PatchConfig::builder()
            .site_url("https://example.org/")
            .build()
            .unwrap();
        let op = SiteOperation::new(OperationKind::Seo, &tables, &config).unwrap();
        let out = applied(op.plan("a.html", PAGE));
        assert!(out.contains(r#"href="https://example.org/a.html""#));
        assert!(out.contains("<title>A $1</title>"), "replacement must be literal");
    }

    #[test]
    fn ads_insert_before_body_close() {
        let out = applied(apply(OperationKind::Ads, "a.html", PAGE));
        assert!(out.contains(&format!("{}</body>", payloads::AD_SCRIPTS)));
        assert_eq!(
            apply(OperationKind::Ads, "a.html", &out),
            PatchOutcome::Skip(SkipReason::MarkerPresent(payloads::AD_SCRIPTS_MARKER.into()))
        );
    }

    #[test]
    fn ads_without_body_close_warns() {
        assert_eq!(
            apply(OperationKind::Ads, "a.html", "<html><head></head><body>"),
            PatchOutcome::MissingAnchor("</body>".into())
        );
    }

    #[test]
    fn ad_fix_add_then_remove_restores_original() {
        let added = applied(apply(OperationKind::AdFixAdd, "a.html", PAGE));
        assert!(added.contains("  <link rel=\"stylesheet\" href=\"ad-fix.css\">\n</head>"));
        let removed = applied(apply(OperationKind::AdFixRemove, "a.html", &added));
        assert_eq!(removed, PAGE);
    }

    #[test]
    fn gatekeeper_inserts_after_head_with_attributes() {
        let page = "<html><HEAD data-x=\"1\">\n<title>t</title></HEAD></html>";
        let out = applied(apply(OperationKind::Gatekeeper, "a.html", page));
        assert!(out.starts_with(&format!(
            "<html><HEAD data-x=\"1\">\n{}{}",
            payloads::GATEKEEPER_SCRIPTS,
            payloads::EZOIC_SCRIPTS
        )));
    }

    #[test]
    fn gatekeeper_replaces_existing_scripts_without_duplicates() {
        let once = applied(apply(OperationKind::Gatekeeper, "a.html", PAGE));
        let twice = match apply(OperationKind::Gatekeeper, "a.html", &once) {
            PatchOutcome::Apply(s) => s,
            PatchOutcome::Skip(_) => once.clone(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(twice.matches("cmp.gatekeeperconsent.com/min.js").count(), 1);
        assert_eq!(twice.matches("the.gatekeeperconsent.com").count(), 1);
        assert_eq!(twice.matches("ezojs.com").count(), 1);
        assert_eq!(twice.matches("window.ezstandalone =").count(), 1);
    }

    #[test]
    fn gatekeeper_without_head_warns() {
        assert!(matches!(
            apply(OperationKind::Gatekeeper, "a.html", "<html><body></body></html>"),
            PatchOutcome::MissingAnchor(_)
        ));
    }

    #[test]
    fn locale_switches_to_english() {
        let page = "<html lang=\"ko\"><meta property=\"og:locale\" content=\"ko_KR\">";
        let out = applied(apply(OperationKind::Locale, "a.html", page));
        assert_eq!(
            out,
            "<html lang=\"en\"><meta property=\"og:locale\" content=\"en_US\">"
        );
        assert_eq!(
            apply(OperationKind::Locale, "a.html", &out),
            PatchOutcome::Skip(SkipReason::Unchanged)
        );
    }

    #[test]
    fn translate_replaces_table_entries() {
        let out = applied(apply(
            OperationKind::Translate,
            "a.html",
            "<button>다운로드</button>",
        ));
        assert_eq!(out, "<button>Download</button>");
    }

    #[test]
    fn translate_skips_verification_files() {
        assert!(matches!(
            apply(OperationKind::Translate, "google1234.html", "다운로드"),
            PatchOutcome::Skip(SkipReason::Excluded(_))
        ));
    }

    #[test]
    fn locale_skips_verification_files() {
        assert!(matches!(
            apply(OperationKind::Locale, "google1234.html", "<html lang=\"ko\">"),
            PatchOutcome::Skip(SkipReason::Excluded(_))
        ));
    }

    fn translate_with(pairs: &[(&str, &str)], text: &str) -> PatchOutcome {
        let tables = SiteTables {
            seo: BTreeMap::new(),
            translations: pairs
                .iter()
                .map(|&(source, target)| Translation {
                    source: source.into(),
                    target: target.into(),
                })
                .collect(),
        };
        let config = PatchConfig::default();
        SiteOperation::new(OperationKind::Translate, &tables, &config)
            .unwrap()
            .plan("a.html", text)
    }

    #[test]
    fn overlapping_translations_apply_in_table_order() {
        let long = ("256비트 SSL 암호화로 보호합니다", "Protected with 256-bit SSL encryption");
        let short = ("256비트 SSL 암호화로 보호", "Protected with SSL encryption");
        let page = "<p>256비트 SSL 암호화로 보호합니다</p>";

        assert_eq!(
            applied(translate_with(&[long, short], page)),
            "<p>Protected with 256-bit SSL encryption</p>"
        );
        assert_eq!(
            applied(translate_with(&[short, long], page)),
            "<p>Protected with SSL encryption합니다</p>"
        );
        assert_eq!(
            applied(translate_with(&[long, short], "<p>256비트 SSL 암호화로 보호</p>")),
            "<p>Protected with SSL encryption</p>"
        );
    }

    #[test]
    fn translation_matches_inside_longer_strings() {
        assert_eq!(
            applied(translate_with(&[("정보", "Information")], "개인정보")),
            "개인Information"
        );
    }

    #[test]
    fn translate_without_korean_is_unchanged() {
        let tables = SiteTables {
            seo: BTreeMap::new(),
            translations: vec![Translation {
                source: "다운로드".into(),
                target: "Download".into(),
            }],
        };
        let config = PatchConfig::default();
        let op = SiteOperation::new(OperationKind::Translate, &tables, &config).unwrap();
        assert_eq!(
            op.plan("a.html", "<p>Download</p>"),
            PatchOutcome::Skip(SkipReason::Unchanged)
        );
    }
}
