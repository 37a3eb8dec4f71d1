//! HTML snippets inserted or matched by the site operations.
//!
//! Every literal payload and marker lives here so that changing an ad
//! network or a consent script means editing one place, and so tests can
//! assert against the exact bytes the operations write.

use crate::tables::SeoRecord;

// ── Ad scripts (`ads`) ───────────────────────────────────────────────────

/// Marker whose presence means the ad scripts are already installed.
pub const AD_SCRIPTS_MARKER: &str = "effectivegatecpm.com";

/// Inserted immediately before `</body>`.
pub const AD_SCRIPTS: &str = r#"  <!-- Ad Scripts -->
  <script type="text/javascript" src="https://pl28277395.effectivegatecpm.com/f4/35/e9/f435e9d2d25f0d94460639b4ae57f586.js"></script>
  <script type="text/javascript" src="https://pl28277425.effectivegatecpm.com/ed/11/cb/ed11cbb86d17c5eb22a1bd39327dbead.js"></script>
  <script type="text/javascript" src="https://pl28277454.effectivegatecpm.com/55/5e/36/555e368648222ea40b4f7a2d84010791.js"></script>
  <script type="text/javascript" src="https://pl28277656.effectivegatecpm.com/8a/99/68/8a99687f130453b6e902566e42317ecf.js"></script>
"#;

// ── Ad layout fix stylesheet (`ad-fix`) ──────────────────────────────────

pub const AD_FIX_MARKER: &str = "ad-fix.css";

/// Inserted before `</head>` and removed again verbatim.
pub const AD_FIX_LINK: &str = "  <link rel=\"stylesheet\" href=\"ad-fix.css\">\n";

// ── Consent + Ezoic scripts (`gatekeeper`) ───────────────────────────────

pub const GATEKEEPER_SCRIPTS: &str = r#"<script data-cfasync="false" src="https://cmp.gatekeeperconsent.com/min.js"></script>
<script data-cfasync="false" src="https://the.gatekeeperconsent.com/cmp.min.js"></script>
"#;

pub const EZOIC_SCRIPTS: &str = r#"<script async src="//www.ezojs.com/ezoic/sa.min.js"></script>
<script>
    window.ezstandalone = window.ezstandalone || {};
    ezstandalone.cmd = ezstandalone.cmd || [];
</script>
"#;

/// Patterns that strip any previously installed copy of the consent and
/// Ezoic scripts, including the whitespace that follows each one. Matched
/// case-insensitively.
pub const GATEKEEPER_CLEANUP_PATTERNS: &[&str] = &[
    r#"<script\s+data-cfasync="false"\s+src="https://cmp\.gatekeeperconsent\.com/min\.js"></script>\s*\n?"#,
    r#"<script\s+data-cfasync="false"\s+src="https://the\.gatekeeperconsent\.com/cmp\.min\.js"></script>\s*\n?"#,
    r#"<script\s+async\s+src="//www\.ezojs\.com/ezoic/sa\.min\.js"></script>\s*\n?"#,
    r#"(?s)<script>\s*window\.ezstandalone\s*=\s*window\.ezstandalone\s*\|\|\s*\{\};\s*ezstandalone\.cmd\s*=\s*ezstandalone\.cmd\s*\|\|\s*\[\];\s*</script>\s*\n?"#,
];

/// Opening head tag, attributes allowed.
pub const HEAD_OPEN_PATTERN: &str = r"<head[^>]*>";

/// The block written right after the opening head tag.
pub fn gatekeeper_block() -> String {
    format!("\n{GATEKEEPER_SCRIPTS}{EZOIC_SCRIPTS}")
}

// ── Locale (`locale`) ────────────────────────────────────────────────────

pub const LOCALE_REPLACEMENTS: &[(&str, &str)] = &[
    (r#"<html lang="ko">"#, r#"<html lang="en">"#),
    (r#"content="ko_KR""#, r#"content="en_US""#),
];

// ── SEO head (`seo`) ─────────────────────────────────────────────────────

/// Whole head element, non-greedy, across lines.
pub const HEAD_BLOCK_PATTERN: &str = r"(?s)<head>.*?</head>";

/// Navbar brand link as written by the old page template.
pub fn navbar_brand(brand: &str) -> String {
    format!(r#"<a class="navbar-brand fw-bold text-primary" href="/">{brand}</a>"#)
}

/// Canonical URL of `file_name` under `site_url`.
pub fn canonical_url(site_url: &str, file_name: &str) -> String {
    format!("{}/{}", site_url.trim_end_matches('/'), file_name)
}

/// Render the replacement `<head>…</head>` for one page.
pub fn seo_head(file_name: &str, record: &SeoRecord, site_url: &str, brand: &str) -> String {
    let page_url = canonical_url(site_url, file_name);
    let og_image = canonical_url(site_url, "og-image.png");
    let SeoRecord {
        title,
        description,
        keywords,
    } = record;

    format!(
        r#"<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">

  <!-- SEO Meta Tags -->
  <meta name="description" content="{description}">
  <meta name="keywords" content="{keywords}">
  <meta name="author" content="{brand}">
  <meta name="robots" content="index, follow">

  <!-- Canonical URL -->
  <link rel="canonical" href="{page_url}">

  <!-- Favicon -->
  <link rel="icon" type="image/png" href="/favicon.png">

  <!-- Open Graph -->
  <meta property="og:type" content="website">
  <meta property="og:site_name" content="{brand}">
  <meta property="og:title" content="{title}">
  <meta property="og:description" content="{description}">
  <meta property="og:url" content="{page_url}">
  <meta property="og:image" content="{og_image}">
  <meta property="og:locale" content="ko_KR">

  <!-- Twitter Cards -->
  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:title" content="{title}">
  <meta name="twitter:description" content="{description}">
  <meta name="twitter:image" content="{og_image}">

  <title>{title}</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
  <link rel="stylesheet" href="styles.css">
  <script defer src="https://cdn.jsdelivr.net/npm/alpinejs@3.x.x/dist/cdn.min.js"></script>
</head>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    #[test]
    fn cleanup_patterns_match_the_block_they_clean() {
        let block = gatekeeper_block();
        let mut rest = block.clone();
        for p in GATEKEEPER_CLEANUP_PATTERNS {
            let re = RegexBuilder::new(p).case_insensitive(true).build().unwrap();
            assert!(re.is_match(&rest), "pattern did not match: {p}");
            rest = re.replace_all(&rest, "").into_owned();
        }
        assert_eq!(rest, "\n");
    }

    #[test]
    fn seo_head_contains_record_and_canonical() {
        let record = SeoRecord {
            title: "T".into(),
            description: "D".into(),
            keywords: "K".into(),
        };
        let head = seo_head("word.html", &record, "https://example.org/", "Brand");
        assert!(head.starts_with("<head>"));
        assert!(head.ends_with("</head>"));
        assert!(head.contains("<title>T</title>"));
        assert!(head.contains(r#"<link rel="canonical" href="https://example.org/word.html">"#));
        assert!(head.contains(r#"content="https://example.org/og-image.png""#));
        assert!(head.contains(r#"<meta name="author" content="Brand">"#));
    }

    #[test]
    fn canonical_url_joins_with_single_slash() {
        assert_eq!(canonical_url("https://a.b", "x.html"), "https://a.b/x.html");
        assert_eq!(canonical_url("https://a.b/", "x.html"), "https://a.b/x.html");
    }
}
