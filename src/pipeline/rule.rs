//! Transform rules: the text rewrites a patch is built from.
//!
//! Three rule kinds cover every site operation:
//!
//! | Rule | Effect |
//! |------|--------|
//! | [`TransformRule::LiteralReplace`] | replace every occurrence of a substring |
//! | [`TransformRule::RegexReplace`]   | regex substitution, optionally limited and/or required to match |
//! | [`TransformRule::AnchoredInsert`] | insert a payload before/after the first anchor occurrence |
//!
//! Regex rules operate on raw text. They are heuristics over the markup the
//! site actually contains, not an HTML parser, and must stay that way:
//! switching to a DOM rewrite would change which documents match.

use crate::error::PatchError;
use regex::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;

/// Where an anchored payload goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

/// Insertion reference point.
#[derive(Debug, Clone)]
pub enum Anchor {
    /// Exact substring, e.g. `</head>`.
    Literal(String),
    /// Regex, e.g. `<head[^>]*>` for a head tag carrying attributes.
    Pattern(Regex),
}

impl Anchor {
    /// Byte span of the first occurrence.
    fn find(&self, text: &str) -> Option<(usize, usize)> {
        match self {
            Anchor::Literal(s) => text.find(s.as_str()).map(|i| (i, i + s.len())),
            Anchor::Pattern(re) => re.find(text).map(|m| (m.start(), m.end())),
        }
    }

    /// Human-readable form used in warnings.
    pub fn describe(&self) -> String {
        match self {
            Anchor::Literal(s) => s.clone(),
            Anchor::Pattern(re) => re.as_str().to_string(),
        }
    }
}

/// A single text rewrite.
#[derive(Debug, Clone)]
pub enum TransformRule {
    /// Replace every occurrence of `old` with `new`.
    LiteralReplace { old: String, new: String },

    /// Replace up to `limit` matches of `pattern` (0 = all) with the literal
    /// `replacement`. `$` in the replacement is not expanded.
    ///
    /// When `required` is set, a pattern that does not match at all is
    /// reported as a missing anchor instead of a no-op.
    RegexReplace {
        pattern: Regex,
        replacement: String,
        limit: usize,
        required: bool,
    },

    /// Insert `payload` next to the first occurrence of `anchor`.
    AnchoredInsert {
        anchor: Anchor,
        payload: String,
        position: Position,
    },
}

/// Result of applying one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResult<'a> {
    /// The rule ran; the text may or may not have changed.
    Applied(Cow<'a, str>),
    /// The anchor (or required pattern) was not found.
    MissingAnchor(String),
}

impl TransformRule {
    pub fn literal(old: impl Into<String>, new: impl Into<String>) -> Self {
        TransformRule::LiteralReplace {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Regex replacement of all matches, compiled with the given case sensitivity.
    ///
    /// # Errors
    /// [`PatchError::InvalidPattern`] if `pattern` does not compile.
    pub fn regex(
        pattern: &str,
        replacement: impl Into<String>,
        case_insensitive: bool,
    ) -> Result<Self, PatchError> {
        Ok(TransformRule::RegexReplace {
            pattern: compile(pattern, case_insensitive)?,
            replacement: replacement.into(),
            limit: 0,
            required: false,
        })
    }

    /// Same as [`TransformRule::regex`] but a non-matching pattern is a missing anchor.
    ///
    /// # Errors
    /// [`PatchError::InvalidPattern`] if `pattern` does not compile.
    pub fn required_regex(
        pattern: &str,
        replacement: impl Into<String>,
        case_insensitive: bool,
    ) -> Result<Self, PatchError> {
        let mut rule = Self::regex(pattern, replacement, case_insensitive)?;
        if let TransformRule::RegexReplace { required, .. } = &mut rule {
            *required = true;
        }
        Ok(rule)
    }

    pub fn insert_before(anchor: impl Into<String>, payload: impl Into<String>) -> Self {
        TransformRule::AnchoredInsert {
            anchor: Anchor::Literal(anchor.into()),
            payload: payload.into(),
            position: Position::Before,
        }
    }

    pub fn insert_after(anchor: impl Into<String>, payload: impl Into<String>) -> Self {
        TransformRule::AnchoredInsert {
            anchor: Anchor::Literal(anchor.into()),
            payload: payload.into(),
            position: Position::After,
        }
    }

    /// Insert next to the first match of a regex anchor.
    ///
    /// # Errors
    /// [`PatchError::InvalidPattern`] if `pattern` does not compile.
    pub fn insert_at_pattern(
        pattern: &str,
        case_insensitive: bool,
        payload: impl Into<String>,
        position: Position,
    ) -> Result<Self, PatchError> {
        Ok(TransformRule::AnchoredInsert {
            anchor: Anchor::Pattern(compile(pattern, case_insensitive)?),
            payload: payload.into(),
            position,
        })
    }

    /// Apply the rule once.
    pub fn apply<'a>(&self, text: &'a str) -> RuleResult<'a> {
        match self {
            TransformRule::LiteralReplace { old, new } => {
                if old.is_empty() || !text.contains(old.as_str()) {
                    RuleResult::Applied(Cow::Borrowed(text))
                } else {
                    RuleResult::Applied(Cow::Owned(text.replace(old.as_str(), new)))
                }
            }
            TransformRule::RegexReplace {
                pattern,
                replacement,
                limit,
                required,
            } => {
                if *required && !pattern.is_match(text) {
                    return RuleResult::MissingAnchor(pattern.as_str().to_string());
                }
                RuleResult::Applied(pattern.replacen(text, *limit, NoExpand(replacement.as_str())))
            }
            TransformRule::AnchoredInsert {
                anchor,
                payload,
                position,
            } => match anchor.find(text) {
                None => RuleResult::MissingAnchor(anchor.describe()),
                Some((start, end)) => {
                    let at = match position {
                        Position::Before => start,
                        Position::After => end,
                    };
                    let mut out = String::with_capacity(text.len() + payload.len());
                    out.push_str(&text[..at]);
                    out.push_str(payload);
                    out.push_str(&text[at..]);
                    RuleResult::Applied(Cow::Owned(out))
                }
            },
        }
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, PatchError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| PatchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}
