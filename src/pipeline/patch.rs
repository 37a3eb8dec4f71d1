//! The idempotency-guarded patcher.
//!
//! A [`Patch`] pairs a [`Guard`] with an ordered list of rules and decides,
//! for one document's text, whether to skip it, rewrite it, or report that an
//! anchor is missing. It never touches the file system.

use crate::pipeline::rule::{RuleResult, TransformRule};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// How a patch decides a document is already up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Skip when the marker is already present (insertions).
    ///
    /// A heuristic: the marker appearing anywhere, even in unrelated content,
    /// causes a skip.
    SkipIfPresent(String),
    /// Skip when the marker is absent (removals).
    SkipIfAbsent(String),
    /// Run the rules and skip when nothing changed.
    SkipIfUnchanged,
}

/// Why a document was left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The guard marker is already there.
    MarkerPresent(String),
    /// There is nothing to remove.
    MarkerAbsent(String),
    /// The rules produced identical text.
    Unchanged,
    /// The file has no entry in the operation's lookup table.
    NotAllowListed,
    /// The file is excluded from the operation by name.
    Excluded(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MarkerPresent(m) => write!(f, "{m} already present"),
            SkipReason::MarkerAbsent(m) => write!(f, "no {m} found"),
            SkipReason::Unchanged => f.write_str("already up to date"),
            SkipReason::NotAllowListed => f.write_str("no table entry"),
            SkipReason::Excluded(why) => write!(f, "excluded: {why}"),
        }
    }
}

/// Decision for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Skip(SkipReason),
    Apply(String),
    /// Soft failure: the document is left untouched.
    MissingAnchor(String),
}

/// Guard + rules.
#[derive(Debug, Clone)]
pub struct Patch {
    guard: Guard,
    rules: Vec<TransformRule>,
}

impl Patch {
    pub fn new(guard: Guard, rules: Vec<TransformRule>) -> Self {
        Self { guard, rules }
    }

    /// Evaluate the patch against `text`.
    ///
    /// Rules run in order, each seeing the previous rule's output. The first
    /// missing anchor stops evaluation. A result identical to the input is
    /// always reported as a skip, whatever the guard.
    pub fn apply(&self, text: &str) -> PatchOutcome {
        match &self.guard {
            Guard::SkipIfPresent(marker) if text.contains(marker.as_str()) => {
                debug!("guard: marker {marker:?} present");
                return PatchOutcome::Skip(SkipReason::MarkerPresent(marker.clone()));
            }
            Guard::SkipIfAbsent(marker) if !text.contains(marker.as_str()) => {
                debug!("guard: marker {marker:?} absent");
                return PatchOutcome::Skip(SkipReason::MarkerAbsent(marker.clone()));
            }
            _ => {}
        }

        let mut current: Cow<'_, str> = Cow::Borrowed(text);
        for rule in &self.rules {
            let next = match rule.apply(&current) {
                RuleResult::MissingAnchor(anchor) => return PatchOutcome::MissingAnchor(anchor),
                RuleResult::Applied(Cow::Borrowed(_)) => continue,
                RuleResult::Applied(Cow::Owned(s)) => s,
            };
            current = Cow::Owned(next);
        }

        if current == text {
            PatchOutcome::Skip(SkipReason::Unchanged)
        } else {
            PatchOutcome::Apply(current.into_owned())
        }
    }
}
