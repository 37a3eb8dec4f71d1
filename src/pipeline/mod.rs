//! Building blocks of a page rewrite.
//!
//! ```text
//! input ──▶ patch (guard) ──▶ rule … rule ──▶ input (save)
//! (list/load)  (skip?)          (text edits)     (overwrite)
//! ```
//!
//! 1. [`input`]: list the site's `*.html` files and load/save one of them
//! 2. [`patch`]: a guard plus an ordered list of rules; decides skip/apply
//! 3. [`rule`] : one text edit: literal replace, regex replace or an
//!    insert next to an anchor

pub mod input;
pub mod patch;
pub mod rule;
