//! Case-preserving word substitution.
//!
//! Finds every case-insensitive occurrence of a target word as a literal
//! letter sequence (embedded occurrences inside longer words match too)
//! and replaces it with a substitute word, reproducing the occurrence's
//! casing shape onto the substitute.

use anyhow::{bail, Result};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// A compiled target/replacement word pair.
///
/// Built once at startup and shared across requests; `apply` is pure and
/// safe to call concurrently.
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    /// Compile a substitution for the given word pair.
    ///
    /// Both words must be non-empty, ASCII-alphabetic, and of equal
    /// length — the per-character casing projection is undefined
    /// otherwise, so the mismatch is rejected here instead of being
    /// taken on faith.
    pub fn new(target: &str, replacement: &str) -> Result<Self> {
        if target.is_empty() || replacement.is_empty() {
            bail!("target and replacement words must be non-empty");
        }
        if !target.chars().all(|c| c.is_ascii_alphabetic())
            || !replacement.chars().all(|c| c.is_ascii_alphabetic())
        {
            bail!("target and replacement words must be ASCII letters");
        }
        if target.len() != replacement.len() {
            bail!(
                "target ({} chars) and replacement ({} chars) must have equal length",
                target.len(),
                replacement.len()
            );
        }

        // ASCII case folding only; Kelvin-sign style Unicode foldings
        // are out of scope.
        let pattern = RegexBuilder::new(&regex::escape(target))
            .case_insensitive(true)
            .unicode(false)
            .build()?;

        Ok(Self {
            pattern,
            replacement: replacement.to_ascii_lowercase(),
        })
    }

    /// The default pair the proxy ships with.
    pub fn yale_to_fale() -> Self {
        // Hardcoded equal-length literals; cannot fail validation.
        Self::new("yale", "fale").expect("default word pair is valid")
    }

    /// Replace every occurrence of the target word in `text`.
    ///
    /// Returns `Cow::Borrowed` when nothing matched, so callers can
    /// detect "no change" without comparing strings.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                project_casing(&caps[0], &self.replacement)
            })
    }
}

/// Shape `replacement` after the casing of `occurrence`.
///
/// Whole-word casings are handled as fast paths; arbitrary mixed case
/// falls through to per-character projection, which relies on the two
/// words having equal length (enforced in [`Substitution::new`]).
fn project_casing(occurrence: &str, replacement: &str) -> String {
    let mut chars = occurrence.chars();
    let first_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let rest_lower = chars.clone().all(|c| c.is_ascii_lowercase());
    let rest_upper = chars.all(|c| c.is_ascii_uppercase());

    if first_upper && rest_upper {
        return replacement.to_ascii_uppercase();
    }
    if first_upper && rest_lower {
        let mut out = String::with_capacity(replacement.len());
        let mut rc = replacement.chars();
        if let Some(c) = rc.next() {
            out.push(c.to_ascii_uppercase());
        }
        out.extend(rc);
        return out;
    }
    if !first_upper && rest_lower {
        return replacement.to_string();
    }

    // Mixed case: copy the occurrence's per-character shape.
    occurrence
        .chars()
        .zip(replacement.chars())
        .map(|(occ, rep)| {
            if occ.is_ascii_uppercase() {
                rep.to_ascii_uppercase()
            } else {
                rep.to_ascii_lowercase()
            }
        })
        .collect()
}
