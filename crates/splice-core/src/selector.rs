//! Selector-merge engine for stylesheets.
//!
//! The engine copies every rule declared for a source selector onto a target
//! selector by merging the target into the same selector list. It never
//! parses declarations: each line is classified by [`SelectorMerge::classify`]
//! and only the selector-bearing shapes are rewritten.

use std::borrow::Cow;

use tracing::debug;

use crate::error::PatchError;
use crate::outcome::{NoOpReason, PatchResult};

/// Shape of a stylesheet line relative to the source selector.
///
/// Variants are listed in classification priority order. A line that fits
/// more than one shape is always assigned the first one that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Mentions the source selector and opens a declaration block, for
    /// example `.card h2 {`.
    OpenBrace,
    /// Mentions the source selector inside a selector list that continues on
    /// the next line, for example `.card h2,`.
    Continuation,
    /// Starts with the source selector and holds nothing else of interest;
    /// the block opens on a later line.
    BareSelector,
    /// Anything else, including lines that already mention the target.
    Other,
}

/// Merges a target selector into every selector list naming a source
/// selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorMerge {
    source: String,
    target: String,
}

impl SelectorMerge {
    /// Creates a merge of `source` into `target`.
    ///
    /// Both selectors are literal tokens and are trimmed of surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if either selector is empty, both are the same, or
    /// the target occurs inside the source.
    pub fn new(source: impl AsRef<str>, target: impl AsRef<str>) -> Result<Self, PatchError> {
        let source_selector = source.as_ref().trim();
        let target_selector = target.as_ref().trim();

        if source_selector.is_empty() {
            return Err(PatchError::empty_field("source selector"));
        }
        if target_selector.is_empty() {
            return Err(PatchError::empty_field("target selector"));
        }
        if source_selector == target_selector {
            return Err(PatchError::identical_selectors(source_selector));
        }
        if source_selector.contains(target_selector) {
            return Err(PatchError::target_within_source(
                source_selector,
                target_selector,
            ));
        }

        Ok(Self {
            source: source_selector.to_owned(),
            target: target_selector.to_owned(),
        })
    }

    /// Builds a merge from selectors known to pass [`SelectorMerge::new`].
    pub(crate) fn from_trusted(source: &str, target: &str) -> Self {
        Self {
            source: source.to_owned(),
            target: target.to_owned(),
        }
    }

    /// Returns the selector whose rules are shared.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the selector that receives the rules.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Classifies a single line.
    ///
    /// Lines that already mention the target selector are always
    /// [`LineKind::Other`]; this is what makes the merge idempotent.
    #[must_use]
    pub fn classify(&self, line: &str) -> LineKind {
        if !line.contains(self.source.as_str()) || line.contains(self.target.as_str()) {
            return LineKind::Other;
        }

        if line.contains('{') {
            LineKind::OpenBrace
        } else if line.contains(',') {
            LineKind::Continuation
        } else if line.trim().starts_with(self.source.as_str()) {
            LineKind::BareSelector
        } else {
            LineKind::Other
        }
    }

    /// Applies the merge to a whole stylesheet.
    ///
    /// Line order is preserved. The line count grows by one for every bare
    /// selector line that gains a target copy; no line is ever removed.
    #[must_use]
    pub fn apply(&self, stylesheet: &str) -> PatchResult {
        let merged = format!("{}, {}", self.source, self.target);
        let lines: Vec<&str> = stylesheet.split('\n').collect();
        let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len());
        let mut edits: usize = 0;
        let mut already_merged: usize = 0;

        for (index, line) in lines.iter().enumerate() {
            if line.contains(self.source.as_str()) && line.contains(self.target.as_str()) {
                already_merged += 1;
            }

            match self.classify(line) {
                kind @ (LineKind::OpenBrace | LineKind::Continuation) => {
                    debug!(line = index + 1, ?kind, "merging target into selector list");
                    out.push(Cow::Owned(line.replace(self.source.as_str(), &merged)));
                    edits += 1;
                }
                LineKind::BareSelector => {
                    let copy = line.replace(self.source.as_str(), &self.target);
                    out.push(Cow::Borrowed(line));
                    // A copy already sitting on the next line means an
                    // earlier run handled this selector.
                    if lines.get(index + 1).copied() == Some(copy.as_str()) {
                        already_merged += 1;
                    } else {
                        debug!(line = index + 1, "duplicating bare selector line");
                        out.push(Cow::Owned(copy));
                        edits += 1;
                    }
                }
                LineKind::Other => out.push(Cow::Borrowed(line)),
            }
        }

        if edits > 0 {
            return PatchResult::applied(out.join("\n"), edits);
        }

        let reason = if already_merged == 0 {
            NoOpReason::pattern_not_found(self.source.as_str())
        } else {
            NoOpReason::already_applied(self.target.as_str())
        };
        PatchResult::no_op(stylesheet, reason)
    }
}
