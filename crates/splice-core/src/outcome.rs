//! Outcome types shared by both engines.
//!
//! Every edit reports whether it changed the text. A no-op carries the reason
//! so orchestration code can tell an already patched file apart from an anchor
//! that has drifted.

use std::fmt;

/// Why an edit left its input unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    /// The anchor the edit depends on does not occur in the text.
    PatternNotFound {
        /// The anchor that was searched for.
        anchor: String,
    },
    /// The text already carries the product of this edit.
    AlreadyApplied {
        /// The marker that proved the edit had been applied.
        marker: String,
    },
}

impl NoOpReason {
    /// Creates a pattern-not-found reason.
    #[must_use]
    pub fn pattern_not_found(anchor: impl Into<String>) -> Self {
        Self::PatternNotFound {
            anchor: anchor.into(),
        }
    }

    /// Creates an already-applied reason.
    #[must_use]
    pub fn already_applied(marker: impl Into<String>) -> Self {
        Self::AlreadyApplied {
            marker: marker.into(),
        }
    }

    /// Returns the anchor or marker text this reason refers to.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::PatternNotFound { anchor } => anchor,
            Self::AlreadyApplied { marker } => marker,
        }
    }
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatternNotFound { anchor } => write!(f, "pattern not found: {anchor}"),
            Self::AlreadyApplied { marker } => write!(f, "already applied: {marker}"),
        }
    }
}

/// Whether an edit applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStatus {
    /// The edit rewrote the text.
    Applied {
        /// Number of places the edit touched.
        edits: usize,
    },
    /// The edit returned its input unchanged.
    NoOp(NoOpReason),
}

impl PatchStatus {
    /// Returns whether the edit changed the text.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Returns the number of edits, zero for a no-op.
    #[must_use]
    pub const fn edits(&self) -> usize {
        match self {
            Self::Applied { edits } => *edits,
            Self::NoOp(_) => 0,
        }
    }

    /// Returns the no-op reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<&NoOpReason> {
        match self {
            Self::Applied { .. } => None,
            Self::NoOp(reason) => Some(reason),
        }
    }
}

impl fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied { edits: 1 } => f.write_str("applied (1 edit)"),
            Self::Applied { edits } => write!(f, "applied ({edits} edits)"),
            Self::NoOp(reason) => write!(f, "no-op: {reason}"),
        }
    }
}

/// Result of a single edit.
///
/// On a no-op the output is byte-for-byte identical to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    output: String,
    status: PatchStatus,
}

impl PatchResult {
    /// Builds an applied result.
    pub(crate) const fn applied(output: String, edits: usize) -> Self {
        Self {
            output,
            status: PatchStatus::Applied { edits },
        }
    }

    /// Builds a no-op result that hands the input back unchanged.
    pub(crate) fn no_op(input: &str, reason: NoOpReason) -> Self {
        Self {
            output: input.to_owned(),
            status: PatchStatus::NoOp(reason),
        }
    }

    /// Returns the transformed text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the result, returning the transformed text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the edit status.
    #[must_use]
    pub const fn status(&self) -> &PatchStatus {
        &self.status
    }

    /// Returns the number of edits made.
    #[must_use]
    pub const fn edits(&self) -> usize {
        self.status.edits()
    }

    /// Returns whether any edits were made.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.status.is_applied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_returns_input_verbatim() {
        let result = PatchResult::no_op("a\r\nb\n", NoOpReason::pattern_not_found("x"));
        assert_eq!(result.output(), "a\r\nb\n");
        assert!(!result.has_changes());
        assert_eq!(result.edits(), 0);
    }

    #[test]
    fn status_display_pluralises_edits() {
        assert_eq!(
            PatchStatus::Applied { edits: 1 }.to_string(),
            "applied (1 edit)"
        );
        assert_eq!(
            PatchStatus::Applied { edits: 3 }.to_string(),
            "applied (3 edits)"
        );
        assert_eq!(
            PatchStatus::NoOp(NoOpReason::already_applied("use foo")).to_string(),
            "no-op: already applied: use foo"
        );
    }
}
