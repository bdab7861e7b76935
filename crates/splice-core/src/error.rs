//! Error types for patch engine construction.
//!
//! Applying a patch never fails: a missing anchor is reported through
//! [`crate::PatchStatus::NoOp`]. Errors only arise while building an engine
//! from configuration constants that could never produce a correct or
//! idempotent patch.

use thiserror::Error;

/// Errors raised while building a patch engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatchError {
    /// A required configuration constant was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The source and target selectors are the same token.
    #[error("source and target selectors are identical: {selector}")]
    IdenticalSelectors {
        /// The repeated selector.
        selector: String,
    },

    /// The target selector occurs inside the source selector, so every line
    /// naming the source would already look merged.
    #[error("target selector `{target}` occurs inside source selector `{source_selector}`")]
    TargetWithinSource {
        /// The selector whose rules are shared.
        source_selector: String,
        /// The selector that would receive the rules.
        target: String,
    },

    /// The anchor regular expression failed to compile.
    #[error("invalid anchor pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Description of the compilation failure.
        message: String,
    },

    /// The configured patch would apply again to its own output.
    #[error("patch is not idempotent: {message}")]
    NotIdempotent {
        /// Description of the conflicting constants.
        message: String,
    },
}

impl PatchError {
    /// Creates an empty field error.
    #[must_use]
    pub const fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    /// Creates an identical selectors error.
    #[must_use]
    pub fn identical_selectors(selector: impl Into<String>) -> Self {
        Self::IdenticalSelectors {
            selector: selector.into(),
        }
    }

    /// Creates a target-within-source error.
    #[must_use]
    pub fn target_within_source(
        source_selector: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::TargetWithinSource {
            source_selector: source_selector.into(),
            target: target.into(),
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates a non-idempotent patch error.
    #[must_use]
    pub fn not_idempotent(message: impl Into<String>) -> Self {
        Self::NotIdempotent {
            message: message.into(),
        }
    }
}
