//! Anchor-injection engine for component templates.
//!
//! An [`AnchorInjector`] applies three ordered edits to a template source:
//!
//! 1. a guarded import line after a known import anchor,
//! 2. a block of statements between a binding statement and the opening of
//!    the block that follows it,
//! 3. a literal fragment replacement that wires the new statements into the
//!    markup.
//!
//! Each edit is idempotent on its own and reports a [`PatchStatus`], so a run
//! against an already patched file is distinguishable from a run whose
//! anchors have drifted.

use std::fmt;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PatchError;
use crate::outcome::{NoOpReason, PatchResult, PatchStatus};
use crate::text::{LineEnding, interleave_with_gap, statement_lines};

/// Constants describing one anchor-injection patch.
///
/// Recipes are usually loaded from JSON; every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InjectionRecipe {
    /// Substring whose presence proves the import has been added.
    pub import_marker: String,
    /// Existing import line after which the new import is inserted.
    pub import_anchor_line: String,
    /// Import line to insert.
    pub new_import_line: String,
    /// Regular expression matching the binding statement that precedes the
    /// block opening.
    pub binding_pattern: String,
    /// Literal token that opens the block, for example `view! {`.
    pub block_open_token: String,
    /// Statements to insert before the block opening, one per line.
    pub injected_statements: String,
    /// Markup fragment to replace.
    pub old_fragment: String,
    /// Markup fragment that takes its place.
    pub new_fragment: String,
}

impl InjectionRecipe {
    fn validate(&self) -> Result<(), PatchError> {
        let required = [
            ("import_marker", &self.import_marker),
            ("import_anchor_line", &self.import_anchor_line),
            ("new_import_line", &self.new_import_line),
            ("binding_pattern", &self.binding_pattern),
            ("block_open_token", &self.block_open_token),
            ("injected_statements", &self.injected_statements),
            ("old_fragment", &self.old_fragment),
            ("new_fragment", &self.new_fragment),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PatchError::empty_field(field));
        }

        if !self.new_import_line.contains(self.import_marker.as_str()) {
            return Err(PatchError::not_idempotent(
                "new_import_line does not contain import_marker",
            ));
        }
        if self.new_fragment.contains(self.old_fragment.as_str()) {
            return Err(PatchError::not_idempotent(
                "new_fragment contains old_fragment",
            ));
        }
        if self.old_fragment.contains(self.new_fragment.as_str()) {
            return Err(PatchError::not_idempotent(
                "old_fragment contains new_fragment",
            ));
        }
        if edges_overlap(&self.new_fragment, &self.old_fragment)
            || edges_overlap(&self.old_fragment, &self.new_fragment)
        {
            return Err(PatchError::not_idempotent(
                "new_fragment can form old_fragment with its surrounding text",
            ));
        }
        Ok(())
    }
}

/// Returns whether a proper suffix of `left` is a prefix of `right`.
fn edges_overlap(left: &str, right: &str) -> bool {
    right
        .char_indices()
        .skip(1)
        .filter_map(|(index, _)| right.get(..index))
        .any(|prefix| left.ends_with(prefix))
}

/// The three edits an [`AnchorInjector`] performs, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjectionStep {
    /// Guarded import insertion.
    ImportInsertion,
    /// Statement block injection before the block opening.
    BlockInjection,
    /// Literal markup fragment replacement.
    FragmentReplacement,
}

impl InjectionStep {
    /// Returns the kebab-case name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImportInsertion => "import-insertion",
            Self::BlockInjection => "block-injection",
            Self::FragmentReplacement => "fragment-replacement",
        }
    }
}

impl fmt::Display for InjectionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one step within an injection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// The step this report describes.
    pub step: InjectionStep,
    /// Whether the step applied.
    pub status: PatchStatus,
}

/// Result of running every injection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionReport {
    output: String,
    steps: [StepReport; 3],
}

impl InjectionReport {
    /// Returns the transformed source.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the report, returning the transformed source.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the per-step reports in application order.
    #[must_use]
    pub const fn steps(&self) -> &[StepReport; 3] {
        &self.steps
    }

    /// Returns the status of a single step.
    #[must_use]
    pub fn status(&self, step: InjectionStep) -> Option<&PatchStatus> {
        self.steps
            .iter()
            .find(|report| report.step == step)
            .map(|report| &report.status)
    }

    /// Returns the total number of edits across all steps.
    #[must_use]
    pub fn edits(&self) -> usize {
        self.steps.iter().map(|report| report.status.edits()).sum()
    }

    /// Returns whether any step changed the source.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.steps.iter().any(|report| report.status.is_applied())
    }
}

/// Engine applying an [`InjectionRecipe`].
#[derive(Debug, Clone)]
pub struct AnchorInjector {
    recipe: InjectionRecipe,
    anchor: Regex,
}

impl AnchorInjector {
    /// Builds an injector, compiling the binding anchor.
    ///
    /// The anchor matches the binding pattern, any run of whitespace, and the
    /// literal block-opening token.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is empty, the binding pattern does not
    /// compile, or the recipe could apply again to its own output.
    pub fn new(recipe: InjectionRecipe) -> Result<Self, PatchError> {
        recipe.validate()?;

        let source = format!(
            r"(?P<binding>{})(?P<gap>\s*)(?P<open>{})",
            recipe.binding_pattern,
            regex::escape(&recipe.block_open_token)
        );
        let anchor = Regex::new(&source)
            .map_err(|err| PatchError::invalid_pattern(&recipe.binding_pattern, err.to_string()))?;

        Ok(Self { recipe, anchor })
    }

    /// Returns the recipe this injector applies.
    #[must_use]
    pub const fn recipe(&self) -> &InjectionRecipe {
        &self.recipe
    }

    /// Runs all three steps, each on the previous step's output.
    #[must_use]
    pub fn apply(&self, source: &str) -> InjectionReport {
        let import = self.insert_import(source);
        let block = self.inject_block(import.output());
        let fragment = self.replace_fragment(block.output());

        let steps = [
            StepReport {
                step: InjectionStep::ImportInsertion,
                status: import.status().clone(),
            },
            StepReport {
                step: InjectionStep::BlockInjection,
                status: block.status().clone(),
            },
            StepReport {
                step: InjectionStep::FragmentReplacement,
                status: fragment.status().clone(),
            },
        ];
        for report in &steps {
            debug!(step = %report.step, status = %report.status, "injection step finished");
        }

        InjectionReport {
            output: fragment.into_output(),
            steps,
        }
    }

    /// Inserts the import line after the first occurrence of the anchor line
    /// unless the import marker already appears anywhere in the source.
    #[must_use]
    pub fn insert_import(&self, source: &str) -> PatchResult {
        let recipe = &self.recipe;
        if source.contains(recipe.import_marker.as_str()) {
            return PatchResult::no_op(
                source,
                NoOpReason::already_applied(recipe.import_marker.as_str()),
            );
        }

        let Some(position) = source.find(recipe.import_anchor_line.as_str()) else {
            return PatchResult::no_op(
                source,
                NoOpReason::pattern_not_found(recipe.import_anchor_line.as_str()),
            );
        };

        let (head, tail) = source.split_at(position + recipe.import_anchor_line.len());
        let line_ending = LineEnding::dominant(source).as_str();
        let mut output = String::with_capacity(
            source.len() + line_ending.len() + recipe.new_import_line.len(),
        );
        output.push_str(head);
        output.push_str(line_ending);
        output.push_str(&recipe.new_import_line);
        output.push_str(tail);

        PatchResult::applied(output, 1)
    }

    /// Injects the statements between every binding statement and the block
    /// opening that follows it.
    ///
    /// The statements take the indentation of the block opening. Text with no
    /// anchor comes back unchanged.
    #[must_use]
    pub fn inject_block(&self, source: &str) -> PatchResult {
        let statements = self.recipe.injected_statements.as_str();
        let mut edits: usize = 0;

        let output = self.anchor.replace_all(source, |caps: &Captures<'_>| {
            edits += 1;
            let binding = caps.name("binding").map_or("", |m| m.as_str());
            let gap = caps
                .name("gap")
                .map(|m| m.as_str())
                .filter(|g| !g.is_empty())
                .unwrap_or(" ");
            let open = caps.name("open").map_or("", |m| m.as_str());
            format!(
                "{binding}{gap}{}{open}",
                interleave_with_gap(statements, gap)
            )
        });

        if edits > 0 {
            return PatchResult::applied(output.into_owned(), edits);
        }

        let mut lines = statement_lines(statements).peekable();
        let first = lines.peek().copied().unwrap_or_default();
        let reason = if lines.all(|line| source.contains(line)) {
            NoOpReason::already_applied(first)
        } else {
            NoOpReason::pattern_not_found(format!(
                "{} {}",
                self.recipe.binding_pattern, self.recipe.block_open_token
            ))
        };
        PatchResult::no_op(source, reason)
    }

    /// Replaces every occurrence of the old fragment with the new one.
    #[must_use]
    pub fn replace_fragment(&self, source: &str) -> PatchResult {
        let old = self.recipe.old_fragment.as_str();
        let new = self.recipe.new_fragment.as_str();
        let occurrences = source.matches(old).count();

        if occurrences == 0 {
            let reason = if source.contains(new) {
                NoOpReason::already_applied(new)
            } else {
                NoOpReason::pattern_not_found(old)
            };
            return PatchResult::no_op(source, reason);
        }

        PatchResult::applied(source.replace(old, new), occurrences)
    }
}
