//! Run report rendering.
//!
//! A run produces one [`RunSummary`]. It renders either as a short
//! human-readable block or as a single JSON document.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::ValueEnum;
use serde::Serialize;
use splice_core::{NoOpReason, PatchStatus};

use crate::errors::AppError;

/// Report format selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit a JSON document.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Human-readable lines.
    Human,
    /// A JSON document.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum StepState {
    Applied,
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ReasonKind {
    PatternNotFound,
    AlreadyApplied,
}

/// Outcome of one engine step as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StepSummary {
    pub(crate) step: &'static str,
    pub(crate) status: StepState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) edits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reason: Option<ReasonKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail: Option<String>,
    #[serde(skip)]
    display: String,
}

impl StepSummary {
    pub(crate) fn new(step: &'static str, status: &PatchStatus) -> Self {
        let display = status.to_string();
        match status {
            PatchStatus::Applied { edits } => Self {
                step,
                status: StepState::Applied,
                edits: Some(*edits),
                reason: None,
                detail: None,
                display,
            },
            PatchStatus::NoOp(reason) => Self {
                step,
                status: StepState::NoOp,
                edits: None,
                reason: Some(match reason {
                    NoOpReason::PatternNotFound { .. } => ReasonKind::PatternNotFound,
                    NoOpReason::AlreadyApplied { .. } => ReasonKind::AlreadyApplied,
                }),
                detail: Some(reason.detail().to_owned()),
                display,
            },
        }
    }
}

/// Everything a run reports about one target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) path: Utf8PathBuf,
    pub(crate) changed: bool,
    pub(crate) written: bool,
    pub(crate) steps: Vec<StepSummary>,
}

impl RunSummary {
    fn headline(&self) -> &'static str {
        match (self.changed, self.written) {
            (true, true) => "patched",
            (true, false) => "would be patched",
            (false, _) => "unchanged",
        }
    }
}

pub(crate) fn render<W: Write>(
    summary: &RunSummary,
    format: ResolvedOutputFormat,
    stdout: &mut W,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => render_human(summary, stdout).map_err(AppError::EmitReport),
        ResolvedOutputFormat::Json => {
            serde_json::to_writer(&mut *stdout, summary).map_err(AppError::SerialiseReport)?;
            stdout.write_all(b"\n").map_err(AppError::EmitReport)
        }
    }?;
    stdout.flush().map_err(AppError::EmitReport)
}

fn render_human<W: Write>(summary: &RunSummary, stdout: &mut W) -> std::io::Result<()> {
    writeln!(stdout, "{}: {}", summary.path, summary.headline())?;
    for step in &summary.steps {
        writeln!(stdout, "  {}: {}", step.step, step.display)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn summary(written: bool) -> RunSummary {
        RunSummary {
            path: Utf8PathBuf::from("ui/style.css"),
            changed: true,
            written,
            steps: vec![
                StepSummary::new("import-insertion", &PatchStatus::Applied { edits: 1 }),
                StepSummary::new(
                    "block-injection",
                    &PatchStatus::NoOp(NoOpReason::pattern_not_found("view! {")),
                ),
            ],
        }
    }

    #[rstest]
    #[case::terminal(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case::redirected(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case::forced_human(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case::forced_json(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn resolves_output_format(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    #[test]
    fn human_report_lists_each_step() {
        let mut stdout = Vec::new();
        render(&summary(true), ResolvedOutputFormat::Human, &mut stdout).expect("render");
        assert_eq!(
            String::from_utf8(stdout).expect("utf-8"),
            concat!(
                "ui/style.css: patched\n",
                "  import-insertion: applied (1 edit)\n",
                "  block-injection: no-op: pattern not found: view! {\n",
            )
        );
    }

    #[test]
    fn json_report_omits_absent_fields() {
        let mut stdout = Vec::new();
        render(&summary(false), ResolvedOutputFormat::Json, &mut stdout).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&stdout).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!({
                "path": "ui/style.css",
                "changed": true,
                "written": false,
                "steps": [
                    {"step": "import-insertion", "status": "applied", "edits": 1},
                    {
                        "step": "block-injection",
                        "status": "no-op",
                        "reason": "pattern-not-found",
                        "detail": "view! {"
                    }
                ]
            })
        );
    }
}
