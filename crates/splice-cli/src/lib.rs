//! Command-line runtime for the Splice patch tool.
//!
//! The runtime owns argument parsing, configuration bootstrapping and the
//! file boundary around the pure engines in `splice_core`. It reads one
//! target file, runs one engine over its text, writes the result back when it
//! changed, and reports each step's outcome. It can be driven from the
//! binary entrypoint or from tests where configuration loading and IO
//! streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use splice_core::{AnchorInjector, PatchStatus, SelectorMerge, presets};
use tracing::{info, warn};

mod cli;
mod config;
mod errors;
mod files;
pub mod output;
mod telemetry;

use cli::{Cli, CliCommand};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
use output::{RunSummary, StepSummary};
pub use output::{OutputFormat, ResolvedOutputFormat};

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `splice_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &["--config-path", "--log-filter", "--log-format"];

const SELECTOR_MERGE_STEP: &str = "selector-merge";

/// Text produced by one engine run plus the status of each step.
struct EngineRun {
    output: String,
    steps: Vec<(&'static str, PatchStatus)>,
}

impl EngineRun {
    fn changed(&self) -> bool {
        self.steps.iter().any(|(_, status)| status.is_applied())
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    stdout_is_terminal: bool,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
        loader: &'a L,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
            loader,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(split.command_arguments.iter().cloned()) {
            Ok(cli) => cli,
            Err(error) if is_informational(&error) => {
                let _ = write!(self.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return self.report_failure(&AppError::CliUsage(error)),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| telemetry::initialise(&config).map_err(AppError::from))
            .and_then(|()| self.execute(&cli));

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => self.report_failure(&error),
        }
    }

    fn execute(&mut self, cli: &Cli) -> Result<(), AppError> {
        let path = cli.command.path();
        let source = files::read_target(path)?;
        let run = run_engine(&cli.command, &source)?;
        log_steps(path.as_str(), &run.steps);

        let changed = run.changed();
        let written = changed && !cli.check;
        if written {
            files::replace_target(path, &run.output)?;
            info!(path = %path, "wrote patched file");
        }

        let summary = RunSummary {
            path: path.clone(),
            changed,
            written,
            steps: run
                .steps
                .iter()
                .map(|(step, status)| StepSummary::new(*step, status))
                .collect(),
        };
        let format: ResolvedOutputFormat = cli.output.resolve(self.stdout_is_terminal);
        output::render(&summary, format, self.stdout)?;

        if cli.require_change && !changed {
            return Err(AppError::UnchangedTarget { path: path.clone() });
        }
        Ok(())
    }

    fn report_failure(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.stderr, "{}", error.to_string().trim_end());
        ExitCode::FAILURE
    }
}

fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

fn run_engine(command: &CliCommand, source: &str) -> Result<EngineRun, AppError> {
    match command {
        CliCommand::MergeSelectors {
            source: from,
            target,
            ..
        } => Ok(merge_selectors(&SelectorMerge::new(from, target)?, source)),
        CliCommand::ShareModalStyles { .. } => {
            Ok(merge_selectors(&presets::modal_selector_merge(), source))
        }
        CliCommand::Inject { recipe, preset, .. } => {
            let injection_recipe = match recipe {
                Some(path) => files::read_recipe(path)?,
                None => preset.unwrap_or_default().recipe(),
            };
            let report = AnchorInjector::new(injection_recipe)?.apply(source);
            let steps = report
                .steps()
                .iter()
                .map(|step| (step.step.as_str(), step.status.clone()))
                .collect();
            Ok(EngineRun {
                output: report.into_output(),
                steps,
            })
        }
    }
}

fn merge_selectors(merge: &SelectorMerge, source: &str) -> EngineRun {
    let result = merge.apply(source);
    let status = result.status().clone();
    EngineRun {
        output: result.into_output(),
        steps: vec![(SELECTOR_MERGE_STEP, status)],
    }
}

fn log_steps(path: &str, steps: &[(&'static str, PatchStatus)]) {
    for (step, status) in steps {
        match status {
            PatchStatus::Applied { edits } => info!(path, step, edits, "step applied"),
            PatchStatus::NoOp(reason @ splice_core::NoOpReason::PatternNotFound { .. }) => {
                warn!(path, step, %reason, "anchor not found; the target may have drifted");
            }
            PatchStatus::NoOp(reason) => info!(path, step, %reason, "step skipped"),
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// `stdout_is_terminal` decides what `--output auto` resolves to.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, stdout_is_terminal, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(stdout, stderr, stdout_is_terminal, loader).run(args)
}
