//! CLI argument definitions for the Splice patch tool.

use camino::Utf8PathBuf;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use splice_core::{InjectionRecipe, presets};

use crate::output::OutputFormat;

/// Command-line interface for the Splice patch tool.
#[derive(Parser, Debug)]
#[command(
    name = "splice",
    version,
    about = "Applies idempotent structural patches to one source file",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Controls how the run report is rendered.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// Reports what would change without writing the file.
    #[arg(long, global = true)]
    pub(crate) check: bool,
    /// Fails when the run leaves the file unchanged.
    #[arg(long, global = true)]
    pub(crate) require_change: bool,
    /// The patch to apply.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Patch commands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Merges a target selector into every stylesheet rule naming a source
    /// selector.
    MergeSelectors {
        /// Selector whose rules are shared.
        #[arg(long)]
        source: String,
        /// Selector that receives the rules.
        #[arg(long)]
        target: String,
        /// Stylesheet to patch.
        #[arg(value_name = "FILE")]
        path: Utf8PathBuf,
    },
    /// Shares the new-task modal styles with the edit-task modal.
    ShareModalStyles {
        /// Stylesheet to patch.
        #[arg(value_name = "FILE")]
        path: Utf8PathBuf,
    },
    /// Injects an import, a statement block, and a markup fragment into a
    /// component template.
    #[command(group(
        ArgGroup::new("recipe_source")
            .required(true)
            .args(["recipe", "preset"])
    ))]
    Inject {
        /// JSON file holding the injection recipe.
        #[arg(long, value_name = "JSON")]
        recipe: Option<Utf8PathBuf>,
        /// Built-in injection recipe.
        #[arg(long, value_enum)]
        preset: Option<InjectionPreset>,
        /// Template to patch.
        #[arg(value_name = "FILE")]
        path: Utf8PathBuf,
    },
}

impl CliCommand {
    /// Returns the file the command patches.
    pub(crate) fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::MergeSelectors { path, .. }
            | Self::ShareModalStyles { path }
            | Self::Inject { path, .. } => path,
        }
    }
}

/// Built-in injection recipes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum InjectionPreset {
    /// Renders the task description as Markdown with `pulldown_cmark`.
    #[default]
    MarkdownDescription,
}

impl InjectionPreset {
    pub(crate) fn recipe(self) -> InjectionRecipe {
        match self {
            Self::MarkdownDescription => presets::markdown_description_recipe(),
        }
    }
}
