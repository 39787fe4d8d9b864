use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Polymer lint CLI options.
#[derive(Debug, Parser)]
#[command(
    name = "polymer-lint",
    version,
    about = "Lint Polymer element sources for APIs removed in Polymer 2.0",
    args_conflicts_with_subcommands = true,
    subcommand_precedence_over_arg = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub lint: LintArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lint files or directories.
    Lint(LintArgs),

    /// List available lints.
    ListRules,

    /// Explain a lint.
    Explain {
        /// Lint rule name.
        rule: String,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LintArgs {
    /// Element files (`.html`) or scripts (`.js`, `.mjs`, `.cjs`), or
    /// directories holding them. Reads JavaScript from stdin when absent.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// How warnings are printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Only run these lints (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these lints (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Path to a polymer-lint.toml; searched upwards from the first path otherwise.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail the run (exit status 1) when any removed Polymer API is found,
    /// e.g. to gate a Polymer 2.0 migration in CI.
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// `file:line:col: error[code]: message`, plus the suggested rewrite.
    Pretty,
    /// Warnings serialized as a JSON array.
    Json,
    /// GitHub Actions workflow commands, for inline PR annotations.
    Github,
}
