//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mypy-config",
    version,
    about = "Generate and validate mypy.ini from the strict-typing list",
    long_about = "mypy-config — reconcile the .strict-typing declaration list, the built-in ignore table, and the filesystem into a deterministic mypy.ini.\n\nConfiguration precedence: CLI > mypy-config.toml > defaults.",
    after_help = "Examples:\n  mypy-config validate\n  mypy-config validate --output json\n  mypy-config generate --repo-root ~/src/core",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for validating and generating the config.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current mypy-config version."
    )]
    Version,
    /// Validate the declaration list and check mypy.ini for drift
    #[command(
        about = "Run validation checks",
        long_about = "Classify the strict-typing entries, cross-check them against the ignore table and the filesystem, and compare the computed document with the on-disk mypy.ini. Drift is reported as fixable.",
        after_help = "Examples:\n  mypy-config validate\n  mypy-config validate --output json"
    )]
    Validate {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Write a freshly generated mypy.ini
    #[command(
        about = "Generate mypy.ini",
        long_about = "Validate first, then overwrite the target file with the computed document. Nothing is written when a blocking validation error is present.",
        after_help = "Examples:\n  mypy-config generate\n  mypy-config generate --repo-root ~/src/core"
    )]
    Generate {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
