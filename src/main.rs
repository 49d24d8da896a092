//! mypy-config CLI binary entry point.
//! Delegates to the library for validation/generation and prints results.

use clap::Parser;
use mypy_config::cli::{Cli, Commands};
use mypy_config::config::{self, Context, Effective};
use mypy_config::fsx::OsFs;
use mypy_config::models::ValidateResult;
use mypy_config::{mypy, output};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate { repo_root, output: out } => {
            let eff = config::resolve_effective(repo_root.as_deref(), out.as_deref());
            let mut ctx = setup_context(&eff);
            if let Err(e) = mypy::validate(&mut ctx, &OsFs) {
                eprintln!(
                    "{} {}",
                    output::error_prefix(),
                    format!("failed to read {}: {}", ctx.strict_typing_file, e)
                );
                std::process::exit(2);
            }
            let res = ValidateResult::from_issues(ctx.errors);
            output::print_validate(&res, &eff.output);
            if res.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Generate { repo_root, output: out } => {
            let eff = config::resolve_effective(repo_root.as_deref(), out.as_deref());
            let mut ctx = setup_context(&eff);
            if let Err(e) = mypy::validate(&mut ctx, &OsFs) {
                eprintln!(
                    "{} {}",
                    output::error_prefix(),
                    format!("failed to read {}: {}", ctx.strict_typing_file, e)
                );
                std::process::exit(2);
            }
            let res = ValidateResult::from_issues(ctx.errors.clone());
            if res.has_blocking() {
                // Writing a config derived from contradictory or missing data
                // would mask the real problem, so surface the findings instead.
                output::print_validate(&res, &eff.output);
                std::process::exit(1);
            }
            if let Err(e) = mypy::generate(&ctx) {
                eprintln!(
                    "{} {}",
                    output::error_prefix(),
                    format!("failed to write {}: {}", ctx.mypy_ini, e)
                );
                std::process::exit(2);
            }
            output::print_generate(&ctx.root.join(&ctx.mypy_ini), &ctx.root, &eff.output);
        }
    }
}

/// Resolve the shared context, failing fast with exit code 2 when the
/// declaration list is not where the configuration says it is.
fn setup_context(eff: &Effective) -> Context {
    if config::load_config(&eff.repo_root).is_none() {
        eprintln!(
            "{} {}",
            output::note_prefix(),
            "No mypy-config.toml found; using defaults."
        );
    }
    let strict_path = eff.repo_root.join(&eff.strict_typing_file);
    if !strict_path.is_file() {
        eprintln!(
            "{} {}",
            output::error_prefix(),
            format!(
                "Declaration file not found: {} (pass --repo-root or configure mypy-config.toml)",
                strict_path.to_string_lossy()
            )
        );
        std::process::exit(2);
    }
    Context::new(eff)
}
