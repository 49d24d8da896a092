//! Output rendering for the validate and generate commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-issue fields and a top-level summary.

use crate::models::ValidateResult;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefixed(plain: &str, colored: String) -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        colored
    } else {
        plain.to_string()
    }
}

pub fn error_prefix() -> String {
    prefixed("error:", "error:".red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefixed("note:", "note:".cyan().bold().to_string())
}

/// Print validation results in the requested format.
pub fn print_validate(res: &ValidateResult, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_validate_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &res.issues {
                let (icon, tag) = if issue.fixable {
                    (
                        if color { "▲".yellow().to_string() } else { "▲".to_string() },
                        if color {
                            "⟦fixable⟧".yellow().bold().to_string()
                        } else {
                            "⟦fixable⟧".to_string()
                        },
                    )
                } else {
                    (
                        if color { "✖".red().to_string() } else { "✖".to_string() },
                        if color {
                            "⟦error⟧".red().bold().to_string()
                        } else {
                            "⟦error⟧".to_string()
                        },
                    )
                };
                println!("{} {} ❲{}❳ — {}", icon, tag, issue.rule, issue.message);
            }
            let summary = format!(
                "— Summary — errors={} fixable={}",
                res.summary.errors, res.summary.fixable
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the target written by the generate command, displayed relative to
/// the repository root when possible.
pub fn print_generate(target: &Path, root: &Path, output: &str) {
    let shown = pathdiff::diff_paths(target, root)
        .unwrap_or_else(|| target.to_path_buf())
        .to_string_lossy()
        .to_string();
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&json!({"generated": shown})).unwrap()
        ),
        _ => {
            if use_colors(output) {
                println!("{} {}", "✏️  generated:".green().bold(), shown.bold());
            } else {
                println!("✏️  generated: {}", shown);
            }
        }
    }
}

/// Compose validate JSON object (pure) for testing/snapshot purposes.
pub fn compose_validate_json(res: &ValidateResult) -> JsonVal {
    // Directly serialize ValidateResult as JSON, keeping stable shape
    serde_json::to_value(res).unwrap()
}
