//! Shared data models for validation output.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single validation finding, tagged with the reporting plugin so callers
/// can filter it from unrelated validation domains.
pub struct Issue {
    pub plugin: String,
    pub rule: String,
    pub message: String,
    /// True when re-running the generate step resolves the finding.
    pub fixable: bool,
}

#[derive(Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub errors: usize,
    pub fixable: usize,
}

#[derive(Serialize)]
/// Validation results container.
pub struct ValidateResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl ValidateResult {
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let fixable = issues.iter().filter(|i| i.fixable).count();
        let errors = issues.len();
        ValidateResult {
            issues,
            summary: Summary { errors, fixable },
        }
    }

    /// True when at least one finding cannot be resolved by regenerating.
    pub fn has_blocking(&self) -> bool {
        self.issues.iter().any(|i| !i.fixable)
    }
}
