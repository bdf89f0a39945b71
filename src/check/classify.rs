//! Drift CLI output classification.
//!
//! Maps an exit code plus captured output to ok / drift / error. The rules
//! live here alone so they can change without touching the runner.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

lazy_regex!(
    RE_PLAN_SUMMARY,
    r"Plan:\s+(\d+)\s+to\s+add,\s+(\d+)\s+to\s+change,\s+(\d+)\s+to\s+destroy"
);
lazy_regex!(RE_NO_CHANGES, r"(?m)^\s*No changes\.");
lazy_regex!(RE_DRIFT_DETECTED, r"(?i)drift\s+detected");
lazy_regex!(RE_ERROR_LINE, r"(?m)^\s*(?:│\s*)?Error:");

/// Exit code the drift CLI uses for "plan succeeded, changes present".
pub const DRIFT_EXIT_CODE: i32 = 2;

/// Outcome class of a single scope check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Drift,
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Drift => "drift",
            CheckStatus::Error => "error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource change counts parsed from plan summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub add: u32,
    pub change: u32,
    pub destroy: u32,
}

impl ChangeCounts {
    pub fn total(&self) -> u32 {
        self.add
            .saturating_add(self.change)
            .saturating_add(self.destroy)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ChangeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} ~{} -{}", self.add, self.change, self.destroy)
    }
}

/// Result of classifying one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: CheckStatus,
    pub changes: ChangeCounts,
}

/// Sum every `Plan: N to add, M to change, K to destroy` line.
///
/// Returns `None` when the output has no plan summary at all. Terragrunt
/// prints one summary per module, hence the sum.
pub fn parse_change_counts(output: &str) -> Option<ChangeCounts> {
    let mut found = false;
    let mut counts = ChangeCounts::default();

    for caps in RE_PLAN_SUMMARY.captures_iter(output) {
        found = true;
        let num = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0)
        };
        counts.add = counts.add.saturating_add(num(1));
        counts.change = counts.change.saturating_add(num(2));
        counts.destroy = counts.destroy.saturating_add(num(3));
    }

    found.then_some(counts)
}

/// Classify a finished drift CLI run.
///
/// - exit codes other than 0 and 2 are errors
/// - `Error:` lines without any plan summary are errors
/// - exit code 2, non-zero change counts or "drift detected" mean drift
/// - anything else is ok
pub fn classify(exit_code: Option<i32>, stdout: &str, stderr: &str) -> Classification {
    let combined = format!("{}\n{}", stdout, stderr);
    let counts = parse_change_counts(&combined);
    let changes = counts.unwrap_or_default();

    let status = match exit_code {
        Some(0) | Some(DRIFT_EXIT_CODE) => {
            if counts.is_none() && RE_ERROR_LINE.is_match(&combined) {
                CheckStatus::Error
            } else if exit_code == Some(DRIFT_EXIT_CODE)
                || !changes.is_empty()
                || RE_DRIFT_DETECTED.is_match(&combined)
            {
                CheckStatus::Drift
            } else {
                CheckStatus::Ok
            }
        }
        _ => CheckStatus::Error,
    };

    if status == CheckStatus::Ok && !RE_NO_CHANGES.is_match(&combined) {
        tracing::debug!("Exit {:?} with no recognised summary, treating as ok", exit_code);
    }

    Classification { status, changes }
}
