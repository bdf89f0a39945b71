//! Aggregated check results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::Tool;
use crate::error::Result;
use crate::scope::ResolvedScope;

use super::classify::{ChangeCounts, CheckStatus, Classification};

/// Result of checking one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub scope: String,
    pub project: String,
    pub environment: String,
    pub directory: String,
    pub tool: Tool,
    pub status: CheckStatus,
    pub changes: ChangeCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    /// Why the check errored, when it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_channel: Option<String>,
}

impl CheckOutcome {
    /// Outcome for a scope whose CLI run finished.
    pub fn from_run(
        scope: &ResolvedScope,
        classification: Classification,
        exit_code: Option<i32>,
        duration_ms: u64,
    ) -> Self {
        Self {
            scope: scope.name.clone(),
            project: scope.project.clone(),
            environment: scope.environment.clone(),
            directory: scope.directory.clone(),
            tool: scope.tool,
            status: classification.status,
            changes: classification.changes,
            exit_code,
            duration_ms,
            message: None,
            slack_channel: scope.slack_channel.clone(),
        }
    }

    /// Outcome for a scope that could not be run at all.
    pub fn failed(scope: &ResolvedScope, message: impl Into<String>) -> Self {
        Self {
            scope: scope.name.clone(),
            project: scope.project.clone(),
            environment: scope.environment.clone(),
            directory: scope.directory.clone(),
            tool: scope.tool,
            status: CheckStatus::Error,
            changes: ChangeCounts::default(),
            exit_code: None,
            duration_ms: 0,
            message: Some(message.into()),
            slack_channel: scope.slack_channel.clone(),
        }
    }
}

/// All outcomes of a check run plus per-status totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub ok: usize,
    pub drift: usize,
    pub error: usize,
    pub results: Vec<CheckOutcome>,
}

impl CheckSummary {
    /// Aggregate outcomes, stamping the current time.
    pub fn new(results: Vec<CheckOutcome>) -> Self {
        Self::at(results, Utc::now())
    }

    /// Aggregate outcomes with an explicit timestamp.
    pub fn at(results: Vec<CheckOutcome>, generated_at: DateTime<Utc>) -> Self {
        let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();
        Self {
            generated_at,
            total: results.len(),
            ok: count(CheckStatus::Ok),
            drift: count(CheckStatus::Drift),
            error: count(CheckStatus::Error),
            results,
        }
    }

    /// Worst status across all results.
    pub fn overall_status(&self) -> CheckStatus {
        if self.error > 0 {
            CheckStatus::Error
        } else if self.drift > 0 {
            CheckStatus::Drift
        } else {
            CheckStatus::Ok
        }
    }

    /// Process exit code: 1 on errors, 2 on drift (unless drift is
    /// tolerated), 0 otherwise.
    pub fn exit_code(&self, fail_on_drift: bool) -> i32 {
        match self.overall_status() {
            CheckStatus::Error => 1,
            CheckStatus::Drift if fail_on_drift => 2,
            _ => 0,
        }
    }

    /// Write the summary as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Read a summary written by [`CheckSummary::write`].
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
