//! Per-scope invocation of the drift CLI.
//!
//! The CLI is called once per scope with:
//!
//! ```text
//! <cli> check --scope <name> --project <project> --environment <env> \
//!             --dir <directory> --tool <tool> [--tool-version <v>]
//! ```
//!
//! API credentials travel in the environment, never on the command line.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::scope::ResolvedScope;
use crate::shell::{execute, execute_streaming, CommandOptions, CommandResult, OutputLine};
use crate::ui::UserInterface;

use super::classify::{classify, CheckStatus};
use super::summary::{CheckOutcome, CheckSummary};

/// Default drift CLI executable.
pub const DEFAULT_CLI: &str = "drift-check";

/// Environment variable carrying the reporting API base URL.
pub const API_URL_ENV: &str = "DRIFT_API_URL";

/// Environment variable carrying the reporting API token.
pub const API_TOKEN_ENV: &str = "DRIFT_API_TOKEN";

/// Credentials forwarded to the drift CLI.
#[derive(Clone, Default)]
pub struct ApiCredentials {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Runs the drift CLI for each scope and aggregates the results.
#[derive(Debug, Clone)]
pub struct CheckRunner {
    cli: String,
    base_dir: PathBuf,
    credentials: ApiCredentials,
    stream_output: bool,
}

impl CheckRunner {
    /// Create a runner that resolves scope directories against `base_dir`.
    pub fn new(cli: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            cli: cli.into(),
            base_dir: base_dir.into(),
            credentials: ApiCredentials::default(),
            stream_output: false,
        }
    }

    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Echo CLI output to stderr while it runs.
    pub fn with_streaming(mut self, stream_output: bool) -> Self {
        self.stream_output = stream_output;
        self
    }

    /// Arguments passed to the CLI for `scope`.
    pub fn args_for(&self, scope: &ResolvedScope) -> Vec<String> {
        let mut args = vec![
            "check".to_string(),
            "--scope".to_string(),
            scope.name.clone(),
            "--project".to_string(),
            scope.project.clone(),
            "--environment".to_string(),
            scope.environment.clone(),
            "--dir".to_string(),
            scope.directory.clone(),
            "--tool".to_string(),
            scope.tool.to_string(),
        ];
        if let Some(version) = &scope.tool_version {
            args.push("--tool-version".to_string());
            args.push(version.clone());
        }
        args
    }

    fn options(&self) -> CommandOptions {
        let mut options = CommandOptions {
            cwd: Some(self.base_dir.clone()),
            ..CommandOptions::captured()
        };
        if let Some(url) = &self.credentials.url {
            options.env.insert(API_URL_ENV.to_string(), url.clone());
        }
        if let Some(token) = &self.credentials.token {
            options.env.insert(API_TOKEN_ENV.to_string(), token.clone());
        }
        options
    }

    fn run_cli(&self, args: &[String]) -> Result<CommandResult> {
        let options = self.options();
        if self.stream_output {
            execute_streaming(
                &self.cli,
                args,
                &options,
                Box::new(|line: OutputLine| match line {
                    OutputLine::Stdout(l) | OutputLine::Stderr(l) => eprintln!("  │ {}", l),
                }),
            )
        } else {
            execute(&self.cli, args, &options)
        }
    }

    fn scope_dir(&self, scope: &ResolvedScope) -> PathBuf {
        let dir = Path::new(&scope.directory);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base_dir.join(dir)
        }
    }

    /// Check a single scope. Never fails: problems become error outcomes.
    pub fn check_scope(&self, scope: &ResolvedScope) -> CheckOutcome {
        let dir = self.scope_dir(scope);
        if !dir.is_dir() {
            return CheckOutcome::failed(
                scope,
                format!("Directory not found: {}", scope.directory),
            );
        }

        let args = self.args_for(scope);
        match self.run_cli(&args) {
            Ok(result) => {
                let classification = classify(result.exit_code, &result.stdout, &result.stderr);
                tracing::debug!(
                    "Scope '{}' exited {:?}: {}",
                    scope.name,
                    result.exit_code,
                    classification.status
                );
                let mut outcome = CheckOutcome::from_run(
                    scope,
                    classification,
                    result.exit_code,
                    result.duration.as_millis() as u64,
                );
                if outcome.status == CheckStatus::Error {
                    outcome.message = last_line(&result.stderr).or_else(|| last_line(&result.stdout));
                }
                outcome
            }
            Err(e) => CheckOutcome::failed(scope, e.to_string()),
        }
    }

    /// Check every scope in order and aggregate the outcomes.
    pub fn run_all(&self, scopes: &[ResolvedScope], ui: &mut dyn UserInterface) -> CheckSummary {
        let mut results = Vec::with_capacity(scopes.len());

        for (i, scope) in scopes.iter().enumerate() {
            ui.message(&format!(
                "[{}/{}] Checking {} ({}, {})",
                i + 1,
                scopes.len(),
                scope.name,
                scope.environment,
                scope.tool
            ));

            let outcome = self.check_scope(scope);
            match outcome.status {
                CheckStatus::Ok => ui.success(&format!("{}: no drift", scope.name)),
                CheckStatus::Drift => ui.warning(&format!(
                    "{}: drift detected ({})",
                    scope.name, outcome.changes
                )),
                CheckStatus::Error => ui.error(&format!(
                    "{}: check failed{}",
                    scope.name,
                    outcome
                        .message
                        .as_deref()
                        .map(|m| format!(": {}", m))
                        .unwrap_or_default()
                )),
            }
            results.push(outcome);
        }

        let summary = CheckSummary::new(results);
        tracing::info!(
            "Checked {} scope(s): {} ok, {} drift, {} error",
            summary.total,
            summary.ok,
            summary.drift,
            summary.error
        );
        summary
    }
}

fn last_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .map(String::from)
}
