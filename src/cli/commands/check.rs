//! Check command implementation.
//!
//! The `driftscope check` command runs the drift CLI for every resolved
//! scope, writes the summary JSON and reports the results through step
//! outputs, annotations and the job summary.

use std::path::{Path, PathBuf};

use crate::check::{ApiCredentials, CheckRunner, CheckStatus, CheckSummary};
use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::github::{render_summary, Annotation, GithubFiles};
use crate::scope::ResolvedScope;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve::load_resolution;

/// Check `scopes` and publish the results.
///
/// The returned exit code is 0 when every scope is clean, 2 on drift
/// (unless `--no-fail-on-drift`) and 1 when any check failed.
pub fn run_checks(
    scopes: &[ResolvedScope],
    args: &CheckArgs,
    github: &GithubFiles,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    let runner = CheckRunner::new(args.cli.clone(), args.working_directory.clone())
        .with_credentials(ApiCredentials {
            url: args.api_url.clone(),
            token: args.api_token.clone(),
        })
        .with_streaming(ui.output_mode().shows_command_output());

    ui.show_header("Drift check");
    let summary = runner.run_all(scopes, ui);

    summary.write(&args.output)?;
    tracing::debug!("Wrote summary to {}", args.output.display());

    annotate(&summary);
    publish(&summary, &args.output, github)?;

    let line = format!(
        "{} scope(s): {} ok, {} drift, {} error",
        summary.total, summary.ok, summary.drift, summary.error
    );
    match summary.overall_status() {
        CheckStatus::Ok => ui.success(&line),
        CheckStatus::Drift => ui.warning(&line),
        CheckStatus::Error => ui.error(&line),
    }
    if summary.drift > 0 && args.no_fail_on_drift {
        ui.show_hint("Drift tolerated by --no-fail-on-drift");
    }

    Ok(CommandResult::from_exit_code(
        summary.exit_code(!args.no_fail_on_drift),
    ))
}

fn annotate(summary: &CheckSummary) {
    for result in &summary.results {
        match result.status {
            CheckStatus::Ok => {}
            CheckStatus::Drift => Annotation::warning(format!(
                "{} ({}/{}) drifted: {}",
                result.scope, result.project, result.environment, result.changes
            ))
            .with_title("Drift detected")
            .emit(),
            CheckStatus::Error => Annotation::error(format!(
                "{} ({}/{}): {}",
                result.scope,
                result.project,
                result.environment,
                result.message.as_deref().unwrap_or("check failed")
            ))
            .with_title("Drift check failed")
            .emit(),
        }
    }
}

fn publish(summary: &CheckSummary, summary_path: &Path, github: &GithubFiles) -> Result<()> {
    github.write_output("status", summary.overall_status().as_str())?;
    github.write_output("drift_count", &summary.drift.to_string())?;
    github.write_output("error_count", &summary.error.to_string())?;
    github.write_output("summary", &summary_path.display().to_string())?;
    github.append_step_summary(&render_summary(summary))?;
    Ok(())
}

/// The check command implementation.
pub struct CheckCommand {
    config_path: PathBuf,
    args: CheckArgs,
    github: GithubFiles,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(config_path: &Path, args: CheckArgs, github: GithubFiles) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
            github,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = load_resolution(&self.config_path, &self.args.filter.to_filter()?, ui)?;
        run_checks(&resolution.scopes, &self.args, &self.github, ui)
    }
}
