//! Report command implementation.
//!
//! The `driftscope report` command turns a summary JSON written by
//! `check` into Markdown for the job summary.

use std::path::Path;

use crate::check::CheckSummary;
use crate::cli::args::ReportArgs;
use crate::error::Result;
use crate::github::{render_summary, GithubFiles};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The report command implementation.
pub struct ReportCommand {
    args: ReportArgs,
    github: GithubFiles,
}

impl ReportCommand {
    /// Create a new report command.
    pub fn new(args: ReportArgs, github: GithubFiles) -> Self {
        Self { args, github }
    }

    /// Get the summary path.
    pub fn input(&self) -> &Path {
        &self.args.input
    }
}

impl Command for ReportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.input.exists() {
            ui.error(&format!(
                "Summary not found: {}",
                self.args.input.display()
            ));
            ui.show_hint("Run 'driftscope check' first");
            return Ok(CommandResult::failure(1));
        }

        let summary = CheckSummary::read(&self.args.input)?;
        let markdown = render_summary(&summary);

        if self.github.append_step_summary(&markdown)? {
            ui.success("Added drift report to the job summary");
        }
        ui.data(&markdown);

        Ok(CommandResult::success())
    }
}
