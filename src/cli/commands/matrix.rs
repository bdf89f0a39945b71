//! Matrix command implementation.
//!
//! The `driftscope matrix` command emits the resolved scopes as a
//! `strategy.matrix` value so a workflow can fan out one job per scope.

use std::path::{Path, PathBuf};

use crate::cli::args::MatrixArgs;
use crate::error::Result;
use crate::github::GithubFiles;
use crate::matrix::build_matrix;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve::load_resolution;

/// The matrix command implementation.
pub struct MatrixCommand {
    config_path: PathBuf,
    args: MatrixArgs,
    github: GithubFiles,
}

impl MatrixCommand {
    /// Create a new matrix command.
    pub fn new(config_path: &Path, args: MatrixArgs, github: GithubFiles) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
            github,
        }
    }
}

impl Command for MatrixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = load_resolution(&self.config_path, &self.args.filter.to_filter()?, ui)?;

        let matrix = build_matrix(&resolution.scopes);
        let json = matrix.to_json()?;

        self.github.write_output("matrix", &json)?;
        self.github
            .write_output("scope_count", &matrix.len().to_string())?;

        ui.success(&format!("Matrix with {} job(s)", matrix.len()));
        ui.data(&json);

        Ok(CommandResult::success())
    }
}
