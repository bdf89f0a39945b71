//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::github::GithubFiles;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::install::InstallCommand;
use super::matrix::MatrixCommand;
use super::report::ReportCommand;
use super::resolve::ResolveCommand;
use super::run::RunCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success for exit code 0, failure otherwise.
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(exit_code)
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config_path: PathBuf,
    github: GithubFiles,
}

impl CommandDispatcher {
    /// Create a dispatcher for the given config file, writing GitHub
    /// outputs wherever the runner's environment says.
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            github: GithubFiles::from_env(),
        }
    }

    /// Override the GitHub environment files.
    pub fn with_github(mut self, github: GithubFiles) -> Self {
        self.github = github;
        self
    }

    /// Get the config file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let github = self.github.clone();
        match &cli.command {
            Commands::Resolve(args) => {
                ResolveCommand::new(&self.config_path, args.clone(), github).execute(ui)
            }
            Commands::Matrix(args) => {
                MatrixCommand::new(&self.config_path, args.clone(), github).execute(ui)
            }
            Commands::Install(args) => {
                InstallCommand::new(&self.config_path, args.clone(), github).execute(ui)
            }
            Commands::Check(args) => {
                CheckCommand::new(&self.config_path, args.clone(), github).execute(ui)
            }
            Commands::Report(args) => ReportCommand::new(args.clone(), github).execute(ui),
            Commands::Run(args) => {
                RunCommand::new(&self.config_path, args.clone(), github).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn command_result_from_exit_code() {
        assert!(CommandResult::from_exit_code(0).success);
        let drift = CommandResult::from_exit_code(2);
        assert!(!drift.success);
        assert_eq!(drift.exit_code, 2);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test/.driftscope.yml"));
        assert_eq!(
            dispatcher.config_path(),
            Path::new("/test/.driftscope.yml")
        );
    }

    #[test]
    fn dispatches_matrix() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("drift.yml");
        fs::write(
            &config,
            "scopes:\n  - name: a\n    project: p\n    environment: prod\n    directory: a\n    tool: terraform\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["driftscope", "matrix"]).unwrap();
        let dispatcher =
            CommandDispatcher::new(config).with_github(GithubFiles::default());
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.data_lines()[0].contains("\"include\""));
    }
}
