//! Run command implementation.
//!
//! The `driftscope run` command resolves scopes once, installs the tools
//! they need and checks them, all in one process.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::error::{DriftError, Result};
use crate::github::GithubFiles;
use crate::ui::UserInterface;

use super::check::run_checks;
use super::dispatcher::{Command, CommandResult};
use super::install::install_tools;
use super::resolve::load_resolution;

/// The run command implementation.
pub struct RunCommand {
    config_path: PathBuf,
    args: RunArgs,
    github: GithubFiles,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(config_path: &Path, args: RunArgs, github: GithubFiles) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
            github,
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution =
            load_resolution(&self.config_path, &self.args.check.filter.to_filter()?, ui)?;

        if self.args.skip_install {
            tracing::debug!("Skipping install, using tools on PATH");
        } else {
            install_tools(
                &resolution.requirements,
                &self.args.install_dir,
                false,
                &self.github,
                ui,
            )?;
            prepend_path(&self.args.install_dir)?;
        }

        run_checks(&resolution.scopes, &self.args.check, &self.github, ui)
    }
}

/// Put `dir` first on this process's PATH so the drift CLI finds the
/// freshly installed tools.
fn prepend_path(dir: &Path) -> Result<()> {
    let dir = std::path::absolute(dir)?;
    let mut paths = vec![dir];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    let joined = std::env::join_paths(paths).map_err(|e| DriftError::Other(e.into()))?;
    std::env::set_var("PATH", joined);
    Ok(())
}
