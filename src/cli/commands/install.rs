//! Install command implementation.
//!
//! The `driftscope install` command downloads every tool the resolved
//! scopes need into one directory and puts it on PATH for later steps.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::error::{DriftError, Result};
use crate::github::GithubFiles;
use crate::install::{
    query_installed_version, unzip, HttpClient, InstallOutcome, Installer, InstallerContext,
    ToolSpec,
};
use crate::scope::ToolRequirements;
use crate::shell::Platform;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve::{load_resolution, tool_list};

/// Install `requirements` into `install_dir`, or only report the plan when
/// `dry_run` is set.
pub fn install_tools(
    requirements: &ToolRequirements,
    install_dir: &Path,
    dry_run: bool,
    github: &GithubFiles,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let specs = ToolSpec::from_requirements(requirements);
    let platform = Platform::current().ok_or_else(|| DriftError::InstallFailed {
        tool: tool_list(requirements),
        message: format!(
            "unsupported platform {}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ),
    })?;

    let client = HttpClient::new()?;
    let fetch_bytes = |url: &str| client.fetch_bytes(url);
    let fetch_json = |url: &str| client.fetch_json(url);
    let ctx = InstallerContext {
        fetch_bytes: &fetch_bytes,
        fetch_json: &fetch_json,
        installed_version: &query_installed_version,
        extract_zip: &unzip,
    };
    let installer = Installer::new(install_dir, platform, ctx);

    ui.show_header(&format!("Installing tools for {}", platform));

    for spec in &specs {
        let outcome = if dry_run {
            installer.plan(spec)
        } else {
            installer.install(spec)?
        };
        report(&outcome, ui);
    }

    if dry_run {
        return Ok(());
    }

    let dir = std::path::absolute(install_dir)?;
    if github.add_path(&dir)? {
        tracing::debug!("Added {} to GITHUB_PATH", dir.display());
    }
    Ok(())
}

fn report(outcome: &InstallOutcome, ui: &mut dyn UserInterface) {
    match outcome {
        InstallOutcome::Installed {
            tool,
            version,
            path,
        } => ui.success(&format!("Installed {} {} to {}", tool, version, path.display())),
        InstallOutcome::AlreadyInstalled { tool, version } => {
            ui.success(&format!("{} {} already installed", tool, version))
        }
        InstallOutcome::Planned { tool, version, url } => match url {
            Some(url) => ui.message(&format!("Would install {} {} from {}", tool, version, url)),
            None => ui.message(&format!("Would install {} {}", tool, version)),
        },
    }
}

/// The install command implementation.
pub struct InstallCommand {
    config_path: PathBuf,
    args: InstallArgs,
    github: GithubFiles,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(config_path: &Path, args: InstallArgs, github: GithubFiles) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
            github,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = load_resolution(&self.config_path, &self.args.filter.to_filter()?, ui)?;

        install_tools(
            &resolution.requirements,
            &self.args.install_dir,
            self.args.dry_run,
            &self.github,
            ui,
        )?;

        Ok(CommandResult::success())
    }
}
