//! Resolve command implementation.
//!
//! The `driftscope resolve` command prints the selected scopes and the
//! tools they need, and sets the `scopes`, `tools` and `scope_count`
//! step outputs.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::ResolveArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::github::{Annotation, GithubFiles};
use crate::scope::{resolve, FilterMode, Resolution, ResolvedScope, ToolRequirements};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Load the config and resolve it against `filter`.
///
/// Unmatched names are reported as warnings (and annotations in Actions);
/// every other problem is an error.
pub fn load_resolution(
    config_path: &Path,
    filter: &FilterMode,
    ui: &mut dyn UserInterface,
) -> Result<Resolution> {
    let config = load_config(config_path)?;
    tracing::debug!("Resolving {} from {}", filter, config_path.display());

    let resolution = resolve(&config, filter)?;

    for warning in &resolution.warnings {
        tracing::warn!("{}", warning);
        ui.warning(warning);
        Annotation::warning(warning.as_str())
            .with_title("Unknown scope")
            .emit();
    }
    for name in &resolution.defaulted {
        tracing::debug!("Scope '{}' uses default_tool", name);
    }

    Ok(resolution)
}

/// Comma-separated tool names, for status lines.
pub fn tool_list(requirements: &ToolRequirements) -> String {
    requirements
        .tools
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    scopes: &'a [ResolvedScope],
    tools: &'a ToolRequirements,
}

/// The resolve command implementation.
pub struct ResolveCommand {
    config_path: PathBuf,
    args: ResolveArgs,
    github: GithubFiles,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(config_path: &Path, args: ResolveArgs, github: GithubFiles) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
            github,
        }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = load_resolution(&self.config_path, &self.args.filter.to_filter()?, ui)?;

        self.github
            .write_output("scopes", &serde_json::to_string(&resolution.scopes)?)?;
        self.github
            .write_output("tools", &serde_json::to_string(&resolution.requirements)?)?;
        self.github
            .write_output("scope_count", &resolution.scopes.len().to_string())?;

        ui.success(&format!(
            "Resolved {} scope(s) needing {}",
            resolution.scopes.len(),
            tool_list(&resolution.requirements)
        ));

        let output = ResolveOutput {
            scopes: &resolution.scopes,
            tools: &resolution.requirements,
        };
        ui.data(&serde_json::to_string_pretty(&output)?);

        Ok(CommandResult::success())
    }
}
