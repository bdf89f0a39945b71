//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Every action input maps to
//! a flag through its `INPUT_*` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::check::DEFAULT_CLI;
use crate::config::DEFAULT_CONFIG_PATH;
use crate::error::{DriftError, Result};
use crate::scope::FilterMode;

/// Driftscope - drift detection for Terraform, OpenTofu and Terragrunt scopes.
#[derive(Debug, Parser)]
#[command(name = "driftscope")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the scope configuration file
    #[arg(short, long, global = true, env = "INPUT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve scopes and the tools they need
    Resolve(ResolveArgs),

    /// Emit a job matrix of resolved scopes
    Matrix(MatrixArgs),

    /// Install the tools required by the resolved scopes
    Install(InstallArgs),

    /// Run the drift CLI for every resolved scope
    Check(CheckArgs),

    /// Render a Markdown report from a check summary
    Report(ReportArgs),

    /// Resolve, install and check in one go
    Run(RunArgs),
}

/// Scope filter shared by every command that resolves scopes.
///
/// At most one filter may be given. Empty values count as absent.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Only scopes in this environment
    #[arg(long, env = "INPUT_ENVIRONMENT", value_name = "ENV")]
    pub environment: Option<String>,

    /// Only the scope with this name
    #[arg(long, env = "INPUT_SCOPE", value_name = "NAME")]
    pub scope: Option<String>,

    /// Only these scopes (comma-separated)
    #[arg(long, env = "INPUT_SCOPES", value_name = "NAMES")]
    pub scopes: Option<String>,
}

impl FilterArgs {
    /// The filter these flags describe.
    ///
    /// Fails with [`DriftError::ConflictingFilters`] when more than one
    /// flag has a non-blank value.
    pub fn to_filter(&self) -> Result<FilterMode> {
        let given: Vec<&str> = [
            ("--environment", &self.environment),
            ("--scope", &self.scope),
            ("--scopes", &self.scopes),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .map(|(flag, _)| flag)
        .collect();

        if given.len() > 1 {
            return Err(DriftError::ConflictingFilters {
                inputs: given.join(", "),
            });
        }

        Ok(FilterMode::from_inputs(
            self.environment.as_deref(),
            self.scope.as_deref(),
            self.scopes.as_deref(),
        ))
    }
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for the `matrix` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Default directory tools are installed into.
pub const DEFAULT_INSTALL_DIR: &str = ".driftscope/bin";

/// Default path of the check summary JSON.
pub const DEFAULT_SUMMARY_PATH: &str = "drift-summary.json";

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Directory to install tool binaries into
    #[arg(long, env = "INPUT_INSTALL_DIR", default_value = DEFAULT_INSTALL_DIR)]
    pub install_dir: PathBuf,

    /// Show what would be installed without downloading
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for InstallArgs {
    fn default() -> Self {
        Self {
            filter: FilterArgs::default(),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            dry_run: false,
        }
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Drift CLI executable
    #[arg(long, env = "INPUT_CLI", default_value = DEFAULT_CLI)]
    pub cli: String,

    /// Directory scope directories are relative to
    #[arg(long, env = "INPUT_WORKING_DIRECTORY", default_value = ".")]
    pub working_directory: PathBuf,

    /// Where to write the summary JSON
    #[arg(short, long, env = "INPUT_OUTPUT", default_value = DEFAULT_SUMMARY_PATH)]
    pub output: PathBuf,

    /// Exit 0 even when drift is detected
    #[arg(long)]
    pub no_fail_on_drift: bool,

    /// Reporting API base URL passed to the drift CLI
    #[arg(long, env = "DRIFT_API_URL")]
    pub api_url: Option<String>,

    /// Reporting API token passed to the drift CLI
    #[arg(long, env = "DRIFT_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            filter: FilterArgs::default(),
            cli: DEFAULT_CLI.to_string(),
            working_directory: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_SUMMARY_PATH),
            no_fail_on_drift: false,
            api_url: None,
            api_token: None,
        }
    }
}

/// Arguments for the `report` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ReportArgs {
    /// Summary JSON written by `check`
    #[arg(long, env = "INPUT_SUMMARY", default_value = DEFAULT_SUMMARY_PATH)]
    pub input: PathBuf,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_SUMMARY_PATH),
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Directory to install tool binaries into
    #[arg(long, env = "INPUT_INSTALL_DIR", default_value = DEFAULT_INSTALL_DIR)]
    pub install_dir: PathBuf,

    /// Use tools already on PATH instead of installing
    #[arg(long)]
    pub skip_install: bool,
}
