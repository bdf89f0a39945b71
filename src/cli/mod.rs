//! Command-line interface for driftscope.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, FilterArgs, InstallArgs, MatrixArgs, ReportArgs, ResolveArgs,
    RunArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
