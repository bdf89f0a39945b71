//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command that needs scopes
//! goes through [`resolve::load_resolution`], so filter handling and
//! warnings look the same everywhere.

pub mod check;
pub mod dispatcher;
pub mod install;
pub mod matrix;
pub mod report;
pub mod resolve;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
