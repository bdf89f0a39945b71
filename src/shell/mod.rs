//! Child process execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{
    execute, execute_streaming, CommandOptions, CommandResult, OutputCallback, OutputLine,
};
pub use platform::{is_github_actions, Platform};
