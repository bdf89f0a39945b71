//! User-facing console output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminals and CI logs
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use driftscope::ui::{OutputMode, TerminalUI, UserInterface};
//!
//! let mut ui = TerminalUI::new(OutputMode::Quiet);
//! ui.show_header("Drift check");
//! ui.success("No drift");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a dimmed follow-up hint.
    fn show_hint(&mut self, hint: &str);

    /// Write machine-readable output (JSON, Markdown) to stdout.
    ///
    /// Written in every output mode.
    fn data(&mut self, data: &str);
}
