//! Terminal UI for interactive shells and CI logs.
//!
//! Status lines go to stderr so stdout carries only machine-readable data.

use super::theme::Theme;
use super::{OutputMode, UserInterface};

/// UI that writes styled status lines to stderr and data to stdout.
pub struct TerminalUI {
    mode: OutputMode,
    theme: Theme,
}

impl TerminalUI {
    /// Create a console UI, coloring output when stderr is a terminal.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: Theme::detect(),
        }
    }

    /// Create with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: Theme) -> Self {
        Self { mode, theme }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            eprintln!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_hint(hint));
        }
    }

    fn data(&mut self, data: &str) {
        println!("{}", data);
    }
}
