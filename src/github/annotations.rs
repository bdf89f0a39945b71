//! Workflow command annotations (`::warning::`, `::error::`).

use std::fmt;

/// Annotation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Notice,
    Warning,
    Error,
}

impl Level {
    fn command(&self) -> &'static str {
        match self {
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// A single workflow annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub level: Level,
    pub title: Option<String>,
    pub message: String,
}

impl Annotation {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            title: None,
            message: message.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Print the annotation when running under GitHub Actions.
    ///
    /// The runner reads workflow commands from stderr as well as stdout,
    /// and stderr keeps them out of JSON written to stdout.
    pub fn emit(&self) {
        if crate::shell::is_github_actions() {
            eprintln!("{}", self);
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.level.command())?;
        if let Some(title) = &self.title {
            write!(f, " title={}", escape_property(title))?;
        }
        write!(f, "::{}", escape_data(&self.message))
    }
}

/// Escape a command message.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escape a command property value; also escapes `:` and `,`.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_warning_with_title() {
        let a = Annotation::warning("scope a drifted").with_title("Drift detected");
        assert_eq!(a.to_string(), "::warning title=Drift detected::scope a drifted");
    }

    #[test]
    fn formats_error_without_title() {
        let a = Annotation::error("boom");
        assert_eq!(a.to_string(), "::error::boom");
    }

    #[test]
    fn escapes_message() {
        assert_eq!(escape_data("100%\r\nok"), "100%25%0D%0Aok");
    }

    #[test]
    fn escapes_property() {
        assert_eq!(escape_property("a: b, c"), "a%3A b%2C c");
    }

    #[test]
    fn notice_level() {
        let a = Annotation::new(Level::Notice, "fyi");
        assert_eq!(a.to_string(), "::notice::fyi");
    }
}
