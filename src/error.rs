//! Error types for driftscope operations.
//!
//! This module defines [`DriftError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DriftError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `DriftError::Other`) for unexpected errors
//! - Configuration errors are deterministic and never retried

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for driftscope operations.
#[derive(Debug, Error)]
pub enum DriftError {
    /// Configuration file not found at the given path.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration could not be parsed into the expected schema.
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration parsed but declares no scopes.
    #[error("No scopes defined in {path}")]
    NoScopesDefined { path: PathBuf },

    /// An environment or name-list filter selected nothing.
    #[error("No scopes match {filter}")]
    NoMatchingScopes { filter: String },

    /// A single-scope filter named a scope that does not exist.
    #[error("Scope not found: {name}")]
    ScopeNotFound { name: String },

    /// More than one scope filter was given.
    #[error("Only one of --environment, --scope or --scopes may be set (got {inputs})")]
    ConflictingFilters { inputs: String },

    /// A selected scope has no tool and no `default_tool` is configured.
    #[error("Scope '{scope}' has no 'tool' and no default_tool is configured")]
    MissingToolField { scope: String },

    /// Installing a tool binary failed.
    #[error("Failed to install {tool}: {message}")]
    InstallFailed { tool: String, message: String },

    /// A child process could not be run.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for driftscope operations.
pub type Result<T> = std::result::Result<T, DriftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = DriftError::ConfigNotFound {
            path: PathBuf::from("/repo/.driftscope.yml"),
        };
        assert!(err.to_string().contains("/repo/.driftscope.yml"));
    }

    #[test]
    fn config_invalid_displays_path_and_message() {
        let err = DriftError::ConfigInvalid {
            path: PathBuf::from("/config.yml"),
            message: "scopes[0]: missing field `name`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("missing field `name`"));
    }

    #[test]
    fn no_matching_scopes_displays_filter() {
        let err = DriftError::NoMatchingScopes {
            filter: "environment 'qa'".into(),
        };
        assert_eq!(err.to_string(), "No scopes match environment 'qa'");
    }

    #[test]
    fn scope_not_found_displays_name() {
        let err = DriftError::ScopeNotFound {
            name: "network-prod".into(),
        };
        assert!(err.to_string().contains("network-prod"));
    }

    #[test]
    fn conflicting_filters_lists_inputs() {
        let err = DriftError::ConflictingFilters {
            inputs: "--environment, --scope".into(),
        };
        assert!(err.to_string().ends_with("(got --environment, --scope)"));
    }

    #[test]
    fn missing_tool_field_names_scope() {
        let err = DriftError::MissingToolField {
            scope: "dns".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'dns'"));
        assert!(msg.contains("default_tool"));
    }

    #[test]
    fn install_failed_displays_tool_and_message() {
        let err = DriftError::InstallFailed {
            tool: "terragrunt".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("terragrunt"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DriftError = io_err.into();
        assert!(matches!(err, DriftError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(DriftError::NoScopesDefined {
                path: PathBuf::from("empty.yml"),
            })
        }
        assert!(returns_error().is_err());
    }
}
