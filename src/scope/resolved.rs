//! Scopes after default-tool resolution.

use serde::{Deserialize, Serialize};

use crate::config::{ScopeConfig, Tool};
use crate::error::{DriftError, Result};

/// A scope that is ready to run: its tool is always known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedScope {
    pub name: String,
    pub project: String,
    pub environment: String,
    pub directory: String,
    pub tool: Tool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_channel: Option<String>,
}

impl ResolvedScope {
    fn from_config(scope: ScopeConfig, tool: Tool) -> Self {
        Self {
            name: scope.name,
            project: scope.project,
            environment: scope.environment,
            directory: scope.directory,
            tool,
            tool_version: scope.tool_version,
            slack_channel: scope.slack_channel,
        }
    }
}

/// Output of [`apply_default_tool`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultedScopes {
    pub scopes: Vec<ResolvedScope>,
    /// Names of scopes that took `default_tool`.
    pub defaulted: Vec<String>,
}

/// Give every scope a tool, falling back to `default_tool`.
///
/// Only the scopes passed in are checked, so scopes excluded by a filter
/// never need a tool.
///
/// # Errors
///
/// Returns `MissingToolField` for the first scope with no tool when no
/// default is configured.
pub fn apply_default_tool(
    scopes: Vec<ScopeConfig>,
    default_tool: Option<Tool>,
) -> Result<DefaultedScopes> {
    let mut out = DefaultedScopes::default();

    for scope in scopes {
        let tool = match (scope.tool, default_tool) {
            (Some(tool), _) => tool,
            (None, Some(default)) => {
                tracing::debug!("Scope '{}' uses default tool {}", scope.name, default);
                out.defaulted.push(scope.name.clone());
                default
            }
            (None, None) => {
                return Err(DriftError::MissingToolField { scope: scope.name });
            }
        };
        out.scopes.push(ResolvedScope::from_config(scope, tool));
    }

    Ok(out)
}
