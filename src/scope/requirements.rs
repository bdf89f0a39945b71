//! Tool requirement derivation.
//!
//! Works out which tool binaries a set of resolved scopes needs. Pure: no
//! filesystem or network access.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::Tool;

use super::resolved::ResolvedScope;

/// Version used for a required tool that has no configured version.
pub const LATEST: &str = "latest";

/// Tools needed to run a set of scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequirements {
    /// Distinct tools in order of first appearance; a wrapper's underlying
    /// tool follows the scope tools.
    pub tools: Vec<Tool>,
    /// Configured versions for the required tools. Tools missing here
    /// resolve to [`LATEST`].
    pub versions: BTreeMap<Tool, String>,
}

impl ToolRequirements {
    /// Version to install for `tool`.
    pub fn version_for(&self, tool: Tool) -> &str {
        self.versions.get(&tool).map(String::as_str).unwrap_or(LATEST)
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }
}

/// Tool terragrunt should drive: terraform if a terraform version is
/// configured, else opentofu if an opentofu version is, else terraform.
pub fn underlying_tool(tool_versions: &BTreeMap<Tool, String>) -> Tool {
    if tool_versions.contains_key(&Tool::Terraform) {
        Tool::Terraform
    } else if tool_versions.contains_key(&Tool::Opentofu) {
        Tool::Opentofu
    } else {
        Tool::Terraform
    }
}

/// Derive the tool requirement set for `scopes`.
pub fn derive_tool_requirements(
    scopes: &[ResolvedScope],
    tool_versions: &BTreeMap<Tool, String>,
) -> ToolRequirements {
    let mut tools: Vec<Tool> = Vec::new();
    for scope in scopes {
        if !tools.contains(&scope.tool) {
            tools.push(scope.tool);
        }
    }

    if tools.iter().any(Tool::is_wrapper) {
        let underlying = underlying_tool(tool_versions);
        if !tools.contains(&underlying) {
            tracing::debug!("terragrunt requires {}, adding it", underlying);
            tools.push(underlying);
        }
    }

    let versions = tools
        .iter()
        .filter_map(|tool| tool_versions.get(tool).map(|v| (*tool, v.clone())))
        .collect();

    ToolRequirements { tools, versions }
}
