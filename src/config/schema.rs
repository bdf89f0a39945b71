//! Configuration schema definitions for driftscope.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Root configuration structure for `.driftscope.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Tool used by scopes that don't name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tool: Option<Tool>,

    /// Global version per tool
    #[serde(
        deserialize_with = "deserialize_version_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tool_versions: BTreeMap<Tool, String>,

    /// Scope definitions, in source order
    pub scopes: Vec<ScopeConfig>,
}

/// A single drift-checkable unit as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Lookup key for filters
    pub name: String,

    /// Grouping label
    pub project: String,

    /// Environment label matched by `--environment`
    pub environment: String,

    /// Path to the infrastructure code
    pub directory: String,

    /// Tool override; falls back to `default_tool`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,

    /// Version override for this scope's tool
    #[serde(
        default,
        deserialize_with = "deserialize_optional_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_version: Option<String>,

    /// Slack channel for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_channel: Option<String>,
}

/// Infrastructure-as-code tools a scope can be checked with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Terraform,
    Opentofu,
    Terragrunt,
}

impl Tool {
    /// All supported tools.
    pub const ALL: [Tool; 3] = [Tool::Terraform, Tool::Opentofu, Tool::Terragrunt];

    /// Identifier used in config files and outputs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Terraform => "terraform",
            Tool::Opentofu => "opentofu",
            Tool::Terragrunt => "terragrunt",
        }
    }

    /// Name of the executable on PATH.
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Terraform => "terraform",
            Tool::Opentofu => "tofu",
            Tool::Terragrunt => "terragrunt",
        }
    }

    /// Whether this tool drives another tool instead of provisioning itself.
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Tool::Terragrunt)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terraform" => Ok(Tool::Terraform),
            "opentofu" => Ok(Tool::Opentofu),
            "terragrunt" => Ok(Tool::Terragrunt),
            _ => Err(format!(
                "unknown tool '{}' (expected terraform, opentofu or terragrunt)",
                s
            )),
        }
    }
}

/// Versions are often written unquoted (`1.6`), which YAML reads as a number.
fn scalar_to_string(value: serde_yaml::Value) -> Result<String, String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("expected a version string, found {:?}", other)),
    }
}

/// Keys that are not a supported tool (versions for other steps sharing the
/// file) are skipped with a warning.
fn deserialize_version_map<'de, D>(deserializer: D) -> Result<BTreeMap<Tool, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_yaml::Value>>::deserialize(deserializer)?;
    let mut versions = BTreeMap::new();
    for (key, value) in raw.unwrap_or_default() {
        let Ok(tool) = key.parse::<Tool>() else {
            tracing::warn!("Ignoring tool_versions entry for unsupported tool '{}'", key);
            continue;
        };
        let version = scalar_to_string(value).map_err(serde::de::Error::custom)?;
        versions.insert(tool, version);
    }
    Ok(versions)
}

fn deserialize_optional_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
