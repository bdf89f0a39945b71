//! Scope resolution.
//!
//! Turns a loaded [`DriftConfig`] and a [`FilterMode`] into the scopes to
//! check and the tools they need. The pipeline is linear and stops at the
//! first error:
//!
//! 1. [`resolve_scopes`] - apply the filter
//! 2. [`apply_default_tool`] - give every selected scope a tool
//! 3. [`derive_tool_requirements`] - collect the tool binaries to install
//!
//! # Example
//!
//! ```
//! use driftscope::config::{parse_config, Tool};
//! use driftscope::scope::{resolve, FilterMode};
//! use std::path::Path;
//!
//! let yaml = r#"
//! default_tool: terragrunt
//! tool_versions:
//!   opentofu: "1.6.0"
//! scopes:
//!   - name: a
//!     project: core
//!     environment: prod
//!     directory: infra/a
//!   - name: b
//!     project: core
//!     environment: staging
//!     directory: infra/b
//! "#;
//! let config = parse_config(yaml, Path::new("inline.yml")).unwrap();
//! let resolution = resolve(&config, &FilterMode::ByEnvironment("prod".into())).unwrap();
//!
//! assert_eq!(resolution.scopes.len(), 1);
//! assert_eq!(resolution.requirements.tools, vec![Tool::Terragrunt, Tool::Opentofu]);
//! ```

pub mod filter;
pub mod requirements;
pub mod resolved;

pub use filter::{resolve_scopes, split_name_list, FilterMode, Selection};
pub use requirements::{derive_tool_requirements, underlying_tool, ToolRequirements, LATEST};
pub use resolved::{apply_default_tool, DefaultedScopes, ResolvedScope};

use crate::config::DriftConfig;
use crate::error::Result;

/// Everything downstream stages need from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Scopes to check, each with a tool.
    pub scopes: Vec<ResolvedScope>,
    /// Tool binaries those scopes need.
    pub requirements: ToolRequirements,
    /// Non-fatal problems, e.g. unknown names in a name list.
    pub warnings: Vec<String>,
    /// Scopes that took `default_tool`.
    pub defaulted: Vec<String>,
}

/// Run the full resolution pipeline.
pub fn resolve(config: &DriftConfig, filter: &FilterMode) -> Result<Resolution> {
    let selection = resolve_scopes(&config.scopes, filter)?;
    let warnings = selection.warnings();
    let defaulted = apply_default_tool(selection.scopes, config.default_tool)?;
    let requirements = derive_tool_requirements(&defaulted.scopes, &config.tool_versions);

    tracing::debug!(
        "Resolved {} scope(s) needing {:?}",
        defaulted.scopes.len(),
        requirements.tools
    );

    Ok(Resolution {
        scopes: defaulted.scopes,
        requirements,
        warnings,
        defaulted: defaulted.defaulted,
    })
}
