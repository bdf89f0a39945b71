//! Configuration loading and schema for driftscope.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use driftscope::config::{parse_config, Tool};
//! use std::path::Path;
//!
//! let yaml = r#"
//! default_tool: terraform
//! scopes:
//!   - name: network
//!     project: core
//!     environment: production
//!     directory: infra/network
//! "#;
//! let config = parse_config(yaml, Path::new("inline.yml")).unwrap();
//! assert_eq!(config.default_tool, Some(Tool::Terraform));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, DEFAULT_CONFIG_PATH};
pub use schema::{DriftConfig, ScopeConfig, Tool};
