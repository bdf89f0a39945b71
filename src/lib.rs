//! Driftscope - drift detection wrapper for GitHub Actions.
//!
//! Driftscope reads a YAML list of infrastructure scopes, selects the ones
//! a workflow run should check, installs the Terraform, OpenTofu or
//! Terragrunt binaries they need, and runs an external drift CLI against
//! each of them.
//!
//! # Modules
//!
//! - [`check`] - Drift CLI invocation, output classification and summaries
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Scope configuration loading and schema
//! - [`error`] - Error types and result aliases
//! - [`github`] - Step outputs, job summaries and annotations
//! - [`install`] - Tool binary installation
//! - [`matrix`] - Job matrix generation
//! - [`scope`] - Scope filtering, default tools and tool requirements
//! - [`shell`] - Child process execution and platform detection
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use driftscope::config::{parse_config, Tool};
//! use driftscope::scope::{resolve, FilterMode};
//! use std::path::Path;
//!
//! let yaml = "
//! scopes:
//!   - name: vpc
//!     project: network
//!     environment: prod
//!     directory: infra/vpc
//!     tool: terragrunt
//! ";
//! let config = parse_config(yaml, Path::new("inline.yml")).unwrap();
//! let resolution = resolve(&config, &FilterMode::None).unwrap();
//!
//! assert_eq!(resolution.requirements.tools, vec![Tool::Terragrunt, Tool::Terraform]);
//! ```
//!
//! For file-based config loading, see the integration tests.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod install;
pub mod matrix;
pub mod scope;
pub mod shell;
pub mod ui;

pub use error::{DriftError, Result};
