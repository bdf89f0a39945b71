//! Configuration file loading.
//!
//! The config is read once per invocation and never written back.

use crate::config::schema::DriftConfig;
use crate::error::{DriftError, Result};
use std::fs;
use std::path::Path;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".driftscope.yml";

/// Load and parse the config file at `path`.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigInvalid` if the YAML doesn't match the schema.
/// Returns `NoScopesDefined` if the file declares no scopes.
pub fn load_config(path: &Path) -> Result<DriftConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DriftError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DriftError::Io(e)
        }
    })?;

    let config = parse_config(&content, path)?;
    tracing::debug!(
        "Loaded {} scope(s) from {}",
        config.scopes.len(),
        path.display()
    );
    Ok(config)
}

/// Parse YAML content into a [`DriftConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<DriftConfig> {
    let config: DriftConfig =
        serde_yaml::from_str(content).map_err(|e| DriftError::ConfigInvalid {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if config.scopes.is_empty() {
        return Err(DriftError::NoScopesDefined {
            path: source_path.to_path_buf(),
        });
    }

    Ok(config)
}
