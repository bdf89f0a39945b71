//! GitHub Actions environment files.
//!
//! Step outputs, the job summary and PATH additions are all written by
//! appending to files whose paths the runner passes in environment
//! variables.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DriftError, Result};

/// Delimiter for multi-line output values.
const DELIMITER: &str = "DRIFTSCOPE_EOF";

/// Paths of the runner's environment files, if present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubFiles {
    /// `$GITHUB_OUTPUT`
    pub output: Option<PathBuf>,
    /// `$GITHUB_STEP_SUMMARY`
    pub step_summary: Option<PathBuf>,
    /// `$GITHUB_PATH`
    pub path: Option<PathBuf>,
}

impl GithubFiles {
    /// Read file locations from the environment. Outside Actions all are `None`.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            output: var("GITHUB_OUTPUT"),
            step_summary: var("GITHUB_STEP_SUMMARY"),
            path: var("GITHUB_PATH"),
        }
    }

    /// Set step output `key` to `value`.
    ///
    /// Returns `false` when there is no output file.
    pub fn write_output(&self, key: &str, value: &str) -> Result<bool> {
        let Some(path) = &self.output else {
            return Ok(false);
        };
        if value.lines().any(|l| l == DELIMITER) {
            return Err(DriftError::Other(anyhow::anyhow!(
                "output '{}' contains the reserved delimiter line",
                key
            )));
        }
        append(path, &format_output(key, value))?;
        tracing::debug!("Set output '{}' ({} bytes)", key, value.len());
        Ok(true)
    }

    /// Append Markdown to the job summary.
    pub fn append_step_summary(&self, markdown: &str) -> Result<bool> {
        let Some(path) = &self.step_summary else {
            return Ok(false);
        };
        let mut text = markdown.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        append(path, &text)?;
        Ok(true)
    }

    /// Prepend `dir` to PATH for later steps.
    pub fn add_path(&self, dir: &Path) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        append(path, &format!("{}\n", dir.display()))?;
        Ok(true)
    }
}

/// `key<<DELIM\nvalue\nDELIM\n`
pub fn format_output(key: &str, value: &str) -> String {
    format!("{key}<<{DELIMITER}\n{value}\n{DELIMITER}\n")
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}
