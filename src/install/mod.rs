//! Tool binary installation.
//!
//! Installs every tool in a [`ToolRequirements`] set into one directory,
//! resolving `latest` over HTTP and skipping binaries that are already at
//! the requested version. Network and process effects go through an
//! [`InstallerContext`] so tests never touch either.

pub mod http;
pub mod release;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Tool;
use crate::error::{DriftError, Result};
use crate::scope::{ToolRequirements, LATEST};
use crate::shell::{execute, CommandOptions, Platform};

pub use http::HttpClient;
pub use release::{download_url, latest_release_url, packaging, parse_version_output, Packaging};

/// A tool and the version to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub tool: Tool,
    pub version: String,
}

impl ToolSpec {
    /// One spec per required tool, in requirement order.
    pub fn from_requirements(requirements: &ToolRequirements) -> Vec<Self> {
        requirements
            .tools
            .iter()
            .map(|tool| ToolSpec {
                tool: *tool,
                version: requirements.version_for(*tool).to_string(),
            })
            .collect()
    }

    pub fn is_latest(&self) -> bool {
        self.version == LATEST
    }
}

/// What happened to one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Downloaded and placed in the install directory.
    Installed { tool: Tool, version: String, path: PathBuf },
    /// A binary at the requested version was already available.
    AlreadyInstalled { tool: Tool, version: String },
    /// Dry run: what would be downloaded.
    Planned { tool: Tool, version: String, url: Option<String> },
}

/// Mockable dependencies for the installer.
pub struct InstallerContext<'a> {
    /// Download a URL into memory.
    pub fetch_bytes: &'a dyn Fn(&str) -> anyhow::Result<Vec<u8>>,
    /// GET a URL and parse it as JSON.
    pub fetch_json: &'a dyn Fn(&str) -> anyhow::Result<serde_json::Value>,
    /// Version reported by an executable's `--version`, if it runs.
    pub installed_version: &'a dyn Fn(&str) -> Option<String>,
    /// Extract a zip archive into a directory.
    pub extract_zip: &'a dyn Fn(&Path, &Path) -> Result<()>,
}

/// Run `<program> --version` and parse the banner.
pub fn query_installed_version(program: &str) -> Option<String> {
    let result = execute(program, &["--version"], &CommandOptions::captured()).ok()?;
    if !result.success {
        return None;
    }
    parse_version_output(&result.stdout).or_else(|| parse_version_output(&result.stderr))
}

/// Extract with the system `unzip`.
pub fn unzip(archive: &Path, dest: &Path) -> Result<()> {
    let args: [&OsStr; 5] = [
        OsStr::new("-o"),
        OsStr::new("-q"),
        archive.as_os_str(),
        OsStr::new("-d"),
        dest.as_os_str(),
    ];
    let result = execute("unzip", &args, &CommandOptions::captured())?;
    if !result.success {
        return Err(DriftError::CommandFailed {
            command: format!("unzip {}", archive.display()),
            code: result.exit_code,
        });
    }
    Ok(())
}

/// Installs tool binaries into a single directory.
pub struct Installer<'a> {
    install_dir: PathBuf,
    platform: Platform,
    ctx: InstallerContext<'a>,
}

impl<'a> Installer<'a> {
    pub fn new(install_dir: impl Into<PathBuf>, platform: Platform, ctx: InstallerContext<'a>) -> Self {
        Self {
            install_dir: install_dir.into(),
            platform,
            ctx,
        }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Path the binary for `tool` is installed to.
    pub fn binary_path(&self, tool: Tool) -> PathBuf {
        self.install_dir
            .join(format!("{}{}", tool.binary_name(), self.platform.exe_suffix()))
    }

    /// Turn `latest` into a concrete version; other versions pass through.
    pub fn resolve_version(&self, spec: &ToolSpec) -> Result<String> {
        if !spec.is_latest() {
            return Ok(spec.version.clone());
        }

        let url = latest_release_url(spec.tool);
        let response = (self.ctx.fetch_json)(url).map_err(|e| DriftError::InstallFailed {
            tool: spec.tool.to_string(),
            message: format!("could not look up latest version: {}", e),
        })?;

        let version = release::parse_latest_response(spec.tool, &response).ok_or_else(|| {
            DriftError::InstallFailed {
                tool: spec.tool.to_string(),
                message: format!("no version in response from {}", url),
            }
        })?;
        tracing::debug!("Resolved {} latest to {}", spec.tool, version);
        Ok(version)
    }

    fn current_version(&self, tool: Tool) -> Option<String> {
        let local = self.binary_path(tool);
        if local.is_file() {
            if let Some(v) = (self.ctx.installed_version)(&local.to_string_lossy()) {
                return Some(v);
            }
        }
        (self.ctx.installed_version)(tool.binary_name())
    }

    /// Install one tool.
    pub fn install(&self, spec: &ToolSpec) -> Result<InstallOutcome> {
        let version = self.resolve_version(spec)?;

        if self.current_version(spec.tool).as_deref() == Some(version.as_str()) {
            tracing::info!("{} {} already installed", spec.tool, version);
            return Ok(InstallOutcome::AlreadyInstalled {
                tool: spec.tool,
                version,
            });
        }

        let url = download_url(spec.tool, &version, self.platform);
        tracing::info!("Downloading {} {} from {}", spec.tool, version, url);

        let failed = |message: String| DriftError::InstallFailed {
            tool: spec.tool.to_string(),
            message,
        };

        let bytes = (self.ctx.fetch_bytes)(&url).map_err(|e| failed(e.to_string()))?;
        fs::create_dir_all(&self.install_dir)?;
        let path = self.binary_path(spec.tool);

        match packaging(spec.tool) {
            Packaging::Zip => {
                let archive = self
                    .install_dir
                    .join(format!("{}_{}.zip", spec.tool, version));
                fs::write(&archive, &bytes)?;
                let extracted = (self.ctx.extract_zip)(&archive, &self.install_dir);
                let _ = fs::remove_file(&archive);
                extracted?;
                if !path.is_file() {
                    return Err(failed(format!(
                        "archive did not contain {}",
                        spec.tool.binary_name()
                    )));
                }
            }
            Packaging::Binary => {
                fs::write(&path, &bytes)?;
            }
        }

        make_executable(&path)?;

        Ok(InstallOutcome::Installed {
            tool: spec.tool,
            version,
            path,
        })
    }

    /// Report what [`Installer::install`] would do without network access.
    ///
    /// `latest` is left unresolved, so its URL is unknown.
    pub fn plan(&self, spec: &ToolSpec) -> InstallOutcome {
        let url = (!spec.is_latest()).then(|| download_url(spec.tool, &spec.version, self.platform));
        InstallOutcome::Planned {
            tool: spec.tool,
            version: spec.version.clone(),
            url,
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
