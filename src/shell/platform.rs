//! Runtime platform and GitHub Actions detection.

use std::fmt;

/// Operating system and CPU architecture, in release-asset naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// `linux`, `darwin` or `windows`.
    pub os: &'static str,
    /// `amd64` or `arm64`.
    pub arch: &'static str,
}

impl Platform {
    /// Map Rust's target names to the names release assets use.
    ///
    /// Returns `None` for platforms no supported tool ships binaries for.
    pub fn from_target(os: &str, arch: &str) -> Option<Self> {
        let os = match os {
            "linux" => "linux",
            "macos" => "darwin",
            "windows" => "windows",
            _ => return None,
        };
        let arch = match arch {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            _ => return None,
        };
        Some(Self { os, arch })
    }

    /// The platform this binary is running on.
    pub fn current() -> Option<Self> {
        Self::from_target(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Suffix for executables on this platform.
    pub fn exe_suffix(&self) -> &'static str {
        if self.os == "windows" {
            ".exe"
        } else {
            ""
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

/// Check if running inside a GitHub Actions job.
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_maps_linux_amd64() {
        let p = Platform::from_target("linux", "x86_64").unwrap();
        assert_eq!(p.to_string(), "linux_amd64");
        assert_eq!(p.exe_suffix(), "");
    }

    #[test]
    fn platform_maps_macos_arm64() {
        let p = Platform::from_target("macos", "aarch64").unwrap();
        assert_eq!(p.os, "darwin");
        assert_eq!(p.arch, "arm64");
    }

    #[test]
    fn platform_windows_has_exe_suffix() {
        let p = Platform::from_target("windows", "x86_64").unwrap();
        assert_eq!(p.exe_suffix(), ".exe");
    }

    #[test]
    fn unsupported_platforms_are_none() {
        assert!(Platform::from_target("freebsd", "x86_64").is_none());
        assert!(Platform::from_target("linux", "riscv64").is_none());
    }

    #[test]
    fn github_actions_detection_does_not_panic() {
        let _ = is_github_actions();
    }
}
