//! Release locations for supported tools.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::Tool;
use crate::shell::Platform;

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.]+)?)").unwrap());

/// How a release asset is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
    /// Zip archive containing the binary.
    Zip,
    /// The binary itself.
    Binary,
}

/// Packaging used by `tool`'s releases.
pub fn packaging(tool: Tool) -> Packaging {
    match tool {
        Tool::Terraform | Tool::Opentofu => Packaging::Zip,
        Tool::Terragrunt => Packaging::Binary,
    }
}

/// Download URL for a concrete `version` of `tool` on `platform`.
pub fn download_url(tool: Tool, version: &str, platform: Platform) -> String {
    let (os, arch) = (platform.os, platform.arch);
    match tool {
        Tool::Terraform => format!(
            "https://releases.hashicorp.com/terraform/{version}/terraform_{version}_{os}_{arch}.zip"
        ),
        Tool::Opentofu => format!(
            "https://github.com/opentofu/opentofu/releases/download/v{version}/tofu_{version}_{os}_{arch}.zip"
        ),
        Tool::Terragrunt => format!(
            "https://github.com/gruntwork-io/terragrunt/releases/download/v{version}/terragrunt_{os}_{arch}{}",
            platform.exe_suffix()
        ),
    }
}

/// Endpoint that reports the newest release of `tool`.
pub fn latest_release_url(tool: Tool) -> &'static str {
    match tool {
        Tool::Terraform => "https://checkpoint-api.hashicorp.com/v1/check/terraform",
        Tool::Opentofu => "https://api.github.com/repos/opentofu/opentofu/releases/latest",
        Tool::Terragrunt => "https://api.github.com/repos/gruntwork-io/terragrunt/releases/latest",
    }
}

/// Pull the version out of a latest-release API response.
pub fn parse_latest_response(tool: Tool, response: &serde_json::Value) -> Option<String> {
    let raw = match tool {
        Tool::Terraform => response["current_version"].as_str(),
        Tool::Opentofu | Tool::Terragrunt => response["tag_name"].as_str(),
    }?;
    let version = raw.trim().trim_start_matches('v');
    (!version.is_empty()).then(|| version.to_string())
}

/// First semantic version in a `--version` banner, without the `v`.
///
/// Handles `Terraform v1.7.5`, `OpenTofu v1.6.2` and
/// `terragrunt version v0.55.1`.
pub fn parse_version_output(output: &str) -> Option<String> {
    RE_VERSION
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> Platform {
        Platform::from_target("linux", "x86_64").unwrap()
    }

    #[test]
    fn terraform_url() {
        assert_eq!(
            download_url(Tool::Terraform, "1.7.5", linux()),
            "https://releases.hashicorp.com/terraform/1.7.5/terraform_1.7.5_linux_amd64.zip"
        );
    }

    #[test]
    fn opentofu_url() {
        let mac = Platform::from_target("macos", "aarch64").unwrap();
        assert_eq!(
            download_url(Tool::Opentofu, "1.6.2", mac),
            "https://github.com/opentofu/opentofu/releases/download/v1.6.2/tofu_1.6.2_darwin_arm64.zip"
        );
    }

    #[test]
    fn terragrunt_url() {
        assert_eq!(
            download_url(Tool::Terragrunt, "0.55.1", linux()),
            "https://github.com/gruntwork-io/terragrunt/releases/download/v0.55.1/terragrunt_linux_amd64"
        );
        let windows = Platform::from_target("windows", "x86_64").unwrap();
        assert!(download_url(Tool::Terragrunt, "0.55.1", windows).ends_with("windows_amd64.exe"));
    }

    #[test]
    fn packaging_per_tool() {
        assert_eq!(packaging(Tool::Terraform), Packaging::Zip);
        assert_eq!(packaging(Tool::Opentofu), Packaging::Zip);
        assert_eq!(packaging(Tool::Terragrunt), Packaging::Binary);
    }

    #[test]
    fn parses_checkpoint_response() {
        let json = serde_json::json!({ "product": "terraform", "current_version": "1.8.0" });
        assert_eq!(
            parse_latest_response(Tool::Terraform, &json).as_deref(),
            Some("1.8.0")
        );
    }

    #[test]
    fn parses_github_release_response() {
        let json = serde_json::json!({ "tag_name": "v0.56.2" });
        assert_eq!(
            parse_latest_response(Tool::Terragrunt, &json).as_deref(),
            Some("0.56.2")
        );
        assert!(parse_latest_response(Tool::Opentofu, &serde_json::json!({})).is_none());
    }

    #[test]
    fn parses_version_banners() {
        assert_eq!(
            parse_version_output("Terraform v1.7.5\non linux_amd64").as_deref(),
            Some("1.7.5")
        );
        assert_eq!(
            parse_version_output("OpenTofu v1.6.2").as_deref(),
            Some("1.6.2")
        );
        assert_eq!(
            parse_version_output("terragrunt version v0.55.1").as_deref(),
            Some("0.55.1")
        );
        assert_eq!(
            parse_version_output("OpenTofu v1.7.0-beta1").as_deref(),
            Some("1.7.0-beta1")
        );
        assert!(parse_version_output("command not found").is_none());
    }
}
