// GitHub Releases source implementation

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::plugin::{Plugin, SourceKind};
use crate::sources::http;
use crate::sources::source_trait::{ResolvedUpdate, UpdateSource};

const API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: String,
    browser_download_url: String,
}

/// "v7.2.0" -> "7.2.0". One leading 'v' only.
pub(crate) fn strip_v_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

pub struct GitHubSource;

#[async_trait]
impl UpdateSource for GitHubSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Github
    }

    async fn resolve(&self, plugin: &Plugin) -> Result<ResolvedUpdate> {
        let repo = plugin.repo.trim();
        let parts: Vec<&str> = repo.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!(
                "invalid GitHub repository for '{}': expected 'owner/repo', got '{}'",
                plugin.name,
                repo
            );
        }

        let release: Release =
            http::fetch_json(&format!("{API_BASE}/repos/{repo}/releases/latest")).await?;

        let Some(tag) = release.tag_name.filter(|t| !t.is_empty()) else {
            anyhow::bail!("latest release of '{}' carries no tag", repo);
        };
        let version = strip_v_prefix(&tag).to_string();

        let asset = release
            .assets
            .iter()
            .find(|a| a.browser_download_url.ends_with(".jar"));
        let Some(asset) = asset else {
            anyhow::bail!("no .jar asset in release '{}' of '{}'", tag, repo);
        };

        Ok(ResolvedUpdate {
            version,
            download_url: asset.browser_download_url.clone(),
            filename: asset.name.clone(),
        })
    }
}

/// Probe used by backend inference: does this repository publish tagged
/// releases?
pub async fn has_latest_release(repo: &str) -> Result<bool> {
    let url = format!("{API_BASE}/repos/{repo}/releases/latest");
    let release: Option<Release> = http::fetch_json_optional(&url).await?;
    Ok(release.is_some_and(|r| r.tag_name.is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_v_prefix() {
        assert_eq!(strip_v_prefix("v7.2.0"), "7.2.0");
        assert_eq!(strip_v_prefix("7.2.0"), "7.2.0");
        // Only one 'v' comes off.
        assert_eq!(strip_v_prefix("vv1.0"), "v1.0");
    }
}
