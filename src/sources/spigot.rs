// Spigot source implementation (via the Spiget API)

use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::plugin::{Plugin, SourceKind};
use crate::sources::http;
use crate::sources::source_trait::{ResolvedUpdate, UpdateSource};

const API_BASE: &str = "https://api.spiget.org/v2";

#[derive(Debug, Deserialize)]
struct Resource {
    #[allow(dead_code)] // Required for deserialization but not used
    id: i64,
    name: String,
    file: Option<ResourceFile>,
}

#[derive(Debug, Deserialize)]
struct ResourceFile {
    /// Relative download path on the Spiget API for internally hosted
    /// resources.
    url: Option<String>,
    /// Set when the author hosts the artifact elsewhere; Spiget then has
    /// no version listing for it.
    #[serde(rename = "externalUrl")]
    external_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatestVersion {
    id: i64,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
    name: String,
}

lazy_static! {
    /// Version token inside an externally hosted download path, e.g.
    /// ".../v2.1.0/Plugin.jar" or ".../1.4-beta/Plugin.jar".
    static ref EXTERNAL_VERSION: Regex =
        Regex::new(r"/v?([0-9]+\.[0-9]+(?:\.[0-9]+)?(?:-[A-Za-z0-9.\-]+)?)/[^/]+\.jar").unwrap();
}

/// Version token from a versioned external download URL, if one is present.
pub(crate) fn version_from_external_url(url: &str) -> Option<String> {
    EXTERNAL_VERSION.captures(url).map(|caps| caps[1].to_string())
}

pub struct SpigotSource;

#[async_trait]
impl UpdateSource for SpigotSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Spigot
    }

    async fn resolve(&self, plugin: &Plugin) -> Result<ResolvedUpdate> {
        let resource_id = plugin.resource_id.trim();
        if resource_id.is_empty() {
            anyhow::bail!("plugin '{}' has no Spigot resource id configured", plugin.name);
        }

        let resource: Resource =
            http::fetch_json(&format!("{API_BASE}/resources/{resource_id}")).await?;

        if let Some(external) = resource.file.as_ref().and_then(|f| f.external_url.clone()) {
            // Externally hosted: the only version signal is the URL itself.
            let Some(version) = version_from_external_url(&external) else {
                anyhow::bail!(
                    "resource '{}' is hosted externally at '{}' and the URL carries no version token",
                    resource_id,
                    external
                );
            };
            debug!("resource {} resolved externally: {}", resource_id, version);
            let filename = format!("{}-{}.jar", resource.name, version);
            return Ok(ResolvedUpdate {
                version,
                download_url: external,
                filename,
            });
        }

        // Internally hosted: the latest-version sub-endpoint names the
        // release, with its numeric id as a last-resort label.
        let latest: LatestVersion =
            http::fetch_json(&format!("{API_BASE}/resources/{resource_id}/versions/latest"))
                .await?;
        let version = match latest.name {
            Some(name) if !name.is_empty() => name,
            _ => latest.id.to_string(),
        };

        let download_path = resource
            .file
            .and_then(|f| f.url)
            .filter(|u| !u.is_empty());
        let Some(path) = download_path else {
            anyhow::bail!("resource '{}' returned no download path", resource_id);
        };

        Ok(ResolvedUpdate {
            download_url: format!("{API_BASE}/{path}"),
            filename: format!("{}-{}.jar", resource.name, version),
            version,
        })
    }
}

/// Probe used by backend inference: the first resource answering to `name`
/// on the Spiget search endpoint, if any.
pub async fn search_resource(name: &str) -> Result<Option<(i64, String)>> {
    let url = format!(
        "{API_BASE}/search/resources/{}?size=10&fields=id%2Cname",
        urlencoding::encode(name)
    );

    let response = http::client().get(&url).send().await?;
    if !response.status().is_success() {
        // The search endpoint answers 404 for "nothing matched".
        return Ok(None);
    }

    let results: Vec<SearchResult> = response.json().await.unwrap_or_default();
    Ok(results.into_iter().next().map(|r| (r.id, r.name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_url_version_token() {
        assert_eq!(
            version_from_external_url("https://example.com/downloads/v2.1.0/Plugin.jar"),
            Some("2.1.0".to_string())
        );
        assert_eq!(
            version_from_external_url("https://example.com/1.4/Plugin.jar"),
            Some("1.4".to_string())
        );
        assert_eq!(
            version_from_external_url("https://example.com/3.0.1-SNAPSHOT/Plugin.jar"),
            Some("3.0.1-SNAPSHOT".to_string())
        );
    }

    #[test]
    fn test_external_url_without_version() {
        assert_eq!(
            version_from_external_url("https://example.com/latest/Plugin.jar"),
            None
        );
        assert_eq!(version_from_external_url("https://example.com/Plugin.zip"), None);
    }
}
