// Modrinth source implementation

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::plugin::{Plugin, SourceKind};
use crate::sources::http;
use crate::sources::source_trait::{ResolvedUpdate, UpdateSource};

const API_BASE: &str = "https://api.modrinth.com/v2";

/// Loader tags tried most-derived first. The API filters by exactly one
/// loader per query, so a purpur build is preferred over a generic bukkit
/// one when both exist.
pub const LOADER_PRIORITY: &[&str] = &["purpur", "paper", "spigot", "bukkit"];

#[derive(Debug, Deserialize)]
struct Project {
    id: String,
    #[allow(dead_code)] // Required for deserialization but not used
    slug: String,
}

#[derive(Debug, Deserialize)]
struct Version {
    version_number: String,
    files: Vec<VersionFile>,
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    filename: String,
    url: String,
    #[serde(default)]
    primary: bool,
}

fn versions_url(slug: &str, mc_version: &str, loader: &str) -> String {
    format!(
        "{API_BASE}/project/{}/version?game_versions={}&loaders={}",
        slug,
        urlencoding::encode(&format!("[\"{mc_version}\"]")),
        urlencoding::encode(&format!("[\"{loader}\"]")),
    )
}

pub struct ModrinthSource;

#[async_trait]
impl UpdateSource for ModrinthSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Modrinth
    }

    async fn resolve(&self, plugin: &Plugin) -> Result<ResolvedUpdate> {
        let slug = plugin.project_slug.trim();
        if slug.is_empty() {
            anyhow::bail!("plugin '{}' has no Modrinth project slug configured", plugin.name);
        }

        let mut last_error = None;

        for loader in LOADER_PRIORITY {
            let url = versions_url(slug, &plugin.mc_version, loader);
            let versions: Vec<Version> = match http::fetch_json(&url).await {
                Ok(versions) => versions,
                Err(e) => {
                    debug!("modrinth loader {} failed for '{}': {}", loader, slug, e);
                    last_error = Some(e);
                    continue;
                }
            };

            // First loader with content wins; later loaders are not
            // consulted.
            let Some(version) = versions.into_iter().next() else {
                debug!("no {} build of '{}' for {}", loader, slug, plugin.mc_version);
                continue;
            };

            let file = version
                .files
                .iter()
                .find(|f| f.primary)
                .or_else(|| version.files.first());
            let Some(file) = file else {
                anyhow::bail!(
                    "version '{}' of '{}' lists no files",
                    version.version_number,
                    slug
                );
            };
            if version.version_number.is_empty() || file.url.is_empty() {
                anyhow::bail!("incomplete response for '{}' with loader {}", slug, loader);
            }

            debug!("'{}' resolved with loader {}: {}", slug, loader, version.version_number);
            return Ok(ResolvedUpdate {
                version: version.version_number.clone(),
                download_url: file.url.clone(),
                filename: file.filename.clone(),
            });
        }

        match last_error {
            Some(e) => anyhow::bail!(
                "no build of '{}' found for game version {} (last error: {})",
                slug,
                plugin.mc_version,
                e
            ),
            None => anyhow::bail!(
                "no compatible loader has a build of '{}' for game version {}",
                slug,
                plugin.mc_version
            ),
        }
    }
}

/// Probe used by backend inference: does a populated project answer to
/// this slug?
pub async fn project_exists(slug: &str) -> Result<bool> {
    let url = format!("{API_BASE}/project/{}", slug);
    let project: Option<Project> = http::fetch_json_optional(&url).await?;
    Ok(project.is_some_and(|p| !p.id.is_empty()))
}
