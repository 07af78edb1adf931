// Jenkins CI source implementation

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::plugin::{Plugin, SourceKind};
use crate::sources::http;
use crate::sources::source_trait::{ResolvedUpdate, UpdateSource};

/// Known CI servers addressable by alias. The "custom" alias instead
/// treats the plugin's job field as a complete URL.
const HOSTS: &[(&str, &str)] = &[
    ("froobworld", "https://ci.froobworld.com"),
    ("codemc", "https://ci.codemc.io"),
    ("enginehub", "https://builds.enginehub.org"),
    ("papermc", "https://paperci.io"),
];

pub(crate) fn base_url(alias: &str) -> Option<&'static str> {
    HOSTS.iter().find(|(a, _)| *a == alias).map(|(_, url)| *url)
}

#[derive(Debug, Deserialize)]
struct Build {
    number: Option<i64>,
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(rename = "fileName")]
    file_name: String,
    #[serde(rename = "relativePath")]
    relative_path: String,
}

/// Artifact URL for the build whose `/api/json` document was fetched from
/// `api_url`. `None` when the queried URL has no `/api/json` segment to
/// anchor on.
pub(crate) fn artifact_url(api_url: &str, relative_path: &str) -> Option<String> {
    api_url
        .find("/api/json")
        .map(|pos| format!("{}/artifact/{}", &api_url[..pos], relative_path))
}

pub struct JenkinsSource;

#[async_trait]
impl UpdateSource for JenkinsSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Jenkins
    }

    async fn resolve(&self, plugin: &Plugin) -> Result<ResolvedUpdate> {
        let job = plugin.job.trim();
        if job.is_empty() {
            anyhow::bail!("plugin '{}' has no Jenkins job configured", plugin.name);
        }

        let api_url = if plugin.jenkins_host == "custom" {
            job.to_string()
        } else {
            let Some(base) = base_url(&plugin.jenkins_host) else {
                anyhow::bail!(
                    "unknown Jenkins host alias '{}' for plugin '{}'",
                    plugin.jenkins_host,
                    plugin.name
                );
            };
            format!("{base}/job/{job}/lastSuccessfulBuild/api/json")
        };

        let build: Build = http::fetch_json(&api_url).await?;

        let Some(number) = build.number else {
            anyhow::bail!("build response from '{}' carries no build number", api_url);
        };
        let version = format!("build-{number}");

        let artifact = build
            .artifacts
            .iter()
            .find(|a| a.file_name.ends_with(".jar"));
        let Some(artifact) = artifact else {
            anyhow::bail!("no .jar artifact in build {} of '{}'", number, job);
        };

        let Some(download_url) = artifact_url(&api_url, &artifact.relative_path) else {
            anyhow::bail!("cannot derive an artifact URL from '{}'", api_url);
        };

        Ok(ResolvedUpdate {
            version,
            download_url,
            filename: artifact.file_name.clone(),
        })
    }
}
