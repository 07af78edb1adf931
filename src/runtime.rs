// Server runtime (Purpur) update checking

use anyhow::Result;
use log::debug;
use serde_json::Value;

use crate::jsonpath;
use crate::sources::http;

const API_BASE: &str = "https://api.purpurmc.org/v2/purpur";

#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub latest_version: String,
    pub latest_build: String,
    pub build_result: String,
    pub download_url: String,
}

impl RuntimeInfo {
    pub fn filename(&self) -> String {
        format!("purpur-{}-{}.jar", self.latest_version, self.latest_build)
    }
}

/// Latest Purpur version and build. A failed latest build upstream is an
/// error here — there is nothing sensible to download.
pub async fn check_runtime_update() -> Result<RuntimeInfo> {
    let index: Value = http::fetch_json(API_BASE).await?;

    let latest_version = jsonpath::lookup_str(&index, "metadata.current");
    if latest_version.is_empty() {
        anyhow::bail!("could not read the current Purpur version from the project index");
    }
    debug!("latest Purpur version: {}", latest_version);

    let build: Value = http::fetch_json(&format!("{API_BASE}/{latest_version}/latest")).await?;

    let latest_build = jsonpath::lookup_str(&build, "build");
    if latest_build.is_empty() {
        anyhow::bail!("could not read the latest build number for Purpur {latest_version}");
    }

    let build_result = jsonpath::lookup_str(&build, "result");
    if build_result == "FAILURE" {
        anyhow::bail!("latest Purpur {latest_version} build {latest_build} failed upstream");
    }
    debug!("latest Purpur build: {} ({})", latest_build, build_result);

    Ok(RuntimeInfo {
        download_url: format!("{API_BASE}/{latest_version}/latest/download"),
        latest_version,
        latest_build,
        build_result,
    })
}
