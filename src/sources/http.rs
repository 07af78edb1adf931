// Shared HTTP client utilities

use std::time::Duration;

use anyhow::Result;
use lazy_static::lazy_static;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config;

/// User-Agent string for all upstream requests
const USER_AGENT: &str = concat!("jarwatch/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    /// One client per process; every call shares the same timeout.
    static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config::api_timeout_secs()))
        .build()
        .expect("failed to build HTTP client");
}

/// Get a reference to the shared HTTP client
pub fn client() -> &'static Client {
    &CLIENT
}

/// Fetch JSON from a URL and deserialize it. A failed or timed-out call is
/// an error; there is no retry at this layer.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let response: Response = CLIENT.get(url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        anyhow::bail!("not found: {}", url);
    }

    if !response.status().is_success() {
        anyhow::bail!("request failed: {} ({})", url, response.status());
    }

    let result = response.json().await?;
    Ok(result)
}

/// Fetch JSON from a URL, returning None for 404 responses. The detection
/// probes lean on this to tell "no such project" apart from real failures.
pub async fn fetch_json_optional<T: DeserializeOwned>(url: &str) -> Result<Option<T>> {
    let response: Response = CLIENT.get(url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !response.status().is_success() {
        anyhow::bail!("request failed: {} ({})", url, response.status());
    }

    let result = response.json().await?;
    Ok(Some(result))
}

/// Fetch raw bytes from a URL, used for artifact downloads.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response: Response = CLIENT.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("download failed: {} ({})", url, response.status());
    }

    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
