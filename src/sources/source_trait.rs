// Trait definition for upstream update sources

use anyhow::Result;

use crate::plugin::{Plugin, SourceKind};

/// Fully resolved upstream state for one plugin.
///
/// Constructed only once both the version and the download URL are known;
/// a source that cannot supply both must error instead.
#[derive(Debug, Clone)]
pub struct ResolvedUpdate {
    pub version: String,
    pub download_url: String,
    pub filename: String,
}

/// Outcome of an update check as reported to callers. A non-empty `error`
/// means the remaining fields carry nothing and must not be persisted.
#[derive(Debug, Clone, Default)]
pub struct UpdateInfo {
    pub version: String,
    pub download_url: String,
    pub filename: String,
    pub has_update: bool,
    pub error: Option<String>,
}

impl UpdateInfo {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn resolved(update: ResolvedUpdate, has_update: bool) -> Self {
        Self {
            version: update.version,
            download_url: update.download_url,
            filename: update.filename,
            has_update,
            error: None,
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// Trait for update sources (Spigot, Modrinth, GitHub, Jenkins)
#[async_trait::async_trait]
pub trait UpdateSource: Send + Sync {
    /// Backend kind this source serves.
    fn kind(&self) -> SourceKind;

    /// Resolve the latest upstream version and artifact for `plugin`.
    ///
    /// Implementations return `Err` rather than a partial result: an `Ok`
    /// always carries a non-empty version and download URL.
    async fn resolve(&self, plugin: &Plugin) -> Result<ResolvedUpdate>;
}
