// Version ledger: plugin name -> last known installed version

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use log::debug;

pub const UNKNOWN_VERSION: &str = "unknown";

/// Flat JSON map of plugin name to version string, human-editable,
/// rewritten in full on every mutation so the file always mirrors the
/// complete in-memory state.
pub struct VersionLedger {
    path: PathBuf,
    versions: BTreeMap<String, String>,
}

impl VersionLedger {
    /// Load the ledger, treating a missing or unreadable file as empty —
    /// first runs start from nothing.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let versions: BTreeMap<String, String> = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();

        debug!("loaded {} tracked version(s) from {}", versions.len(), path.display());
        Self { path, versions }
    }

    /// Tracked version for a plugin, or the "unknown" sentinel.
    pub fn get(&self, plugin_name: &str) -> &str {
        self.versions
            .get(plugin_name)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_VERSION)
    }

    /// Store a version and persist the whole ledger.
    pub fn set(&mut self, plugin_name: &str, version: &str) -> Result<()> {
        self.versions
            .insert(plugin_name.to_string(), version.to_string());
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.versions)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
