// Update resolution engine
//
// Orchestrates ledger lookups, source dispatch and version comparison.
// Collaborators arrive through the constructor; nothing in here reaches
// for process-global state.

use std::path::Path;

use anyhow::Result;
use log::{debug, warn};

use crate::constants::VERSION_SENTINELS;
use crate::jarfile;
use crate::ledger::{UNKNOWN_VERSION, VersionLedger};
use crate::plugin::{Plugin, SourceKind};
use crate::sources::{SourceRegistry, UpdateInfo};
use crate::version;

pub const MANUAL_UPDATE_ERROR: &str = "Manual plugins require manual updates";

/// Counters produced by the bulk scan operations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub updated_from_filename: usize,
    pub updated_from_api: usize,
}

/// Counters produced by ledger verification.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub verified: usize,
    pub corrected: usize,
    pub updates_available: usize,
}

pub struct UpdateChecker {
    registry: SourceRegistry,
    ledger: VersionLedger,
}

impl UpdateChecker {
    pub fn new(registry: SourceRegistry, ledger: VersionLedger) -> Self {
        Self { registry, ledger }
    }

    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    /// Check one plugin against its upstream. Reads the ledger to decide
    /// `has_update`, never writes it — persisting a detected version is the
    /// caller's call.
    pub async fn check_update(&self, plugin: &Plugin) -> UpdateInfo {
        let Some(kind) = plugin.source_kind() else {
            return UpdateInfo::failed(format!("Unknown plugin type: {}", plugin.kind));
        };

        if kind == SourceKind::Manual {
            return UpdateInfo::failed(MANUAL_UPDATE_ERROR);
        }

        let Some(source) = self.registry.get(kind) else {
            return UpdateInfo::failed(format!("Unknown plugin type: {}", plugin.kind));
        };

        match source.resolve(plugin).await {
            Ok(update) => {
                let current = self.ledger.get(&plugin.name);
                let has_update = version::is_newer(current, &update.version);
                UpdateInfo::resolved(update, has_update)
            }
            Err(e) => UpdateInfo::failed(e.to_string()),
        }
    }

    /// Installed version as told by the plugins directory, or "unknown".
    /// Not finding a file, or a file with no readable version, is an
    /// expected steady state, not a fault.
    pub fn detect_installed_version(&self, plugin: &Plugin, plugins_dir: &Path) -> String {
        let files = jarfile::list_jar_files(plugins_dir);
        let Some(file) = jarfile::match_plugin_file(&plugin.name, &files) else {
            debug!("no file in {} matches '{}'", plugins_dir.display(), plugin.name);
            return UNKNOWN_VERSION.to_string();
        };

        let detected = jarfile::extract_version(file);
        if detected.is_empty() {
            UNKNOWN_VERSION.to_string()
        } else {
            detected
        }
    }

    /// Record a version for a plugin unless it is a placeholder label or
    /// already stored. Returns whether the ledger changed.
    pub fn record_version(&mut self, plugin_name: &str, detected: &str) -> Result<bool> {
        if detected.is_empty() || VERSION_SENTINELS.contains(&detected) {
            return Ok(false);
        }
        if self.ledger.get(plugin_name) == detected {
            return Ok(false);
        }
        self.ledger.set(plugin_name, detected)?;
        Ok(true)
    }

    /// Refresh the ledger from on-disk filenames alone.
    pub fn scan_and_update_versions(&mut self, plugins: &[Plugin], plugins_dir: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        for plugin in plugins {
            let detected = self.detect_installed_version(plugin, plugins_dir);
            if detected == UNKNOWN_VERSION {
                debug!("could not detect a version for '{}'", plugin.name);
                continue;
            }
            match self.record_version(&plugin.name, &detected) {
                Ok(true) => {
                    debug!("'{}' updated from filename: {}", plugin.name, detected);
                    report.updated_from_filename += 1;
                }
                Ok(false) => {}
                Err(e) => warn!("failed to persist version for '{}': {}", plugin.name, e),
            }
        }

        report
    }

    /// Filename scan with an upstream fallback for plugins whose jar gives
    /// nothing away. A failing API call skips that plugin and moves on.
    pub async fn scan_with_api_fallback(
        &mut self,
        plugins: &[Plugin],
        plugins_dir: &Path,
    ) -> ScanReport {
        let mut report = ScanReport::default();

        for plugin in plugins {
            let detected = self.detect_installed_version(plugin, plugins_dir);
            if detected != UNKNOWN_VERSION {
                match self.record_version(&plugin.name, &detected) {
                    Ok(true) => report.updated_from_filename += 1,
                    Ok(false) => {}
                    Err(e) => warn!("failed to persist version for '{}': {}", plugin.name, e),
                }
                continue;
            }

            if plugin.source_kind() == Some(SourceKind::Manual) {
                continue;
            }

            let info = self.check_update(plugin).await;
            if let Some(error) = &info.error {
                debug!("API check failed for '{}': {}", plugin.name, error);
                continue;
            }
            match self.record_version(&plugin.name, &info.version) {
                Ok(true) => {
                    debug!("'{}' updated from API: {}", plugin.name, info.version);
                    report.updated_from_api += 1;
                }
                Ok(false) => {}
                Err(e) => warn!("failed to persist version for '{}': {}", plugin.name, e),
            }
        }

        report
    }

    /// Reconcile the ledger against installed files, then ask upstreams
    /// whether anything newer exists.
    pub async fn verify_versions(&mut self, plugins: &[Plugin], plugins_dir: &Path) -> VerifyReport {
        let mut report = VerifyReport::default();

        for plugin in plugins {
            let installed = self.detect_installed_version(plugin, plugins_dir);
            if installed == UNKNOWN_VERSION {
                debug!("could not detect installed version for '{}'", plugin.name);
                continue;
            }

            if self.ledger.get(&plugin.name) == installed {
                report.verified += 1;
            } else {
                match self.record_version(&plugin.name, &installed) {
                    Ok(true) => {
                        debug!("corrected '{}' to {}", plugin.name, installed);
                        report.corrected += 1;
                    }
                    Ok(false) => {}
                    Err(e) => warn!("failed to persist version for '{}': {}", plugin.name, e),
                }
            }

            if plugin.source_kind() == Some(SourceKind::Manual) {
                continue;
            }

            let info = self.check_update(plugin).await;
            if info.is_err() {
                continue;
            }
            if VERSION_SENTINELS.contains(&info.version.as_str()) {
                continue;
            }
            if version::is_newer(&installed, &info.version) {
                debug!(
                    "update available for '{}': {} -> {}",
                    plugin.name, installed, info.version
                );
                report.updates_available += 1;
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn checker(dir: &TempDir) -> UpdateChecker {
        UpdateChecker::new(
            SourceRegistry::new(),
            VersionLedger::load(dir.path().join("versions.json")),
        )
    }

    fn write_jar(dir: &std::path::Path, name: &str) {
        fs::write(dir.join(name), b"jar").unwrap();
    }

    #[tokio::test]
    async fn test_manual_plugins_never_resolve() {
        let dir = TempDir::new().unwrap();
        let checker = checker(&dir);
        let plugin = Plugin::new("EssentialsX", "manual");

        let info = checker.check_update(&plugin).await;
        assert_eq!(info.error.as_deref(), Some(MANUAL_UPDATE_ERROR));
        assert!(!info.has_update);
        assert!(info.version.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_kind_is_reported_per_plugin() {
        let dir = TempDir::new().unwrap();
        let checker = checker(&dir);
        let plugin = Plugin::new("Weird", "curseforge");

        let info = checker.check_update(&plugin).await;
        assert_eq!(info.error.as_deref(), Some("Unknown plugin type: curseforge"));
        assert!(!info.has_update);
    }

    #[test]
    fn test_detect_installed_version() {
        let dir = TempDir::new().unwrap();
        let plugins_dir = dir.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        write_jar(&plugins_dir, "vault-1.7.3.jar");
        write_jar(&plugins_dir, "unrelated.jar");

        let checker = checker(&dir);
        let plugin = Plugin::new("Vault", "spigot");
        assert_eq!(checker.detect_installed_version(&plugin, &plugins_dir), "1.7.3");

        let missing = Plugin::new("WorldEdit", "github");
        assert_eq!(
            checker.detect_installed_version(&missing, &plugins_dir),
            UNKNOWN_VERSION
        );
    }

    #[test]
    fn test_versionless_jar_reads_unknown() {
        let dir = TempDir::new().unwrap();
        let plugins_dir = dir.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        write_jar(&plugins_dir, "vault.jar");

        let checker = checker(&dir);
        let plugin = Plugin::new("Vault", "spigot");
        assert_eq!(
            checker.detect_installed_version(&plugin, &plugins_dir),
            UNKNOWN_VERSION
        );
    }

    #[test]
    fn test_record_version_rejects_sentinels() {
        let dir = TempDir::new().unwrap();
        let mut checker = checker(&dir);

        assert!(!checker.record_version("Vault", "").unwrap());
        assert!(!checker.record_version("Vault", "unknown").unwrap());
        assert!(!checker.record_version("Vault", "latest").unwrap());
        assert!(!checker.record_version("Vault", "spiget-latest").unwrap());
        assert!(checker.ledger().is_empty());

        assert!(checker.record_version("Vault", "1.7.3").unwrap());
        assert!(!checker.record_version("Vault", "1.7.3").unwrap());
    }

    #[test]
    fn test_scan_updates_ledger_from_filenames() {
        let dir = TempDir::new().unwrap();
        let plugins_dir = dir.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        write_jar(&plugins_dir, "vault-1.7.3.jar");
        write_jar(&plugins_dir, "world-edit-7.2.0.jar");

        let plugins = vec![
            Plugin::new("Vault", "spigot"),
            Plugin::new("WorldEdit", "github"),
            Plugin::new("Missing", "manual"),
        ];

        let mut checker = checker(&dir);
        let report = checker.scan_and_update_versions(&plugins, &plugins_dir);

        assert_eq!(report.updated_from_filename, 2);
        assert_eq!(checker.ledger().get("Vault"), "1.7.3");
        assert_eq!(checker.ledger().get("WorldEdit"), "7.2.0");
        assert_eq!(checker.ledger().get("Missing"), UNKNOWN_VERSION);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let plugins_dir = dir.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        write_jar(&plugins_dir, "vault-1.7.3.jar");

        let plugins = vec![Plugin::new("Vault", "spigot")];
        let mut checker = checker(&dir);

        let first = checker.scan_and_update_versions(&plugins, &plugins_dir);
        assert_eq!(first.updated_from_filename, 1);

        // Nothing changed on disk; the second pass must not touch the
        // ledger.
        let second = checker.scan_and_update_versions(&plugins, &plugins_dir);
        assert_eq!(second, ScanReport::default());
    }

    #[tokio::test]
    async fn test_verify_corrects_stale_entries() {
        let dir = TempDir::new().unwrap();
        let plugins_dir = dir.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        write_jar(&plugins_dir, "vault-1.7.3.jar");

        // Manual plugins skip the API leg, keeping this test offline.
        let plugins = vec![Plugin::new("Vault", "manual")];
        let mut checker = checker(&dir);
        checker.record_version("Vault", "1.6.0").unwrap();

        let report = checker.verify_versions(&plugins, &plugins_dir).await;
        assert_eq!(report.corrected, 1);
        assert_eq!(report.verified, 0);
        assert_eq!(checker.ledger().get("Vault"), "1.7.3");

        let again = checker.verify_versions(&plugins, &plugins_dir).await;
        assert_eq!(again.verified, 1);
        assert_eq!(again.corrected, 0);
    }
}
