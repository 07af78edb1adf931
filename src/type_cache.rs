// Backend-kind cache: plugin name -> inferred source kind

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use log::debug;

/// Flat JSON map of plugin name to backend-kind string, persisted beside
/// the version ledger with the same full-rewrite discipline. Entries never
/// expire; only an explicit re-detection overwrites them.
pub struct TypeCache {
    path: PathBuf,
    kinds: BTreeMap<String, String>,
}

impl TypeCache {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kinds: BTreeMap<String, String> = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();

        debug!("loaded {} cached type(s) from {}", kinds.len(), path.display());
        Self { path, kinds }
    }

    pub fn get(&self, plugin_name: &str) -> Option<&str> {
        self.kinds.get(plugin_name).map(String::as_str)
    }

    /// Record an inference outcome and persist immediately, so a name is
    /// probed at most once across runs.
    pub fn set(&mut self, plugin_name: &str, kind: &str) -> Result<()> {
        self.kinds.insert(plugin_name.to_string(), kind.to_string());
        self.save()
    }

    /// Forget a cached entry (used before an explicit re-detection).
    pub fn remove(&mut self, plugin_name: &str) -> Result<()> {
        if self.kinds.remove(plugin_name).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.kinds)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("types.json");

        let mut cache = TypeCache::load(&path);
        assert_eq!(cache.get("Vault"), None);

        cache.set("Vault", "spigot").unwrap();
        cache.set("Axiom", "modrinth").unwrap();

        let reloaded = TypeCache::load(&path);
        assert_eq!(reloaded.get("Vault"), Some("spigot"));
        assert_eq!(reloaded.get("Axiom"), Some("modrinth"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("types.json");

        let mut cache = TypeCache::load(&path);
        cache.set("Vault", "spigot").unwrap();
        cache.remove("Vault").unwrap();

        let reloaded = TypeCache::load(&path);
        assert_eq!(reloaded.get("Vault"), None);
    }
}
