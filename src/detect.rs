// Backend-kind inference for plugins with no configured source

use anyhow::Result;
use log::debug;

use crate::constants::NAME_SUFFIXES;
use crate::plugin::SourceKind;
use crate::sources::{github, modrinth, spigot};
use crate::type_cache::TypeCache;

/// Infer which backend serves `name`, memoized through `cache`.
///
/// A cache hit skips everything else. Otherwise the probes run in trust
/// order — Modrinth, then GitHub, then Spigot — and stop at the first
/// populated answer. Every outcome, including the `manual` fallback, is
/// persisted so a name is probed at most once across runs.
pub async fn detect_kind(name: &str, cache: &mut TypeCache) -> Result<SourceKind> {
    if let Some(kind) = cache.get(name).and_then(SourceKind::parse) {
        debug!("type cache hit for '{}': {}", name, kind.as_str());
        return Ok(kind);
    }

    let normalized = normalize(name);
    let kind = probe(&normalized).await;
    cache.set(name, kind.as_str())?;
    Ok(kind)
}

/// Probe key: lowercase with the shared suffix list stripped.
fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    for suffix in NAME_SUFFIXES {
        if let Some(base) = lower.strip_suffix(suffix) {
            if !base.is_empty() {
                return base.to_string();
            }
        }
    }
    lower
}

async fn probe(name: &str) -> SourceKind {
    for slug in modrinth_candidates(name) {
        match modrinth::project_exists(&slug).await {
            Ok(true) => {
                debug!("'{}' answers on Modrinth as '{}'", name, slug);
                return SourceKind::Modrinth;
            }
            Ok(false) => {}
            Err(e) => debug!("modrinth probe '{}' failed: {}", slug, e),
        }
    }

    for repo in github_candidates(name) {
        match github::has_latest_release(&repo).await {
            Ok(true) => {
                debug!("'{}' answers on GitHub as '{}'", name, repo);
                return SourceKind::Github;
            }
            Ok(false) => {}
            Err(e) => debug!("github probe '{}' failed: {}", repo, e),
        }
    }

    match spigot::search_resource(name).await {
        Ok(Some((id, found))) => {
            debug!("'{}' answers on Spigot as resource {} ({})", name, id, found);
            return SourceKind::Spigot;
        }
        Ok(None) => {}
        Err(e) => debug!("spigot probe '{}' failed: {}", name, e),
    }

    debug!("no backend answers for '{}'; treating as manual", name);
    SourceKind::Manual
}

fn modrinth_candidates(name: &str) -> Vec<String> {
    vec![name.to_string(), format!("{name}-plugin")]
}

fn github_candidates(name: &str) -> Vec<String> {
    vec![
        format!("{name}/{name}"),
        format!("{name}-plugin/{name}"),
        format!("{name}mc/{name}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_strips_shared_suffixes() {
        assert_eq!(normalize("ChairsReloaded"), "chairsreloaded");
        assert_eq!(normalize("chairs-reloaded"), "chairs");
        assert_eq!(normalize("Essentialsv2"), "essentials");
        assert_eq!(normalize("Thing-Paper"), "thing");
        assert_eq!(normalize("Vault"), "vault");
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_probing() {
        let dir = TempDir::new().unwrap();
        let mut cache = TypeCache::load(dir.path().join("types.json"));
        cache.set("Vault", "spigot").unwrap();

        // No network: a hit must answer from the cache alone.
        let kind = detect_kind("Vault", &mut cache).await.unwrap();
        assert_eq!(kind, SourceKind::Spigot);
    }
}
