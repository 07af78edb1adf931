// Sources module for upstream backend implementations

use std::collections::HashMap;
use std::sync::Arc;

pub mod github;
pub mod http;
pub mod jenkins;
pub mod modrinth;
pub mod source_trait;
pub mod spigot;

pub use github::GitHubSource;
pub use jenkins::JenkinsSource;
pub use modrinth::ModrinthSource;
pub use spigot::SpigotSource;

pub use source_trait::{ResolvedUpdate, UpdateInfo, UpdateSource};

use crate::plugin::SourceKind;

/// Registry of update sources keyed by backend kind. Each backend's quirks
/// live in its own type; dispatch is a table lookup, not a branching chain.
pub struct SourceRegistry {
    sources: HashMap<SourceKind, Arc<dyn UpdateSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            sources: HashMap::new(),
        };

        registry.register(Arc::new(SpigotSource));
        registry.register(Arc::new(ModrinthSource));
        registry.register(Arc::new(GitHubSource));
        registry.register(Arc::new(JenkinsSource));

        registry
    }

    fn register(&mut self, source: Arc<dyn UpdateSource>) {
        self.sources.insert(source.kind(), source);
    }

    /// Source for a kind; `manual` has none by design.
    pub fn get(&self, kind: SourceKind) -> Option<&Arc<dyn UpdateSource>> {
        self.sources.get(&kind)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
