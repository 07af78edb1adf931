// Plugin configuration entities

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config;

/// Upstream distribution backend a plugin is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Spigot,
    Modrinth,
    Github,
    Jenkins,
    Manual,
}

impl SourceKind {
    /// Parse a config-file kind string. `None` for anything unrecognized,
    /// so a typo surfaces as a per-plugin error instead of a failed load.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spigot" => Some(Self::Spigot),
            "modrinth" => Some(Self::Modrinth),
            "github" => Some(Self::Github),
            "jenkins" => Some(Self::Jenkins),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spigot => "spigot",
            Self::Modrinth => "modrinth",
            Self::Github => "github",
            Self::Jenkins => "jenkins",
            Self::Manual => "manual",
        }
    }
}

fn default_true() -> bool {
    true
}

/// One configured plugin. Field names follow the on-disk camelCase layout
/// of plugins.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    /// Backend kind as written in the config; parsed at dispatch time.
    #[serde(rename = "type")]
    pub kind: String,
    /// Spigot resource id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
    /// Modrinth project slug.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_slug: String,
    /// GitHub repository, "owner/repo".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo: String,
    /// Jenkins server alias, or "custom" when `job` is a full URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jenkins_host: String,
    /// Jenkins job name (full URL under the "custom" host).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job: String,
    /// Target game version; empty entries take the configured default at
    /// load time.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mc_version: String,
    /// Hint for matching this plugin's jar on disk.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename_hint: String,
    /// Park this plugin when running on the test server.
    #[serde(default)]
    pub disable_on_test: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Plugin {
    pub fn new(name: impl Into<String>, kind: &str) -> Self {
        Self {
            name: name.into(),
            kind: kind.to_string(),
            resource_id: String::new(),
            project_slug: String::new(),
            repo: String::new(),
            jenkins_host: String::new(),
            job: String::new(),
            mc_version: String::new(),
            filename_hint: String::new(),
            disable_on_test: false,
            enabled: true,
        }
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        SourceKind::parse(&self.kind)
    }
}

/// The plugins.json document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PluginsConfig {
    pub plugins: Vec<Plugin>,
}

impl PluginsConfig {
    /// Load the configuration, filling per-plugin defaults. Disabled
    /// entries stay in the document (and survive a re-save); they are
    /// only filtered by `enabled_plugins`.
    pub fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {path}"))?;
        let mut loaded: Self = serde_json::from_str(&text)
            .with_context(|| format!("{path} is not valid plugin configuration"))?;

        let default_mc = config::minecraft_version();
        for plugin in &mut loaded.plugins {
            if plugin.mc_version.is_empty() {
                plugin.mc_version = default_mc.clone();
            }
            if plugin.kind == "jenkins" && plugin.jenkins_host.is_empty() {
                plugin.jenkins_host = "froobworld".to_string();
            }
        }

        debug!("loaded {} plugin(s) from {}", loaded.plugins.len(), path);
        Ok(loaded)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("could not write {path}"))?;
        Ok(())
    }

    /// Plugins that take part in update runs.
    pub fn enabled_plugins(&self) -> Vec<Plugin> {
        self.plugins.iter().filter(|p| p.enabled).cloned().collect()
    }

    pub fn find(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Add a plugin; refuses duplicates by name.
    pub fn add_plugin(&mut self, plugin: Plugin) -> bool {
        if self.find(&plugin.name).is_some() {
            return false;
        }
        self.plugins.push(plugin);
        true
    }

    pub fn remove_plugin(&mut self, name: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|p| p.name != name);
        self.plugins.len() != before
    }
}
