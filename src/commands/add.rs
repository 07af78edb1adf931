// Add command: register a plugin in the configuration

use anyhow::Result;

use crate::commands;
use crate::config;
use crate::detect;
use crate::plugin::{Plugin, SourceKind};
use crate::type_cache::TypeCache;
use crate::ui;

pub async fn add(
    name: String,
    kind: Option<String>,
    id: Option<String>,
    host: Option<String>,
) -> Result<i32> {
    let mut plugin_config = commands::load_config()?;

    if plugin_config.find(&name).is_some() {
        ui::warning(&format!("plugin '{name}' is already configured"));
        return Ok(1);
    }

    // No kind given: let the detection probe take a guess.
    let kind = match kind {
        Some(kind) => kind,
        None => {
            let mut cache = TypeCache::load(config::type_cache_path());
            let inferred = detect::detect_kind(&name, &mut cache).await?;
            ui::action(&format!("inferred type '{}' for {name}", inferred.as_str()));
            inferred.as_str().to_string()
        }
    };

    if SourceKind::parse(&kind).is_none() {
        ui::error(&format!(
            "unknown plugin type '{kind}' (expected spigot, modrinth, github, jenkins or manual)"
        ));
        return Ok(1);
    }

    let mut plugin = Plugin::new(name.clone(), &kind);
    if let Some(id) = id {
        match SourceKind::parse(&kind) {
            Some(SourceKind::Spigot) => plugin.resource_id = id,
            Some(SourceKind::Modrinth) => plugin.project_slug = id,
            Some(SourceKind::Github) => plugin.repo = id,
            Some(SourceKind::Jenkins) => plugin.job = id,
            _ => {}
        }
    }
    if let Some(host) = host {
        plugin.jenkins_host = host;
    }

    plugin_config.add_plugin(plugin);
    plugin_config.save(&config::plugin_config_path())?;
    ui::success(&format!("Added plugin '{name}' ({kind})"));

    Ok(0)
}
