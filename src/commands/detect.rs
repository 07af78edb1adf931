// Detect command: run or refresh backend-kind inference

use anyhow::Result;

use crate::commands;
use crate::config;
use crate::detect;
use crate::type_cache::TypeCache;
use crate::ui;

/// With a name: force a fresh probe for that plugin. Without: report the
/// inferred kind for every configured plugin, reusing cached answers.
pub async fn detect(name: Option<String>) -> Result<i32> {
    let mut cache = TypeCache::load(config::type_cache_path());

    if let Some(name) = name {
        // Explicit re-detection is the only thing allowed to overwrite a
        // cached entry.
        cache.remove(&name)?;
        let kind = detect::detect_kind(&name, &mut cache).await?;
        ui::success(&format!("{name}: {}", kind.as_str()));
        return Ok(0);
    }

    let plugin_config = commands::load_config()?;
    for plugin in plugin_config.enabled_plugins() {
        let kind = detect::detect_kind(&plugin.name, &mut cache).await?;
        if plugin.kind == kind.as_str() {
            ui::plain(&format!("{:<30} {}", plugin.name, kind.as_str()));
        } else {
            ui::plain(&format!(
                "{:<30} {} (configured: {})",
                plugin.name,
                kind.as_str(),
                plugin.kind
            ));
        }
    }

    Ok(0)
}
