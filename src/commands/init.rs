// Init command: bootstrap plugins.json from the jars already on disk
//
// The fallback path for installs that predate any configuration: walk the
// plugins directory, derive a display name per jar, and infer each
// backend kind.

use std::path::Path;

use anyhow::Result;

use crate::config;
use crate::constants::DISABLED_EXT;
use crate::detect;
use crate::jarfile;
use crate::plugin::{Plugin, PluginsConfig};
use crate::type_cache::TypeCache;
use crate::ui;

pub async fn init() -> Result<i32> {
    let config_path = config::plugin_config_path();
    if Path::new(&config_path).exists() {
        ui::warning(&format!("{config_path} already exists; leaving it untouched"));
        return Ok(1);
    }

    let plugins_dir = config::plugins_dir();
    let files = jarfile::list_jar_files(Path::new(&plugins_dir));
    if files.is_empty() {
        ui::warning(&format!("no jar files found in {plugins_dir}"));
    }

    let mut cache = TypeCache::load(config::type_cache_path());
    let mut plugin_config = PluginsConfig::default();

    for file in files.iter().filter(|f| !f.ends_with(DISABLED_EXT)) {
        let name = jarfile::plugin_name_from_filename(file);
        if name.is_empty() {
            continue;
        }

        let kind = detect::detect_kind(&name, &mut cache).await?;

        let mut plugin = Plugin::new(name.clone(), kind.as_str());
        plugin.filename_hint = file.clone();
        plugin_config.add_plugin(plugin);

        ui::action(&format!("{name} ({file}) -> {}", kind.as_str()));
    }

    plugin_config.save(&config_path)?;
    ui::success(&format!(
        "Created {config_path} with {} plugin(s)",
        plugin_config.plugins.len()
    ));
    ui::dim("Review the inferred types and fill in resource ids / slugs / repos.");

    Ok(0)
}
