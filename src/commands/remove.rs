// Remove command: drop a plugin from the configuration

use anyhow::Result;

use crate::commands;
use crate::config;
use crate::ui;

pub fn remove(name: String) -> Result<i32> {
    let mut plugin_config = commands::load_config()?;

    if !plugin_config.remove_plugin(&name) {
        ui::error(&format!("plugin '{name}' is not configured"));
        return Ok(1);
    }

    plugin_config.save(&config::plugin_config_path())?;
    ui::success(&format!("Removed plugin '{name}'"));

    Ok(0)
}
