// Check command: resolve upstream versions for every configured plugin

use std::fs;
use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::commands;
use crate::config;
use crate::engine::UpdateChecker;
use crate::jarfile;
use crate::plugin::{Plugin, SourceKind};
use crate::sources::{UpdateInfo, http};
use crate::ui;

pub async fn check(install: bool) -> Result<i32> {
    let plugin_config = commands::load_config()?;
    let plugins = plugin_config.enabled_plugins();
    let mut checker = commands::build_checker();
    let plugins_dir = config::plugins_dir();

    let mut updates = 0usize;
    let mut errors = 0usize;

    for plugin in &plugins {
        let pb = ui::spinner(&format!("Checking {}...", plugin.name));

        if plugin.source_kind() == Some(SourceKind::Manual) {
            ui::finish_skipped(&pb, &plugin.name, "manual");
            continue;
        }

        let info = checker.check_update(plugin).await;
        let current = checker.ledger().get(&plugin.name).to_string();

        if let Some(error) = &info.error {
            ui::finish_error(&pb, &plugin.name, error);
            errors += 1;
            continue;
        }

        if !info.has_update {
            ui::finish_up_to_date(&pb, &plugin.name, &info.version);
            continue;
        }

        ui::finish_update_available(&pb, &plugin.name, &current, &info.version);
        updates += 1;

        if install {
            match install_update(&mut checker, plugin, &info, Path::new(&plugins_dir)).await {
                Ok(()) => ui::success(&format!("{} installed as {}", plugin.name, info.filename)),
                Err(e) => {
                    ui::error(&format!("failed to install {}: {e}", plugin.name));
                    errors += 1;
                }
            }
        }
    }

    ui::plain("");
    if updates == 0 && errors == 0 {
        ui::success("All plugins up to date");
    } else {
        ui::action(&format!("{updates} update(s) available, {errors} error(s)"));
    }

    Ok(if errors > 0 { 1 } else { 0 })
}

/// Replace the installed jar with the resolved artifact and record the new
/// version. The ledger is only written after the download lands.
async fn install_update(
    checker: &mut UpdateChecker,
    plugin: &Plugin,
    info: &UpdateInfo,
    plugins_dir: &Path,
) -> Result<()> {
    let bytes = http::fetch_bytes(&info.download_url).await?;

    let files = jarfile::list_jar_files(plugins_dir);
    if let Some(old) = jarfile::match_plugin_file(&plugin.name, &files) {
        debug!("removing replaced jar {}", old);
        fs::remove_file(plugins_dir.join(old))?;
    }

    fs::create_dir_all(plugins_dir)?;
    fs::write(plugins_dir.join(&info.filename), &bytes)?;
    checker.record_version(&plugin.name, &info.version)?;
    Ok(())
}
