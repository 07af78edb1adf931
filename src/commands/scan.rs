// Scan command: refresh the version ledger from installed jar filenames

use std::path::Path;

use anyhow::Result;

use crate::commands;
use crate::config;
use crate::ui;

pub async fn scan(api: bool) -> Result<i32> {
    let plugin_config = commands::load_config()?;
    let plugins = plugin_config.enabled_plugins();
    let mut checker = commands::build_checker();
    let plugins_dir = config::plugins_dir();

    if !Path::new(&plugins_dir).exists() {
        ui::error(&format!("plugins directory not found: {plugins_dir}"));
        return Ok(1);
    }

    let pb = ui::spinner(&format!("Scanning {} plugin(s)...", plugins.len()));
    let report = if api {
        checker
            .scan_with_api_fallback(&plugins, Path::new(&plugins_dir))
            .await
    } else {
        checker.scan_and_update_versions(&plugins, Path::new(&plugins_dir))
    };
    pb.finish_and_clear();

    if api {
        ui::success(&format!(
            "Updated {} version(s) from filenames, {} from upstream APIs",
            report.updated_from_filename, report.updated_from_api
        ));
    } else {
        ui::success(&format!(
            "Updated {} version(s) from filenames",
            report.updated_from_filename
        ));
    }
    ui::dim(&format!("{} version(s) tracked", checker.ledger().len()));

    Ok(0)
}
