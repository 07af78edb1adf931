// Verify command: reconcile the ledger against installed files and
// upstream versions

use std::path::Path;

use anyhow::Result;

use crate::commands;
use crate::config;
use crate::ui;

pub async fn verify() -> Result<i32> {
    let plugin_config = commands::load_config()?;
    let plugins = plugin_config.enabled_plugins();
    let mut checker = commands::build_checker();
    let plugins_dir = config::plugins_dir();

    if !Path::new(&plugins_dir).exists() {
        ui::error(&format!("plugins directory not found: {plugins_dir}"));
        return Ok(1);
    }

    let pb = ui::spinner(&format!("Verifying {} plugin(s)...", plugins.len()));
    let report = checker.verify_versions(&plugins, Path::new(&plugins_dir)).await;
    pb.finish_and_clear();

    ui::success("Verification complete:");
    ui::plain(&format!("  • {} version(s) verified correct", report.verified));
    ui::plain(&format!("  • {} stored version(s) corrected", report.corrected));
    ui::plain(&format!(
        "  • {} plugin(s) have updates available",
        report.updates_available
    ));

    Ok(0)
}
