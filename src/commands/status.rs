// Status command: table of every configured plugin's local and upstream
// state

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::commands;
use crate::config;
use crate::constants::DISABLED_EXT;
use crate::jarfile;
use crate::plugin::SourceKind;
use crate::ui;

enum State {
    Installed,
    UpdateAvailable,
    Untracked,
    Missing,
    Disabled,
}

struct Row {
    name: String,
    current: String,
    kind: String,
    latest: String,
    state: State,
}

pub async fn status() -> Result<i32> {
    let plugin_config = commands::load_config()?;
    let plugins = plugin_config.enabled_plugins();
    let checker = commands::build_checker();
    let plugins_dir = config::plugins_dir();
    let files = jarfile::list_jar_files(Path::new(&plugins_dir));

    // Parked jars, with the parking extension stripped so the matcher can
    // see them.
    let parked: Vec<String> = files
        .iter()
        .filter(|f| f.ends_with(DISABLED_EXT))
        .map(|f| f[..f.len() - ".DIS".len()].to_string())
        .collect();

    let mut rows = Vec::with_capacity(plugins.len());

    for plugin in &plugins {
        let current = checker.ledger().get(&plugin.name).to_string();
        let installed = jarfile::match_plugin_file(&plugin.name, &files).is_some();
        let is_manual = plugin.source_kind() == Some(SourceKind::Manual);

        let (state, latest) = if installed {
            if current == "unknown" {
                (State::Untracked, "unknown".to_string())
            } else if is_manual {
                (State::Installed, "manual".to_string())
            } else {
                let info = checker.check_update(plugin).await;
                match info.error {
                    Some(_) => (State::Installed, "API error".to_string()),
                    None if info.has_update => (State::UpdateAvailable, info.version),
                    None => (State::Installed, info.version),
                }
            }
        } else if jarfile::match_plugin_file(&plugin.name, &parked).is_some() {
            (State::Disabled, "-".to_string())
        } else {
            (State::Missing, "-".to_string())
        };

        rows.push(Row {
            name: plugin.name.clone(),
            current,
            kind: plugin.kind.clone(),
            latest,
            state,
        });
    }

    print_table(&rows, &plugins_dir, checker.ledger().len());
    Ok(0)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

fn print_table(rows: &[Row], plugins_dir: &str, tracked: usize) {
    ui::header("Plugin status");
    ui::plain(&format!(
        "{:<30} {:<20} {:<10} {:<18} {}",
        "NAME", "CURRENT", "TYPE", "LATEST", "STATUS"
    ));

    let mut installed = 0usize;
    let mut updates = 0usize;

    for row in rows {
        let status = match row.state {
            State::Installed => {
                installed += 1;
                style("Installed").green()
            }
            State::UpdateAvailable => {
                installed += 1;
                updates += 1;
                style("Update available").yellow()
            }
            State::Untracked => style("Untracked").yellow(),
            State::Missing => style("Missing").red(),
            State::Disabled => style("Disabled").blue(),
        };

        ui::plain(&format!(
            "{:<30} {:<20} {:<10} {:<18} {}",
            truncate(&row.name, 29),
            truncate(&row.current, 19),
            row.kind,
            truncate(&row.latest, 17),
            status
        ));
    }

    ui::plain("");
    ui::plain(&format!("  • Configured plugins: {}", rows.len()));
    ui::plain(&format!("  • Tracked versions: {tracked}"));
    ui::plain(&format!("  • Installed: {installed}"));
    if updates > 0 {
        ui::plain(&format!("  • Updates available: {updates}"));
    } else {
        ui::plain("  • All installed plugins up to date");
    }
    ui::dim(&format!("  plugins directory: {plugins_dir}"));
}
