// Command implementations

pub mod add;
pub mod check;
pub mod detect;
pub mod init;
pub mod remove;
pub mod scan;
pub mod server;
pub mod status;
pub mod verify;

use anyhow::Result;

use crate::config;
use crate::engine::UpdateChecker;
use crate::ledger::VersionLedger;
use crate::plugin::PluginsConfig;
use crate::sources::SourceRegistry;

/// Load plugins.json, with the hint users need when it is missing.
pub(crate) fn load_config() -> Result<PluginsConfig> {
    PluginsConfig::load(&config::plugin_config_path()).map_err(|e| {
        anyhow::anyhow!("{e}. Run 'jarwatch init' to bootstrap a configuration.")
    })
}

/// Engine wired to the configured ledger path.
pub(crate) fn build_checker() -> UpdateChecker {
    UpdateChecker::new(
        SourceRegistry::new(),
        VersionLedger::load(config::ledger_path()),
    )
}
