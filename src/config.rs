// Config module for shared configuration utilities
//
// Every path and tunable can be overridden through JARWATCH_* environment
// variables; defaults keep everything under the current directory.

use crate::constants;

pub fn data_dir() -> String {
    std::env::var("JARWATCH_DIR").unwrap_or_else(|_| ".".to_string())
}

pub fn plugins_dir() -> String {
    std::env::var("JARWATCH_PLUGINS_DIR")
        .unwrap_or_else(|_| format!("{}/{}", data_dir(), constants::PLUGINS_DIR))
}

pub fn plugin_config_path() -> String {
    format!("{}/{}", data_dir(), constants::PLUGIN_CONFIG_FILE)
}

pub fn ledger_path() -> String {
    format!("{}/{}", data_dir(), constants::VERSIONS_FILE)
}

pub fn type_cache_path() -> String {
    format!("{}/{}", data_dir(), constants::TYPE_CACHE_FILE)
}

pub fn minecraft_version() -> String {
    std::env::var("JARWATCH_MC_VERSION")
        .unwrap_or_else(|_| constants::DEFAULT_MC_VERSION.to_string())
}

/// One timeout shared by every upstream call.
pub fn api_timeout_secs() -> u64 {
    std::env::var("JARWATCH_API_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(constants::DEFAULT_API_TIMEOUT_SECS)
}
