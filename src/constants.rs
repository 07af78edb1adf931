// Constants module for shared string constants

pub const PLUGIN_CONFIG_FILE: &str = "plugins.json";
pub const VERSIONS_FILE: &str = "plugin_versions.json";
pub const TYPE_CACHE_FILE: &str = "plugin_types.json";
pub const PLUGINS_DIR: &str = "plugins";
pub const DEFAULT_MC_VERSION: &str = "1.21.4";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

pub const JAR_EXT: &str = ".jar";
/// Renaming a jar to this extension parks it without deleting it.
pub const DISABLED_EXT: &str = ".jar.DIS";

/// Suffixes stripped from plugin display names when matching files and
/// probing backends. One list for both so the two stay in agreement.
pub const NAME_SUFFIXES: &[&str] = &["-reloaded", "v3", "v2", "-spigot", "-bukkit", "-paper"];

/// Placeholder labels some upstreams report instead of a real version.
/// These must never reach the version ledger.
pub const VERSION_SENTINELS: &[&str] = &["latest", "spiget-latest", "unknown"];
