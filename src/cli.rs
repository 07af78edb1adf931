// CLI module for handling command-line interface

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jarwatch", version)]
#[command(about = "Tracks Minecraft server plugins and the server jar against their upstream sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap plugins.json from the jars already on disk
    Init,
    /// Check every configured plugin for upstream updates
    Check {
        /// Download each available update into the plugins directory
        #[arg(long)]
        install: bool,
    },
    /// Refresh the version ledger from installed jar filenames
    Scan {
        /// Ask the upstream API when a filename carries no version
        #[arg(long)]
        api: bool,
    },
    /// Reconcile the ledger against installed files and upstream versions
    Verify,
    /// Show a status table for all configured plugins
    Status,
    /// Infer the backend kind for one plugin name, or report all
    Detect { name: Option<String> },
    /// Register a plugin in the configuration
    Add {
        name: String,
        /// Backend kind (inferred when omitted)
        #[arg(long)]
        kind: Option<String>,
        /// Backend identifier: resource id, project slug, owner/repo or job
        #[arg(long)]
        id: Option<String>,
        /// Jenkins host alias (froobworld, codemc, enginehub, papermc, custom)
        #[arg(long)]
        host: Option<String>,
    },
    /// Drop a plugin from the configuration
    Remove { name: String },
    /// Check (and optionally download) the latest Purpur server jar
    Server {
        /// Download the latest server jar into the data directory
        #[arg(long)]
        download: bool,
    },
}
