mod cli;
mod commands;
mod config;
mod constants;
mod detect;
mod engine;
mod jarfile;
mod jsonpath;
mod ledger;
mod plugin;
mod runtime;
mod sources;
mod type_cache;
mod ui;
mod version;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Init => commands::init::init().await?,
        Commands::Check { install } => commands::check::check(install).await?,
        Commands::Scan { api } => commands::scan::scan(api).await?,
        Commands::Verify => commands::verify::verify().await?,
        Commands::Status => commands::status::status().await?,
        Commands::Detect { name } => commands::detect::detect(name).await?,
        Commands::Add {
            name,
            kind,
            id,
            host,
        } => commands::add::add(name, kind, id, host).await?,
        Commands::Remove { name } => commands::remove::remove(name)?,
        Commands::Server { download } => commands::server::server(download).await?,
    };

    std::process::exit(exit_code);
}
