//! compound-assist library root.
//! Exposes the CLI parser, the high-level run() function and the domain
//! modules (store, files, core) for direct use.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod files;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Dashboard => cli::commands::dashboard::handle(&cli.command, cfg),
        Commands::Profile { .. } => cli::commands::profile::handle(&cli.command, cfg),
        Commands::Contacts { .. } => cli::commands::contacts::handle(&cli.command, cfg),
        Commands::Visitors { .. } => cli::commands::visitors::handle(&cli.command, cfg),
        Commands::Saved { .. } => cli::commands::saved::handle(&cli.command, cfg),
        Commands::Remind { .. } => cli::commands::remind::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Configuration is read once per run.
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
