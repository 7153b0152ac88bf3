//! rGeoAttend library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Employee(_) => commands::employee::handle(cli, cfg),
        Commands::Location(_) => commands::location::handle(cli, cfg),
        Commands::Checkin { .. } => commands::attendance::handle_checkin(cli, cfg),
        Commands::Checkout { .. } => commands::attendance::handle_checkout(cli, cfg),
        Commands::Status { .. } => commands::attendance::handle_status(cli, cfg),
        Commands::Sweep => commands::attendance::handle_sweep(cli, cfg),
        Commands::List { .. } => commands::list::handle(cli, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta (init crea il file, non deve fallire prima)
    let mut cfg = match &cli.command {
        Commands::Init => Config::default(),
        _ => Config::load()?,
    };

    // 3️⃣ applica eventuale override del DB da riga di comando
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg)
}
