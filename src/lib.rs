pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::DbConn;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    with_connection(|conn| database::setup::init_database(conn))
}

pub fn handle_sync() -> Result<()> {
    with_connection(services::reconciler::sync_player_stats)
}

pub fn handle_rankings() -> Result<()> {
    with_connection(services::reconciler::recalculate_rankings)
}

pub fn handle_reset() -> Result<()> {
    let config = AppConfig::new();
    with_connection(|conn| services::reconciler::reset_all_players(conn, &config.rating))
}

pub fn handle_new_season() -> Result<()> {
    let config = AppConfig::new();
    with_connection(|conn| services::reconciler::start_new_season(conn, &config.rating))
}

fn with_connection<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut DbConn) -> Result<()>,
{
    let pool = database::create_pool(&database::database_path())?;
    let mut conn = database::get_connection(&pool)?;
    f(&mut conn)
}
