use anyhow::Result;

use locals_leaderboard::cli::Command;
use locals_leaderboard::{
    handle_init, handle_new_season, handle_rankings, handle_reset, handle_serve, handle_sync,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Sync => handle_sync(),
        Command::Rankings => handle_rankings(),
        Command::Reset => handle_reset(),
        Command::NewSeason => handle_new_season(),
    }
}
