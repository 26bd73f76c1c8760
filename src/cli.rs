use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "locals-leaderboard backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema
    Init,
    /// Recompute every player's derived stats from the match history
    Sync,
    /// Reassign ranks from current ratings
    Rankings,
    /// Reset all players to the starting rating, saving season carryover
    Reset,
    /// Start a new season (same reset-with-carryover routine)
    NewSeason,
}
