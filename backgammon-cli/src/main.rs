//! Backgammon CLI - inspect identifiers and list legal plays
//!
//! Commands:
//! - decode: Show what a position ID / game ID describes
//! - plays: List every legal play for a roll
//! - batch: Generate plays for a file of game IDs

mod batch_cmd;
mod decode_cmd;
mod plays_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backgammon")]
#[command(about = "Backgammon position IDs, match IDs and legal plays")]
struct Cli {
    /// Seed for dice rolls (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a position ID or `position:match` game ID
    Decode(decode_cmd::DecodeArgs),
    /// List the legal plays of a roll
    Plays(plays_cmd::PlaysArgs),
    /// Generate plays for every game ID in a file
    Batch(batch_cmd::BatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean; RUST_LOG overrides the level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => decode_cmd::run(args),
        Commands::Plays(args) => plays_cmd::run(args, cli.seed),
        Commands::Batch(args) => batch_cmd::run(args, cli.seed),
    }
}
