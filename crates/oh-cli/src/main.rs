//! CLI frontend for the OH card oracle.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use oh_core::DrawMode;

#[derive(Parser)]
#[command(
    name = "oh",
    about = "OH card oracle: draw an insight card from the classic deck or an AI provider",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a single card
    Draw {
        /// Draw mode: classic or ai
        #[arg(short, long, default_value = "classic")]
        mode: DrawMode,

        /// RNG seed for reproducible classic draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the card as JSON
        #[arg(long)]
        json: bool,

        /// Skip the pause before a classic card is revealed
        #[arg(long)]
        no_delay: bool,

        /// Custom deck file (JSON)
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// Start an interactive drawing session
    Session {
        /// Initial draw mode: classic or ai
        #[arg(short, long, default_value = "classic")]
        mode: DrawMode,

        /// RNG seed for reproducible classic draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the pause before a classic card is revealed
        #[arg(long)]
        no_delay: bool,

        /// Custom deck file (JSON)
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// List the cards of the classic deck
    Deck {
        /// Custom deck file (JSON)
        #[arg(long)]
        deck: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Draw {
            mode,
            seed,
            json,
            no_delay,
            deck,
        } => {
            let opts = commands::DrawOptions::new(seed, no_delay, deck);
            commands::draw::run(&opts, mode, json).await
        }
        Commands::Session {
            mode,
            seed,
            no_delay,
            deck,
        } => {
            let opts = commands::DrawOptions::new(seed, no_delay, deck);
            commands::session::run(&opts, mode).await
        }
        Commands::Deck { deck } => commands::deck::run(deck.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
