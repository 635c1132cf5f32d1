mod commands;
mod config;
mod wallet;

use betgame_core::units::format_mist;
use betgame_core::BetGameError;
use clap::{Parser, Subcommand};
use commands::Session;
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "betgame")]
#[command(about = "Bet Game - read and bet on the Sui bet game contract")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/betgame/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Network to use (devnet, testnet, mainnet, localnet)
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Game object id
    #[arg(short, long, global = true)]
    game_id: Option<String>,

    /// Override the fullnode RPC URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current game state
    Show,
    /// Place a bet
    Bet {
        /// Bet amount in MIST (or SUI with --sui)
        amount: String,
        /// Choice between 1 and 10
        #[arg(allow_hyphen_values = true)]
        choice: i64,
        /// Amount is given in SUI instead of MIST
        #[arg(long)]
        sui: bool,
        /// Skip the signing confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Print the transaction without signing it
        #[arg(long)]
        dry_run: bool,
    },
    /// List known networks
    Networks,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "betgame={},betgame_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let mut config = CliConfig::load(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", config_path.display(), e))?;

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(game_id) = cli.game_id {
        config.game_id = game_id;
    }
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = Some(rpc_url);
    }

    let result = match Session::from_config(&config) {
        Ok(session) => match cli.command {
            Commands::Show => commands::show_game(&session).await,
            Commands::Bet {
                amount,
                choice,
                sui,
                yes,
                dry_run,
            } => commands::place_bet(&session, &amount, choice, sui, yes, dry_run).await,
            Commands::Networks => commands::list_networks(&session).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        match e {
            BetGameError::NoAccount => {
                eprintln!("Error: Please connect your wallet");
                eprintln!("Set an active address with 'sui client switch --address <addr>'");
            }
            BetGameError::Validation(reason) => {
                eprintln!("Error: Invalid bet: {}", reason);
                if let Ok(limits) = config.limits() {
                    eprintln!(
                        "Minimum bet is {} ({} MIST); choice must be {}-{}",
                        format_mist(limits.min_amount),
                        limits.min_amount,
                        limits.choices.start(),
                        limits.choices.end()
                    );
                }
            }
            BetGameError::GameNotFound { id } => {
                eprintln!("Error: Game object {} not found on {}", id, config.network);
                eprintln!("Use --network or --game-id to select another game");
            }
            BetGameError::SignatureDeclined => {
                eprintln!("Bet cancelled.");
            }
            BetGameError::ConfirmationUnknown { digest, reason } => {
                eprintln!("Warning: submission status unknown ({})", reason);
                eprintln!("Please verify transaction {} before betting again", digest);
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
