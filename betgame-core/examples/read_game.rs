use betgame_core::config::DEFAULT_GAME_ID;
use betgame_core::units::format_mist;
use betgame_core::{GameStateReader, Network, NetworkConfig, ObjectId, SuiRpcClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let network: Network = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "testnet".to_string())
        .parse()?;
    let config = NetworkConfig::new(network);
    let game_id: ObjectId = DEFAULT_GAME_ID.parse()?;

    println!("Reading game {} from {}", game_id.short(), config.rpc_url);

    let reader = GameStateReader::new(Arc::new(SuiRpcClient::new(&config)?));
    let state = reader.read(&game_id).await?;

    println!("Total bets: {}", format_mist(state.total_bets));
    println!("Carry over: {} MIST", state.carry_over);
    println!("Status: {}", state.status_label());
    println!("Version: {}", state.version);

    Ok(())
}
