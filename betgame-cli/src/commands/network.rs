use super::Session;
use betgame_core::config::DEFAULT_GAME_ID;
use betgame_core::{Network, NetworkConfig, Result};
use comfy_table::{presets::UTF8_FULL, Table};

pub async fn list_networks(session: &Session) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Network", "RPC URL", "Call target"]);

    for network in Network::ALL {
        let (marker, config) = if network == session.network.network {
            ("*", session.network.clone())
        } else {
            ("", NetworkConfig::new(network))
        };

        table.add_row(vec![
            marker.to_string(),
            network.to_string(),
            config.rpc_url.clone(),
            config.call_target().to_string(),
        ]);
    }

    println!("{}", table);
    println!("Game object: {}", session.game_id);
    if session.game_id.to_string() != DEFAULT_GAME_ID {
        println!("  (default: {})", DEFAULT_GAME_ID);
    }

    Ok(())
}
