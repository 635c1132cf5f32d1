pub mod game;
pub mod network;

pub use game::{place_bet, show_game};
pub use network::list_networks;

use crate::config::CliConfig;
use crate::wallet::SuiCliWallet;
use betgame_core::{BetController, BetLimits, NetworkConfig, ObjectId, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Settings resolved from the config file and command-line overrides.
pub struct Session {
    pub network: NetworkConfig,
    pub game_id: ObjectId,
    pub limits: BetLimits,
    sui_binary: PathBuf,
    gas_budget: Option<u64>,
}

impl Session {
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        Ok(Self {
            network: config.network_config()?,
            game_id: config.game_id()?,
            limits: config.limits()?,
            sui_binary: config.sui_binary.clone(),
            gas_budget: config.gas_budget,
        })
    }

    pub fn controller(&self, assume_yes: bool) -> Result<BetController> {
        let wallet = Arc::new(
            SuiCliWallet::new(self.sui_binary.clone(), self.gas_budget).assume_yes(assume_yes),
        );

        let controller = betgame_core::connect(&self.network, self.game_id, wallet.clone(), wallet)?
            .with_limits(self.limits.clone());
        Ok(controller)
    }
}
