use betgame_core::config::DEFAULT_GAME_ID;
use betgame_core::validator::{MAX_CHOICE, MIN_CHOICE};
use betgame_core::{BetGameError, BetLimits, Network, NetworkConfig, ObjectId, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub network: String,
    pub game_id: String,
    pub rpc_url: Option<String>,
    pub package_id: Option<String>,
    pub sui_binary: PathBuf,
    pub gas_budget: Option<u64>,
    pub min_bet_amount: Option<u64>,
    pub max_choice: Option<u8>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: "testnet".to_string(),
            game_id: DEFAULT_GAME_ID.to_string(),
            rpc_url: None,
            package_id: None,
            sui_binary: PathBuf::from("sui"),
            gas_budget: None,
            min_bet_amount: None,
            max_choice: None,
        }
    }
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("betgame")
            .join("config.json")
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn network_config(&self) -> Result<NetworkConfig> {
        let network: Network = self.network.parse()?;
        let mut config = NetworkConfig::new(network);

        if let Some(url) = &self.rpc_url {
            config = config.with_rpc_url(url.clone());
        }
        if let Some(package) = &self.package_id {
            config = config.with_package_id(package.parse()?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn game_id(&self) -> Result<ObjectId> {
        self.game_id
            .parse()
            .map_err(|e| BetGameError::config(format!("Invalid game id: {}", e)))
    }

    pub fn limits(&self) -> Result<BetLimits> {
        let defaults = BetLimits::default();
        let max_choice = self.max_choice.unwrap_or(MAX_CHOICE);
        if max_choice < MIN_CHOICE {
            return Err(BetGameError::config(format!(
                "max_choice must be at least {}",
                MIN_CHOICE
            )));
        }

        Ok(BetLimits {
            min_amount: self.min_bet_amount.unwrap_or(defaults.min_amount),
            choices: MIN_CHOICE..=max_choice,
        })
    }
}
