use crate::error::{BetGameError, Result};
use crate::types::{MoveCallTarget, ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Package that publishes the `game` module on every preset network.
pub const BET_GAME_PACKAGE_ID: &str =
    "0x94ba4b55545790295ba74bd4296a470ef0dfe6a49fcb29eef5eccb6b9cef661b";

/// Shared game object played by default.
pub const DEFAULT_GAME_ID: &str =
    "0xdd26212b40431a52ec4405f30813905fff326c4cb542e39b0411bbc9e7e1a9e1";

pub const GAME_MODULE: &str = "game";
pub const PLACE_BET_FUNCTION: &str = "place_bet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
    Localnet,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Devnet,
        Network::Testnet,
        Network::Mainnet,
        Network::Localnet,
    ];

    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Localnet => "http://127.0.0.1:9000",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = BetGameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            "localnet" | "local" => Ok(Network::Localnet),
            other => Err(BetGameError::config(format!(
                "Unknown network '{}'. Use devnet, testnet, mainnet or localnet",
                other
            ))),
        }
    }
}

/// How long and how often the RPC client polls for transaction finality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network: Network,
    pub rpc_url: String,
    pub package_id: ObjectId,
    pub module: String,
    pub function: String,
    pub confirmation: ConfirmationPolicy,
}

impl NetworkConfig {
    pub fn new(network: Network) -> Self {
        let package_id = BET_GAME_PACKAGE_ID
            .parse()
            .unwrap_or_else(|_| ObjectId::new([0u8; 32]));

        Self {
            network,
            rpc_url: network.fullnode_url().to_string(),
            package_id,
            module: GAME_MODULE.to_string(),
            function: PLACE_BET_FUNCTION.to_string(),
            confirmation: ConfirmationPolicy::default(),
        }
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_package_id(mut self, package_id: ObjectId) -> Self {
        self.package_id = package_id;
        self
    }

    pub fn call_target(&self) -> MoveCallTarget {
        MoveCallTarget::new(self.package_id, &self.module, &self.function)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.is_empty() {
            return Err(BetGameError::config("RPC URL cannot be empty"));
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(BetGameError::config(format!(
                "RPC URL must be http(s): {}",
                self.rpc_url
            )));
        }

        if self.module.is_empty() || self.function.is_empty() {
            return Err(BetGameError::config("Move call target is incomplete"));
        }

        if self.confirmation.poll_interval.is_zero() {
            return Err(BetGameError::config("Poll interval must be greater than 0"));
        }

        if self.confirmation.timeout < self.confirmation.poll_interval {
            return Err(BetGameError::config(
                "Confirmation timeout must not be shorter than the poll interval",
            ));
        }

        Ok(())
    }
}
