//! Bet game client core
//!
//! This library reads the shared state of the on-chain bet game and drives a
//! single wager at a time from validation through signing, finality and
//! state refresh. Wallets and fullnodes are reached through the traits in
//! [`chain`].

pub mod builder;
pub mod chain;
pub mod config;
pub mod controller;
pub mod error;
pub mod reader;
pub mod types;
pub mod units;
pub mod validator;

pub use builder::{build_place_bet, TransactionIntent};
pub use chain::{AccountProvider, ConfirmationWaiter, ObjectSource, SuiRpcClient, TransactionSigner};
pub use config::{Network, NetworkConfig};
pub use controller::{BetController, BetReceipt, DisplayState, Facilities, SubmissionStatus};
pub use error::{BetGameError, Result};
pub use reader::GameStateReader;
pub use types::{
    ExecutionStatus, GameState, MoveCallTarget, ObjectId, SubmissionReceipt, SuiAddress,
    TransactionDigest,
};
pub use validator::{BetLimits, BetRequest, ValidatedBet, ValidationError, MIN_BET_AMOUNT};

use std::sync::Arc;

/// Wires a controller for `game_id` whose reads and confirmations go to the
/// configured fullnode.
pub fn connect(
    config: &NetworkConfig,
    game_id: ObjectId,
    account: Arc<dyn AccountProvider>,
    signer: Arc<dyn TransactionSigner>,
) -> Result<BetController> {
    let rpc = Arc::new(SuiRpcClient::new(config)?);
    tracing::info!(
        "Connected to {} fullnode at {} for game {}",
        config.network,
        rpc.url(),
        game_id
    );

    Ok(BetController::new(
        game_id,
        config.call_target(),
        Facilities {
            objects: rpc.clone(),
            account,
            signer,
            confirmer: rpc,
        },
    ))
}
