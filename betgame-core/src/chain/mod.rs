//! Seams between the bet controller and the outside world.
//!
//! The controller never talks to a wallet or a fullnode directly; it goes
//! through these traits. [`SuiRpcClient`] implements the read and
//! confirmation side; signing is left to whoever owns the keys.

pub mod rpc;

pub use rpc::{ObjectData, ObjectResponse, ObjectResponseError, SuiRpcClient};

use crate::builder::TransactionIntent;
use crate::error::Result;
use crate::types::{ExecutionStatus, ObjectId, SubmissionReceipt, SuiAddress, TransactionDigest};
use async_trait::async_trait;

/// Raw object reads against a fullnode.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    async fn get_object(&self, id: &ObjectId) -> Result<ObjectResponse>;
}

/// The connected wallet, if any.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn current_account(&self) -> Option<SuiAddress>;
}

/// Signs a transaction intent and hands it to the network.
///
/// Implementations return [`crate::BetGameError::SignatureDeclined`] when the
/// user refuses and [`crate::BetGameError::Submission`] for any other failure
/// (including a failed dry run).
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_execute(&self, intent: &TransactionIntent) -> Result<SubmissionReceipt>;
}

/// Resolves once the network reports the transaction as final.
///
/// Timeouts are the implementation's business.
#[async_trait]
pub trait ConfirmationWaiter: Send + Sync {
    async fn wait_for_transaction(&self, digest: &TransactionDigest) -> Result<ExecutionStatus>;
}
