use crate::controller::SubmissionStatus;
use crate::types::{ObjectId, TransactionDigest};
use crate::validator::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BetGameError>;

#[derive(Error, Debug)]
pub enum BetGameError {
    #[error("Invalid bet: {0}")]
    Validation(#[from] ValidationError),

    #[error("No wallet connected")]
    NoAccount,

    #[error("A bet is already in flight ({0})")]
    Busy(SubmissionStatus),

    #[error("Game object not found: {id}")]
    GameNotFound { id: ObjectId },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Signature declined by user")]
    SignatureDeclined,

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Submission status unknown, please verify transaction {digest}: {reason}")]
    ConfirmationUnknown {
        digest: TransactionDigest,
        reason: String,
    },

    #[error("Bet in transaction {digest} failed on chain: {error}")]
    ExecutionFailed {
        digest: TransactionDigest,
        error: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BetGameError {
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Errors raised before anything left the client.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NoAccount | Self::Busy(_) | Self::InvalidIdentifier(_)
        )
    }
}

impl From<reqwest::Error> for BetGameError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BetGameError::Decode(err.to_string())
        } else {
            BetGameError::Rpc(err.to_string())
        }
    }
}
