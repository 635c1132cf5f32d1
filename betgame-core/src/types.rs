use crate::error::{BetGameError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ID_LEN: usize = 32;

/// Parses a `0x`-prefixed hex identifier, left-padding short forms such as `0x2`.
fn parse_hex32(s: &str) -> Result<[u8; ID_LEN]> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| BetGameError::InvalidIdentifier(format!("missing 0x prefix: {}", s)))?;

    if digits.is_empty() || digits.len() > ID_LEN * 2 {
        return Err(BetGameError::InvalidIdentifier(format!(
            "expected 1 to {} hex digits: {}",
            ID_LEN * 2,
            s
        )));
    }

    let padded = format!("{:0>width$}", digits, width = ID_LEN * 2);
    let mut out = [0u8; ID_LEN];
    hex::decode_to_slice(&padded, &mut out)
        .map_err(|e| BetGameError::InvalidIdentifier(format!("{}: {}", s, e)))?;
    Ok(out)
}

/// Address of an on-chain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId([u8; ID_LEN]);

impl ObjectId {
    pub fn new(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Abbreviated form for tables and log lines.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl FromStr for ObjectId {
    type Err = BetGameError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex32(s).map(Self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl TryFrom<String> for ObjectId {
    type Error = BetGameError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_string()
    }
}

/// Account address of a signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuiAddress([u8; ID_LEN]);

impl SuiAddress {
    pub fn new(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for SuiAddress {
    type Err = BetGameError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex32(s).map(Self)
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl TryFrom<String> for SuiAddress {
    type Error = BetGameError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SuiAddress> for String {
    fn from(addr: SuiAddress) -> Self {
        addr.to_string()
    }
}

/// Base58 digest identifying a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDigest(String);

impl TransactionDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TransactionDigest {
    type Err = BetGameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BetGameError::InvalidIdentifier(format!(
                "invalid transaction digest: '{}'",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified Move function: `<package>::<module>::<function>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCallTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl MoveCallTarget {
    pub fn new(package: ObjectId, module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            package,
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for MoveCallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

impl FromStr for MoveCallTarget {
    type Err = BetGameError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split("::").collect();
        match parts.as_slice() {
            [package, module, function] if !module.is_empty() && !function.is_empty() => {
                Ok(Self::new(package.parse()?, *module, *function))
            }
            _ => Err(BetGameError::InvalidIdentifier(format!(
                "expected <package>::<module>::<function>, got '{}'",
                s
            ))),
        }
    }
}

/// Ownership of an on-chain object as reported by the fullnode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectOwner {
    Shared { initial_shared_version: u64 },
    Address(SuiAddress),
    Object(ObjectId),
    Immutable,
}

impl fmt::Display for ObjectOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectOwner::Shared {
                initial_shared_version,
            } => write!(f, "Shared (since v{})", initial_shared_version),
            ObjectOwner::Address(addr) => write!(f, "Address {}", addr),
            ObjectOwner::Object(id) => write!(f, "Object {}", id),
            ObjectOwner::Immutable => f.write_str("Immutable"),
        }
    }
}

/// Snapshot of the game object at `fetched_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub total_bets: u64,
    pub carry_over: u64,
    pub active: bool,
    pub owner: Option<SuiAddress>,
    pub object_owner: Option<ObjectOwner>,
    pub version: u64,
    pub fetched_at: DateTime<Utc>,
}

impl GameState {
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Settled"
        }
    }
}

/// Returned by the signer once the network accepted the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub digest: TransactionDigest,
}

/// Execution result of a transaction once it is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Failure { error: String },
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_roundtrip() {
        let raw = "0xdd26212b40431a52ec4405f30813905fff326c4cb542e39b0411bbc9e7e1a9e1";
        let id: ObjectId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_object_id_short_form_is_padded() {
        let id: ObjectId = "0x2".parse().unwrap();
        assert_eq!(id.as_bytes()[31], 2);
        assert_eq!(
            id.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn test_object_id_rejects_garbage() {
        assert!("dd26".parse::<ObjectId>().is_err());
        assert!("0x".parse::<ObjectId>().is_err());
        assert!("0xzz".parse::<ObjectId>().is_err());
        assert!(format!("0x{}", "a".repeat(65)).parse::<ObjectId>().is_err());
    }

    #[test]
    fn test_object_id_serde_as_string() {
        let id: ObjectId = "0x2".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_move_call_target_parse() {
        let target: MoveCallTarget = "0x94ba::game::place_bet".parse().unwrap();
        assert_eq!(target.module, "game");
        assert_eq!(target.function, "place_bet");
        assert!(target.to_string().ends_with("::game::place_bet"));

        assert!("0x94ba::game".parse::<MoveCallTarget>().is_err());
        assert!("0x94ba::::place_bet".parse::<MoveCallTarget>().is_err());
    }

    #[test]
    fn test_transaction_digest_validation() {
        assert!("8Ej3mYb2xpQm".parse::<TransactionDigest>().is_ok());
        assert!("".parse::<TransactionDigest>().is_err());
        assert!("abc def".parse::<TransactionDigest>().is_err());
    }
}
