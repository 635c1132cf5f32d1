use super::{ConfirmationWaiter, ObjectSource};
use crate::config::{ConfirmationPolicy, NetworkConfig};
use crate::error::{BetGameError, Result};
use crate::types::{ExecutionStatus, ObjectId, TransactionDigest};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{sleep, timeout, Instant};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Sui JSON renders `u64` as a decimal string; older nodes used numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Num(u64),
    Str(String),
}

pub(crate) fn u64_from_json<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match U64Repr::deserialize(deserializer)? {
        U64Repr::Num(n) => Ok(n),
        U64Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Result of `sui_getObject`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<ObjectResponseError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectData {
    #[serde(rename = "objectId")]
    pub object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_json")]
    pub version: u64,
    pub digest: String,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectResponseError {
    pub code: String,
    #[serde(default)]
    pub object_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionBlockResponse {
    digest: String,
    effects: Option<TransactionEffects>,
}

#[derive(Debug, Deserialize)]
struct TransactionEffects {
    status: EffectsStatus,
}

#[derive(Debug, Deserialize)]
struct EffectsStatus {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

impl From<EffectsStatus> for ExecutionStatus {
    fn from(status: EffectsStatus) -> Self {
        if status.status == "success" {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failure {
                error: status.error.unwrap_or(status.status),
            }
        }
    }
}

/// JSON-RPC client for a Sui fullnode.
pub struct SuiRpcClient {
    http: reqwest::Client,
    url: String,
    policy: ConfirmationPolicy,
    next_id: AtomicU64,
}

impl SuiRpcClient {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("betgame/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BetGameError::rpc(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.rpc_url.clone(),
            policy: config.confirmation.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        tracing::debug!("RPC {} -> {}", method, self.url);

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: RpcResponse<T> = response.json().await?;

        if let Some(err) = body.error {
            return Err(BetGameError::rpc(format!(
                "{} failed ({}): {}",
                method, err.code, err.message
            )));
        }

        body.result
            .ok_or_else(|| BetGameError::rpc(format!("{} returned no result", method)))
    }

    async fn get_transaction_block(&self, digest: &TransactionDigest) -> Result<ExecutionStatus> {
        let response: TransactionBlockResponse = self
            .call(
                "sui_getTransactionBlock",
                json!([digest.as_str(), { "showEffects": true }]),
            )
            .await?;

        let effects = response.effects.ok_or_else(|| {
            BetGameError::decode(format!("transaction {} has no effects", response.digest))
        })?;

        Ok(effects.status.into())
    }
}

#[async_trait]
impl ObjectSource for SuiRpcClient {
    async fn get_object(&self, id: &ObjectId) -> Result<ObjectResponse> {
        self.call(
            "sui_getObject",
            json!([
                id.to_string(),
                { "showContent": true, "showOwner": true, "showType": true }
            ]),
        )
        .await
    }
}

#[async_trait]
impl ConfirmationWaiter for SuiRpcClient {
    async fn wait_for_transaction(&self, digest: &TransactionDigest) -> Result<ExecutionStatus> {
        poll_for_finality(&self.policy, digest, || self.get_transaction_block(digest)).await
    }
}

/// Calls `fetch` every `poll_interval` until it succeeds or `timeout` elapses.
/// Lookup errors count as "not yet indexed".
async fn poll_for_finality<F, Fut>(
    policy: &ConfirmationPolicy,
    digest: &TransactionDigest,
    mut fetch: F,
) -> Result<ExecutionStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ExecutionStatus>>,
{
    let started = Instant::now();
    let mut last_error: Option<String> = None;

    let poll = async {
        loop {
            match fetch().await {
                Ok(status) => return status,
                Err(e) => {
                    tracing::debug!("Transaction {} not available yet: {}", digest, e);
                    last_error = Some(e.to_string());
                }
            }
            sleep(policy.poll_interval).await;
        }
    };

    let outcome = timeout(policy.timeout, poll).await;
    match outcome {
        Ok(status) => {
            tracing::debug!(
                "Transaction {} final after {:?}",
                digest,
                started.elapsed()
            );
            Ok(status)
        }
        Err(_) => Err(BetGameError::rpc(format!(
            "Timed out after {:?} waiting for transaction {}{}",
            policy.timeout,
            digest,
            last_error
                .map(|e| format!(" (last error: {})", e))
                .unwrap_or_default()
        ))),
    }
}
