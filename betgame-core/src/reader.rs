use crate::chain::{ObjectData, ObjectResponse, ObjectSource};
use crate::chain::rpc::u64_from_json;
use crate::error::{BetGameError, Result};
use crate::types::{GameState, ObjectId, ObjectOwner, SuiAddress};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Move fields of the `game::Game` object.
#[derive(Debug, Deserialize)]
struct GameFields {
    active: bool,
    #[serde(deserialize_with = "u64_from_json")]
    total_bets: u64,
    #[serde(deserialize_with = "u64_from_json")]
    carry_over: u64,
    #[serde(default)]
    owner: Option<SuiAddress>,
}

pub struct GameStateReader {
    source: Arc<dyn ObjectSource>,
}

impl GameStateReader {
    pub fn new(source: Arc<dyn ObjectSource>) -> Self {
        Self { source }
    }

    pub async fn read(&self, id: &ObjectId) -> Result<GameState> {
        let response = self.source.get_object(id).await?;
        let state = decode_game(id, response)?;

        tracing::debug!(
            "Read game {} v{}: total_bets={} carry_over={} active={}",
            id,
            state.version,
            state.total_bets,
            state.carry_over,
            state.active
        );
        Ok(state)
    }
}

fn decode_game(id: &ObjectId, response: ObjectResponse) -> Result<GameState> {
    let data = match (response.data, response.error) {
        (Some(data), _) => data,
        (None, Some(err)) if err.code == "notExists" || err.code == "deleted" => {
            return Err(BetGameError::GameNotFound { id: *id });
        }
        (None, Some(err)) => {
            return Err(BetGameError::rpc(format!(
                "Object {} unavailable: {}",
                id, err.code
            )));
        }
        (None, None) => return Err(BetGameError::GameNotFound { id: *id }),
    };

    let fields = game_fields(&data)?;
    let object_owner = data.owner.as_ref().map(decode_owner).transpose()?;

    Ok(GameState {
        total_bets: fields.total_bets,
        carry_over: fields.carry_over,
        active: fields.active,
        owner: fields.owner,
        object_owner,
        version: data.version,
        fetched_at: Utc::now(),
    })
}

fn game_fields(data: &ObjectData) -> Result<GameFields> {
    let content = data
        .content
        .as_ref()
        .ok_or_else(|| BetGameError::decode(format!("Object {} has no content", data.object_id)))?;

    let data_type = content.get("dataType").and_then(Value::as_str);
    if data_type != Some("moveObject") {
        return Err(BetGameError::decode(format!(
            "Object {} is not a Move object (dataType: {})",
            data.object_id,
            data_type.unwrap_or("missing")
        )));
    }

    let fields = content
        .get("fields")
        .cloned()
        .ok_or_else(|| BetGameError::decode(format!("Object {} has no fields", data.object_id)))?;

    serde_json::from_value(fields).map_err(|e| {
        BetGameError::decode(format!(
            "Object {} is not a bet game: {}",
            data.object_id, e
        ))
    })
}

fn decode_owner(owner: &Value) -> Result<ObjectOwner> {
    if owner.as_str() == Some("Immutable") {
        return Ok(ObjectOwner::Immutable);
    }

    if let Some(shared) = owner.get("Shared") {
        let version = shared
            .get("initial_shared_version")
            .cloned()
            .ok_or_else(|| BetGameError::decode("Shared owner without initial_shared_version"))?;
        let initial_shared_version = u64_from_json(version)
            .map_err(|e| BetGameError::decode(format!("Bad initial_shared_version: {}", e)))?;
        return Ok(ObjectOwner::Shared {
            initial_shared_version,
        });
    }

    if let Some(addr) = owner.get("AddressOwner").and_then(Value::as_str) {
        return Ok(ObjectOwner::Address(addr.parse()?));
    }

    if let Some(parent) = owner.get("ObjectOwner").and_then(Value::as_str) {
        return Ok(ObjectOwner::Object(parent.parse()?));
    }

    Err(BetGameError::decode(format!("Unknown owner kind: {}", owner)))
}
