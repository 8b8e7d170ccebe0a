//! WebSocket message DTOs.
//!
//! Every frame is a JSON text message whose `type` field names its kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message kinds exchanged over the WebSocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    AssignId,
    Update,
    Shoot,
    PlayersUpdate,
    PlayerDisconnected,
}

/// Sent only to a newly connected client: its identity and spawn state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignIdMessage {
    pub r#type: MessageType,
    pub player_id: String,
    pub player_data: Value,
}

/// Full-sync snapshot of every connected player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersUpdateMessage {
    pub r#type: MessageType,
    pub players: BTreeMap<String, Value>,
}

/// Sent to the remaining clients when a player leaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDisconnectedMessage {
    pub r#type: MessageType,
    pub player_id: String,
}

/// Client-to-server message, as far as the server cares about it.
///
/// Only the fields that mutate the store are read. The `playerId` a client
/// puts in its payload is ignored: the connection decides whose state changes.
/// Anything that is valid JSON but not an `update` or `shoot` becomes `Other`
/// and is relayed untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "update")]
    Update {
        #[serde(rename = "playerData", default)]
        player_data: Value,
    },
    #[serde(rename = "shoot")]
    Shoot {
        #[serde(default)]
        bullets: Value,
    },
    #[serde(other)]
    Other,
}

impl InboundMessage {
    /// Parse a raw text frame.
    ///
    /// Fails only if the text is not JSON at all.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::deserialize(&value).unwrap_or(Self::Other))
    }
}
