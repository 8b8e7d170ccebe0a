//! HTTP API response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /debug/players`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersDebugDto {
    pub count: usize,
    pub players: BTreeMap<String, Value>,
}
