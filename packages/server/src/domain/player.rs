//! Player identity and state value objects.

use std::{collections::BTreeMap, fmt, ops::Range};

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::ValueObjectError;

/// Snapshot of every connected player's state, ordered by player ID.
pub type PlayerSnapshot = BTreeMap<PlayerId, PlayerState>;

/// Server-assigned player identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyPlayerId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory for fresh player IDs.
pub struct PlayerIdFactory;

impl PlayerIdFactory {
    pub const PREFIX: &'static str = "player-";

    /// Generate a new ID of the form `player-<32 hex digits>` (UUID v4).
    pub fn generate() -> PlayerId {
        PlayerId(format!("{}{}", Self::PREFIX, Uuid::new_v4().simple()))
    }
}

/// Source of player IDs, injectable for testing.
pub trait PlayerIdGenerator: Send + Sync {
    fn next_id(&self) -> PlayerId;
}

/// Default generator backed by `PlayerIdFactory`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidPlayerIdGenerator;

impl PlayerIdGenerator for UuidPlayerIdGenerator {
    fn next_id(&self) -> PlayerId {
        PlayerIdFactory::generate()
    }
}

/// Rectangular region new players are spawned in.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnArea {
    x: Range<f64>,
    y: Range<f64>,
}

impl SpawnArea {
    pub fn new(x: Range<f64>, y: Range<f64>) -> Result<Self, ValueObjectError> {
        for range in [&x, &y] {
            // Sampling also needs a finite width, not just finite bounds
            let usable = range.start < range.end && (range.end - range.start).is_finite();
            if !usable {
                return Err(ValueObjectError::InvalidSpawnArea {
                    min: range.start,
                    max: range.end,
                });
            }
        }
        Ok(Self { x, y })
    }

    /// Same `[min, max)` range on both axes.
    pub fn square(min: f64, max: f64) -> Result<Self, ValueObjectError> {
        Self::new(min..max, min..max)
    }
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            x: 100.0..600.0,
            y: 100.0..600.0,
        }
    }
}

/// Last-known state of a player.
///
/// The shape is owned by the clients. The server only ever touches the
/// `bullets` field, and only when asked to by a `shoot` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerState(Value);

impl PlayerState {
    pub const BULLETS_FIELD: &'static str = "bullets";
    pub const INITIAL_HEALTH: u32 = 100;

    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Synthesize the initial state of a freshly connected player.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, area: &SpawnArea) -> Self {
        let x = rng.gen_range(area.x.clone());
        let y = rng.gen_range(area.y.clone());
        let color = format!("#{:06x}", rng.gen_range(0..=0x00ff_ffffu32));

        Self(json!({
            "x": x,
            "y": y,
            "angle": 0,
            "bullets": [],
            "color": color,
            "health": Self::INITIAL_HEALTH,
        }))
    }

    /// Replace the projectile list, leaving every other field untouched.
    ///
    /// Returns `false` when the state is not a JSON object.
    pub fn replace_bullets(&mut self, bullets: Value) -> bool {
        match self.0.as_object_mut() {
            Some(fields) => {
                fields.insert(Self::BULLETS_FIELD.to_string(), bullets);
                true
            }
            None => false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(name))
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for PlayerState {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
