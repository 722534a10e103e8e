use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored player and their counting stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Opaque primary key (UUID v4 for records created through the API)
    pub id: String,
    pub name: String,
    /// Category label, e.g. "basketball"
    pub sport: String,
    pub matches: u32,
    pub score: u32,
    pub assists: u32,
    pub rebounds: u32,
    /// Not bounded by `matches`; the store accepts `wins > matches`
    pub wins: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for recording a new player. Counters default to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub sport: String,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub rebounds: u32,
    #[serde(default)]
    pub wins: u32,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, sport: impl Into<String>) -> Self {
        NewPlayer {
            name: name.into(),
            sport: sport.into(),
            ..Default::default()
        }
    }

    /// Presence check on the two label fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if self.sport.trim().is_empty() {
            return Err("sport must not be empty".into());
        }
        Ok(())
    }
}

/// Named optional overrides for an existing player.
///
/// Only the fields that are `Some` change; everything else keeps the stored
/// value. See [`PlayerUpdate::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub matches: Option<u32>,
    pub score: Option<u32>,
    pub assists: Option<u32>,
    pub rebounds: Option<u32>,
    pub wins: Option<u32>,
}

impl PlayerUpdate {
    pub fn is_empty(&self) -> bool {
        *self == PlayerUpdate::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.name, Some(n) if n.trim().is_empty()) {
            return Err("name must not be empty".into());
        }
        if matches!(&self.sport, Some(s) if s.trim().is_empty()) {
            return Err("sport must not be empty".into());
        }
        Ok(())
    }

    /// Produce the updated record. Timestamps are left to the store.
    pub fn apply(&self, player: &Player) -> Player {
        Player {
            name: self.name.clone().unwrap_or_else(|| player.name.clone()),
            sport: self.sport.clone().unwrap_or_else(|| player.sport.clone()),
            matches: self.matches.unwrap_or(player.matches),
            score: self.score.unwrap_or(player.score),
            assists: self.assists.unwrap_or(player.assists),
            rebounds: self.rebounds.unwrap_or(player.rebounds),
            wins: self.wins.unwrap_or(player.wins),
            ..player.clone()
        }
    }
}
