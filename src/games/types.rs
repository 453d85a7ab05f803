use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Mines,
    Limbo,
    Blackjack,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::Mines, GameType::Limbo, GameType::Blackjack];
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Mines => write!(f, "mines"),
            GameType::Limbo => write!(f, "limbo"),
            GameType::Blackjack => write!(f, "blackjack"),
        }
    }
}

/// Result of one settled wager (or one blackjack hand)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
    Push,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win => write!(f, "win"),
            GameOutcome::Loss => write!(f, "loss"),
            GameOutcome::Push => write!(f, "push"),
        }
    }
}

/// Player identity handed over by the session provider. Opaque to the engines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerInfo {
    pub player_id: String,
}

impl PlayerInfo {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
        }
    }
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self::new("guest")
    }
}
