//! Error types for the gamemint wallet and game engines
//!
//! Domain errors (`GameError`) are recoverable and meant to be shown to the
//! player as a status line. Configuration and storage failures bubble up
//! through the root `GamemintError`.

use thiserror::Error;

/// Root error type for all gamemint operations
#[derive(Debug, Error)]
pub enum GamemintError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Storage system errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Wallet and game rule errors
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Missing required field: {0}")]
    MissingRequired(String),
    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),
    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Storage system errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Database open failed: {0}")]
    DatabaseOpenFailed(String),
    #[error("Read failed: {0}")]
    ReadFailed(String),
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Corrupted data under key {key}: {reason}")]
    CorruptedData { key: String, reason: String },
}

/// Wallet and round errors surfaced to the player
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Zero wager, or a Limbo target below the minimum.
    #[error("Invalid wager: {0}")]
    InvalidWager(String),

    #[error("Mine count must be between 1 and 5, got {0}")]
    InvalidMineCount(u8),

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Can only split a single hand of two identical ranks")]
    CannotSplit,

    #[error("Daily reward already claimed today")]
    AlreadyClaimed,

    /// Action requested outside its valid round state.
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Deck is exhausted")]
    DeckExhausted,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GameError {
    pub fn illegal(msg: impl Into<String>) -> Self {
        GameError::IllegalAction(msg.into())
    }
}

// External error conversions
impl From<rocksdb::Error> for StorageError {
    fn from(e: rocksdb::Error) -> Self {
        StorageError::WriteFailed(e.to_string())
    }
}

impl From<rocksdb::Error> for GamemintError {
    fn from(e: rocksdb::Error) -> Self {
        GamemintError::Storage(e.into())
    }
}

impl From<std::io::Error> for GamemintError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => {
                GamemintError::Configuration(ConfigurationError::LoadFailed(e.to_string()))
            }
            _ => GamemintError::Storage(StorageError::ReadFailed(e.to_string())),
        }
    }
}

impl From<serde_json::Error> for GamemintError {
    fn from(e: serde_json::Error) -> Self {
        GamemintError::Storage(StorageError::CorruptedData {
            key: "<json>".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Convenience type alias for Results
pub type GamemintResult<T> = Result<T, GamemintError>;
