//! Gamemint - casino mini-games over a persisted coin wallet
//!
//! A wallet with a daily reward streak and three engines (Mines, Limbo,
//! Blackjack) that wager against it. Engines draw from an injectable
//! `RandomSource` and receive the wallet by `&mut` for one call at a time.

pub mod cli;
pub mod config;
pub mod errors;
pub mod games;
pub mod metrics;
pub mod storage;
pub mod wallet;

pub use config::{ConfigLoader, GamemintConfig};
pub use errors::{GameError, GamemintError, GamemintResult, StorageError};
pub use games::{ActionOutcome, Casino, PlayerAction, PlayerInfo};
pub use storage::{open_storage, KeyValueStore, MemoryStorage, RocksStorage};
pub use wallet::{ClaimedReward, DailyRewardRecord, Wallet};
