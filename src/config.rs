//! Configuration management with validation and defaults
//!
//! Values come from (in order) built-in defaults, an optional TOML file and
//! `GAMEMINT_*` environment variables. The result is validated before use.

use crate::errors::{ConfigurationError, GamemintResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GamemintConfig {
    pub wallet: WalletConfig,
    pub storage: StorageConfig,
    pub games: GamesConfig,
    pub logging: LoggingConfig,
}

/// Wallet defaults and persisted key names
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub starting_balance: u64,
    /// Coins per streak day; a claim pays `reward_base * streak`.
    pub reward_base: u64,
    pub max_streak: u32,
    pub balance_key: String,
    pub reward_key: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            reward_base: 500,
            max_streak: 7,
            balance_key: "gm_wallet".to_string(),
            reward_key: "gm_daily_reward".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    RocksDb,
    Memory,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Snappy,
    Lz4,
    Zstd,
}

/// Storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_directory: String,
    /// fsync every write before returning
    pub sync_writes: bool,
    pub compression_type: CompressionType,
    /// Whether to clear the database on startup (testing only!)
    pub clear_on_start: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::RocksDb,
            data_directory: "./DB/gamemint_data".to_string(),
            sync_writes: true,
            compression_type: CompressionType::Lz4,
            clear_on_start: false,
        }
    }
}

/// Game engine tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    /// Fixed RNG seed; `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub limbo_max_multiplier: f64,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            seed: None,
            limbo_max_multiplier: 10.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

impl GamemintConfig {
    /// In-memory storage with a fixed seed, for tests and demos
    pub fn ephemeral(seed: u64) -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                ..Default::default()
            },
            games: GamesConfig {
                seed: Some(seed),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> GamemintResult<GamemintConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            GamemintConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> GamemintResult<GamemintConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into()
        })
    }

    fn apply_env_overrides(&self, config: &mut GamemintConfig) -> GamemintResult<()> {
        if let Ok(data_dir) = env::var("GAMEMINT_DATA_DIR") {
            config.storage.data_directory = data_dir;
        }

        if let Ok(backend) = env::var("GAMEMINT_STORAGE_BACKEND") {
            config.storage.backend = match backend.to_ascii_lowercase().as_str() {
                "rocksdb" => StorageBackend::RocksDb,
                "memory" => StorageBackend::Memory,
                _ => {
                    return Err(ConfigurationError::InvalidValue {
                        field: "GAMEMINT_STORAGE_BACKEND".to_string(),
                        value: backend,
                        reason: "Expected 'rocksdb' or 'memory'".to_string(),
                    }
                    .into())
                }
            };
        }

        if let Ok(balance) = env::var("GAMEMINT_STARTING_BALANCE") {
            config.wallet.starting_balance =
                balance.parse().map_err(|_| ConfigurationError::InvalidValue {
                    field: "GAMEMINT_STARTING_BALANCE".to_string(),
                    value: balance,
                    reason: "Invalid coin amount".to_string(),
                })?;
        }

        if let Ok(seed) = env::var("GAMEMINT_SEED") {
            config.games.seed = Some(seed.parse().map_err(|_| ConfigurationError::InvalidValue {
                field: "GAMEMINT_SEED".to_string(),
                value: seed,
                reason: "Invalid u64 seed".to_string(),
            })?);
        }

        if let Ok(level) = env::var("GAMEMINT_LOG_LEVEL") {
            config.logging.log_level =
                level.parse().map_err(|_| ConfigurationError::InvalidValue {
                    field: "GAMEMINT_LOG_LEVEL".to_string(),
                    value: level,
                    reason: "Expected error|warn|info|debug|trace".to_string(),
                })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self, config: &GamemintConfig) -> GamemintResult<()> {
        if config.wallet.max_streak == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "wallet.max_streak".to_string(),
                value: "0".to_string(),
                reason: "Streak cap must be at least 1".to_string(),
            }
            .into());
        }

        if config.wallet.balance_key.is_empty() {
            return Err(ConfigurationError::MissingRequired("wallet.balance_key".to_string()).into());
        }

        if config.wallet.reward_key.is_empty() || config.wallet.reward_key == config.wallet.balance_key {
            return Err(ConfigurationError::InvalidValue {
                field: "wallet.reward_key".to_string(),
                value: config.wallet.reward_key.clone(),
                reason: "Must be non-empty and differ from the balance key".to_string(),
            }
            .into());
        }

        if config.storage.backend == StorageBackend::RocksDb && config.storage.data_directory.is_empty() {
            return Err(ConfigurationError::MissingRequired("storage.data_directory".to_string()).into());
        }

        let max = config.games.limbo_max_multiplier;
        if !max.is_finite() || max <= crate::games::limbo::MIN_MULTIPLIER {
            return Err(ConfigurationError::InvalidValue {
                field: "games.limbo_max_multiplier".to_string(),
                value: max.to_string(),
                reason: "Must be a finite value above 1.01".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, config: &GamemintConfig, path: &str) -> GamemintResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into()
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating configurations
pub struct ConfigBuilder {
    config: GamemintConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GamemintConfig::default(),
        }
    }

    pub fn wallet(mut self, wallet: WalletConfig) -> Self {
        self.config.wallet = wallet;
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.config.storage = storage;
        self
    }

    pub fn games(mut self, games: GamesConfig) -> Self {
        self.config.games = games;
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    pub fn build(self) -> GamemintConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> GamemintResult<()> {
    ConfigLoader::new().save(&GamemintConfig::default(), path)
}
