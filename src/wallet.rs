//! Coin wallet with a daily reward streak
//!
//! The wallet is the only state shared between games. It is loaded once from
//! a `KeyValueStore` and every mutation writes the full record back before
//! the in-memory value changes, so a failed write never leaves the ledger
//! half-updated.

use crate::config::WalletConfig;
use crate::errors::{GameError, StorageError};
use crate::storage::KeyValueStore;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format produced by a browser's `Date.toDateString()`, e.g. `Mon Oct 19 2026`.
const CLAIM_DATE_FORMAT: &str = "%a %b %d %Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily reward streak record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DailyRewardRecord {
    pub last_claim: Option<NaiveDate>,
    /// 0 until the first claim, then 1..=max_streak.
    pub streak: u32,
}

/// Result of a successful claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClaimedReward {
    pub reward: u64,
    pub streak: u32,
}

/// On-disk shape of the reward record.
#[derive(Debug, Serialize, Deserialize)]
struct StoredReward {
    #[serde(rename = "lastClaim")]
    last_claim: Option<String>,
    streak: u32,
}

impl DailyRewardRecord {
    fn to_stored(self) -> StoredReward {
        StoredReward {
            last_claim: self
                .last_claim
                .map(|d| d.format(CLAIM_DATE_FORMAT).to_string()),
            streak: self.streak,
        }
    }

    fn from_stored(stored: StoredReward) -> Option<Self> {
        let last_claim = match stored.last_claim {
            Some(s) => Some(parse_claim_date(&s)?),
            None => None,
        };
        Some(Self {
            last_claim,
            streak: stored.streak,
        })
    }
}

fn parse_claim_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, CLAIM_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, ISO_DATE_FORMAT))
        .ok()
}

/// Persisted coin balance and reward streak
pub struct Wallet<S: KeyValueStore> {
    store: S,
    config: WalletConfig,
    balance: u64,
    daily: DailyRewardRecord,
}

impl<S: KeyValueStore> Wallet<S> {
    /// Load the wallet, falling back to defaults for missing or unreadable keys.
    pub fn load(store: S, config: &WalletConfig) -> Result<Self, StorageError> {
        let balance = match store.get(&config.balance_key)? {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(balance) => balance,
                Err(_) => {
                    tracing::warn!(key = %config.balance_key, value = %raw, "unreadable balance, using starting balance");
                    config.starting_balance
                }
            },
            None => config.starting_balance,
        };

        let daily = match store.get(&config.reward_key)? {
            Some(raw) => serde_json::from_str::<StoredReward>(&raw)
                .ok()
                .and_then(DailyRewardRecord::from_stored)
                .unwrap_or_else(|| {
                    tracing::warn!(key = %config.reward_key, value = %raw, "unreadable reward record, resetting");
                    DailyRewardRecord::default()
                }),
            None => DailyRewardRecord::default(),
        };

        tracing::debug!(balance, streak = daily.streak, "wallet loaded");
        Ok(Self {
            store,
            config: config.clone(),
            balance,
            daily,
        })
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn daily_reward(&self) -> DailyRewardRecord {
        self.daily
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        amount <= self.balance
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add coins. Returns the new balance.
    pub fn credit(&mut self, amount: u64) -> Result<u64, GameError> {
        let next = self.balance.saturating_add(amount);
        self.write_balance(next)?;
        self.balance = next;
        tracing::debug!(amount, balance = next, "credit");
        Ok(next)
    }

    /// Remove coins; rejected without side effects when the balance is short.
    pub fn debit(&mut self, amount: u64) -> Result<u64, GameError> {
        if amount > self.balance {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        let next = self.balance - amount;
        self.write_balance(next)?;
        self.balance = next;
        tracing::debug!(amount, balance = next, "debit");
        Ok(next)
    }

    /// Claim today's reward using the local calendar day.
    pub fn claim_daily_reward(&mut self) -> Result<ClaimedReward, GameError> {
        self.claim_daily_reward_on(Local::now().date_naive())
    }

    pub fn claim_daily_reward_on(&mut self, today: NaiveDate) -> Result<ClaimedReward, GameError> {
        if self.daily.last_claim == Some(today) {
            return Err(GameError::AlreadyClaimed);
        }

        let yesterday = today.pred_opt();
        let mut streak = if self.daily.last_claim.is_some() && self.daily.last_claim == yesterday {
            self.daily.streak.saturating_add(1)
        } else {
            1
        };
        if streak > self.config.max_streak {
            streak = 1;
        }

        let reward = self.config.reward_base.saturating_mul(u64::from(streak));
        let record = DailyRewardRecord {
            last_claim: Some(today),
            streak,
        };
        let next_balance = self.balance.saturating_add(reward);

        self.write_balance(next_balance)?;
        if let Err(e) = self.write_reward(record) {
            // Keep the two keys consistent: undo the credit we just stored.
            if let Err(rollback) = self.write_balance(self.balance) {
                tracing::error!(
                    key = %self.config.balance_key,
                    stored = next_balance,
                    intended = self.balance,
                    error = %rollback,
                    "failed to roll back daily reward credit"
                );
            }
            return Err(e);
        }

        self.balance = next_balance;
        self.daily = record;
        tracing::info!(reward, streak, balance = next_balance, "daily reward claimed");
        Ok(ClaimedReward { reward, streak })
    }

    fn write_balance(&self, balance: u64) -> Result<(), GameError> {
        self.store
            .put(&self.config.balance_key, &balance.to_string())
            .map_err(GameError::from)
    }

    fn write_reward(&self, record: DailyRewardRecord) -> Result<(), GameError> {
        let json = serde_json::to_string(&record.to_stored()).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.store
            .put(&self.config.reward_key, &json)
            .map_err(GameError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::cell::Cell;

    fn wallet() -> Wallet<MemoryStorage> {
        Wallet::load(MemoryStorage::new(), &WalletConfig::default()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed("read-only".to_string()))
        }

        fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let w = wallet();
        assert_eq!(w.balance(), 1000);
        assert_eq!(w.daily_reward(), DailyRewardRecord::default());
    }

    #[test]
    fn test_credit_and_debit_replay() {
        let mut w = wallet();
        let ops: [(bool, u64); 6] = [(true, 50), (false, 300), (false, 2000), (true, 5), (false, 755), (false, 1)];
        let mut expected: u64 = 1000;
        for (is_credit, amount) in ops {
            if is_credit {
                w.credit(amount).unwrap();
                expected += amount;
            } else if amount <= expected {
                w.debit(amount).unwrap();
                expected -= amount;
            } else {
                assert!(w.debit(amount).is_err());
            }
            assert_eq!(w.balance(), expected);
        }
        assert_eq!(w.balance(), 0);
    }

    #[test]
    fn test_overdraft_rejected_and_unchanged() {
        let mut w = wallet();
        let err = w.debit(1001).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                needed: 1001,
                available: 1000
            }
        );
        assert_eq!(w.balance(), 1000);
        assert_eq!(w.store().get("gm_wallet").unwrap(), None);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let store = MemoryStorage::new();
        let mut w = Wallet::load(store.clone(), &WalletConfig::default()).unwrap();
        w.debit(250).unwrap();
        assert_eq!(store.get("gm_wallet").unwrap().as_deref(), Some("750"));
        w.credit(10).unwrap();
        assert_eq!(store.get("gm_wallet").unwrap().as_deref(), Some("760"));

        let reloaded = Wallet::load(store, &WalletConfig::default()).unwrap();
        assert_eq!(reloaded.balance(), 760);
    }

    #[test]
    fn test_failed_write_leaves_wallet_unchanged() {
        let mut w = Wallet::load(ReadOnlyStore, &WalletConfig::default()).unwrap();
        assert!(matches!(w.credit(10), Err(GameError::Storage(_))));
        assert!(matches!(w.debit(10), Err(GameError::Storage(_))));
        assert!(w.claim_daily_reward_on(date(2026, 10, 19)).is_err());
        assert_eq!(w.balance(), 1000);
        assert_eq!(w.daily_reward().streak, 0);
    }

    /// Memory store that accepts a fixed number of writes, optionally
    /// refusing one key outright.
    struct LimitedStore {
        inner: MemoryStorage,
        writes_left: Cell<usize>,
        refused_key: Option<&'static str>,
    }

    impl LimitedStore {
        fn new(writes_left: usize, refused_key: Option<&'static str>) -> Self {
            Self {
                inner: MemoryStorage::new(),
                writes_left: Cell::new(writes_left),
                refused_key,
            }
        }
    }

    impl KeyValueStore for LimitedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.refused_key == Some(key) || self.writes_left.get() == 0 {
                return Err(StorageError::WriteFailed(format!("refused {}", key)));
            }
            self.writes_left.set(self.writes_left.get() - 1);
            self.inner.put(key, value)
        }

        fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
            self.inner.entries()
        }
    }

    #[test]
    fn test_claim_rolls_back_balance_when_reward_write_fails() {
        let store = LimitedStore::new(usize::MAX, Some("gm_daily_reward"));
        let mut w = Wallet::load(store, &WalletConfig::default()).unwrap();

        assert!(matches!(
            w.claim_daily_reward_on(date(2026, 10, 19)),
            Err(GameError::Storage(_))
        ));
        assert_eq!(w.balance(), 1000);
        assert_eq!(w.store().get("gm_wallet").unwrap().as_deref(), Some("1000"));
        assert_eq!(w.store().get("gm_daily_reward").unwrap(), None);
    }

    #[test]
    fn test_claim_reports_reward_error_when_rollback_fails() {
        // only the credited balance gets through
        let store = LimitedStore::new(1, None);
        let mut w = Wallet::load(store, &WalletConfig::default()).unwrap();

        let err = w.claim_daily_reward_on(date(2026, 10, 19)).unwrap_err();
        assert_eq!(
            err,
            GameError::Storage(StorageError::WriteFailed("refused gm_daily_reward".to_string()))
        );
        assert_eq!(w.balance(), 1000);
        assert_eq!(w.daily_reward().streak, 0);
        assert_eq!(w.store().get("gm_wallet").unwrap().as_deref(), Some("1500"));
    }

    #[test]
    fn test_streak_grows_then_wraps() {
        let mut w = wallet();
        let start = date(2026, 10, 1);
        let mut expected_balance = 1000;
        let expected_streaks = [1, 2, 3, 4, 5, 6, 7, 1, 2];
        for (offset, streak) in expected_streaks.iter().enumerate() {
            let day = start + chrono::Duration::days(offset as i64);
            let claim = w.claim_daily_reward_on(day).unwrap();
            assert_eq!(claim.streak, *streak);
            assert_eq!(claim.reward, 500 * u64::from(*streak));
            expected_balance += claim.reward;
        }
        assert_eq!(w.balance(), expected_balance);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut w = wallet();
        w.claim_daily_reward_on(date(2026, 10, 1)).unwrap();
        w.claim_daily_reward_on(date(2026, 10, 2)).unwrap();
        let claim = w.claim_daily_reward_on(date(2026, 10, 4)).unwrap();
        assert_eq!(claim.streak, 1);
        assert_eq!(claim.reward, 500);
    }

    #[test]
    fn test_same_day_claim_rejected() {
        let mut w = wallet();
        let today = date(2026, 10, 19);
        w.claim_daily_reward_on(today).unwrap();
        let balance = w.balance();

        assert_eq!(w.claim_daily_reward_on(today), Err(GameError::AlreadyClaimed));
        assert_eq!(w.balance(), balance);
    }

    #[test]
    fn test_reward_record_format() {
        let store = MemoryStorage::new();
        let mut w = Wallet::load(store.clone(), &WalletConfig::default()).unwrap();
        w.claim_daily_reward_on(date(2026, 10, 5)).unwrap();

        let raw = store.get("gm_daily_reward").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["lastClaim"], "Mon Oct 05 2026");
        assert_eq!(json["streak"], 1);
        assert_eq!(store.get("gm_wallet").unwrap().as_deref(), Some("1500"));
    }

    #[test]
    fn test_loads_browser_written_state() {
        let store = MemoryStorage::new();
        store.put("gm_wallet", "2345").unwrap();
        store
            .put("gm_daily_reward", r#"{"lastClaim":"Sun Oct 18 2026","streak":3}"#)
            .unwrap();

        let mut w = Wallet::load(store, &WalletConfig::default()).unwrap();
        assert_eq!(w.balance(), 2345);
        assert_eq!(w.daily_reward().last_claim, Some(date(2026, 10, 18)));

        let claim = w.claim_daily_reward_on(date(2026, 10, 19)).unwrap();
        assert_eq!(claim.streak, 4);
        assert_eq!(w.balance(), 2345 + 2000);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let store = MemoryStorage::new();
        store.put("gm_wallet", "NaN").unwrap();
        store.put("gm_daily_reward", "not json").unwrap();
        store.put("unrelated", "x").unwrap();

        let w = Wallet::load(store, &WalletConfig::default()).unwrap();
        assert_eq!(w.balance(), 1000);
        assert_eq!(w.daily_reward(), DailyRewardRecord::default());
    }

    #[test]
    fn test_null_last_claim_is_unset() {
        let store = MemoryStorage::new();
        store.put("gm_daily_reward", r#"{"lastClaim":null,"streak":0}"#).unwrap();
        let mut w = Wallet::load(store, &WalletConfig::default()).unwrap();
        assert_eq!(w.daily_reward().last_claim, None);
        assert_eq!(w.claim_daily_reward_on(date(2026, 1, 1)).unwrap().streak, 1);
    }
}
