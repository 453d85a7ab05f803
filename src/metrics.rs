//! Per-session play statistics

use crate::games::types::{GameOutcome, GameType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Counters for one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub rounds: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub wagered: u64,
    pub paid_out: u64,
}

impl GameStats {
    /// Coins won minus coins staked. Negative means the house is ahead.
    pub fn net(&self) -> i128 {
        i128::from(self.paid_out) - i128::from(self.wagered)
    }
}

pub struct SessionStats {
    start_time: Instant,
    per_game: BTreeMap<String, GameStats>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            per_game: GameType::ALL
                .iter()
                .map(|g| (g.to_string(), GameStats::default()))
                .collect(),
        }
    }

    /// Stake taken by a game, recorded at debit time.
    pub fn record_wager(&mut self, game: GameType, amount: u64) {
        let entry = self.entry(game);
        entry.wagered = entry.wagered.saturating_add(amount);
    }

    /// A settled round and what it paid.
    pub fn record_settlement(&mut self, game: GameType, outcome: GameOutcome, payout: u64) {
        let entry = self.entry(game);
        entry.rounds += 1;
        match outcome {
            GameOutcome::Win => entry.wins += 1,
            GameOutcome::Loss => entry.losses += 1,
            GameOutcome::Push => entry.pushes += 1,
        }
        entry.paid_out = entry.paid_out.saturating_add(payout);
    }

    pub fn game(&self, game: GameType) -> GameStats {
        self.per_game
            .get(&game.to_string())
            .copied()
            .unwrap_or_default()
    }

    pub fn totals(&self) -> GameStats {
        self.per_game.values().fold(GameStats::default(), |acc, s| GameStats {
            rounds: acc.rounds + s.rounds,
            wins: acc.wins + s.wins,
            losses: acc.losses + s.losses,
            pushes: acc.pushes + s.pushes,
            wagered: acc.wagered.saturating_add(s.wagered),
            paid_out: acc.paid_out.saturating_add(s.paid_out),
        })
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            runtime_secs: self.total_runtime().as_secs(),
            games: self.per_game.clone(),
            totals: self.totals(),
        }
    }

    pub fn total_runtime(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn entry(&mut self, game: GameType) -> &mut GameStats {
        self.per_game.entry(game.to_string()).or_default()
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialisable view of the session counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub runtime_secs: u64,
    pub games: BTreeMap<String, GameStats>,
    pub totals: GameStats,
}
