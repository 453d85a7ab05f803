//! Limbo: pick a target multiplier, win if the hidden crash point reaches it.
//!
//! The crash point is drawn at roll time and settled immediately. The ramp
//! from 1.00x up to the crash point is a display curve only.

use super::rng::RandomSource;
use super::types::GameOutcome;
use super::validate_wager;
use crate::errors::GameError;
use crate::storage::KeyValueStore;
use crate::wallet::Wallet;
use serde::Serialize;
use uuid::Uuid;

pub const MIN_MULTIPLIER: f64 = 1.01;
pub const DEFAULT_MAX_MULTIPLIER: f64 = 10.0;

const SKEW_EXPONENT: i32 = 3;
/// How strongly the wager-to-balance ratio pulls crash points down.
const RISK_WEIGHT: f64 = 0.8;

const RAMP_BASE_MS: f64 = 1900.0;
const RAMP_MS_PER_UNIT: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LimboPhase {
    Idle,
    Rolling,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimboRound {
    pub id: Uuid,
    pub wager: u64,
    pub target: f64,
    pub crash_point: f64,
    pub outcome: GameOutcome,
    pub payout: u64,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map a uniform draw to a crash point in `[1.01, max_multiplier]`.
///
/// `balance` is the balance before the wager was taken; 0 is treated as 1.
pub fn crash_point_from_unit(unit: f64, wager: u64, balance: u64, max_multiplier: f64) -> f64 {
    let r = unit.powi(SKEW_EXPONENT);
    let risk = wager as f64 / balance.max(1) as f64;
    let shaped = r.powf(1.0 + risk * RISK_WEIGHT);
    let value = MIN_MULTIPLIER + shaped * (max_multiplier - MIN_MULTIPLIER);
    round_cents(value).max(MIN_MULTIPLIER)
}

/// `true` when the crash point reaches the target.
pub fn is_win(crash_point: f64, target: f64) -> bool {
    crash_point >= target
}

/// How long the display ramp runs for a given crash point.
pub fn ramp_duration_ms(crash_point: f64) -> f64 {
    RAMP_BASE_MS + (crash_point - 1.0) * RAMP_MS_PER_UNIT
}

/// Displayed multiplier `elapsed_ms` into the ramp (ease-out cubic).
pub fn ramp_value(crash_point: f64, elapsed_ms: f64) -> f64 {
    let t = (elapsed_ms / ramp_duration_ms(crash_point)).clamp(0.0, 1.0);
    let eased = 1.0 - (1.0 - t).powi(3);
    round_cents(1.0 + (crash_point - 1.0) * eased)
}

pub struct LimboEngine<R: RandomSource> {
    rng: R,
    max_multiplier: f64,
    phase: LimboPhase,
    last_round: Option<LimboRound>,
}

impl<R: RandomSource> LimboEngine<R> {
    pub fn new(rng: R) -> Self {
        Self::with_max_multiplier(rng, DEFAULT_MAX_MULTIPLIER)
    }

    pub fn with_max_multiplier(rng: R, max_multiplier: f64) -> Self {
        Self {
            rng,
            max_multiplier,
            phase: LimboPhase::Idle,
            last_round: None,
        }
    }

    pub fn phase(&self) -> LimboPhase {
        self.phase
    }

    pub fn last_round(&self) -> Option<&LimboRound> {
        self.last_round.as_ref()
    }

    /// Debit, draw a crash point and settle. The round is left `Rolling`
    /// until the caller finishes its ramp.
    pub fn play<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
        wager: u64,
        target: f64,
    ) -> Result<LimboRound, GameError> {
        if self.phase == LimboPhase::Rolling {
            return Err(GameError::illegal("limbo round is still rolling"));
        }
        if wager == 0 {
            return Err(GameError::InvalidWager("wager must be positive".to_string()));
        }
        if !target.is_finite() || target < MIN_MULTIPLIER {
            return Err(GameError::InvalidWager(format!(
                "target must be at least {:.2}",
                MIN_MULTIPLIER
            )));
        }
        validate_wager(wallet, wager)?;

        let balance_before = wallet.balance();
        let crash_point =
            crash_point_from_unit(self.rng.next_unit(), wager, balance_before, self.max_multiplier);
        self.settle(wallet, wager, target, crash_point)
    }

    fn settle<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
        wager: u64,
        target: f64,
        crash_point: f64,
    ) -> Result<LimboRound, GameError> {
        wallet.debit(wager)?;

        let (outcome, payout) = if is_win(crash_point, target) {
            (GameOutcome::Win, (wager as f64 * target).floor() as u64)
        } else {
            (GameOutcome::Loss, 0)
        };
        if payout > 0 {
            wallet.credit(payout)?;
        }

        let round = LimboRound {
            id: Uuid::new_v4(),
            wager,
            target,
            crash_point,
            outcome,
            payout,
        };
        tracing::info!(round = %round.id, wager, target, crash_point, %outcome, payout, "limbo settled");
        self.phase = LimboPhase::Rolling;
        self.last_round = Some(round.clone());
        Ok(round)
    }

    /// Ramp finished; reveal the result.
    pub fn finish_ramp(&mut self) {
        if self.phase == LimboPhase::Rolling {
            self.phase = LimboPhase::Resolved;
        }
    }

    pub fn reset(&mut self) {
        self.phase = LimboPhase::Idle;
    }
}
