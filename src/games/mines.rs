//! Mines: pick safe tiles on a 5x5 grid, cash out before hitting a hazard.
//!
//! Each safe pick moves the payout multiplier one step along a fixed table
//! chosen by the hazard count. Hitting a hazard ends the round and exposes
//! every hazard.

use super::rng::RandomSource;
use super::validate_wager;
use crate::errors::GameError;
use crate::storage::KeyValueStore;
use crate::wallet::Wallet;
use serde::Serialize;
use uuid::Uuid;

pub const GRID_SIZE: usize = 5;
pub const TOTAL_TILES: usize = GRID_SIZE * GRID_SIZE;
pub const MIN_MINES: u8 = 1;
pub const MAX_MINES: u8 = 5;

const TABLE_1: [f64; 24] = [
    1.03, 1.08, 1.12, 1.18, 1.24, 1.3, 1.37, 1.46, 1.55, 1.65, 1.77, 1.9, 2.06, 2.25, 2.47, 2.75,
    3.09, 3.54, 4.12, 4.95, 6.19, 8.25, 12.37, 24.75,
];
const TABLE_2: [f64; 23] = [
    1.08, 1.17, 1.29, 1.41, 1.56, 1.74, 1.94, 2.18, 2.47, 2.83, 3.26, 3.81, 4.5, 5.4, 6.6, 8.25,
    10.61, 14.14, 19.8, 29.7, 49.5, 99.0, 297.0,
];
const TABLE_3: [f64; 22] = [
    1.12, 1.29, 1.48, 1.71, 2.0, 2.35, 2.79, 3.35, 4.07, 5.0, 6.26, 7.96, 10.35, 13.8, 18.97,
    27.11, 40.66, 65.06, 113.85, 227.7, 596.25, 2277.0,
];
const TABLE_4: [f64; 21] = [
    1.18, 1.41, 1.71, 2.09, 2.58, 3.23, 4.09, 5.26, 6.88, 9.17, 12.51, 17.52, 25.3, 37.95, 59.64,
    99.39, 178.91, 357.81, 834.9, 2504.7, 12523.5,
];
const TABLE_5: [f64; 20] = [
    1.24, 1.56, 2.0, 2.58, 3.39, 4.52, 6.14, 8.5, 12.04, 17.52, 26.27, 40.87, 66.41, 113.85,
    208.72, 417.45, 939.26, 2504.7, 8766.45, 52598.7,
];

/// Multiplier table for a hazard count; entry `k` applies after `k + 1` safe picks.
pub fn multiplier_table(mines_count: u8) -> &'static [f64] {
    match mines_count {
        1 => &TABLE_1,
        2 => &TABLE_2,
        3 => &TABLE_3,
        4 => &TABLE_4,
        5 => &TABLE_5,
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Safe,
    Hazard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MinesPhase {
    Idle,
    Active,
    Busted,
    CashedOut,
}

/// What a reveal did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Reveal {
    Safe { multiplier: f64, picks: usize },
    /// Round over; `hazards` lists every hazard cell.
    Hazard { hazards: Vec<usize>, picks: usize },
    /// Round not active or tile already open.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct MinesRound {
    pub id: Uuid,
    pub wager: u64,
    pub mines_count: u8,
    grid: [Cell; TOTAL_TILES],
    revealed: Vec<usize>,
    picks: usize,
    multiplier: f64,
}

impl MinesRound {
    #[cfg(test)]
    pub(crate) fn grid(&self) -> &[Cell; TOTAL_TILES] {
        &self.grid
    }

    fn hazard_indices(&self) -> Vec<usize> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Hazard)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Place `mines_count` hazards uniformly without replacement. Counts above
/// the grid size fill every tile.
pub fn generate_grid<R: RandomSource>(rng: &mut R, mines_count: u8) -> [Cell; TOTAL_TILES] {
    let mut grid = [Cell::Safe; TOTAL_TILES];
    let target = usize::from(mines_count).min(TOTAL_TILES);
    let mut placed = 0;
    while placed < target {
        let idx = rng.next_index(TOTAL_TILES);
        if grid[idx] == Cell::Safe {
            grid[idx] = Cell::Hazard;
            placed += 1;
        }
    }
    grid
}

pub struct MinesEngine<R: RandomSource> {
    rng: R,
    phase: MinesPhase,
    round: Option<MinesRound>,
}

impl<R: RandomSource> MinesEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            phase: MinesPhase::Idle,
            round: None,
        }
    }

    pub fn phase(&self) -> MinesPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&MinesRound> {
        self.round.as_ref()
    }

    pub fn multiplier(&self) -> f64 {
        self.round.as_ref().map_or(1.0, |r| r.multiplier)
    }

    pub fn picks(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.picks)
    }

    pub fn revealed(&self) -> &[usize] {
        self.round.as_ref().map_or(&[], |r| r.revealed.as_slice())
    }

    /// Payout if the player cashed out now.
    pub fn potential_payout(&self) -> u64 {
        self.round
            .as_ref()
            .map_or(0, |r| payout_for(r.wager, r.multiplier))
    }

    pub fn remaining_safe(&self) -> usize {
        self.round.as_ref().map_or(0, |r| {
            let safe_revealed = r
                .revealed
                .iter()
                .filter(|&&i| r.grid[i] == Cell::Safe)
                .count();
            TOTAL_TILES - r.mines_count as usize - safe_revealed
        })
    }

    /// Contents of a tile, only once it has been revealed.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        let round = self.round.as_ref()?;
        round.revealed.contains(&index).then(|| round.grid[index])
    }

    pub fn start_round<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
        wager: u64,
        mines_count: u8,
    ) -> Result<(), GameError> {
        if self.phase == MinesPhase::Active {
            return Err(GameError::illegal("a mines round is already in progress"));
        }
        if !(MIN_MINES..=MAX_MINES).contains(&mines_count) {
            return Err(GameError::InvalidMineCount(mines_count));
        }
        validate_wager(wallet, wager)?;
        wallet.debit(wager)?;

        let round = MinesRound {
            id: Uuid::new_v4(),
            wager,
            mines_count,
            grid: generate_grid(&mut self.rng, mines_count),
            revealed: Vec::new(),
            picks: 0,
            multiplier: 1.0,
        };
        tracing::debug!(round = %round.id, wager, mines_count, "mines round started");
        self.round = Some(round);
        self.phase = MinesPhase::Active;
        Ok(())
    }

    pub fn reveal_tile(&mut self, index: usize) -> Result<Reveal, GameError> {
        if index >= TOTAL_TILES {
            return Err(GameError::illegal(format!(
                "tile {} is off the board (0..{})",
                index, TOTAL_TILES
            )));
        }
        if self.phase != MinesPhase::Active {
            return Ok(Reveal::Ignored);
        }
        let Some(round) = self.round.as_mut() else {
            return Ok(Reveal::Ignored);
        };
        if round.revealed.contains(&index) {
            return Ok(Reveal::Ignored);
        }

        if round.grid[index] == Cell::Hazard {
            let hazards = round.hazard_indices();
            for &h in &hazards {
                if !round.revealed.contains(&h) {
                    round.revealed.push(h);
                }
            }
            self.phase = MinesPhase::Busted;
            tracing::info!(round = %round.id, picks = round.picks, "mines round busted");
            return Ok(Reveal::Hazard {
                hazards,
                picks: round.picks,
            });
        }

        round.revealed.push(index);
        round.picks += 1;
        if let Some(&m) = multiplier_table(round.mines_count).get(round.picks - 1) {
            round.multiplier = m;
        }
        tracing::debug!(round = %round.id, index, picks = round.picks, multiplier = round.multiplier, "safe tile");
        Ok(Reveal::Safe {
            multiplier: round.multiplier,
            picks: round.picks,
        })
    }

    /// Settle at the current multiplier. `None` when there is nothing to cash out.
    pub fn cash_out<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
    ) -> Result<Option<u64>, GameError> {
        if self.phase != MinesPhase::Active {
            return Ok(None);
        }
        let Some(round) = self.round.as_ref() else {
            return Ok(None);
        };
        let payout = payout_for(round.wager, round.multiplier);
        wallet.credit(payout)?;
        self.phase = MinesPhase::CashedOut;
        tracing::info!(round = %round.id, payout, picks = round.picks, "mines cashed out");
        Ok(Some(payout))
    }

    /// Clear the board. An active round is forfeited.
    pub fn reset(&mut self) {
        if self.phase == MinesPhase::Active {
            tracing::debug!("active mines round abandoned");
        }
        self.round = None;
        self.phase = MinesPhase::Idle;
    }
}

fn payout_for(wager: u64, multiplier: f64) -> u64 {
    (wager as f64 * multiplier).floor() as u64
}
