use crate::config::GamemintConfig;
use crate::errors::GameError;
use crate::games::blackjack::{BlackjackEngine, BlackjackPhase, BlackjackRound, Card, Hand, Settlement};
use crate::games::limbo::{self, LimboEngine, LimboPhase, LimboRound};
use crate::games::mines::{MinesEngine, MinesPhase, Reveal};
use crate::games::rng::{RandomSource, RngSource};
use crate::games::types::{GameOutcome, GameType, PlayerInfo};
use crate::metrics::{SessionStats, StatsSnapshot};
use crate::storage::KeyValueStore;
use crate::wallet::Wallet;
use rand::rngs::StdRng;
use serde::Serialize;
use uuid::Uuid;

/// One player request, routed to exactly one engine
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    Balance,
    ClaimDailyReward,
    MinesStart { wager: u64, mines: u8 },
    MinesReveal { index: usize },
    MinesCashOut,
    MinesReset,
    LimboPlay { wager: u64, target: f64 },
    BlackjackDeal { wager: u64 },
    BlackjackHit { hand: usize },
    BlackjackStand,
    BlackjackDouble { hand: usize },
    BlackjackSplit,
    BlackjackReset,
    Stats,
}

impl PlayerAction {
    /// Game the action is routed to, `None` for wallet and session actions.
    pub fn game(&self) -> Option<GameType> {
        match self {
            PlayerAction::Balance | PlayerAction::ClaimDailyReward | PlayerAction::Stats => None,
            PlayerAction::MinesStart { .. }
            | PlayerAction::MinesReveal { .. }
            | PlayerAction::MinesCashOut
            | PlayerAction::MinesReset => Some(GameType::Mines),
            PlayerAction::LimboPlay { .. } => Some(GameType::Limbo),
            _ => Some(GameType::Blackjack),
        }
    }
}

/// Player-visible state of a blackjack table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlackjackView {
    pub round_id: Uuid,
    pub phase: BlackjackPhase,
    pub hands: Vec<Hand>,
    pub scores: Vec<u32>,
    pub dealer_cards: Vec<Card>,
    pub dealer_score: Option<u32>,
    pub cards_left: usize,
}

impl From<&BlackjackRound> for BlackjackView {
    fn from(round: &BlackjackRound) -> Self {
        Self {
            round_id: round.id,
            phase: round.phase(),
            hands: round.hands().to_vec(),
            scores: round.hands().iter().map(Hand::score).collect(),
            dealer_cards: round.dealer_visible().to_vec(),
            dealer_score: round.dealer_score(),
            cards_left: round.cards_left(),
        }
    }
}

/// Result of a dispatched action, with the balance after it ran
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    Balance {
        balance: u64,
    },
    DailyReward {
        reward: u64,
        streak: u32,
        balance: u64,
    },
    MinesStarted {
        round_id: Uuid,
        wager: u64,
        mines: u8,
        balance: u64,
    },
    MinesRevealed {
        reveal: Reveal,
        potential_payout: u64,
        remaining_safe: usize,
        balance: u64,
    },
    MinesCashedOut {
        payout: Option<u64>,
        balance: u64,
    },
    MinesCleared {
        balance: u64,
    },
    LimboResolved {
        round: LimboRound,
        ramp_ms: f64,
        balance: u64,
    },
    BlackjackTable {
        table: BlackjackView,
        balance: u64,
    },
    BlackjackSettled {
        table: BlackjackView,
        settlement: Settlement,
        balance: u64,
    },
    BlackjackCleared {
        balance: u64,
    },
    Stats(StatsSnapshot),
}

/// Wallet, one engine per game and the session counters for one player
pub struct Casino<S: KeyValueStore, R: RandomSource = RngSource<StdRng>> {
    player: PlayerInfo,
    wallet: Wallet<S>,
    mines: MinesEngine<R>,
    limbo: LimboEngine<R>,
    blackjack: BlackjackEngine<R>,
    stats: SessionStats,
}

impl<S: KeyValueStore> Casino<S> {
    /// Build engines from the games config. A fixed seed gives each engine
    /// its own derived stream so their draws never interleave.
    pub fn from_config(player: PlayerInfo, wallet: Wallet<S>, config: &GamemintConfig) -> Self {
        let source = |offset: u64| RngSource::from_seed_option(config.games.seed.map(|s| s.wrapping_add(offset)));
        Self::with_engines(
            player,
            wallet,
            MinesEngine::new(source(0)),
            LimboEngine::with_max_multiplier(source(1), config.games.limbo_max_multiplier),
            BlackjackEngine::new(source(2)),
        )
    }
}

impl<S: KeyValueStore, R: RandomSource> Casino<S, R> {
    pub fn with_engines(
        player: PlayerInfo,
        wallet: Wallet<S>,
        mines: MinesEngine<R>,
        limbo: LimboEngine<R>,
        blackjack: BlackjackEngine<R>,
    ) -> Self {
        tracing::info!(player = %player.player_id, balance = wallet.balance(), "session opened");
        Self {
            player,
            wallet,
            mines,
            limbo,
            blackjack,
            stats: SessionStats::new(),
        }
    }

    pub fn player(&self) -> &PlayerInfo {
        &self.player
    }

    pub fn wallet(&self) -> &Wallet<S> {
        &self.wallet
    }

    pub fn mines(&self) -> &MinesEngine<R> {
        &self.mines
    }

    pub fn limbo(&self) -> &LimboEngine<R> {
        &self.limbo
    }

    pub fn blackjack(&self) -> &BlackjackEngine<R> {
        &self.blackjack
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Mark the limbo ramp as shown so the next roll is accepted.
    pub fn finish_limbo_ramp(&mut self) {
        self.limbo.finish_ramp();
    }

    /// Run one action to completion.
    pub fn dispatch(&mut self, action: PlayerAction) -> Result<ActionOutcome, GameError> {
        let span = tracing::debug_span!(
            "action",
            player = %self.player.player_id,
            game = ?action.game(),
            ?action
        );
        let _guard = span.enter();

        let result = self.run(action);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "action rejected");
        }
        result
    }

    fn run(&mut self, action: PlayerAction) -> Result<ActionOutcome, GameError> {
        match action {
            PlayerAction::Balance => Ok(ActionOutcome::Balance {
                balance: self.wallet.balance(),
            }),
            PlayerAction::ClaimDailyReward => {
                let claimed = self.wallet.claim_daily_reward()?;
                Ok(ActionOutcome::DailyReward {
                    reward: claimed.reward,
                    streak: claimed.streak,
                    balance: self.wallet.balance(),
                })
            }
            PlayerAction::MinesStart { wager, mines } => self.mines_start(wager, mines),
            PlayerAction::MinesReveal { index } => self.mines_reveal(index),
            PlayerAction::MinesCashOut => self.mines_cash_out(),
            PlayerAction::MinesReset => {
                if self.mines.phase() == MinesPhase::Active {
                    self.stats.record_settlement(GameType::Mines, GameOutcome::Loss, 0);
                }
                self.mines.reset();
                Ok(ActionOutcome::MinesCleared {
                    balance: self.wallet.balance(),
                })
            }
            PlayerAction::LimboPlay { wager, target } => self.limbo_play(wager, target),
            PlayerAction::BlackjackDeal { wager } => self.blackjack_deal(wager),
            PlayerAction::BlackjackHit { hand } => self.blackjack_hit(hand),
            PlayerAction::BlackjackStand => {
                let settlement = self.blackjack.stand(&mut self.wallet)?;
                Ok(self.blackjack_settled(settlement))
            }
            PlayerAction::BlackjackDouble { hand } => {
                let extra = self.blackjack.round().map_or(0, |r| r.wager);
                let settlement = self.blackjack.double(&mut self.wallet, hand)?;
                self.stats.record_wager(GameType::Blackjack, extra);
                Ok(self.blackjack_settled(settlement))
            }
            PlayerAction::BlackjackSplit => {
                let round = self.blackjack.split(&mut self.wallet)?;
                let (extra, table) = (round.wager, BlackjackView::from(round));
                self.stats.record_wager(GameType::Blackjack, extra);
                Ok(ActionOutcome::BlackjackTable {
                    table,
                    balance: self.wallet.balance(),
                })
            }
            PlayerAction::BlackjackReset => {
                if self.blackjack.phase() == Some(BlackjackPhase::PlayerActing) {
                    let hands = self.blackjack.round().map_or(0, |r| r.hands().len());
                    for _ in 0..hands {
                        self.stats.record_settlement(GameType::Blackjack, GameOutcome::Loss, 0);
                    }
                }
                self.blackjack.reset();
                Ok(ActionOutcome::BlackjackCleared {
                    balance: self.wallet.balance(),
                })
            }
            PlayerAction::Stats => Ok(ActionOutcome::Stats(self.stats.snapshot())),
        }
    }

    fn mines_start(&mut self, wager: u64, mines: u8) -> Result<ActionOutcome, GameError> {
        self.mines.start_round(&mut self.wallet, wager, mines)?;
        self.stats.record_wager(GameType::Mines, wager);
        let round_id = self.mines.round().map(|r| r.id).unwrap_or_default();
        Ok(ActionOutcome::MinesStarted {
            round_id,
            wager,
            mines,
            balance: self.wallet.balance(),
        })
    }

    fn mines_reveal(&mut self, index: usize) -> Result<ActionOutcome, GameError> {
        let reveal = self.mines.reveal_tile(index)?;
        if matches!(reveal, Reveal::Hazard { .. }) {
            self.stats.record_settlement(GameType::Mines, GameOutcome::Loss, 0);
        }
        Ok(ActionOutcome::MinesRevealed {
            reveal,
            potential_payout: self.mines.potential_payout(),
            remaining_safe: self.mines.remaining_safe(),
            balance: self.wallet.balance(),
        })
    }

    fn mines_cash_out(&mut self) -> Result<ActionOutcome, GameError> {
        let wager = self.mines.round().map_or(0, |r| r.wager);
        let payout = self.mines.cash_out(&mut self.wallet)?;
        if let Some(paid) = payout {
            let outcome = if paid > wager {
                GameOutcome::Win
            } else if paid == wager {
                GameOutcome::Push
            } else {
                GameOutcome::Loss
            };
            self.stats.record_settlement(GameType::Mines, outcome, paid);
        }
        Ok(ActionOutcome::MinesCashedOut {
            payout,
            balance: self.wallet.balance(),
        })
    }

    fn limbo_play(&mut self, wager: u64, target: f64) -> Result<ActionOutcome, GameError> {
        // A ramp nobody watched must not block the next roll.
        if self.limbo.phase() == LimboPhase::Rolling {
            self.limbo.finish_ramp();
        }
        let round = self.limbo.play(&mut self.wallet, wager, target)?;
        self.stats.record_wager(GameType::Limbo, wager);
        self.stats
            .record_settlement(GameType::Limbo, round.outcome, round.payout);
        Ok(ActionOutcome::LimboResolved {
            ramp_ms: limbo::ramp_duration_ms(round.crash_point),
            round,
            balance: self.wallet.balance(),
        })
    }

    fn blackjack_deal(&mut self, wager: u64) -> Result<ActionOutcome, GameError> {
        let table = BlackjackView::from(self.blackjack.deal(&mut self.wallet, wager)?);
        self.stats.record_wager(GameType::Blackjack, wager);
        Ok(ActionOutcome::BlackjackTable {
            table,
            balance: self.wallet.balance(),
        })
    }

    fn blackjack_hit(&mut self, hand: usize) -> Result<ActionOutcome, GameError> {
        let hit = self.blackjack.hit(&mut self.wallet, hand)?;
        match hit.settlement {
            Some(settlement) => Ok(self.blackjack_settled(settlement)),
            None => Ok(ActionOutcome::BlackjackTable {
                table: self.blackjack_view()?,
                balance: self.wallet.balance(),
            }),
        }
    }

    fn blackjack_settled(&mut self, settlement: Settlement) -> ActionOutcome {
        for hand in &settlement.hands {
            self.stats
                .record_settlement(GameType::Blackjack, hand.outcome, hand.payout);
        }
        let table = self
            .blackjack
            .round()
            .map(BlackjackView::from)
            .unwrap_or_else(|| BlackjackView {
                round_id: Uuid::nil(),
                phase: BlackjackPhase::Settled,
                hands: Vec::new(),
                scores: Vec::new(),
                dealer_cards: settlement.dealer_cards.clone(),
                dealer_score: Some(settlement.dealer_score),
                cards_left: 0,
            });
        ActionOutcome::BlackjackSettled {
            table,
            settlement,
            balance: self.wallet.balance(),
        }
    }

    fn blackjack_view(&self) -> Result<BlackjackView, GameError> {
        self.blackjack
            .round()
            .map(BlackjackView::from)
            .ok_or_else(|| GameError::illegal("no blackjack round in progress"))
    }
}
