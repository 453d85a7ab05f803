//! Blackjack against a dealer who draws to 17.
//!
//! One fresh 52-card deck per round, drawn from the end. The player may hit,
//! stand, double or split a pair once. Every winning hand pays twice the base
//! wager and a push returns it, doubled or not. There is no bonus for a natural.

use super::rng::RandomSource;
use super::types::GameOutcome;
use super::validate_wager;
use crate::errors::GameError;
use crate::storage::KeyValueStore;
use crate::wallet::Wallet;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Dealer keeps drawing below this total.
pub const DEALER_STANDS_ON: u32 = 17;
const BUST_OVER: u32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Blackjack value with the ace counted high.
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Hand total with aces softened from 11 to 1 while the hand would bust.
pub fn score_hand(cards: &[Card]) -> u32 {
    let mut total: u32 = cards.iter().map(|c| c.rank.value()).sum();
    let mut soft_aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    while total > BUST_OVER && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total
}

/// A shuffled 52-card deck.
pub fn new_deck<R: RandomSource>(rng: &mut R) -> Vec<Card> {
    let mut deck: Vec<Card> = Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect();
    rng.shuffle(&mut deck);
    deck
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackPhase {
    BetPlaced,
    PlayerActing,
    DealerActing,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandStatus {
    Playing,
    Bust,
    Doubled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub stake: u64,
    pub status: HandStatus,
}

impl Hand {
    fn new(cards: Vec<Card>, stake: u64) -> Self {
        Self {
            cards,
            stake,
            status: HandStatus::Playing,
        }
    }

    pub fn score(&self) -> u32 {
        score_hand(&self.cards)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandResult {
    pub hand_index: usize,
    pub score: u32,
    pub outcome: GameOutcome,
    pub payout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub dealer_cards: Vec<Card>,
    pub dealer_score: u32,
    pub hands: Vec<HandResult>,
    pub total_payout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitResult {
    pub card: Card,
    pub score: u32,
    pub bust: bool,
    /// Present when the hit ended the round (every hand bust).
    pub settlement: Option<Settlement>,
}

#[derive(Debug, Clone)]
pub struct BlackjackRound {
    pub id: Uuid,
    pub wager: u64,
    deck: Vec<Card>,
    hands: Vec<Hand>,
    dealer: Vec<Card>,
    hole_hidden: bool,
    phase: BlackjackPhase,
}

impl BlackjackRound {
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn phase(&self) -> BlackjackPhase {
        self.phase
    }

    pub fn cards_left(&self) -> usize {
        self.deck.len()
    }

    /// Dealer cards the player may see.
    pub fn dealer_visible(&self) -> &[Card] {
        if self.hole_hidden {
            &self.dealer[..self.dealer.len().min(1)]
        } else {
            &self.dealer
        }
    }

    /// Dealer total, hidden while the hole card is down.
    pub fn dealer_score(&self) -> Option<u32> {
        (!self.hole_hidden).then(|| score_hand(&self.dealer))
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck.pop().ok_or(GameError::DeckExhausted)
    }

    fn check_playable(&self, hand_index: usize) -> Result<(), GameError> {
        if self.phase != BlackjackPhase::PlayerActing {
            return Err(GameError::illegal("no hand is waiting for a decision"));
        }
        match self.hands.get(hand_index) {
            None => Err(GameError::illegal(format!("there is no hand {}", hand_index))),
            Some(hand) if hand.status != HandStatus::Playing => Err(GameError::illegal(format!(
                "hand {} is finished",
                hand_index
            ))),
            Some(_) => Ok(()),
        }
    }
}

pub struct BlackjackEngine<R: RandomSource> {
    rng: R,
    round: Option<BlackjackRound>,
}

impl<R: RandomSource> BlackjackEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, round: None }
    }

    pub fn round(&self) -> Option<&BlackjackRound> {
        self.round.as_ref()
    }

    pub fn phase(&self) -> Option<BlackjackPhase> {
        self.round.as_ref().map(|r| r.phase)
    }

    fn acting_round(&mut self) -> Result<&mut BlackjackRound, GameError> {
        match self.round.as_mut() {
            Some(round) if round.phase == BlackjackPhase::PlayerActing => Ok(round),
            _ => Err(GameError::illegal("no blackjack round in progress")),
        }
    }

    pub fn deal<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
        wager: u64,
    ) -> Result<&BlackjackRound, GameError> {
        if self.phase() == Some(BlackjackPhase::PlayerActing) {
            return Err(GameError::illegal("finish the current hand first"));
        }
        validate_wager(wallet, wager)?;
        wallet.debit(wager)?;

        let mut round = BlackjackRound {
            id: Uuid::new_v4(),
            wager,
            deck: new_deck(&mut self.rng),
            hands: Vec::new(),
            dealer: Vec::with_capacity(2),
            hole_hidden: true,
            phase: BlackjackPhase::BetPlaced,
        };
        let player = vec![round.draw()?, round.draw()?];
        let up_card = round.draw()?;
        round.dealer.push(up_card);
        let hole_card = round.draw()?;
        round.dealer.push(hole_card);
        round.hands.push(Hand::new(player, wager));
        round.phase = BlackjackPhase::PlayerActing;

        tracing::debug!(round = %round.id, wager, "blackjack dealt");
        Ok(self.round.insert(round))
    }

    pub fn hit<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
        hand_index: usize,
    ) -> Result<HitResult, GameError> {
        let round = self.acting_round()?;
        round.check_playable(hand_index)?;
        let card = round.draw()?;

        let hand = &mut round.hands[hand_index];
        hand.cards.push(card);
        let score = hand.score();
        let bust = score > BUST_OVER;
        if bust {
            hand.status = HandStatus::Bust;
            tracing::debug!(round = %round.id, hand_index, score, "hand bust");
        }

        let all_bust = round.hands.iter().all(|h| h.status == HandStatus::Bust);
        let settlement = if all_bust { Some(self.stand(wallet)?) } else { None };
        Ok(HitResult {
            card,
            score,
            bust,
            settlement,
        })
    }

    /// Reveal the hole card, play out the dealer and pay every hand.
    pub fn stand<S: KeyValueStore>(&mut self, wallet: &mut Wallet<S>) -> Result<Settlement, GameError> {
        let round = self.acting_round()?;
        round.hole_hidden = false;
        round.phase = BlackjackPhase::DealerActing;

        while score_hand(&round.dealer) < DEALER_STANDS_ON {
            match round.deck.pop() {
                Some(card) => round.dealer.push(card),
                None => break,
            }
        }
        let dealer_score = score_hand(&round.dealer);
        let dealer_bust = dealer_score > BUST_OVER;
        let wager = round.wager;

        let hands: Vec<HandResult> = round
            .hands
            .iter()
            .enumerate()
            .map(|(hand_index, hand)| {
                let score = hand.score();
                let (outcome, payout) = if score > BUST_OVER {
                    (GameOutcome::Loss, 0)
                } else if dealer_bust || score > dealer_score {
                    (GameOutcome::Win, wager * 2)
                } else if score < dealer_score {
                    (GameOutcome::Loss, 0)
                } else {
                    (GameOutcome::Push, wager)
                };
                HandResult {
                    hand_index,
                    score,
                    outcome,
                    payout,
                }
            })
            .collect();
        let total_payout: u64 = hands.iter().map(|h| h.payout).sum();

        if total_payout > 0 {
            wallet.credit(total_payout)?;
        }
        round.phase = BlackjackPhase::Settled;
        tracing::info!(round = %round.id, dealer_score, total_payout, "blackjack settled");

        Ok(Settlement {
            dealer_cards: round.dealer.clone(),
            dealer_score,
            hands,
            total_payout,
        })
    }

    /// Match the wager, take exactly one card, then stand.
    pub fn double<S: KeyValueStore>(
        &mut self,
        wallet: &mut Wallet<S>,
        hand_index: usize,
    ) -> Result<Settlement, GameError> {
        let round = self.acting_round()?;
        round.check_playable(hand_index)?;
        let extra = round.wager;
        if !wallet.can_afford(extra) {
            return Err(GameError::InsufficientFunds {
                needed: extra,
                available: wallet.balance(),
            });
        }
        if round.deck.is_empty() {
            return Err(GameError::DeckExhausted);
        }
        wallet.debit(extra)?;

        let card = round.draw()?;
        let hand = &mut round.hands[hand_index];
        hand.stake += extra;
        hand.cards.push(card);
        hand.status = if hand.score() > BUST_OVER {
            HandStatus::Bust
        } else {
            HandStatus::Doubled
        };
        tracing::debug!(round = %round.id, hand_index, stake = hand.stake, "hand doubled");

        self.stand(wallet)
    }

    /// Split a starting pair into two hands, each topped up with one card.
    pub fn split<S: KeyValueStore>(&mut self, wallet: &mut Wallet<S>) -> Result<&BlackjackRound, GameError> {
        let round = self.acting_round()?;
        let pair = match round.hands.as_slice() {
            [hand] if hand.status == HandStatus::Playing
                && hand.cards.len() == 2
                && hand.cards[0].rank == hand.cards[1].rank =>
            {
                (hand.cards[0], hand.cards[1])
            }
            _ => return Err(GameError::CannotSplit),
        };
        let wager = round.wager;
        if !wallet.can_afford(wager) {
            return Err(GameError::InsufficientFunds {
                needed: wager,
                available: wallet.balance(),
            });
        }
        if round.deck.len() < 2 {
            return Err(GameError::DeckExhausted);
        }
        wallet.debit(wager)?;

        let first = vec![pair.0, round.draw()?];
        let second = vec![pair.1, round.draw()?];
        round.hands = vec![Hand::new(first, wager), Hand::new(second, wager)];
        tracing::debug!(round = %round.id, "pair split");
        Ok(round)
    }

    /// Drop the round. An unsettled wager is forfeited.
    pub fn reset(&mut self) {
        self.round = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalletConfig;
    use crate::games::rng::RngSource;
    use crate::storage::MemoryStorage;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    type Engine = BlackjackEngine<RngSource<StdRng>>;

    fn c(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    fn wallet() -> Wallet<MemoryStorage> {
        Wallet::load(MemoryStorage::new(), &WalletConfig::default()).unwrap()
    }

    /// Engine mid-round with a known layout. `next` lists upcoming draws in order.
    fn rigged(wallet: &mut Wallet<MemoryStorage>, wager: u64, player: &[Rank], dealer: &[Rank], next: &[Rank]) -> Engine {
        wallet.debit(wager).unwrap();
        let mut engine = BlackjackEngine::new(RngSource::seeded(0));
        engine.round = Some(BlackjackRound {
            id: Uuid::new_v4(),
            wager,
            deck: next.iter().rev().map(|&r| c(r)).collect(),
            hands: vec![Hand::new(player.iter().map(|&r| c(r)).collect(), wager)],
            dealer: dealer.iter().map(|&r| c(r)).collect(),
            hole_hidden: true,
            phase: BlackjackPhase::PlayerActing,
        });
        engine
    }

    #[test]
    fn test_score_hand() {
        assert_eq!(score_hand(&[c(Rank::Ace), c(Rank::Ace), c(Rank::Nine)]), 21);
        assert_eq!(score_hand(&[c(Rank::King), c(Rank::Queen)]), 20);
        assert_eq!(score_hand(&[c(Rank::Ace), c(Rank::Jack)]), 21);
        assert_eq!(score_hand(&[c(Rank::Ace), c(Rank::Ace)]), 12);
        assert_eq!(score_hand(&[c(Rank::Five), c(Rank::Six), c(Rank::Ace), c(Rank::King)]), 22);
        assert_eq!(score_hand(&[]), 0);
    }

    #[test]
    fn test_deck_is_complete() {
        let mut rng = RngSource::seeded(9);
        let deck = new_deck(&mut rng);
        assert_eq!(deck.len(), 52);
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_deal() {
        let mut w = wallet();
        let mut engine = BlackjackEngine::new(RngSource::seeded(4));
        let round = engine.deal(&mut w, 100).unwrap();
        assert_eq!(round.hands().len(), 1);
        assert_eq!(round.hands()[0].cards.len(), 2);
        assert_eq!(round.dealer_visible().len(), 1);
        assert_eq!(round.dealer_score(), None);
        assert_eq!(round.cards_left(), 48);
        assert_eq!(round.phase(), BlackjackPhase::PlayerActing);
        assert_eq!(w.balance(), 900);

        assert!(matches!(engine.deal(&mut w, 100), Err(GameError::IllegalAction(_))));
        assert_eq!(w.balance(), 900);
    }

    #[test]
    fn test_deal_validation() {
        let mut w = wallet();
        let mut engine = BlackjackEngine::new(RngSource::seeded(4));
        assert!(matches!(engine.deal(&mut w, 0), Err(GameError::InvalidWager(_))));
        assert!(matches!(engine.deal(&mut w, 1001), Err(GameError::InsufficientFunds { .. })));
        assert!(engine.round().is_none());
        assert_eq!(w.balance(), 1000);
    }

    #[test]
    fn test_dealer_draws_on_sixteen() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Ten, Rank::Nine], &[Rank::Ten, Rank::Six], &[Rank::Five]);
        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.dealer_cards.len(), 3);
        assert_eq!(s.dealer_score, 21);
        assert_eq!(s.hands[0].outcome, GameOutcome::Loss);
        assert_eq!(w.balance(), 900);
    }

    #[test]
    fn test_dealer_stops_on_seventeen_and_push_returns_wager() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Ten, Rank::Seven], &[Rank::Ten, Rank::Seven], &[Rank::Two]);
        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.dealer_cards.len(), 2);
        assert_eq!(s.hands[0].outcome, GameOutcome::Push);
        assert_eq!(s.total_payout, 100);
        assert_eq!(w.balance(), 1000);
        assert_eq!(engine.phase(), Some(BlackjackPhase::Settled));
        assert_eq!(engine.round().unwrap().dealer_score(), Some(17));
    }

    #[test]
    fn test_soft_seventeen_stands() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Ten, Rank::Eight], &[Rank::Ace, Rank::Six], &[Rank::Four]);
        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.dealer_score, 17);
        assert_eq!(s.hands[0].outcome, GameOutcome::Win);
    }

    #[test]
    fn test_win_pays_double() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::King, Rank::Queen], &[Rank::Ten, Rank::Eight], &[]);
        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.hands[0].outcome, GameOutcome::Win);
        assert_eq!(s.total_payout, 200);
        assert_eq!(w.balance(), 1100);
    }

    #[test]
    fn test_dealer_bust_pays_player() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 50, &[Rank::Two, Rank::Three], &[Rank::Ten, Rank::Six], &[Rank::King]);
        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.dealer_score, 26);
        assert_eq!(s.hands[0].outcome, GameOutcome::Win);
        assert_eq!(w.balance(), 1050);
    }

    #[test]
    fn test_bust_settles_round() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Ten, Rank::Six], &[Rank::Ten, Rank::Seven], &[Rank::King]);
        let hit = engine.hit(&mut w, 0).unwrap();
        assert!(hit.bust);
        assert_eq!(hit.score, 26);
        let s = hit.settlement.unwrap();
        assert_eq!(s.hands[0].outcome, GameOutcome::Loss);
        assert_eq!(w.balance(), 900);

        assert!(matches!(engine.hit(&mut w, 0), Err(GameError::IllegalAction(_))));
        assert!(matches!(engine.stand(&mut w), Err(GameError::IllegalAction(_))));
    }

    #[test]
    fn test_hit_keeps_round_open() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Two, Rank::Three], &[Rank::Ten, Rank::Seven], &[Rank::Four]);
        let hit = engine.hit(&mut w, 0).unwrap();
        assert_eq!(hit.score, 9);
        assert!(!hit.bust);
        assert!(hit.settlement.is_none());
        assert_eq!(engine.phase(), Some(BlackjackPhase::PlayerActing));
        assert!(matches!(engine.hit(&mut w, 1), Err(GameError::IllegalAction(_))));
        assert_eq!(engine.hit(&mut w, 0), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_double_down() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Five, Rank::Six], &[Rank::Ten, Rank::Eight], &[Rank::King]);
        let s = engine.double(&mut w, 0).unwrap();
        assert_eq!(s.hands[0].score, 21);
        assert_eq!(s.hands[0].outcome, GameOutcome::Win);
        // the doubled stake is spent but a win still pays twice the base wager
        assert_eq!(s.hands[0].payout, 200);
        assert_eq!(s.total_payout, 200);
        assert_eq!(w.balance(), 1000);
        let hand = &engine.round().unwrap().hands()[0];
        assert_eq!(hand.status, HandStatus::Doubled);
        assert_eq!(hand.stake, 200);
    }

    #[test]
    fn test_double_needs_funds() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 600, &[Rank::Five, Rank::Six], &[Rank::Ten, Rank::Eight], &[Rank::King]);
        assert_eq!(
            engine.double(&mut w, 0),
            Err(GameError::InsufficientFunds {
                needed: 600,
                available: 400
            })
        );
        assert_eq!(w.balance(), 400);
        assert_eq!(engine.phase(), Some(BlackjackPhase::PlayerActing));
    }

    #[test]
    fn test_split_pair() {
        let mut w = wallet();
        let mut engine = rigged(
            &mut w,
            100,
            &[Rank::Eight, Rank::Eight],
            &[Rank::Ten, Rank::Nine],
            &[Rank::Three, Rank::King, Rank::Ten],
        );
        let round = engine.split(&mut w).unwrap();
        assert_eq!(round.hands().len(), 2);
        assert_eq!(round.hands()[0].cards, vec![c(Rank::Eight), c(Rank::Three)]);
        assert_eq!(round.hands()[1].cards, vec![c(Rank::Eight), c(Rank::King)]);
        assert_eq!(w.balance(), 800);

        assert_eq!(engine.split(&mut w).unwrap_err(), GameError::CannotSplit);

        // 11 + 10 = 21 wins, 18 loses to 19
        engine.hit(&mut w, 0).unwrap();
        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.hands[0].outcome, GameOutcome::Win);
        assert_eq!(s.hands[1].outcome, GameOutcome::Loss);
        assert_eq!(w.balance(), 1000);
    }

    #[test]
    fn test_split_requires_matching_rank() {
        let mut w = wallet();
        let mut engine = rigged(&mut w, 100, &[Rank::Ten, Rank::King], &[Rank::Ten, Rank::Nine], &[Rank::Two, Rank::Three]);
        assert_eq!(engine.split(&mut w).unwrap_err(), GameError::CannotSplit);
        assert_eq!(w.balance(), 900);
    }

    #[test]
    fn test_split_hand_bust_does_not_end_round() {
        let mut w = wallet();
        let mut engine = rigged(
            &mut w,
            100,
            &[Rank::Nine, Rank::Nine],
            &[Rank::Ten, Rank::Seven],
            &[Rank::Five, Rank::Ten, Rank::King],
        );
        engine.split(&mut w).unwrap();
        let hit = engine.hit(&mut w, 0).unwrap();
        assert!(hit.bust);
        assert!(hit.settlement.is_none());
        assert!(matches!(engine.hit(&mut w, 0), Err(GameError::IllegalAction(_))));

        let s = engine.stand(&mut w).unwrap();
        assert_eq!(s.hands[0].outcome, GameOutcome::Loss);
        assert_eq!(s.hands[1].outcome, GameOutcome::Win);
        assert_eq!(w.balance(), 800 + 200);
    }

    #[test]
    fn test_reset_allows_new_deal() {
        let mut w = wallet();
        let mut engine = BlackjackEngine::new(RngSource::seeded(12));
        engine.deal(&mut w, 10).unwrap();
        engine.reset();
        assert!(engine.round().is_none());
        engine.deal(&mut w, 10).unwrap();
        assert_eq!(w.balance(), 980);
    }
}
