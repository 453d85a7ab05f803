pub mod blackjack;
pub mod limbo;
pub mod mines;
pub mod processor;
pub mod rng;
pub mod types;

pub use blackjack::{BlackjackEngine, BlackjackPhase, Card, Settlement};
pub use limbo::{LimboEngine, LimboPhase, LimboRound};
pub use mines::{MinesEngine, MinesPhase, Reveal};
pub use processor::{ActionOutcome, Casino, PlayerAction};
pub use rng::{RandomSource, RngSource};
pub use types::*;

use crate::errors::GameError;
use crate::storage::KeyValueStore;
use crate::wallet::Wallet;

/// Shared wager check: positive and covered by the balance.
pub(crate) fn validate_wager<S: KeyValueStore>(wallet: &Wallet<S>, wager: u64) -> Result<(), GameError> {
    if wager == 0 {
        return Err(GameError::InvalidWager("wager must be positive".to_string()));
    }
    if !wallet.can_afford(wager) {
        return Err(GameError::InsufficientFunds {
            needed: wager,
            available: wallet.balance(),
        });
    }
    Ok(())
}
