//! Line grammar for the interactive front end
//!
//! Each input line is split on whitespace and parsed with clap, so usage
//! errors and `help` output come for free.

use crate::games::processor::PlayerAction;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gamemint", no_binary_name = true, disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug)]
enum ReplCommand {
    /// Show the coin balance
    Balance,
    /// Claim today's daily reward
    Claim,
    /// Play mines
    #[command(subcommand)]
    Mines(MinesCommand),
    /// Roll limbo: wager and target multiplier
    Limbo { wager: u64, target: f64 },
    /// Play blackjack
    #[command(subcommand, name = "bj", alias = "blackjack")]
    Blackjack(BlackjackCommand),
    /// Session statistics
    Stats,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum MinesCommand {
    /// Start a round with a wager and 1-5 mines
    Start { wager: u64, mines: u8 },
    /// Reveal tile 0-24
    Reveal { index: usize },
    /// Take the current payout
    Cashout,
    /// Clear the board
    Reset,
}

#[derive(Subcommand, Debug)]
enum BlackjackCommand {
    Deal { wager: u64 },
    Hit {
        #[arg(default_value_t = 0)]
        hand: usize,
    },
    Stand,
    Double {
        #[arg(default_value_t = 0)]
        hand: usize,
    },
    Split,
    Reset,
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineCommand {
    Action(PlayerAction),
    Quit,
}

/// Parse one REPL line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<LineCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    let parsed = ReplLine::try_parse_from(words)?;
    Ok(Some(parsed.command.into()))
}

impl From<ReplCommand> for LineCommand {
    fn from(command: ReplCommand) -> Self {
        let action = match command {
            ReplCommand::Quit => return LineCommand::Quit,
            ReplCommand::Balance => PlayerAction::Balance,
            ReplCommand::Claim => PlayerAction::ClaimDailyReward,
            ReplCommand::Stats => PlayerAction::Stats,
            ReplCommand::Limbo { wager, target } => PlayerAction::LimboPlay { wager, target },
            ReplCommand::Mines(cmd) => match cmd {
                MinesCommand::Start { wager, mines } => PlayerAction::MinesStart { wager, mines },
                MinesCommand::Reveal { index } => PlayerAction::MinesReveal { index },
                MinesCommand::Cashout => PlayerAction::MinesCashOut,
                MinesCommand::Reset => PlayerAction::MinesReset,
            },
            ReplCommand::Blackjack(cmd) => match cmd {
                BlackjackCommand::Deal { wager } => PlayerAction::BlackjackDeal { wager },
                BlackjackCommand::Hit { hand } => PlayerAction::BlackjackHit { hand },
                BlackjackCommand::Stand => PlayerAction::BlackjackStand,
                BlackjackCommand::Double { hand } => PlayerAction::BlackjackDouble { hand },
                BlackjackCommand::Split => PlayerAction::BlackjackSplit,
                BlackjackCommand::Reset => PlayerAction::BlackjackReset,
            },
        };
        LineCommand::Action(action)
    }
}
