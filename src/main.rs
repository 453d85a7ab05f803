//! Gamemint - interactive terminal session
//!
//! Opens the wallet store, then reads one command per line from stdin.

use clap::Parser;
use gamemint::cli::{parse_line, LineCommand};
use gamemint::config::{generate_sample_config, StorageBackend};
use gamemint::games::blackjack::Card;
use gamemint::games::limbo;
use gamemint::games::mines::{Cell, GRID_SIZE};
use gamemint::games::processor::BlackjackView;
use gamemint::games::Reveal;
use gamemint::{open_storage, ActionOutcome, Casino, ConfigLoader, KeyValueStore, PlayerInfo, Wallet};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const RAMP_FRAMES: u32 = 8;

#[derive(Parser, Debug)]
#[command(name = "gamemint")]
#[command(about = "Mines, Limbo and Blackjack against a local coin wallet", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Wallet data directory (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Player name shown in logs
    #[arg(long, default_value = "guest")]
    player: String,

    /// Fixed RNG seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the wallet in memory only
    #[arg(long)]
    memory: bool,

    /// Skip the limbo ramp animation
    #[arg(long)]
    no_ramp: bool,

    /// Write a sample configuration file to this path and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.generate_config {
        generate_sample_config(path)?;
        println!("📝 Sample configuration written to {}", path);
        return Ok(());
    }

    let loader = match &args.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if let Some(dir) = &args.data_dir {
        config.storage.data_directory = dir.clone();
    }
    if args.seed.is_some() {
        config.games.seed = args.seed;
    }
    if args.memory {
        config.storage.backend = StorageBackend::Memory;
    }
    loader.validate(&config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.log_level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = open_storage(&config.storage)?;
    let wallet = Wallet::load(store, &config.wallet)?;
    let mut casino = Casino::from_config(PlayerInfo::new(args.player.clone()), wallet, &config);

    println!("🎰 Gamemint");
    println!("Player: {}  Balance: {}", args.player, casino.wallet().balance());
    println!("Type `help` for commands.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        let action = match parse_line(&line) {
            Ok(Some(LineCommand::Action(action))) => action,
            Ok(Some(LineCommand::Quit)) => break,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.render());
                continue;
            }
        };

        match casino.dispatch(action) {
            Ok(outcome) => render(&mut casino, &outcome, !args.no_ramp),
            Err(e) => println!("⚠️  {}", e),
        }
    }

    println!("Final balance: {}", casino.wallet().balance());
    Ok(())
}

fn render<S: KeyValueStore>(casino: &mut Casino<S>, outcome: &ActionOutcome, animate: bool) {
    match outcome {
        ActionOutcome::Balance { balance } => println!("💰 {} coins", balance),
        ActionOutcome::DailyReward { reward, streak, balance } => {
            println!("🎁 +{} (day {} streak)  balance {}", reward, streak, balance)
        }
        ActionOutcome::MinesStarted { wager, mines, balance, .. } => {
            println!("💣 {} mines, wager {}  balance {}", mines, wager, balance);
            print_board(casino);
        }
        ActionOutcome::MinesRevealed { reveal, potential_payout, remaining_safe, .. } => {
            print_board(casino);
            match reveal {
                Reveal::Safe { multiplier, picks } => println!(
                    "✅ safe #{}  {:.2}x  cash out for {}  ({} safe left)",
                    picks, multiplier, potential_payout, remaining_safe
                ),
                Reveal::Hazard { .. } => println!("💥 hazard! wager lost"),
                Reveal::Ignored => println!("(nothing to reveal)"),
            }
        }
        ActionOutcome::MinesCashedOut { payout, balance } => match payout {
            Some(p) => println!("💵 cashed out {}  balance {}", p, balance),
            None => println!("(no active round)"),
        },
        ActionOutcome::MinesCleared { balance } => println!("board cleared  balance {}", balance),
        ActionOutcome::LimboResolved { round, ramp_ms, balance } => {
            if animate {
                play_ramp(round.crash_point, *ramp_ms);
            }
            casino.finish_limbo_ramp();
            println!(
                "🚀 crashed at {:.2}x (target {:.2}x): {}  payout {}  balance {}",
                round.crash_point, round.target, round.outcome, round.payout, balance
            );
        }
        ActionOutcome::BlackjackTable { table, balance } => {
            print_table(table);
            println!("balance {}", balance);
        }
        ActionOutcome::BlackjackSettled { table, settlement, balance } => {
            print_table(table);
            for hand in &settlement.hands {
                println!(
                    "hand {}: {} ({}) pays {}",
                    hand.hand_index, hand.outcome, hand.score, hand.payout
                );
            }
            println!("balance {}", balance);
        }
        ActionOutcome::BlackjackCleared { balance } => println!("table cleared  balance {}", balance),
        ActionOutcome::Stats(snapshot) => {
            println!("📊 session {}s", snapshot.runtime_secs);
            for (game, s) in &snapshot.games {
                println!(
                    "  {:<9} rounds {:>3}  W/L/P {}/{}/{}  wagered {}  paid {}  net {}",
                    game, s.rounds, s.wins, s.losses, s.pushes, s.wagered, s.paid_out, s.net()
                );
            }
        }
    }
}

fn play_ramp(crash_point: f64, ramp_ms: f64) {
    let step = ramp_ms / f64::from(RAMP_FRAMES);
    for frame in 1..=RAMP_FRAMES {
        thread::sleep(Duration::from_millis(step as u64));
        print!("\r   {:.2}x ", limbo::ramp_value(crash_point, step * f64::from(frame)));
        let _ = io::stdout().flush();
    }
    println!();
}

fn print_board<S: KeyValueStore>(casino: &Casino<S>) {
    let mines = casino.mines();
    for row in 0..GRID_SIZE {
        let line: Vec<String> = (0..GRID_SIZE)
            .map(|col| {
                let idx = row * GRID_SIZE + col;
                match mines.cell(idx) {
                    Some(Cell::Safe) => " ◇".to_string(),
                    Some(Cell::Hazard) => " ✹".to_string(),
                    None => format!("{:>2}", idx),
                }
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

fn cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
}

fn print_table(table: &BlackjackView) {
    let dealer = match table.dealer_score {
        Some(score) => format!("{} ({})", cards(&table.dealer_cards), score),
        None => format!("{} ??", cards(&table.dealer_cards)),
    };
    println!("dealer: {}", dealer);
    for (i, (hand, score)) in table.hands.iter().zip(&table.scores).enumerate() {
        println!(
            "hand {}: {} ({})  stake {}  {:?}",
            i,
            cards(&hand.cards),
            score,
            hand.stake,
            hand.status
        );
    }
}
