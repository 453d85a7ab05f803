//! Wallet database inspection binary

use clap::Parser;
use gamemint::config::StorageConfig;
use gamemint::{KeyValueStore, RocksStorage};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "inspect_wallet")]
#[command(about = "Print the keys stored in a gamemint data directory", long_about = None)]
struct Args {
    /// Database directory
    #[arg(long, default_value = "./DB/gamemint_data")]
    db_path: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !Path::new(&args.db_path).exists() {
        println!("❌ No wallet data found at {}", args.db_path);
        return Ok(());
    }

    let config = StorageConfig {
        data_directory: args.db_path.clone(),
        clear_on_start: false,
        ..Default::default()
    };
    let storage = RocksStorage::new_with_config(&config)?;

    println!("🔍 Wallet Inspector: {}", args.db_path);
    println!("=======================");
    let entries = storage.entries()?;
    if entries.is_empty() {
        println!("(empty)");
    }
    for (key, value) in entries {
        println!("   {} = {}", key, value);
    }
    Ok(())
}
