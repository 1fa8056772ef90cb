//! Binary entrypoint for the signlore CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`
//! - `give <player> <name> [--amount <n>]` - put a fresh item into a player's hand
//! - `show <player>` - print the held item's lore, signers, and lock state
//! - `sign <player>` / `lock <player>` / `unlock <player>` - run the signing command
//! - `deposit <player> <amount>` - fund a player's wallet
//!
//! See the library crate docs for module-level details: `signlore::`.
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use signlore::commands::{dispatch, CommandReply, SignCommand};
use signlore::config::Config;
use signlore::economy::Economy;
use signlore::ledger::types::ItemRecord;
use signlore::ledger::{is_locked, signers};
use signlore::storage::SignStore;

#[derive(Parser)]
#[command(name = "signlore")]
#[command(about = "Sign held items into their lore and lock the signatures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Data directory holding the item and wallet store
    #[arg(short, long, default_value = "data/signlore", global = true)]
    data_dir: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config.toml
    Init,
    /// Put a fresh item into a player's hand
    Give {
        player: String,
        name: String,
        /// Stack size; the signing fee scales with it
        #[arg(short, long, default_value_t = 1)]
        amount: u32,
    },
    /// Print the held item's lore, signers, and lock state
    Show { player: String },
    /// Sign the held item
    Sign { player: String },
    /// Lock the held item's signatures
    Lock { player: String },
    /// Reopen the held item's signatures
    Unlock { player: String },
    /// Fund a player's wallet
    Deposit { player: String, amount: f64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Init => {
            Config::create_default(&cli.config)
                .with_context(|| format!("writing {}", cli.config))?;
            println!("Wrote {}", cli.config);
            Ok(())
        }
        Commands::Give {
            player,
            name,
            amount,
        } => {
            let store = open_store(&cli.data_dir)?;
            let id = name.to_ascii_lowercase().replace(' ', "_");
            store.put_held_item(player, ItemRecord::new(&id, name, *amount))?;
            info!("gave {} x{} to {}", name, amount, player);
            println!("{player} now holds {name} x{amount}");
            Ok(())
        }
        Commands::Show { player } => {
            let store = open_store(&cli.data_dir)?;
            match store.get_held_item(player)? {
                None => println!("{player} holds nothing."),
                Some(item) => {
                    println!("{} x{} ({})", item.name, item.amount, item.id);
                    for line in &item.lore {
                        println!("  {line}");
                    }
                    let signer_list = signers(&item);
                    if signer_list.is_empty() {
                        println!("Signers: none");
                    } else {
                        println!("Signers: {}", signer_list.join(", "));
                    }
                    println!("Locked: {}", is_locked(&item));
                }
            }
            Ok(())
        }
        Commands::Sign { player } => run_sign_command(&cli, SignCommand::Sign, player),
        Commands::Lock { player } => run_sign_command(&cli, SignCommand::Lock, player),
        Commands::Unlock { player } => run_sign_command(&cli, SignCommand::Unlock, player),
        Commands::Deposit { player, amount } => {
            let store = open_store(&cli.data_dir)?;
            let balance = store.balance(player)? + amount;
            store.set_balance(player, balance)?;
            println!("{player} now has {balance}");
            Ok(())
        }
    }
}

fn run_sign_command(cli: &Cli, command: SignCommand, player: &str) -> Result<()> {
    let config = load_config(&cli.config)?;
    let mut store = open_store(&cli.data_dir)?;

    let mut item = store.get_held_item(player)?;
    let reply: CommandReply = dispatch(command, player, item.as_mut(), &config, &mut store)
        .context("signing command failed")?;

    if reply.item_changed {
        if let Some(item) = item {
            store.put_held_item(player, item)?;
        }
    }
    println!("{}", reply.message);
    Ok(())
}

fn load_config(path: &str) -> Result<Config> {
    if Path::new(path).exists() {
        Config::load(path).with_context(|| format!("loading {path}"))
    } else {
        Ok(Config::default())
    }
}

fn open_store(data_dir: &str) -> Result<SignStore> {
    SignStore::open(data_dir).with_context(|| format!("opening store at {data_dir}"))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}
