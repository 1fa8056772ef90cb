//! Signing command parsing and dispatch.
//!
//! This is the thin glue between a caller (CLI, chat command, whatever hosts
//! the ledger) and the two core components. It reads the lock state and the
//! signer list first, picks exactly one operation, and reports back which
//! message to show and whether the held item must be written back.

use log::{debug, info};

use crate::config::Config;
use crate::economy::Economy;
use crate::ledger::errors::SignloreError;
use crate::ledger::types::ItemRecord;
use crate::ledger::{is_locked, lock, sign, signers, unlock, SignatureFormat};

const SUBCOMMANDS: &[&str] = &["lock", "unlock"];

/// Subcommands of the signing command. A bare invocation signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignCommand {
    Sign,
    Lock,
    Unlock,
    Invalid,
}

impl SignCommand {
    /// Parse the argument vector: no argument signs; `lock` and `unlock`
    /// match case-insensitively; anything else is invalid.
    pub fn parse(args: &[&str]) -> Self {
        match args.first() {
            None => Self::Sign,
            Some(arg) if arg.eq_ignore_ascii_case("lock") => Self::Lock,
            Some(arg) if arg.eq_ignore_ascii_case("unlock") => Self::Unlock,
            Some(_) => Self::Invalid,
        }
    }
}

/// Prefix completion over the two subcommands.
pub fn complete_subcommand(prefix: &str) -> Vec<String> {
    let lowered = prefix.to_ascii_lowercase();
    SUBCOMMANDS
        .iter()
        .filter(|candidate| candidate.starts_with(&lowered))
        .map(|candidate| candidate.to_string())
        .collect()
}

/// Outcome of one dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    /// Message to show the invoking player, style codes translated.
    pub message: String,
    /// True when the held item was mutated and must be written back.
    pub item_changed: bool,
}

impl CommandReply {
    fn notice(message: String) -> Self {
        Self {
            message,
            item_changed: false,
        }
    }

    fn changed(message: String) -> Self {
        Self {
            message,
            item_changed: true,
        }
    }
}

/// Run one signing command for `player` against their held item.
///
/// Precondition checks run in a fixed order and resolve to reply messages;
/// only genuine ledger or collaborator failures surface as errors.
pub fn dispatch(
    command: SignCommand,
    player: &str,
    item: Option<&mut ItemRecord>,
    config: &Config,
    economy: &mut dyn Economy,
) -> Result<CommandReply, SignloreError> {
    let Some(item) = item else {
        return Ok(CommandReply::notice(config.message("air-cannot-have-lore")));
    };
    let signer_list = signers(item);
    let locked = is_locked(item);
    debug!(
        "dispatch {:?} for {} on item {} ({} signers, locked={})",
        command,
        player,
        item.id,
        signer_list.len(),
        locked
    );

    match command {
        SignCommand::Invalid => Ok(CommandReply::notice(config.message("invalid-argument"))),
        SignCommand::Lock => {
            if signer_list.is_empty() || !signer_list.iter().any(|name| name == player) {
                return Ok(CommandReply::notice(config.message("need-sign-to-lock")));
            }
            if locked {
                return Ok(CommandReply::notice(config.message("already-locked")));
            }
            lock(item)?;
            info!("{} locked item {}", player, item.id);
            Ok(CommandReply::changed(config.message("locked-item")))
        }
        SignCommand::Unlock => {
            if !locked {
                return Ok(CommandReply::notice(config.message("not-locked")));
            }
            if !signer_list.iter().any(|name| name == player) {
                return Ok(CommandReply::notice(
                    config.message("need-your-sign-to-lock"),
                ));
            }
            unlock(item)?;
            info!("{} unlocked item {}", player, item.id);
            Ok(CommandReply::changed(config.message("unlocked-item")))
        }
        SignCommand::Sign => {
            if locked {
                return Ok(CommandReply::notice(config.message("item-is-locked")));
            }
            if signer_list.iter().any(|name| name == player) {
                return Ok(CommandReply::notice(config.message("cannot-sign-twice")));
            }

            let price = f64::from(item.amount) * config.price_per_one;
            if price < 0.0 || economy.balance(player)? < price {
                return Ok(CommandReply::notice(config.message("not-enough-money")));
            }

            let format = SignatureFormat::new(&config.format);
            if !sign(item, player, |name| format.render(name))? {
                return Ok(CommandReply::notice(config.message("cannot-sign-twice")));
            }
            economy.withdraw(player, price)?;
            info!("{} signed item {} for {}", player, item.id, price);

            let message = config.message("success").replace("%price%", &price.to_string());
            Ok(CommandReply::changed(message))
        }
    }
}
