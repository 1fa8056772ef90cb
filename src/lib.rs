//! # Signlore - Item Signature Ledger
//!
//! Signlore lets a player sign a held item, recording their name into the
//! item's lore and an internal tag store, and lock a signed item so its
//! signatures become immutable.
//!
//! ## Features
//!
//! - **Signature Ledger**: Ordered, duplicate-free signer list kept in a
//!   delimited tag, rendered as a contiguous block of lore lines bracketed
//!   by blank separators.
//! - **Lock Gate**: A two-state lock per item with a decorative marker
//!   line; the tag is the source of truth, the line a visual side effect.
//! - **Command Layer**: Parsing and dispatch for the signing command with
//!   configurable reply messages and a payment seam.
//! - **Persistence**: Sled-backed store for held items and wallet balances.
//!
//! ## Quick Start
//!
//! ```rust
//! use signlore::ledger::types::ItemRecord;
//! use signlore::ledger::{is_locked, lock, sign, signers};
//!
//! # fn main() -> Result<(), signlore::ledger::SignloreError> {
//! let mut item = ItemRecord::new("plush_bear", "Plush Bear", 1);
//! assert!(sign(&mut item, "Alice", |name| format!("~ {name} ~"))?);
//! assert_eq!(signers(&item), vec!["Alice".to_string()]);
//!
//! lock(&mut item)?;
//! assert!(is_locked(&item));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger`] - The signature ledger and lock gate core
//! - [`commands`] - Signing command parsing and dispatch
//! - [`config`] - Pricing, signature template, and reply messages
//! - [`economy`] - Payment seam charged before a signature is recorded
//! - [`storage`] - Held item and wallet persistence

pub mod commands;
pub mod config;
pub mod economy;
pub mod ledger;
pub mod storage;
