//! Payment seam for the signing fee.
//!
//! The command layer charges the signer before recording a signature. The
//! trait keeps the ledger independent of where balances actually live; the
//! CLI backs it with the sled store, tests with the in-memory table.

use std::collections::HashMap;

use crate::ledger::errors::SignloreError;

/// Balance source and sink for signing fees.
pub trait Economy {
    fn balance(&self, player: &str) -> Result<f64, SignloreError>;

    /// Withdraw `amount` from the player's balance. Withdrawing more than
    /// the balance fails with `InsufficientFunds` and changes nothing.
    fn withdraw(&mut self, player: &str, amount: f64) -> Result<(), SignloreError>;
}

/// In-memory wallet table for tests and offline tools.
#[derive(Debug, Default)]
pub struct MemoryEconomy {
    balances: HashMap<String, f64>,
}

impl MemoryEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(player: &str, amount: f64) -> Self {
        let mut economy = Self::new();
        economy.deposit(player, amount);
        economy
    }

    pub fn deposit(&mut self, player: &str, amount: f64) {
        *self.balances.entry(player.to_string()).or_insert(0.0) += amount;
    }
}

impl Economy for MemoryEconomy {
    fn balance(&self, player: &str) -> Result<f64, SignloreError> {
        Ok(self.balances.get(player).copied().unwrap_or(0.0))
    }

    fn withdraw(&mut self, player: &str, amount: f64) -> Result<(), SignloreError> {
        let balance = self.balances.entry(player.to_string()).or_insert(0.0);
        if *balance < amount {
            return Err(SignloreError::InsufficientFunds);
        }
        *balance -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdraw_reduces_balance() {
        let mut economy = MemoryEconomy::with_balance("alice", 250.0);
        economy.withdraw("alice", 100.0).expect("withdraw");
        assert_eq!(economy.balance("alice").expect("balance"), 150.0);
    }

    #[test]
    fn overdraft_fails_and_changes_nothing() {
        let mut economy = MemoryEconomy::with_balance("alice", 50.0);
        let err = economy.withdraw("alice", 100.0).expect_err("overdraft");
        assert!(matches!(err, SignloreError::InsufficientFunds));
        assert_eq!(economy.balance("alice").expect("balance"), 50.0);
    }

    #[test]
    fn unknown_player_has_zero_balance() {
        let economy = MemoryEconomy::new();
        assert_eq!(economy.balance("nobody").expect("balance"), 0.0);
    }
}
