//! Sled-backed persistence for held items and wallet balances.
//!
//! One tree per concern; records are bincode-encoded and carry a schema
//! version checked on decode. Every write flushes so state survives an
//! abrupt exit between CLI invocations.

use std::path::{Path, PathBuf};

use sled::IVec;

use crate::economy::Economy;
use crate::ledger::errors::SignloreError;
use crate::ledger::types::{ItemRecord, ITEM_SCHEMA_VERSION};

const TREE_ITEMS: &str = "signlore_items";
const TREE_WALLETS: &str = "signlore_wallets";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct SignStoreBuilder {
    path: PathBuf,
}

impl SignStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<SignStore, SignloreError> {
        SignStore::open(self.path)
    }
}

/// Persistent store mapping each player to their held item and wallet.
pub struct SignStore {
    _db: sled::Db,
    items: sled::Tree,
    wallets: sled::Tree,
}

impl SignStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SignloreError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let items = db.open_tree(TREE_ITEMS)?;
        let wallets = db.open_tree(TREE_WALLETS)?;
        Ok(Self {
            _db: db,
            items,
            wallets,
        })
    }

    fn item_key(player: &str) -> Vec<u8> {
        format!("held:{}", player.to_ascii_lowercase()).into_bytes()
    }

    fn wallet_key(player: &str) -> Vec<u8> {
        format!("wallets:{}", player.to_ascii_lowercase()).into_bytes()
    }

    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, SignloreError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, SignloreError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    /// Put an item into a player's hand, replacing whatever was there.
    pub fn put_held_item(&self, player: &str, mut item: ItemRecord) -> Result<(), SignloreError> {
        item.schema_version = ITEM_SCHEMA_VERSION;
        let key = Self::item_key(player);
        let bytes = Self::serialize(&item)?;
        self.items.insert(key, bytes)?;
        self.items.flush()?;
        Ok(())
    }

    /// Fetch a player's held item. `None` means an empty hand, which is a
    /// normal state, not an error.
    pub fn get_held_item(&self, player: &str) -> Result<Option<ItemRecord>, SignloreError> {
        let key = Self::item_key(player);
        let Some(bytes) = self.items.get(key)? else {
            return Ok(None);
        };
        let record: ItemRecord = Self::deserialize(bytes)?;
        if record.schema_version != ITEM_SCHEMA_VERSION {
            return Err(SignloreError::SchemaMismatch {
                entity: "item",
                expected: ITEM_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(Some(record))
    }

    /// List all players currently holding an item.
    pub fn list_holders(&self) -> Result<Vec<String>, SignloreError> {
        let mut holders = Vec::new();
        for entry in self.items.scan_prefix(b"held:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(player) = text.strip_prefix("held:") {
                holders.push(player.to_string());
            }
        }
        Ok(holders)
    }

    pub fn set_balance(&self, player: &str, amount: f64) -> Result<(), SignloreError> {
        let key = Self::wallet_key(player);
        let bytes = Self::serialize(&amount)?;
        self.wallets.insert(key, bytes)?;
        self.wallets.flush()?;
        Ok(())
    }
}

impl Economy for SignStore {
    fn balance(&self, player: &str) -> Result<f64, SignloreError> {
        let key = Self::wallet_key(player);
        match self.wallets.get(key)? {
            Some(bytes) => Self::deserialize(bytes),
            None => Ok(0.0),
        }
    }

    fn withdraw(&mut self, player: &str, amount: f64) -> Result<(), SignloreError> {
        let balance = self.balance(player)?;
        if balance < amount {
            return Err(SignloreError::InsufficientFunds);
        }
        self.set_balance(player, balance - amount)
    }
}
