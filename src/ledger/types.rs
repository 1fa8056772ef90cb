use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::SignloreError;

pub const ITEM_SCHEMA_VERSION: u8 = 1;

/// Tag key holding the delimited signer list.
pub const TAG_SIGNERS: &str = "signplayers";
/// Tag key holding the lore index of the most recently inserted signature.
pub const TAG_SIGN_LINE: &str = "signloreline";
/// Tag key holding the lock flag.
pub const TAG_LOCKED: &str = "signlock";

const SIGNER_DELIMITER: char = ',';

/// Primitive tag value types an item can carry. Mirrors the three types the
/// ledger writes: a text signer list, an integer line index, and a byte flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagValue {
    Text(String),
    Int(i32),
    Byte(u8),
}

/// Typed key-value bag scoped to one item. Keys the ledger does not own pass
/// through untouched.
pub type TagMap = BTreeMap<String, TagValue>;

/// A held item: its ordered lore lines plus the tag bag scoped to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    /// Stack size; the signing fee scales with it.
    pub amount: u32,
    pub lore: Vec<String>,
    #[serde(default)]
    pub tags: TagMap,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl ItemRecord {
    pub fn new(id: &str, name: &str, amount: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            lore: Vec::new(),
            tags: TagMap::new(),
            created_at: Utc::now(),
            schema_version: ITEM_SCHEMA_VERSION,
        }
    }
}

/// Strongly-typed view of the three ledger tags, decoded once per operation
/// and re-encoded in a single write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    /// Signing order, no duplicates.
    pub signers: Vec<String>,
    /// Lore index of the most recently inserted signature line.
    pub last_sign_line: Option<u32>,
    pub locked: bool,
}

impl LedgerState {
    /// Decode the ledger tags from an item's tag map. A signer-list or
    /// line-index tag holding the wrong primitive type is corrupted state;
    /// the lock tag reads as unlocked for anything but `Byte(1)`.
    pub fn decode(tags: &TagMap) -> Result<Self, SignloreError> {
        let signers = match tags.get(TAG_SIGNERS) {
            None => Vec::new(),
            Some(TagValue::Text(raw)) => raw
                .split(SIGNER_DELIMITER)
                .map(str::to_string)
                .collect(),
            Some(other) => {
                return Err(SignloreError::InvariantViolation(format!(
                    "tag {TAG_SIGNERS} holds {other:?}, expected text"
                )))
            }
        };

        let last_sign_line = match tags.get(TAG_SIGN_LINE) {
            None => None,
            Some(TagValue::Int(line)) if *line >= 0 => Some(*line as u32),
            Some(other) => {
                return Err(SignloreError::InvariantViolation(format!(
                    "tag {TAG_SIGN_LINE} holds {other:?}, expected a non-negative integer"
                )))
            }
        };

        let locked = matches!(tags.get(TAG_LOCKED), Some(TagValue::Byte(1)));

        Ok(Self {
            signers,
            last_sign_line,
            locked,
        })
    }

    /// Re-encode this view into the tag map. Empty or absent values remove
    /// their keys: tag presence stays the source of truth.
    pub fn apply(&self, tags: &mut TagMap) {
        if self.signers.is_empty() {
            tags.remove(TAG_SIGNERS);
        } else {
            let joined = self
                .signers
                .join(&SIGNER_DELIMITER.to_string());
            tags.insert(TAG_SIGNERS.to_string(), TagValue::Text(joined));
        }

        match self.last_sign_line {
            Some(line) => {
                tags.insert(TAG_SIGN_LINE.to_string(), TagValue::Int(line as i32));
            }
            None => {
                tags.remove(TAG_SIGN_LINE);
            }
        }

        if self.locked {
            tags.insert(TAG_LOCKED.to_string(), TagValue::Byte(1));
        } else {
            tags.remove(TAG_LOCKED);
        }
    }
}
