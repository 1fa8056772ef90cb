//! Configuration: pricing, the signature template, and reply messages.
//!
//! The file is TOML with kebab-case keys. Every field has a compiled-in
//! default, and message lookup falls back per key so a config file only
//! needs to name what it overrides.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ledger::errors::SignloreError;
use crate::ledger::style::{translate_color_codes, PLAYER_NAME_PLACEHOLDER};

const DEFAULT_PRICE_PER_ONE: f64 = 100.0;
const DEFAULT_FORMAT: &str = "&7&o%player_name%";

/// Built-in reply messages, used when the file does not override a key.
const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("player-only", "&cOnly players can sign items."),
    ("air-cannot-have-lore", "&cHold the item you want to sign."),
    ("need-sign-to-lock", "&cSign the item before locking it."),
    ("already-locked", "&cThis item is already locked."),
    ("not-locked", "&cThis item is not locked."),
    ("need-your-sign-to-lock", "&cOnly a signer can unlock this item."),
    ("locked-item", "&aLocked. The signatures are now frozen."),
    ("unlocked-item", "&aUnlocked. The item can be signed again."),
    ("invalid-argument", "&cUsage: signiture [lock|unlock]"),
    ("item-is-locked", "&cThis item is locked; its signatures are frozen."),
    ("cannot-sign-twice", "&cYou cannot sign the same item twice."),
    ("not-enough-money", "&cYou cannot afford the signing fee."),
    ("success", "&aSigned! &7%price% was withdrawn."),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Fee charged per item in the signed stack.
    pub price_per_one: f64,
    /// Signature line template; `%player_name%` is replaced by the signer.
    pub format: String,
    /// Reply message overrides, keyed like the built-in defaults.
    pub messages: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_per_one: DEFAULT_PRICE_PER_ONE,
            format: DEFAULT_FORMAT.to_string(),
            messages: HashMap::new(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SignloreError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to `path`, overwriting nothing else.
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<(), SignloreError> {
        let rendered = toml::to_string_pretty(&Self::default())
            .map_err(|err| SignloreError::Config(err.to_string()))?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SignloreError> {
        if !self.price_per_one.is_finite() {
            return Err(SignloreError::Config(
                "price-per-one must be a finite number".to_string(),
            ));
        }
        if !self.format.contains(PLAYER_NAME_PLACEHOLDER) {
            return Err(SignloreError::Config(format!(
                "format must contain {PLAYER_NAME_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    /// Resolve a reply message: the file override first, then the built-in
    /// default, then the key itself. `&` style codes are translated on read.
    pub fn message(&self, key: &str) -> String {
        let raw = self
            .messages
            .get(key)
            .map(String::as_str)
            .or_else(|| {
                DEFAULT_MESSAGES
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, text)| *text)
            })
            .unwrap_or(key);
        translate_color_codes(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messages_resolve_and_translate() {
        let config = Config::default();
        assert_eq!(
            config.message("cannot-sign-twice"),
            "§cYou cannot sign the same item twice."
        );
    }

    #[test]
    fn file_overrides_win_over_defaults() {
        let mut config = Config::default();
        config
            .messages
            .insert("not-locked".to_string(), "&7Nothing to unlock.".to_string());
        assert_eq!(config.message("not-locked"), "§7Nothing to unlock.");
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key() {
        let config = Config::default();
        assert_eq!(config.message("no-such-key"), "no-such-key");
    }

    #[test]
    fn config_file_round_trips() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        Config::create_default(&path).expect("write default");

        let loaded = Config::load(&path).expect("load");
        assert_eq!(loaded.price_per_one, DEFAULT_PRICE_PER_ONE);
        assert_eq!(loaded.format, DEFAULT_FORMAT);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: Config = toml::from_str("price-per-one = 25.5").expect("parse");
        assert_eq!(config.price_per_one, 25.5);
        assert_eq!(config.format, DEFAULT_FORMAT);
    }

    #[test]
    fn format_without_placeholder_is_rejected() {
        let config: Config = toml::from_str(r#"format = "anonymous""#).expect("parse");
        let err = config.validate().expect_err("invalid format");
        assert!(matches!(err, SignloreError::Config(_)));
    }
}
