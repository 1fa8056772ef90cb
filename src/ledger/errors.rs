use thiserror::Error;

/// Errors that can arise while interacting with the signature ledger and its
/// storage layer.
#[derive(Debug, Error)]
pub enum SignloreError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, config files, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around TOML parse errors from the config loader.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Caller misuse or corrupted item state: locking twice, unlocking an
    /// item whose trailing line is not the lock marker, or a recorded
    /// signature line index that points outside the lore.
    #[error("ledger invariant violated: {0}")]
    InvariantViolation(String),

    /// Withdrawal exceeding the payer's balance.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Invalid configuration values.
    #[error("invalid config: {0}")]
    Config(String),
}
