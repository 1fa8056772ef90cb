//! Item signature ledger and lock gate.
//!
//! Two cooperating components share one data surface, an item's lore lines
//! and its typed tag map. The signature ledger owns the signer list and the
//! contiguous signature block; the lock gate owns the lock flag and the
//! trailing marker line. Neither calls the other; the command layer reads
//! the lock state and signer list first and then invokes exactly one
//! operation per item.

pub mod errors;
pub mod lockgate;
pub mod signatures;
pub mod style;
pub mod types;

pub use errors::SignloreError;
pub use lockgate::{is_locked, lock, unlock};
pub use signatures::{sign, signers};
pub use style::{
    is_blank_line, translate_color_codes, SignatureFormat, LOCK_MARKER_LINE,
    PLAYER_NAME_PLACEHOLDER, RESET_LINE,
};
pub use types::{ItemRecord, LedgerState, TagMap, TagValue};
