//! Lock gate: freezes and reopens an item's signature block.
//!
//! Locking is a two-state machine per item, UNLOCKED and LOCKED. The lock
//! tag is the source of truth; the decorative marker line trailing the lore
//! is a visual side effect of it.

use log::debug;

use super::errors::SignloreError;
use super::style::{is_blank_line, LOCK_MARKER_LINE, RESET_LINE};
use super::types::{ItemRecord, LedgerState, TagValue, TAG_LOCKED};

/// True iff the lock tag carries the locked value. Absence or any other
/// value reads as unlocked. Pure read.
pub fn is_locked(item: &ItemRecord) -> bool {
    matches!(item.tags.get(TAG_LOCKED), Some(TagValue::Byte(1)))
}

/// Freeze the item's signatures: set the lock flag and append the decorative
/// marker line. Locking an already locked item is caller misuse and reported
/// as an invariant violation.
pub fn lock(item: &mut ItemRecord) -> Result<(), SignloreError> {
    if is_locked(item) {
        return Err(SignloreError::InvariantViolation(format!(
            "item {} is already locked",
            item.id
        )));
    }

    let mut state = LedgerState::decode(&item.tags)?;
    state.locked = true;

    let mut lore = item.lore.clone();
    // A blank opening separator implies the trailing line is the closing
    // separator; the marker takes its place.
    if lore.first().map(|line| is_blank_line(line)).unwrap_or(false) {
        lore.pop();
    }
    lore.push(LOCK_MARKER_LINE.to_string());

    debug!("item {}: locked with {} lore lines", item.id, lore.len());
    item.lore = lore;
    state.apply(&mut item.tags);
    Ok(())
}

/// Reopen the item's signatures: clear the lock flag, remove the trailing
/// marker line, and close the lore with a blank reset line.
///
/// Unlocking an unlocked item, an item with no lore lines, or an item whose
/// trailing line is not the lock marker indicates caller misuse or
/// out-of-band lore edits; all three are invariant violations.
pub fn unlock(item: &mut ItemRecord) -> Result<(), SignloreError> {
    if !is_locked(item) {
        return Err(SignloreError::InvariantViolation(format!(
            "item {} is not locked",
            item.id
        )));
    }

    let mut state = LedgerState::decode(&item.tags)?;
    state.locked = false;

    let mut lore = item.lore.clone();
    let trailing = lore.pop().ok_or_else(|| {
        SignloreError::InvariantViolation(format!(
            "item {} is locked but has no lore lines",
            item.id
        ))
    })?;
    if trailing != LOCK_MARKER_LINE {
        return Err(SignloreError::InvariantViolation(format!(
            "trailing lore line {trailing:?} of item {} is not the lock marker",
            item.id
        )));
    }
    lore.push(RESET_LINE.to_string());

    debug!("item {}: unlocked", item.id);
    item.lore = lore;
    state.apply(&mut item.tags);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::signatures::sign;

    fn plain_signature(name: &str) -> String {
        format!("§7§o{name}")
    }

    fn signed_item(names: &[&str]) -> ItemRecord {
        let mut item = ItemRecord::new("plush_bear", "Plush Bear", 1);
        for name in names {
            sign(&mut item, name, plain_signature).expect("sign");
        }
        item
    }

    #[test]
    fn untagged_item_reads_unlocked() {
        let item = ItemRecord::new("plush_bear", "Plush Bear", 1);
        assert!(!is_locked(&item));
    }

    #[test]
    fn lock_replaces_trailing_separator_with_marker() {
        let mut item = signed_item(&["Alice", "Bob"]);
        let lines_before = item.lore.len();

        lock(&mut item).expect("lock");

        assert!(is_locked(&item));
        assert_eq!(item.lore.len(), lines_before);
        assert_eq!(item.lore.last().map(String::as_str), Some(LOCK_MARKER_LINE));
        assert_eq!(item.lore[0], RESET_LINE);
    }

    #[test]
    fn lock_keeps_lore_without_blank_opener() {
        let mut item = ItemRecord::new("plush_bear", "Plush Bear", 1);
        item.lore = vec!["A well-loved bear.".to_string()];

        lock(&mut item).expect("lock");

        assert_eq!(
            item.lore,
            vec![
                "A well-loved bear.".to_string(),
                LOCK_MARKER_LINE.to_string(),
            ]
        );
    }

    #[test]
    fn lock_and_unlock_round_trip_restores_the_block() {
        let mut item = signed_item(&["Alice"]);
        let lore_before = item.lore.clone();

        lock(&mut item).expect("lock");
        unlock(&mut item).expect("unlock");

        assert!(!is_locked(&item));
        assert_eq!(item.lore, lore_before);
    }

    #[test]
    fn double_lock_is_an_invariant_violation() {
        let mut item = signed_item(&["Alice"]);
        lock(&mut item).expect("lock");

        let err = lock(&mut item).expect_err("double lock");
        assert!(matches!(err, SignloreError::InvariantViolation(_)));
        assert!(is_locked(&item));
    }

    #[test]
    fn unlock_of_unlocked_item_is_an_invariant_violation() {
        let mut item = signed_item(&["Alice"]);
        let err = unlock(&mut item).expect_err("not locked");
        assert!(matches!(err, SignloreError::InvariantViolation(_)));
    }

    #[test]
    fn unlock_with_no_lore_is_an_invariant_violation() {
        let mut item = ItemRecord::new("plush_bear", "Plush Bear", 1);
        item.tags
            .insert(TAG_LOCKED.to_string(), TagValue::Byte(1));

        let err = unlock(&mut item).expect_err("no lore to remove");
        assert!(matches!(err, SignloreError::InvariantViolation(_)));
        assert!(item.lore.is_empty());
    }

    #[test]
    fn unlock_with_foreign_trailing_line_is_an_invariant_violation() {
        let mut item = signed_item(&["Alice"]);
        lock(&mut item).expect("lock");
        item.lore.push("scribbled on".to_string());

        let err = unlock(&mut item).expect_err("foreign trailing line");
        assert!(matches!(err, SignloreError::InvariantViolation(_)));
        assert!(is_locked(&item));
    }

    #[test]
    fn lock_state_follows_the_two_state_machine() {
        let mut item = signed_item(&["Alice"]);
        assert!(!is_locked(&item));

        lock(&mut item).expect("lock");
        assert!(is_locked(&item));

        unlock(&mut item).expect("unlock");
        assert!(!is_locked(&item));
    }
}
