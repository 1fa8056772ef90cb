//! Signature ledger: the ordered signer list and the contiguous signature
//! block inside an item's lore.
//!
//! The block is a run of one line per signer bracketed by blank separator
//! lines. Its position is tracked through the line-index tag recording where
//! the most recent signature landed; each new signature is inserted directly
//! after it, which keeps the block contiguous without storing its bounds.

use log::debug;

use super::errors::SignloreError;
use super::style::RESET_LINE;
use super::types::{ItemRecord, LedgerState};

/// Decode the ordered signer list recorded on `item`. Empty when the item
/// has never been signed. Pure read.
pub fn signers(item: &ItemRecord) -> Vec<String> {
    LedgerState::decode(&item.tags)
        .map(|state| state.signers)
        .unwrap_or_default()
}

/// Record `signer` on the item: one formatted lore line inserted into the
/// signature block plus an entry appended to the signer list.
///
/// Returns `Ok(false)` without mutating anything when the signer already
/// appears in the list. `signature_for` produces the formatted lore line for
/// a signer's name; the ledger treats it as opaque.
pub fn sign(
    item: &mut ItemRecord,
    signer: &str,
    signature_for: impl Fn(&str) -> String,
) -> Result<bool, SignloreError> {
    let mut state = LedgerState::decode(&item.tags)?;
    if state.signers.iter().any(|name| name == signer) {
        return Ok(false);
    }

    let mut lore = item.lore.clone();
    match state.last_sign_line {
        Some(previous) => {
            let at = previous as usize + 1;
            if at > lore.len() {
                return Err(SignloreError::InvariantViolation(format!(
                    "recorded signature line {} lies outside the {}-line lore of item {}",
                    previous,
                    lore.len(),
                    item.id
                )));
            }
            lore.insert(at, signature_for(signer));
            state.last_sign_line = Some(at as u32);
        }
        None => {
            // First signature: open the block with a separator, then close it.
            lore.push(RESET_LINE.to_string());
            let at = lore.len();
            lore.push(signature_for(signer));
            lore.push(RESET_LINE.to_string());
            state.last_sign_line = Some(at as u32);
        }
    }
    state.signers.push(signer.to_string());

    debug!(
        "item {}: signature by {} at lore line {}",
        item.id,
        signer,
        state.last_sign_line.unwrap_or_default()
    );

    // Staged lore and tags land together; no partial write is observable.
    item.lore = lore;
    state.apply(&mut item.tags);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{TagValue, TAG_SIGN_LINE, TAG_SIGNERS};

    fn plain_signature(name: &str) -> String {
        format!("§7§o{name}")
    }

    fn test_item() -> ItemRecord {
        ItemRecord::new("plush_bear", "Plush Bear", 1)
    }

    #[test]
    fn first_signature_opens_a_bracketed_block() {
        let mut item = test_item();
        let added = sign(&mut item, "Alice", plain_signature).expect("sign");

        assert!(added);
        assert_eq!(
            item.lore,
            vec![
                RESET_LINE.to_string(),
                plain_signature("Alice"),
                RESET_LINE.to_string(),
            ]
        );
        assert_eq!(item.tags.get(TAG_SIGN_LINE), Some(&TagValue::Int(1)));
        assert_eq!(signers(&item), vec!["Alice".to_string()]);
    }

    #[test]
    fn second_signature_extends_the_block() {
        let mut item = test_item();
        sign(&mut item, "Alice", plain_signature).expect("sign");
        sign(&mut item, "Bob", plain_signature).expect("sign");

        assert_eq!(
            item.lore,
            vec![
                RESET_LINE.to_string(),
                plain_signature("Alice"),
                plain_signature("Bob"),
                RESET_LINE.to_string(),
            ]
        );
        assert_eq!(item.tags.get(TAG_SIGN_LINE), Some(&TagValue::Int(2)));
        assert_eq!(
            signers(&item),
            vec!["Alice".to_string(), "Bob".to_string()]
        );
    }

    #[test]
    fn duplicate_signer_is_a_no_op() {
        let mut item = test_item();
        assert!(sign(&mut item, "Alice", plain_signature).expect("sign"));
        let lore_before = item.lore.clone();
        let tags_before = item.tags.clone();

        assert!(!sign(&mut item, "Alice", plain_signature).expect("sign"));
        assert_eq!(item.lore, lore_before);
        assert_eq!(item.tags, tags_before);
        assert_eq!(signers(&item), vec!["Alice".to_string()]);
    }

    #[test]
    fn signers_keep_signing_order() {
        let mut item = test_item();
        let names = ["Mallory", "Alice", "Eve", "Bob"];
        for name in names {
            assert!(sign(&mut item, name, plain_signature).expect("sign"));
        }
        assert_eq!(signers(&item), names.map(String::from).to_vec());
    }

    #[test]
    fn block_stays_contiguous_between_separators() {
        let mut item = test_item();
        let names = ["Alice", "Bob", "Carol"];
        for name in names {
            sign(&mut item, name, plain_signature).expect("sign");
        }

        assert_eq!(item.lore.len(), names.len() + 2);
        assert_eq!(item.lore[0], RESET_LINE);
        assert_eq!(item.lore[names.len() + 1], RESET_LINE);
        for (idx, name) in names.iter().enumerate() {
            assert_eq!(item.lore[idx + 1], plain_signature(name));
        }
    }

    #[test]
    fn block_appends_after_existing_lore() {
        let mut item = test_item();
        item.lore = vec!["A well-loved bear.".to_string(), "Slightly torn.".to_string()];
        sign(&mut item, "Alice", plain_signature).expect("sign");

        assert_eq!(
            item.lore,
            vec![
                "A well-loved bear.".to_string(),
                "Slightly torn.".to_string(),
                RESET_LINE.to_string(),
                plain_signature("Alice"),
                RESET_LINE.to_string(),
            ]
        );
        assert_eq!(item.tags.get(TAG_SIGN_LINE), Some(&TagValue::Int(3)));
    }

    #[test]
    fn out_of_range_line_tag_is_rejected() {
        let mut item = test_item();
        item.lore = vec![RESET_LINE.to_string()];
        item.tags
            .insert(TAG_SIGN_LINE.to_string(), TagValue::Int(5));

        let err = sign(&mut item, "Alice", plain_signature).expect_err("corrupted tag");
        assert!(matches!(err, SignloreError::InvariantViolation(_)));
        assert_eq!(item.lore, vec![RESET_LINE.to_string()]);
        assert!(!item.tags.contains_key(TAG_SIGNERS));
    }
}
