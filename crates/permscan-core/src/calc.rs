//! Bitmask aggregation over a discovered permission set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::permissions::bit_for;

/// The calculated mask plus the valid/invalid partition of the input set.
///
/// The mask is a `u64` internally (bit 40 needs 41 bits of precision) and
/// reported as a decimal string, which is how the permission integer
/// travels in invite URLs and the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaskResult {
    /// Decimal rendering of the mask.
    pub permission_integer: String,
    /// Names that resolved to a table bit, sorted.
    pub valid_permissions: Vec<String>,
    /// Names with no table entry, sorted. These contribute no bits.
    pub invalid_permissions: Vec<String>,
    /// The raw mask value.
    #[serde(skip)]
    pub mask: u64,
}

/// OR together the bits of every valid name in `names`.
pub fn calculate<'a, I>(names: I) -> MaskResult
where
    I: IntoIterator<Item = &'a String>,
{
    let mut mask = 0u64;
    let mut valid = BTreeSet::new();
    let mut invalid = BTreeSet::new();

    for name in names {
        match bit_for(name) {
            Some(bit) => {
                mask |= bit;
                valid.insert(name.clone());
            }
            None => {
                invalid.insert(name.clone());
            }
        }
    }

    MaskResult {
        permission_integer: mask.to_string(),
        valid_permissions: valid.into_iter().collect(),
        invalid_permissions: invalid.into_iter().collect(),
        mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn kick_and_ban_or_to_six() {
        let set = names(&["KICK_MEMBERS", "BAN_MEMBERS"]);
        let result = calculate(&set);
        assert_eq!(result.permission_integer, "6");
        // valid_permissions comes back sorted, not in discovery order
        assert_eq!(
            result.valid_permissions,
            names(&["BAN_MEMBERS", "KICK_MEMBERS"])
        );
        assert!(result.invalid_permissions.is_empty());
    }

    #[test]
    fn unknown_name_is_invalid_and_contributes_nothing() {
        let set = names(&["KICK_MEMBERS", "FOO_BAR"]);
        let result = calculate(&set);
        assert_eq!(result.permission_integer, "2");
        assert_eq!(result.valid_permissions, names(&["KICK_MEMBERS"]));
        assert_eq!(result.invalid_permissions, names(&["FOO_BAR"]));
    }

    #[test]
    fn empty_set_is_zero() {
        let result = calculate(&[]);
        assert_eq!(result.permission_integer, "0");
        assert!(result.valid_permissions.is_empty());
        assert!(result.invalid_permissions.is_empty());
    }

    #[test]
    fn high_bits_render_past_32_bit_range() {
        let set = names(&["MODERATE_MEMBERS"]);
        let result = calculate(&set);
        assert_eq!(result.permission_integer, (1u64 << 40).to_string());
    }

    #[test]
    fn duplicate_names_do_not_double_count() {
        let set = names(&["SEND_MESSAGES", "SEND_MESSAGES"]);
        let result = calculate(&set);
        assert_eq!(result.mask, 1 << 11);
        assert_eq!(result.valid_permissions.len(), 1);
    }
}
