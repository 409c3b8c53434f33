//! Canonical, case-insensitive medication pair keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;

use serde::{Serialize, Serializer};

/// Separator placed between the two names of a rendered pair.
pub const PAIR_SEPARATOR: char = '_';

/// Case-folds a medication name for comparison.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Unordered pair of distinct medications in canonical order.
///
/// The names are kept with the spelling they were first seen with, but
/// equality, hashing and ordering only look at the case-folded forms, so
/// `("Aspirin", "warfarin")` and `("WARFARIN", "aspirin")` are the same key.
/// Keys order by the case-folded rendered string (`low_high`).
#[derive(Debug, Clone)]
pub struct MedicationPairKey {
    low: String,
    high: String,
    low_folded: String,
    high_folded: String,
}

impl MedicationPairKey {
    /// Builds the canonical key for two medication names.
    ///
    /// Returns `None` when the names are equal ignoring case; a medication
    /// never pairs with itself.
    pub fn new(first: &str, second: &str) -> Option<Self> {
        let first_folded = fold_name(first);
        let second_folded = fold_name(second);
        match first_folded.cmp(&second_folded) {
            Ordering::Equal => None,
            Ordering::Less => Some(Self {
                low: first.to_string(),
                high: second.to_string(),
                low_folded: first_folded,
                high_folded: second_folded,
            }),
            Ordering::Greater => Some(Self {
                low: second.to_string(),
                high: first.to_string(),
                low_folded: second_folded,
                high_folded: first_folded,
            }),
        }
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    pub fn high(&self) -> &str {
        &self.high
    }

    fn folded_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.low_folded
            .bytes()
            .chain(iter::once(PAIR_SEPARATOR as u8))
            .chain(self.high_folded.bytes())
    }
}

impl PartialEq for MedicationPairKey {
    fn eq(&self, other: &Self) -> bool {
        self.low_folded == other.low_folded && self.high_folded == other.high_folded
    }
}

impl Eq for MedicationPairKey {}

impl Hash for MedicationPairKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.low_folded.hash(state);
        self.high_folded.hash(state);
    }
}

impl Ord for MedicationPairKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded_bytes()
            .cmp(other.folded_bytes())
            .then_with(|| self.low_folded.cmp(&other.low_folded))
            .then_with(|| self.high_folded.cmp(&other.high_folded))
    }
}

impl PartialOrd for MedicationPairKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MedicationPairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PAIR_SEPARATOR}{}", self.low, self.high)
    }
}

impl Serialize for MedicationPairKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn orders_names_case_insensitively() {
        let key = MedicationPairKey::new("warfarin", "Aspirin").unwrap();
        assert_eq!(key.low(), "Aspirin");
        assert_eq!(key.high(), "warfarin");
        assert_eq!(key.to_string(), "Aspirin_warfarin");
    }

    #[test]
    fn argument_order_does_not_matter() {
        let forward = MedicationPairKey::new("B", "a").unwrap();
        let backward = MedicationPairKey::new("a", "B").unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.to_string(), backward.to_string());
    }

    #[test]
    fn case_variants_collapse() {
        let mut set = BTreeSet::new();
        set.insert(MedicationPairKey::new("Heparin", "Insulin").unwrap());
        set.insert(MedicationPairKey::new("HEPARIN", "insulin").unwrap());
        assert_eq!(set.len(), 1);
        // First spelling is kept.
        assert_eq!(set.iter().next().unwrap().to_string(), "Heparin_Insulin");
    }

    #[test]
    fn self_pair_is_rejected() {
        assert!(MedicationPairKey::new("Insulin", "insulin").is_none());
        assert!(MedicationPairKey::new("X", "X").is_none());
    }

    #[test]
    fn sorts_by_rendered_string() {
        let mut keys = vec![
            MedicationPairKey::new("b", "c").unwrap(),
            MedicationPairKey::new("A", "z").unwrap(),
            MedicationPairKey::new("a", "C").unwrap(),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["a_C", "A_z", "b_c"]);
    }

    #[test]
    fn serializes_as_rendered_string() {
        let key = MedicationPairKey::new("y", "X").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"X_y\"");
    }
}
