//! Resolves a medication profile against the interaction index.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use interact_model::{InteractionRecord, MedicationPairKey, fold_name};

use crate::index::InteractionIndex;

/// Interactions found for a profile and the names that matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMatch {
    /// One record per canonical pair, in pair order.
    pub interactions: Vec<InteractionRecord>,
    /// Case-folded profile names with no knowledge-base entry.
    pub not_found: BTreeSet<String>,
}

impl ProfileMatch {
    pub fn all_found(&self) -> bool {
        self.not_found.is_empty()
    }
}

/// Looks up every profile medication and collects its documented interactions.
///
/// Facts with a blank partner or description are skipped, as are facts whose
/// partner is the queried medication itself. When the same canonical pair is
/// reported more than once, the first description seen is kept.
pub fn match_profile<S: AsRef<str>>(profile: &[S], index: &InteractionIndex) -> ProfileMatch {
    let mut records: BTreeMap<MedicationPairKey, InteractionRecord> = BTreeMap::new();
    let mut not_found = BTreeSet::new();

    for name in profile {
        let query = fold_name(name.as_ref().trim());
        if query.is_empty() {
            continue;
        }
        let Some(hit) = index.lookup_match(&query) else {
            debug!(medication = %query, "no knowledge-base entry");
            not_found.insert(query);
            continue;
        };
        debug!(
            medication = %query,
            entry = %hit.entry.primary_name,
            matched_by = %hit.kind,
            facts = hit.entry.interactions.len(),
            "profile medication resolved"
        );
        for fact in &hit.entry.interactions {
            let partner = fact.partner.trim();
            let description = fact.description.trim();
            if partner.is_empty() || description.is_empty() {
                continue;
            }
            let Some(pair) = MedicationPairKey::new(&query, &fold_name(partner)) else {
                continue;
            };
            if let Entry::Vacant(slot) = records.entry(pair) {
                let record = InteractionRecord::new(slot.key().clone(), description);
                slot.insert(record);
            }
        }
    }

    info!(
        profile = profile.len(),
        interactions = records.len(),
        not_found = not_found.len(),
        "profile matched"
    );
    ProfileMatch {
        interactions: records.into_values().collect(),
        not_found,
    }
}
