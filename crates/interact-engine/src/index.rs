//! In-memory lookup over the interaction knowledge base.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use interact_model::{KnowledgeBaseEntry, fold_name};

/// How a query resolved to a knowledge-base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The query equals the entry's primary name, ignoring case.
    PrimaryName,
    /// The query is contained in one of the entry's synonyms, ignoring case.
    Synonym,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryName => f.write_str("primary name"),
            Self::Synonym => f.write_str("synonym"),
        }
    }
}

/// A successful lookup.
#[derive(Debug, Clone, Copy)]
pub struct IndexMatch<'a> {
    pub entry: &'a KnowledgeBaseEntry,
    pub kind: MatchKind,
    /// Position of the entry in document order.
    pub position: usize,
}

/// Read-only index over knowledge-base entries, built once per run.
///
/// A query matches an entry when its case-folded form equals the entry's
/// case-folded primary name, or is a substring of one of its case-folded
/// synonyms. When several entries match, the one earliest in document order
/// wins, whichever rule matched it.
#[derive(Debug, Clone, Default)]
pub struct InteractionIndex {
    entries: Vec<KnowledgeBaseEntry>,
    folded_synonyms: Vec<Vec<String>>,
    by_primary: HashMap<String, usize>,
    by_synonym: HashMap<String, usize>,
}

impl InteractionIndex {
    pub fn build(entries: Vec<KnowledgeBaseEntry>) -> Self {
        let mut by_primary = HashMap::new();
        let mut by_synonym = HashMap::new();
        let mut folded_synonyms = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            by_primary
                .entry(fold_name(entry.primary_name.trim()))
                .or_insert(position);
            let synonyms: Vec<String> = entry
                .synonyms
                .iter()
                .map(|synonym| fold_name(synonym.trim()))
                .filter(|synonym| !synonym.is_empty())
                .collect();
            for synonym in &synonyms {
                by_synonym.entry(synonym.clone()).or_insert(position);
            }
            folded_synonyms.push(synonyms);
        }
        debug!(
            entries = entries.len(),
            primary_names = by_primary.len(),
            synonyms = by_synonym.len(),
            "interaction index built"
        );
        Self {
            entries,
            folded_synonyms,
            by_primary,
            by_synonym,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&KnowledgeBaseEntry> {
        self.lookup_match(name).map(|hit| hit.entry)
    }

    pub fn lookup_match(&self, name: &str) -> Option<IndexMatch<'_>> {
        let query = fold_name(name.trim());
        if query.is_empty() {
            return None;
        }

        // Exact hits bound the substring scan: only earlier entries can beat them.
        let primary = self
            .by_primary
            .get(&query)
            .map(|&position| (position, MatchKind::PrimaryName));
        let synonym = self
            .by_synonym
            .get(&query)
            .map(|&position| (position, MatchKind::Synonym));
        let mut best = match (primary, synonym) {
            (Some(p), Some(s)) if s.0 < p.0 => Some(s),
            (Some(p), _) => Some(p),
            (None, s) => s,
        };

        let limit = best.map_or(self.entries.len(), |(position, _)| position);
        let earlier = self.folded_synonyms[..limit]
            .iter()
            .position(|synonyms| synonyms.iter().any(|synonym| synonym.contains(&query)));
        if let Some(position) = earlier {
            best = Some((position, MatchKind::Synonym));
        }

        best.map(|(position, kind)| IndexMatch {
            entry: &self.entries[position],
            kind,
            position,
        })
    }

    pub fn entries(&self) -> &[KnowledgeBaseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
