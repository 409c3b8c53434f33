use std::fmt;

use crate::pair::MedicationPairKey;

/// A documented interaction between a knowledge-base entry and a partner drug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionFact {
    pub partner: String,
    pub description: String,
}

/// One medication in the external interaction knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBaseEntry {
    pub primary_name: String,
    pub synonyms: Vec<String>,
    pub interactions: Vec<InteractionFact>,
}

impl KnowledgeBaseEntry {
    pub fn new(primary_name: impl Into<String>) -> Self {
        Self {
            primary_name: primary_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    #[must_use]
    pub fn with_interaction(
        mut self,
        partner: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.interactions.push(InteractionFact {
            partner: partner.into(),
            description: description.into(),
        });
        self
    }
}

/// A known interaction for a profiled medication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub pair: MedicationPairKey,
    pub description: String,
}

impl InteractionRecord {
    /// Builds a record, normalising the description to trimmed lower case.
    pub fn new(pair: MedicationPairKey, description: &str) -> Self {
        Self {
            pair,
            description: description.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for InteractionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.pair, self.description)
    }
}
