use std::fmt;

use serde::{Deserialize, Serialize};

/// Temporal-proximity category for a pair of administrations.
///
/// Variants are declared in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBucket {
    /// Both administrations fall on the same calendar date.
    SameDay,
    /// The later administration falls exactly two calendar dates after the earlier.
    Plus48h,
    /// The administrations are strictly less than six hours apart.
    Within6h,
}

impl WindowBucket {
    pub const ALL: [WindowBucket; 3] = [Self::SameDay, Self::Plus48h, Self::Within6h];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameDay => "same_day",
            Self::Plus48h => "plus_48h",
            Self::Within6h => "within_6h",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SameDay => "Same calendar day",
            Self::Plus48h => "+48h (incl. same day)",
            Self::Within6h => "Within 6 hours",
        }
    }
}

impl fmt::Display for WindowBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
