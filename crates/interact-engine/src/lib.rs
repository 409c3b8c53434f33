//! Windowed co-administration engine and interaction knowledge-base matcher.
//!
//! Two independent branches run over data that is already in memory:
//!
//! 1. **Combinations**: administrations are grouped per patient into an
//!    [`EventTimeline`], every unordered pair of events is assigned to at most
//!    one [`WindowBucket`](interact_model::WindowBucket), and the medication
//!    pairs of each classified event pair are collected into [`WindowedPairs`].
//! 2. **Interactions**: an [`InteractionIndex`] is built once over the
//!    knowledge base and a medication profile is resolved against it with
//!    [`match_profile`].
//!
//! Neither branch performs I/O or shares mutable state with the other.

pub mod combination;
pub mod index;
pub mod matcher;
pub mod timeline;
pub mod window;

pub use combination::{WindowedPairs, combine_patient, compute_combinations};
pub use index::{IndexMatch, InteractionIndex, MatchKind};
pub use matcher::{ProfileMatch, match_profile};
pub use timeline::EventTimeline;
pub use window::{PLUS_48H_DAY_OFFSET, WITHIN_WINDOW, classify};
