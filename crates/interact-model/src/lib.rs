//! Data model shared by the co-administration engine, ingestion and reports.

pub mod error;
pub mod event;
pub mod interaction;
pub mod pair;
pub mod window;

pub use error::{ModelError, Result};
pub use event::AdministrationEvent;
pub use interaction::{InteractionFact, InteractionRecord, KnowledgeBaseEntry};
pub use pair::{MedicationPairKey, fold_name};
pub use window::WindowBucket;
