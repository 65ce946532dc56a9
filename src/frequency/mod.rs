pub mod candidates;
pub mod selector;
pub mod summary;
pub mod table;

// Re-export the main types for convenience
pub use candidates::CandidateSet;
pub use selector::{make_indicator, target_frequency, CharacterSelector, Selection, MAX_CANDIDATES};
pub use summary::DrawSummary;
pub use table::{FrequencyEntry, FrequencyTable, SAMPLE_TABLE};
