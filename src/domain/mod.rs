//! Domain models for the athkar corpus
//!
//! Contains the pure transforms (matching, reclassification, deduplication)
//! without any I/O concerns.

mod audit;
mod category;
mod dedupe;
mod id;
mod mapping;
mod matcher;
mod period;
mod reclassify;
mod record;
mod text;

pub use audit::{audit, AuditFinding};
pub use category::{Category, CategoryError, HisnCategory, SourceKind, LIBRARY_PREFIX};
pub use dedupe::{reconcile, renumber, sort_records, DedupePolicy, GroupDecision, Reconciled, ESSENTIAL_MARKERS};
pub use id::{IdError, RecordId};
pub use mapping::{CategoryRule, MappingTable};
pub use matcher::{
    match_corpus, FindingStatus, MatchConfig, MatchOutcome, MatchResult, Recitation, RepeatMismatch,
};
pub use period::{Period, PeriodMarkers, PeriodSet};
pub use reclassify::{
    ConversionStats, RawItem, Reclassified, Reclassifier, ReclassifyWarning, SourceCategory,
    DATASET_ID_PREFIX,
};
pub(crate) use reclassify::Sequencer;
pub use record::{lenient_count, lenient_id, parse_count, parse_id, Repeat, TextRecord};
pub use text::{clean_text, prefix_chars, similarity, similarity_with, SimilarityOptions, AYAH_MARKER};
