//! primedist core library
//!
//! String distances for short biological sequences: Hamming distance,
//! Levenshtein distance, and the bounded end-anchored edit distance used to
//! identify PCR primers at the start of sequencing reads. All three are pure
//! functions over byte slices and are safe to call from many threads at once.

pub mod error;
pub mod types;
pub mod dp;
pub mod hamming;
pub mod edit;
pub mod bounded;
pub mod sequence;
pub mod primer;
pub mod io;

// Re-export commonly used types and functions
pub use error::{DistanceError, DistanceResult};
pub use types::{BoundedMatch, ReadPair, Sequence, END_MISMATCH_PENALTY};
pub use hamming::hamming_distance;
pub use edit::edit_distance;
pub use bounded::{bounded_distance, MAX_EDITS_LIMIT};
pub use sequence::reverse_complement;
pub use primer::{MatchParams, PairHit, Primer, PrimerHit, PrimerMatcher, PrimerSet, ScanSummary};
#[cfg(feature = "io-fasta")]
pub use io::{FastaError, FastaReader, SequenceWriter};

/// Version information for the primedist core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
