use serde::{Deserialize, Serialize};

use crate::sequence::reverse_complement;

/// Penalty added to a bounded distance when the trailing bases of the query
/// do not match the target at the reported end position.
pub const END_MISMATCH_PENALTY: usize = 100;

/// Result of a bounded end-anchored search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedMatch {
    /// Edit distance of the best alignment, possibly inflated by
    /// [`END_MISMATCH_PENALTY`] or set to `max_edits + 1` on rejection
    pub distance: usize,
    /// 1-based position in the target where the alignment ends; equivalently
    /// the number of target bases consumed by the query
    pub end_position: usize,
}

impl BoundedMatch {
    pub fn new(distance: usize, end_position: usize) -> Self {
        Self { distance, end_position }
    }

    /// A match is accepted only when it stays within the edit bound.
    pub fn is_accepted(&self, max_edits: usize) -> bool {
        self.distance <= max_edits
    }

    /// Whether the end-anchoring check failed for this match.
    pub fn end_mismatch(&self) -> bool {
        self.distance >= END_MISMATCH_PENALTY
    }
}

/// A named biological sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub data: Vec<u8>,
    /// Per-base qualities, present for FASTQ input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Vec<u8>>,
}

impl Sequence {
    pub fn new(id: String, data: Vec<u8>) -> Self {
        Self { id, data, quality: None }
    }

    pub fn with_quality(id: String, data: Vec<u8>, quality: Vec<u8>) -> Self {
        Self { id, data, quality: Some(quality) }
    }

    /// Drop the first `len` bases (and qualities)
    pub fn trim_start(&self, len: usize) -> Self {
        let start = len.min(self.data.len());
        Self {
            id: self.id.clone(),
            data: self.data[start..].to_vec(),
            quality: self
                .quality
                .as_ref()
                .map(|q| q[start.min(q.len())..].to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Mates of a paired-end read, sharing one read name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPair {
    pub read1: Sequence,
    pub read2: Sequence,
}

impl ReadPair {
    pub fn new(read1: Sequence, read2: Sequence) -> Self {
        Self { read1, read2 }
    }

    pub fn id(&self) -> &str {
        &self.read1.id
    }

    /// Read 1 followed by the reverse complement of read 2, which puts both
    /// mates on the read 1 strand.
    pub fn joined(&self) -> Vec<u8> {
        let mut joined = self.read1.data.clone();
        joined.extend(reverse_complement(&self.read2.data));
        joined
    }
}
