//! Primer identification on sequencing reads
//!
//! Every read is compared against every primer with the bounded
//! end-anchored distance. The best accepted primer is reported along with
//! the read position where it ends, so the primer can be trimmed off.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bounded::bounded_distance;
use crate::error::{DistanceError, DistanceResult};
use crate::types::{ReadPair, Sequence};

/// Parameters for primer matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchParams {
    /// Maximum tolerated edit distance
    pub max_edits: usize,
    /// Trailing primer bases that must match the read exactly
    pub end_matches: usize,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            max_edits: 4,
            end_matches: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primer {
    pub name: String,
    pub sequence: Vec<u8>,
}

/// Ordered collection of primers; earlier primers win ties
#[derive(Debug, Clone, Default)]
pub struct PrimerSet {
    primers: Vec<Primer>,
}

impl PrimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: String, sequence: Vec<u8>) -> DistanceResult<()> {
        if sequence.is_empty() {
            return Err(DistanceError::invalid_argument(format!(
                "primer '{}' has an empty sequence",
                name
            )));
        }
        self.primers.push(Primer { name, sequence });
        Ok(())
    }

    pub fn from_sequences(sequences: Vec<Sequence>) -> DistanceResult<Self> {
        let mut set = Self::new();
        for seq in sequences {
            set.add(seq.id, seq.data)?;
        }
        log::debug!("Loaded {} primers", set.len());
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.primers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primer> {
        self.primers.iter()
    }

    /// Shortest primer length, used to validate the end-match length
    pub fn min_length(&self) -> Option<usize> {
        self.primers.iter().map(|p| p.sequence.len()).min()
    }
}

/// An accepted primer match on a read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerHit {
    pub primer_index: usize,
    pub primer_name: String,
    pub distance: usize,
    pub end_position: usize,
}

impl PrimerHit {
    /// The read with the matched primer removed
    pub fn trim<'a>(&self, read: &'a [u8]) -> &'a [u8] {
        &read[self.end_position.min(read.len())..]
    }

    /// Owned copy of `read` with the primer and its qualities removed
    pub fn trim_sequence(&self, read: &Sequence) -> Sequence {
        read.trim_start(read.len() - self.trim(&read.data).len())
    }
}

/// Primer hits for both mates of a pair. The pair is identified by read 1;
/// read 2 is trimmed by its own hit when it has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairHit {
    pub read1: Option<PrimerHit>,
    pub read2: Option<PrimerHit>,
}

impl PairHit {
    /// Trimmed copy of the pair, or `None` when read 1 has no primer
    pub fn trim(&self, pair: &ReadPair) -> Option<ReadPair> {
        let hit1 = self.read1.as_ref()?;
        let read2 = match &self.read2 {
            Some(hit2) => hit2.trim_sequence(&pair.read2),
            None => pair.read2.clone(),
        };
        Some(ReadPair::new(hit1.trim_sequence(&pair.read1), read2))
    }
}

/// Matches reads against a primer set
pub struct PrimerMatcher {
    primers: PrimerSet,
    params: MatchParams,
}

impl PrimerMatcher {
    pub fn new(primers: PrimerSet, params: MatchParams) -> DistanceResult<Self> {
        if let Some(shortest) = primers.min_length() {
            if params.end_matches > shortest {
                return Err(DistanceError::invalid_argument(format!(
                    "end match length {} exceeds shortest primer length {}",
                    params.end_matches, shortest
                )));
            }
        }
        Ok(Self { primers, params })
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    pub fn primers(&self) -> &PrimerSet {
        &self.primers
    }

    /// Find the best accepted primer for a read.
    ///
    /// The lowest distance wins and ties go to the earlier primer. `None` if
    /// no primer is within `max_edits`.
    pub fn best_match(&self, read: &[u8]) -> DistanceResult<Option<PrimerHit>> {
        let MatchParams { max_edits, end_matches } = self.params;
        let mut best: Option<PrimerHit> = None;

        for (index, primer) in self.primers.iter().enumerate() {
            let hit = bounded_distance(&primer.sequence, read, max_edits, end_matches)?;
            if !hit.is_accepted(max_edits) {
                continue;
            }
            if best.as_ref().map_or(true, |b| hit.distance < b.distance) {
                best = Some(PrimerHit {
                    primer_index: index,
                    primer_name: primer.name.clone(),
                    distance: hit.distance,
                    end_position: hit.end_position,
                });
            }
        }

        Ok(best)
    }

    /// Match a batch of reads in parallel; results keep the input order
    pub fn match_batch(&self, reads: &[Sequence]) -> DistanceResult<Vec<Option<PrimerHit>>> {
        reads
            .par_iter()
            .map(|read| self.best_match(&read.data))
            .collect()
    }

    /// Match both mates of every pair in parallel; results keep the input order
    pub fn match_pairs(&self, pairs: &[ReadPair]) -> DistanceResult<Vec<PairHit>> {
        pairs
            .par_iter()
            .map(|pair| -> DistanceResult<PairHit> {
                Ok(PairHit {
                    read1: self.best_match(&pair.read1.data)?,
                    read2: self.best_match(&pair.read2.data)?,
                })
            })
            .collect()
    }

    /// Tally a batch of results per primer
    pub fn summarize(&self, hits: &[Option<PrimerHit>]) -> ScanSummary {
        let mut summary = ScanSummary {
            reads: hits.len(),
            ..Default::default()
        };
        for hit in hits {
            match hit {
                Some(hit) => {
                    summary.matched += 1;
                    *summary.per_primer.entry(hit.primer_name.clone()).or_insert(0) += 1;
                }
                None => summary.unmatched += 1,
            }
        }
        log::info!(
            "Matched {}/{} reads to {} primers",
            summary.matched,
            summary.reads,
            self.primers.len()
        );
        summary
    }
}

/// Counts from a primer scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub reads: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub per_primer: BTreeMap<String, usize>,
}

impl ScanSummary {
    pub fn match_rate(&self) -> f64 {
        if self.reads == 0 {
            return 0.0;
        }
        self.matched as f64 / self.reads as f64
    }
}
