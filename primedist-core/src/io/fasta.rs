//! FASTA/FASTQ sequence file reader
//!
//! Reads primers and sequencing reads using the needletail library. Gzipped
//! inputs are detected by their `.gz` extension and decompressed with flate2.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use anyhow::Result;
use thiserror::Error;
use flate2::read::GzDecoder;

use needletail::parse_fastx_reader;
use crate::types::{ReadPair, Sequence};

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
    #[error("Read files hold {read1} and {read2} records")]
    PairCount { read1: usize, read2: usize },
    #[error("Read names do not match: {read1} / {read2}")]
    UnpairedReads { read1: String, read2: String },
    #[error("Cannot infer read 2 from {path}: {candidates} candidate files")]
    MateNotFound { path: PathBuf, candidates: usize },
}

/// FASTA/FASTQ reader producing owned [`Sequence`] records
pub struct FastaReader;

impl FastaReader {
    /// Read every record of a FASTA/FASTQ file, plain or gzipped
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(FastaError::from)?;

        if path.extension().is_some_and(|ext| ext == "gz") {
            Self::read_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::read_reader(BufReader::new(file))
        }
    }

    /// Read FASTA/FASTQ data from any readable source
    pub fn read_reader<R: std::io::Read + Send>(reader: R) -> Result<Vec<Sequence>> {
        let mut sequences = Vec::new();
        let mut fastx_reader = parse_fastx_reader(reader)
            .map_err(|e| FastaError::Parse(e.to_string()))?;

        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            sequences.push(Self::record_to_sequence(&record));
        }

        Self::non_empty(sequences)
    }

    /// Read both mates of a paired-end run. The files must hold the same
    /// number of records, in the same order, with matching read names.
    pub fn read_pairs<P: AsRef<Path>, Q: AsRef<Path>>(read1: P, read2: Q) -> Result<Vec<ReadPair>> {
        let mates1 = Self::read_file(read1)?;
        let mates2 = Self::read_file(read2)?;

        if mates1.len() != mates2.len() {
            return Err(FastaError::PairCount {
                read1: mates1.len(),
                read2: mates2.len(),
            }
            .into());
        }

        let mut pairs = Vec::with_capacity(mates1.len());
        for (r1, r2) in mates1.into_iter().zip(mates2) {
            if r1.id != r2.id {
                return Err(FastaError::UnpairedReads { read1: r1.id, read2: r2.id }.into());
            }
            pairs.push(ReadPair::new(r1, r2));
        }

        log::debug!("Paired {} reads", pairs.len());
        Ok(pairs)
    }

    /// Find the read 2 file next to a read 1 file: exactly one existing file
    /// whose name differs from `read1` by a single `1` turned into `2`
    /// (`sample_R1_001.fastq.gz` becomes `sample_R2_001.fastq.gz`).
    pub fn infer_mate_path(read1: &Path) -> Result<PathBuf> {
        let name = read1
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FastaError::MateNotFound { path: read1.to_path_buf(), candidates: 0 })?;

        let candidates: Vec<PathBuf> = name
            .match_indices('1')
            .map(|(pos, _)| {
                let mut mate = name.to_string();
                mate.replace_range(pos..pos + 1, "2");
                read1.with_file_name(mate)
            })
            .filter(|candidate| candidate.exists())
            .collect();

        match candidates.as_slice() {
            [mate] => Ok(mate.clone()),
            _ => Err(FastaError::MateNotFound {
                path: read1.to_path_buf(),
                candidates: candidates.len(),
            }
            .into()),
        }
    }

    fn non_empty(sequences: Vec<Sequence>) -> Result<Vec<Sequence>> {
        if sequences.is_empty() {
            Err(FastaError::EmptyFile.into())
        } else {
            log::debug!("Read {} sequences", sequences.len());
            Ok(sequences)
        }
    }

    /// Keep the first header word as the id; Illumina read names carry
    /// barcode and primer annotations after the first space.
    fn record_to_sequence(record: &needletail::parser::SequenceRecord) -> Sequence {
        let header = String::from_utf8_lossy(record.id());
        let id = header.split_whitespace().next().unwrap_or_default().to_string();
        let data = record.seq().to_vec();
        match record.qual() {
            Some(qual) => Sequence::with_quality(id, data, qual.to_vec()),
            None => Sequence::new(id, data),
        }
    }
}
