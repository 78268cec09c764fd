//! Scan command implementation - identify primers at the start of reads

use anyhow::{Context, Result};
use serde::Serialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use primedist_core::{
    FastaReader, PairHit, PrimerHit, PrimerMatcher, PrimerSet, ReadPair, ScanSummary, Sequence,
    SequenceWriter,
};

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::OutputFormat;

/// Inputs and outputs of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub primers: PathBuf,
    pub reads: PathBuf,
    /// Read 2 file of a paired-end run
    pub reads2: Option<PathBuf>,
    /// Infer the read 2 file from the read 1 name when `reads2` is unset
    pub paired: bool,
    pub max_edits: Option<usize>,
    pub end_matches: Option<usize>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    /// Prefix for trimmed FASTQ output
    pub trimmed_out: Option<PathBuf>,
    pub uncompressed: bool,
    /// FASTA of read 1 joined with reverse-complemented read 2
    pub joined_out: Option<PathBuf>,
}

/// One output row per read
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ScanRecord {
    pub read_id: String,
    pub primer: Option<String>,
    pub distance: Option<usize>,
    pub end_position: Option<usize>,
}

impl ScanRecord {
    fn new(read: &Sequence, hit: Option<&PrimerHit>) -> Self {
        Self {
            read_id: read.id.clone(),
            primer: hit.map(|h| h.primer_name.clone()),
            distance: hit.map(|h| h.distance),
            end_position: hit.map(|h| h.end_position),
        }
    }

    fn to_tsv(&self) -> String {
        fn field<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map_or_else(|| "*".to_string(), |v| v.to_string())
        }
        format!(
            "{}\t{}\t{}\t{}",
            self.read_id,
            field(&self.primer),
            field(&self.distance),
            field(&self.end_position)
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    records: &'a [ScanRecord],
    summary: &'a ScanSummary,
}

pub fn execute(config: &Config, opts: ScanOptions) -> Result<()> {
    let params = config.matching.params(opts.max_edits, opts.end_matches);
    let format = match opts.format {
        Some(f) => f,
        None => config.output.format.parse()?,
    };

    log::info!("Primers: {}", opts.primers.display());
    log::info!("Reads: {}", opts.reads.display());
    log::info!("Matching with k={} m={}", params.max_edits, params.end_matches);

    check_exists(&opts.primers)?;
    check_exists(&opts.reads)?;

    let mate_path = match (&opts.reads2, opts.paired) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(FastaReader::infer_mate_path(&opts.reads)?),
        (None, false) => None,
    };
    if opts.joined_out.is_some() && mate_path.is_none() {
        return Err(CliError::validation("--joined-out needs paired reads (--reads2 or --paired)").into());
    }

    let primer_set = PrimerSet::from_sequences(
        FastaReader::read_file(&opts.primers).context("Failed to load primers")?,
    )
    .map_err(CliError::from)?;
    let matcher = PrimerMatcher::new(primer_set, params).map_err(CliError::from)?;

    let (records, summary) = match mate_path {
        None => {
            let reads = FastaReader::read_file(&opts.reads).context("Failed to load reads")?;
            log::info!("Loaded {} primers and {} reads", matcher.primers().len(), reads.len());

            let hits = matcher.match_batch(&reads).map_err(CliError::from)?;
            if let Some(prefix) = &opts.trimmed_out {
                write_trimmed_single(prefix, opts.uncompressed, &reads, &hits)?;
            }
            let records = reads
                .iter()
                .zip(&hits)
                .map(|(read, hit)| ScanRecord::new(read, hit.as_ref()))
                .collect::<Vec<_>>();
            (records, matcher.summarize(&hits))
        }
        Some(mate_path) => {
            log::info!("Mates: {}", mate_path.display());
            check_exists(&mate_path)?;
            let pairs = FastaReader::read_pairs(&opts.reads, &mate_path)
                .context("Failed to load paired reads")?;
            log::info!("Loaded {} primers and {} read pairs", matcher.primers().len(), pairs.len());

            let pair_hits = matcher.match_pairs(&pairs).map_err(CliError::from)?;
            if let Some(prefix) = &opts.trimmed_out {
                write_trimmed_pairs(prefix, opts.uncompressed, &pairs, &pair_hits)?;
            }
            if let Some(path) = &opts.joined_out {
                write_joined(path, &pairs, &pair_hits)?;
            }
            let hits: Vec<Option<PrimerHit>> = pair_hits.into_iter().map(|h| h.read1).collect();
            let records = pairs
                .iter()
                .zip(&hits)
                .map(|(pair, hit)| ScanRecord::new(&pair.read1, hit.as_ref()))
                .collect::<Vec<_>>();
            (records, matcher.summarize(&hits))
        }
    };

    let writer: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    write_records(BufWriter::new(writer), &records, &summary, format)?;

    log::info!(
        "{} matched, {} unmatched ({:.1}%)",
        summary.matched,
        summary.unmatched,
        summary.match_rate() * 100.0
    );
    for (primer, count) in &summary.per_primer {
        log::debug!("  {}: {}", primer, count);
    }

    Ok(())
}

fn check_exists(path: &Path) -> CliResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::file_not_found(path.to_path_buf()))
    }
}

/// `<prefix><suffix>.fastq`, with `.gz` unless uncompressed
fn fastq_path(prefix: &Path, suffix: &str, uncompressed: bool) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    name.push(if uncompressed { ".fastq" } else { ".fastq.gz" });
    PathBuf::from(name)
}

fn write_trimmed_single(
    prefix: &Path,
    uncompressed: bool,
    reads: &[Sequence],
    hits: &[Option<PrimerHit>],
) -> Result<()> {
    let mut writer = SequenceWriter::create(fastq_path(prefix, "", uncompressed))?;
    for (read, hit) in reads.iter().zip(hits) {
        if let Some(hit) = hit {
            writer.write_fastq(&hit.trim_sequence(read), Some(&hit.primer_name))?;
        }
    }
    let path = writer.path().to_path_buf();
    let written = writer.finish()?;
    log::info!("Wrote {} trimmed reads to {}", written, path.display());
    Ok(())
}

fn write_trimmed_pairs(
    prefix: &Path,
    uncompressed: bool,
    pairs: &[ReadPair],
    hits: &[PairHit],
) -> Result<()> {
    let mut writer1 = SequenceWriter::create(fastq_path(prefix, "_R1", uncompressed))?;
    let mut writer2 = SequenceWriter::create(fastq_path(prefix, "_R2", uncompressed))?;
    for (pair, hit) in pairs.iter().zip(hits) {
        let (Some(trimmed), Some(primer)) = (hit.trim(pair), hit.read1.as_ref()) else {
            continue;
        };
        writer1.write_fastq(&trimmed.read1, Some(&primer.primer_name))?;
        writer2.write_fastq(&trimmed.read2, Some(&primer.primer_name))?;
    }
    let written = writer1.finish()?;
    writer2.finish()?;
    log::info!("Wrote {} trimmed read pairs under {}", written, prefix.display());
    Ok(())
}

fn write_joined(path: &Path, pairs: &[ReadPair], hits: &[PairHit]) -> Result<()> {
    let mut writer = SequenceWriter::create(path)?;
    for (pair, hit) in pairs.iter().zip(hits) {
        let (Some(trimmed), Some(primer)) = (hit.trim(pair), hit.read1.as_ref()) else {
            continue;
        };
        writer.write_fasta(&format!("{}|{}", pair.id(), primer.primer_name), &trimmed.joined())?;
    }
    let written = writer.finish()?;
    log::info!("Wrote {} joined reads to {}", written, path.display());
    Ok(())
}

fn write_records<W: Write>(
    mut writer: W,
    records: &[ScanRecord],
    summary: &ScanSummary,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            writeln!(writer, "read_id\tprimer\tdistance\tend_position")?;
            for record in records {
                writeln!(writer, "{}", record.to_tsv())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &JsonReport { records, summary })
                .context("Failed to serialize scan results")?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
