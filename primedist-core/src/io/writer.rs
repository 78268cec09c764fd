//! FASTA/FASTQ output, gzipped when the path ends in `.gz`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::io::fasta::FastaError;
use crate::types::Sequence;

/// Quality written for bases that came from FASTA input
pub const FILL_QUALITY: u8 = b'I';

enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// Streams records to a file. Call [`SequenceWriter::finish`] to complete
/// the gzip trailer and surface write errors.
pub struct SequenceWriter {
    sink: Sink,
    path: PathBuf,
    records: usize,
}

impl SequenceWriter {
    /// Create the file (and any missing parent directories)
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(FastaError::from)?;
        }

        let file = BufWriter::new(File::create(path).map_err(FastaError::from)?);
        let sink = if path.extension().is_some_and(|ext| ext == "gz") {
            Sink::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            Sink::Plain(file)
        };

        Ok(Self {
            sink,
            path: path.to_path_buf(),
            records: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a four-line FASTQ record; `description` follows the id on the
    /// header line.
    pub fn write_fastq(&mut self, seq: &Sequence, description: Option<&str>) -> Result<()> {
        self.write_header(b'@', &seq.id, description)?;
        self.sink.write_all(&seq.data).map_err(FastaError::from)?;
        self.sink.write_all(b"\n+\n").map_err(FastaError::from)?;
        let written = match &seq.quality {
            Some(quality) => self.sink.write_all(quality),
            None => self.sink.write_all(&vec![FILL_QUALITY; seq.data.len()]),
        };
        written.map_err(FastaError::from)?;
        self.sink.write_all(b"\n").map_err(FastaError::from)?;
        self.records += 1;
        Ok(())
    }

    /// Write a two-line FASTA record
    pub fn write_fasta(&mut self, id: &str, data: &[u8]) -> Result<()> {
        self.write_header(b'>', id, None)?;
        self.sink.write_all(data).map_err(FastaError::from)?;
        self.sink.write_all(b"\n").map_err(FastaError::from)?;
        self.records += 1;
        Ok(())
    }

    fn write_header(&mut self, marker: u8, id: &str, description: Option<&str>) -> Result<()> {
        let line = match description {
            Some(desc) => format!("{}{} {}\n", marker as char, id, desc),
            None => format!("{}{}\n", marker as char, id),
        };
        self.sink.write_all(line.as_bytes()).map_err(FastaError::from)?;
        Ok(())
    }

    /// Flush everything to disk and return the number of records written
    pub fn finish(self) -> Result<usize> {
        match self.sink {
            Sink::Plain(mut w) => w.flush().map_err(FastaError::from)?,
            Sink::Gzip(w) => w.finish().and_then(|mut inner| inner.flush()).map_err(FastaError::from)?,
        }
        log::debug!("Wrote {} records to {}", self.records, self.path.display());
        Ok(self.records)
    }
}
