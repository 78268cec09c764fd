//! Sequence file input and output

#[cfg(feature = "io-fasta")] pub mod fasta;
#[cfg(feature = "io-fasta")] pub mod writer;

#[cfg(feature = "io-fasta")] pub use fasta::{FastaReader, FastaError};
#[cfg(feature = "io-fasta")] pub use writer::SequenceWriter;
