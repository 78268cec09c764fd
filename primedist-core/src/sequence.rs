//! Nucleotide sequence helpers

/// Reverse complement a DNA sequence
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence
        .iter()
        .rev()
        .map(|&nucleotide| complement(nucleotide))
        .collect()
}

/// Get complement of a single nucleotide, preserving case
pub fn complement(nucleotide: u8) -> u8 {
    match nucleotide {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        _ => nucleotide, // N and anything else stay as-is
    }
}
