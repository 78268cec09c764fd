//! Hamming distance between equal-length sequences

use crate::error::{DistanceError, DistanceResult};

/// Count the positions at which `a` and `b` differ.
///
/// Both sequences must be non-empty and of the same length.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> DistanceResult<usize> {
    if a.len() != b.len() {
        return Err(DistanceError::invalid_argument(format!(
            "hamming distance needs equal lengths, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(DistanceError::invalid_argument(
            "hamming distance of empty sequences is undefined",
        ));
    }

    Ok(a.iter().zip(b).filter(|(x, y)| x != y).count())
}
