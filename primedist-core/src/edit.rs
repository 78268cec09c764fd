//! Levenshtein distance with two rolling rows

use crate::dp::DpRows;
use crate::error::DistanceResult;

/// Minimum number of unit-cost insertions, deletions and substitutions that
/// turn `a` into `b`.
///
/// The shorter sequence becomes the row dimension, so memory stays
/// proportional to `min(a.len(), b.len())`.
pub fn edit_distance(a: &[u8], b: &[u8]) -> DistanceResult<usize> {
    let (short, long) = if a.len() > b.len() { (b, a) } else { (a, b) };

    if short.is_empty() {
        return Ok(long.len());
    }

    let mut rows = DpRows::with_identity_row(short.len() + 1)?;
    for (i, &base) in long.iter().enumerate() {
        rows.advance(i + 1, short, base);
        rows.swap();
    }

    Ok(rows.previous_last())
}
