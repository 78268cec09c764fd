//! Two-row dynamic programming buffer
//!
//! Both the Levenshtein distance and the bounded end-anchored distance only
//! ever look at the previous row of the DP matrix, so they share this pair of
//! rows. The rows are swapped after each outer iteration instead of being
//! reallocated.

use crate::error::DistanceResult;

#[derive(Debug, Clone)]
pub struct DpRows {
    previous: Vec<usize>,
    current: Vec<usize>,
}

impl DpRows {
    /// Allocate two rows of `width` cells, reporting allocation failure
    /// instead of aborting.
    pub fn new(width: usize) -> DistanceResult<Self> {
        let mut previous = Vec::new();
        previous.try_reserve_exact(width)?;
        previous.resize(width, 0);

        let mut current = Vec::new();
        current.try_reserve_exact(width)?;
        current.resize(width, 0);

        Ok(Self { previous, current })
    }

    /// Allocate the rows and seed the previous row with `0..width`, the cost
    /// of aligning each prefix against an empty sequence.
    pub fn with_identity_row(width: usize) -> DistanceResult<Self> {
        let mut rows = Self::new(width)?;
        for (j, cell) in rows.previous.iter_mut().enumerate() {
            *cell = j;
        }
        Ok(rows)
    }

    pub fn width(&self) -> usize {
        self.previous.len()
    }

    /// Fill the current row from the previous one with the unit-cost edit
    /// recurrence, where `row_index` is the cost of the first column and
    /// `column` holds the bytes compared against `base`.
    #[inline]
    pub fn advance(&mut self, row_index: usize, column: &[u8], base: u8) {
        debug_assert_eq!(column.len() + 1, self.width());

        let previous = &self.previous;
        let current = &mut self.current;

        current[0] = row_index;
        for j in 1..current.len() {
            let add = previous[j] + 1;
            let del = current[j - 1] + 1;
            let chg = previous[j - 1] + usize::from(column[j - 1] != base);
            current[j] = add.min(del).min(chg);
        }
    }

    /// Last cell of the freshly computed row.
    #[inline]
    pub fn current_last(&self) -> usize {
        self.current[self.current.len() - 1]
    }

    /// Last cell of the previous row (the final answer once the last row has
    /// been swapped in).
    #[inline]
    pub fn previous_last(&self) -> usize {
        self.previous[self.previous.len() - 1]
    }

    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_row() {
        let rows = DpRows::with_identity_row(5).unwrap();
        assert_eq!(rows.width(), 5);
        assert_eq!(rows.previous_last(), 4);
    }

    #[test]
    fn test_advance_and_swap() {
        // "AC" against a target starting with "A"
        let mut rows = DpRows::with_identity_row(3).unwrap();
        rows.advance(1, b"AC", b'A');
        assert_eq!(rows.current_last(), 1);
        rows.swap();
        assert_eq!(rows.previous_last(), 1);

        // then "C": "AC" vs "AC" is an exact match
        rows.advance(2, b"AC", b'C');
        assert_eq!(rows.current_last(), 0);
    }

    #[test]
    fn test_single_cell_rows() {
        let mut rows = DpRows::with_identity_row(1).unwrap();
        rows.advance(3, b"", b'G');
        assert_eq!(rows.current_last(), 3);
    }

    #[test]
    fn test_huge_allocation_fails_cleanly() {
        assert!(DpRows::new(usize::MAX).is_err());
    }
}
