//! Bounded, end-anchored edit distance
//!
//! Finds where a short query (typically a PCR primer) ends inside a longer
//! target (typically a read). The alignment is pegged to the start of the
//! target, the search is bounded by the maximum number of tolerated edits,
//! and the last `end_matches` bases of the query must match the target
//! exactly at the reported end position.
//!
//! Only the first `query.len() - end_matches` bases of the query take part in
//! the dynamic program. Rows are computed for target prefixes of length
//! `1..=prefix_len + max_edits`, which keeps the work at
//! `O((prefix_len + max_edits) * prefix_len)` regardless of the target length.
//! The trailing bases are then compared directly; any mismatch adds
//! [`END_MISMATCH_PENALTY`] to the distance so that such alignments are never
//! accepted for realistic edit bounds.

use crate::dp::DpRows;
use crate::error::{DistanceError, DistanceResult};
use crate::types::{BoundedMatch, END_MISMATCH_PENALTY};

/// Largest accepted `max_edits`; one above it plus the end-mismatch penalty
/// still fits in a `usize`.
pub const MAX_EDITS_LIMIT: usize = usize::MAX - END_MISMATCH_PENALTY - 1;

/// Locate the best start-anchored alignment of `query` in `target`.
///
/// Returns `(max_edits + 1, query.len())` without searching when the query is
/// longer than the target. Callers must check
/// [`BoundedMatch::is_accepted`] rather than rely on the call succeeding.
///
/// `max_edits` may not exceed [`MAX_EDITS_LIMIT`], so that both the rejection
/// value and a penalized distance stay representable.
pub fn bounded_distance(
    query: &[u8],
    target: &[u8],
    max_edits: usize,
    end_matches: usize,
) -> DistanceResult<BoundedMatch> {
    if max_edits > MAX_EDITS_LIMIT {
        return Err(DistanceError::invalid_argument(format!(
            "max edits {} exceeds the limit of {}",
            max_edits, MAX_EDITS_LIMIT
        )));
    }

    let rejected = BoundedMatch::new(max_edits + 1, query.len());

    if query.len() > target.len() {
        return Ok(rejected);
    }
    if query.is_empty() {
        return Err(DistanceError::invalid_argument("query must not be empty"));
    }
    if end_matches > query.len() {
        return Err(DistanceError::invalid_argument(format!(
            "end match length {} exceeds query length {}",
            end_matches,
            query.len()
        )));
    }

    let prefix = &query[..query.len() - end_matches];
    let mut best = rejected;

    let mut rows = DpRows::with_identity_row(prefix.len() + 1)?;
    let last_row = prefix.len().saturating_add(max_edits).min(target.len());
    for i in 1..=last_row {
        rows.advance(i, prefix, target[i - 1]);

        // `<=` lets a later offset with an equal cost take over
        let cost = rows.current_last();
        if cost <= best.distance {
            best = BoundedMatch::new(cost, i + end_matches);
        }

        rows.swap();
    }

    if !end_anchored(query, target, best.end_position, end_matches) {
        best.distance += END_MISMATCH_PENALTY;
    }

    Ok(best)
}

/// Compare the last `end_matches` bases of `query` with the target bases
/// just before `end_position`, scanning from the end backwards. Positions
/// past the end of the target count as mismatches.
fn end_anchored(query: &[u8], target: &[u8], end_position: usize, end_matches: usize) -> bool {
    (1..=end_matches).all(|offset| {
        let q = query[query.len() - offset];
        end_position
            .checked_sub(offset)
            .and_then(|t| target.get(t))
            .is_some_and(|&t| t == q)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::edit_distance;
    use proptest::prelude::*;

    #[test]
    fn test_exact_primer_at_read_start() {
        let hit = bounded_distance(b"ACGT", b"ACGTTT", 1, 2).unwrap();
        assert_eq!(hit, BoundedMatch::new(0, 4));

        let hit = bounded_distance(b"ACGTACGT", b"ACGTACGTGGCC", 2, 3).unwrap();
        assert_eq!(hit, BoundedMatch::new(0, 8));
        assert!(hit.is_accepted(2));
    }

    #[test]
    fn test_interior_substitution_tolerated() {
        let hit = bounded_distance(b"ACGTACGT", b"ACTTACGTGGCC", 2, 3).unwrap();
        assert_eq!(hit, BoundedMatch::new(1, 8));
    }

    #[test]
    fn test_insertion_in_read_shifts_end() {
        let hit = bounded_distance(b"ACGTACGT", b"AACGTACGTGGCC", 2, 3).unwrap();
        assert_eq!(hit, BoundedMatch::new(1, 9));

        let hit = bounded_distance(b"GATTACA", b"GATTTACAGG", 2, 2).unwrap();
        assert_eq!(hit, BoundedMatch::new(1, 8));
    }

    #[test]
    fn test_deletion_in_read_shifts_end() {
        let hit = bounded_distance(b"ACGTACGT", b"CGTACGTGGCC", 2, 3).unwrap();
        assert_eq!(hit, BoundedMatch::new(1, 7));
    }

    #[test]
    fn test_end_mismatch_penalized() {
        // DP prefix matches perfectly but the last base differs
        let hit = bounded_distance(b"ACGTACGT", b"ACGTACGAGGCC", 2, 3).unwrap();
        assert_eq!(hit, BoundedMatch::new(END_MISMATCH_PENALTY, 8));
        assert!(hit.end_mismatch());
        assert!(!hit.is_accepted(2));

        let hit = bounded_distance(b"ACGT", b"ACGA", 1, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(END_MISMATCH_PENALTY, 4));
    }

    #[test]
    fn test_alignment_is_anchored_at_target_start() {
        // Leading target bases are paid for as deletions, so a primer that
        // starts two bases into the read is not found at distance 0.
        let hit = bounded_distance(b"ACGT", b"TTACGTTT", 1, 2).unwrap();
        assert_eq!(hit, BoundedMatch::new(2 + END_MISMATCH_PENALTY, 4));
        assert!(!hit.is_accepted(1));
    }

    #[test]
    fn test_later_tie_wins() {
        // "ACGTA" reaches cost 2 at read offsets 5, 6 and 7; the last one is
        // reported and its trailing base still matches
        let hit = bounded_distance(b"ACGTAC", b"AACGTCAC", 2, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(2, 8));

        let hit = bounded_distance(b"AAAA", b"AAAAAA", 2, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(0, 4));

        // both i=1 and i=2 give cost 2 for "AC" vs "T"/"TT"; the later wins
        let hit = bounded_distance(b"ACGT", b"TTACGTTT", 1, 2).unwrap();
        assert_eq!(hit.end_position, 2 + 2);
    }

    #[test]
    fn test_query_longer_than_target() {
        let hit = bounded_distance(b"ACGT", b"ACG", 1, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(2, 4));
    }

    #[test]
    fn test_no_row_within_bound() {
        let hit = bounded_distance(b"GATTACA", b"TTTTTTTTTT", 2, 2).unwrap();
        assert_eq!(hit, BoundedMatch::new(3 + END_MISMATCH_PENALTY, 7));
    }

    #[test]
    fn test_zero_end_matches_is_plain_bounded_search() {
        let hit = bounded_distance(b"CCGG", b"CCGGAA", 3, 0).unwrap();
        assert_eq!(hit, BoundedMatch::new(0, 4));
    }

    #[test]
    fn test_whole_query_end_anchored() {
        // With every base end-anchored the DP prefix is empty and only the
        // first-column costs are visited.
        let hit = bounded_distance(b"ACGT", b"ACGT", 0, 4).unwrap();
        assert_eq!(hit, BoundedMatch::new(1, 4));

        let hit = bounded_distance(b"ACGT", b"ACGTTTTT", 2, 4).unwrap();
        assert_eq!(hit, BoundedMatch::new(1 + END_MISMATCH_PENALTY, 5));
    }

    #[test]
    fn test_huge_edit_bound() {
        let err = bounded_distance(b"ACGT", b"ACG", usize::MAX, 1).unwrap_err();
        assert!(matches!(err, DistanceError::InvalidArgument(_)));

        let hit = bounded_distance(b"ACGT", b"ACG", MAX_EDITS_LIMIT, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(MAX_EDITS_LIMIT + 1, 4));
        assert!(!hit.is_accepted(MAX_EDITS_LIMIT));

        // window reaches past the read and is clamped to it
        let hit = bounded_distance(b"ACGT", b"ACGTTT", MAX_EDITS_LIMIT, 2).unwrap();
        assert_eq!(hit, BoundedMatch::new(0, 4));

        let hit = bounded_distance(b"ACGT", b"ACGA", MAX_EDITS_LIMIT, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(END_MISMATCH_PENALTY, 4));
    }

    #[test]
    fn test_empty_query_rejected() {
        let err = bounded_distance(b"", b"ACGT", 2, 0).unwrap_err();
        assert!(matches!(err, DistanceError::InvalidArgument(_)));
    }

    #[test]
    fn test_end_matches_longer_than_query_rejected() {
        let err = bounded_distance(b"ACG", b"ACGTTT", 2, 4).unwrap_err();
        assert!(matches!(err, DistanceError::InvalidArgument(_)));
    }

    #[test]
    fn test_search_window_clamped_to_target() {
        // prefix_len + max_edits exceeds the read length
        let hit = bounded_distance(b"ACGT", b"ACGT", 10, 1).unwrap();
        assert_eq!(hit, BoundedMatch::new(0, 4));
    }

    proptest! {
        #[test]
        fn prop_deterministic(
            q in "[ACGT]{1,20}",
            t in "[ACGT]{0,40}",
            k in 0usize..6,
            m in 0usize..4,
        ) {
            let m = m.min(q.len());
            let first = bounded_distance(q.as_bytes(), t.as_bytes(), k, m).unwrap();
            let second = bounded_distance(q.as_bytes(), t.as_bytes(), k, m).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_exact_prefix_is_found(
            q in "[ACGT]{4,20}",
            tail in "[ACGT]{0,20}",
            k in 0usize..4,
            m in 0usize..4,
        ) {
            prop_assume!(m < q.len());
            let target = format!("{}{}", q, tail);
            let hit = bounded_distance(q.as_bytes(), target.as_bytes(), k, m).unwrap();
            prop_assert_eq!(hit.distance, 0);
            prop_assert!(hit.is_accepted(k));
        }

        #[test]
        fn prop_accepted_hits_stay_within_edit_distance(
            q in "[ACGT]{2,15}",
            t in "[ACGT]{2,30}",
            k in 0usize..5,
        ) {
            // with no end anchoring the reported cost is an exact
            // Levenshtein distance to the consumed read prefix
            let hit = bounded_distance(q.as_bytes(), t.as_bytes(), k, 0).unwrap();
            if hit.is_accepted(k) {
                let consumed = &t.as_bytes()[..hit.end_position];
                prop_assert_eq!(edit_distance(q.as_bytes(), consumed).unwrap(), hit.distance);
            }
        }
    }
}
