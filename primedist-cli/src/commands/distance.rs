//! Single-pair distance commands

use primedist_core::{bounded_distance, edit_distance, hamming_distance, BoundedMatch};

use crate::config::Config;
use crate::error::CliResult;

pub fn execute_hamming(a: &str, b: &str) -> CliResult<()> {
    let distance = hamming_distance(a.as_bytes(), b.as_bytes())?;
    log::debug!("hamming({}, {}) = {}", a, b, distance);
    println!("{}", distance);
    Ok(())
}

pub fn execute_edit(a: &str, b: &str) -> CliResult<()> {
    let distance = edit_distance(a.as_bytes(), b.as_bytes())?;
    log::debug!("edit({}, {}) = {}", a, b, distance);
    println!("{}", distance);
    Ok(())
}

pub fn execute_bounded(
    config: &Config,
    query: &str,
    target: &str,
    max_edits: Option<usize>,
    end_matches: Option<usize>,
) -> CliResult<()> {
    let params = config.matching.params(max_edits, end_matches);
    log::debug!("Bounded search with k={} m={}", params.max_edits, params.end_matches);

    let hit = bounded_distance(
        query.as_bytes(),
        target.as_bytes(),
        params.max_edits,
        params.end_matches,
    )?;
    println!("{}", format_bounded(&hit, params.max_edits));
    Ok(())
}

fn format_bounded(hit: &BoundedMatch, max_edits: usize) -> String {
    let status = if hit.is_accepted(max_edits) {
        "accepted"
    } else if hit.end_mismatch() {
        "end-mismatch"
    } else {
        "rejected"
    };
    format!("{}\t{}\t{}", hit.distance, hit.end_position, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bounded() {
        assert_eq!(format_bounded(&BoundedMatch::new(1, 8), 2), "1\t8\taccepted");
        assert_eq!(format_bounded(&BoundedMatch::new(3, 8), 2), "3\t8\trejected");
        assert_eq!(format_bounded(&BoundedMatch::new(101, 8), 2), "101\t8\tend-mismatch");
    }

    #[test]
    fn test_errors_propagate() {
        assert!(execute_hamming("ACGT", "ACG").is_err());
        assert!(execute_bounded(&Config::default(), "", "ACGT", None, Some(0)).is_err());
        assert!(execute_edit("ACGT", "").is_ok());
    }
}
