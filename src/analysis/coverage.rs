//! Discrepancy and coverage analysis of the alignment column table
//!
//! Trims spurious terminal attachments (cloning/expression artifacts),
//! lists the true residue discrepancies and collapses the covered
//! reference positions into maximal contiguous ranges.

use std::collections::HashSet;

use super::types::{AlignmentColumn, CoverageRange, Discrepancy};

/// Terminal runs of discrepant residues longer than this are presumed to
/// be attachments rather than clustered point mutations.
const MAX_TERMINAL_MUTATION_RUN: usize = 2;

/// Remove spurious terminal attachments from the column table.
///
/// Hotspots are the reference positions whose residues disagree. Two
/// patterns are trimmed, each with a warning:
/// - a leading run of position-0 rows (structure residues aligned ahead
///   of the reference's first residue);
/// - any consecutive hotspot run longer than two residues that touches
///   the table's first or last reference position.
///
/// Short terminal runs survive, so genuine point mutations near the ends
/// are never dropped.
pub fn trim_terminal_attachments(
    columns: Vec<AlignmentColumn>,
) -> (Vec<AlignmentColumn>, Vec<String>) {
    let mut warnings = Vec::new();
    if columns.is_empty() {
        return (columns, warnings);
    }

    let hotspots: Vec<i64> = columns
        .iter()
        .filter(|c| c.ref_res != c.struct_res)
        .map(|c| c.ref_pos)
        .collect();
    if hotspots.is_empty() {
        return (columns, warnings);
    }

    let seq_start = columns.first().map(|c| c.ref_pos).unwrap_or_default();
    let seq_end = columns.last().map(|c| c.ref_pos).unwrap_or_default();

    let mut removed: HashSet<i64> = HashSet::new();

    let leading_zeros = hotspots.iter().take_while(|&&p| p == 0).count();
    if leading_zeros > 0 {
        removed.insert(0);
        warnings.push(format!(
            "attachment at N-terminal with length {leading_zeros} have been removed from coverage"
        ));
    }

    for run in consecutive_runs(&hotspots) {
        if run.len() <= MAX_TERMINAL_MUTATION_RUN {
            continue;
        }
        if run.contains(&seq_start) {
            warnings.push(format!(
                "attachment at N-terminal with length {} have been removed from coverage",
                run.len()
            ));
            removed.extend(run.iter().copied());
        }
        if run.contains(&seq_end) {
            warnings.push(format!(
                "attachment at C-terminal with length {} have been removed from coverage",
                run.len()
            ));
            removed.extend(run.iter().copied());
        }
    }

    let trimmed: Vec<AlignmentColumn> = columns
        .into_iter()
        .filter(|c| !removed.contains(&c.ref_pos))
        .collect();

    (trimmed, warnings)
}

/// Every remaining position where reference and structure residues differ.
pub fn find_discrepancies(columns: &[AlignmentColumn]) -> Vec<Discrepancy> {
    columns
        .iter()
        .filter(|c| c.ref_res != c.struct_res)
        .map(|c| Discrepancy {
            ref_res: c.ref_res,
            ref_pos: c.ref_pos,
            struct_res: c.struct_res,
        })
        .collect()
}

/// Collapse the table's reference positions into maximal runs of
/// consecutive integers, ascending.
pub fn coverage_ranges(columns: &[AlignmentColumn]) -> Vec<CoverageRange> {
    let mut positions: Vec<i64> = columns.iter().map(|c| c.ref_pos).collect();
    positions.sort_unstable();
    positions.dedup();
    ranges_from_positions(&positions)
}

/// Maximal consecutive runs of a sorted, deduplicated position list.
pub fn ranges_from_positions(positions: &[i64]) -> Vec<CoverageRange> {
    let mut ranges = Vec::new();
    let mut iter = positions.iter().copied();
    let Some(first) = iter.next() else {
        return ranges;
    };

    let mut start = first;
    let mut end = first;
    for p in iter {
        if p == end + 1 {
            end = p;
        } else {
            ranges.push(CoverageRange { start, end });
            start = p;
            end = p;
        }
    }
    ranges.push(CoverageRange { start, end });
    ranges
}

fn consecutive_runs(positions: &[i64]) -> Vec<Vec<i64>> {
    let mut runs: Vec<Vec<i64>> = Vec::new();
    for &p in positions {
        match runs.last_mut() {
            Some(run) if run.last() == Some(&(p - 1)) => run.push(p),
            _ => runs.push(vec![p]),
        }
    }
    runs
}
