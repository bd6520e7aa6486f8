//! Gap repair: make a chain's numbering contiguous
//!
//! Strips unresolved termini, drops chains too degraded to trust, fills
//! numbering holes with gap rows and applies externally reported
//! missing-residue records.

use std::collections::{HashMap, HashSet};

use super::error::ChainSkip;
use super::residue::{one_letter, GAP, UNKNOWN};
use super::types::{MissingResidue, ResidueSeries};

/// Minimum residues a gapped fragment must keep to count as real coverage.
const MIN_FRAGMENT_LEN: usize = 5;

/// Repair a freshly extracted series so its positions form one contiguous
/// run `[min, max]` with no duplicates.
///
/// Terminal runs of the unknown marker are unresolved termini and are
/// stripped outright; interior unknowns become gap markers. A series that
/// is already contiguous and duplicate-free is returned unchanged.
pub fn repair_gaps(series: ResidueSeries) -> Result<ResidueSeries, ChainSkip> {
    let start = series
        .residues
        .iter()
        .take_while(|&&r| r == UNKNOWN)
        .count();
    let stripped = series.residues.len()
        - series
            .residues
            .iter()
            .rev()
            .take_while(|&&r| r == UNKNOWN)
            .count();
    if start >= stripped {
        return Err(ChainSkip::UnusableChain);
    }

    let residues: Vec<char> = series.residues[start..stripped]
        .iter()
        .map(|&r| if r == UNKNOWN { GAP } else { r })
        .collect();
    let positions: Vec<i64> = series.positions[start..stripped].to_vec();

    if residues.len() < MIN_FRAGMENT_LEN && residues.contains(&GAP) {
        return Err(ChainSkip::UnusableChain);
    }

    // drop repeated (position, residue) rows, keeping the first; rows
    // that reuse a position with a *different* residue survive and are
    // caught below
    let mut seen: HashSet<(i64, char)> = HashSet::new();
    let mut kept_positions = Vec::with_capacity(positions.len());
    let mut kept_residues = Vec::with_capacity(residues.len());
    for (&p, &r) in positions.iter().zip(&residues) {
        if seen.insert((p, r)) {
            kept_positions.push(p);
            kept_residues.push(r);
        }
    }

    let min = *kept_positions.iter().min().ok_or(ChainSkip::UnusableChain)?;
    let max = *kept_positions.iter().max().ok_or(ChainSkip::UnusableChain)?;

    let mut sorted = kept_positions.clone();
    sorted.sort_unstable();
    let contiguous: Vec<i64> = (min..=max).collect();
    if sorted == contiguous {
        return Ok(ResidueSeries {
            positions: kept_positions,
            residues: kept_residues,
        });
    }

    let distinct: HashSet<i64> = sorted.iter().copied().collect();
    if distinct.len() != sorted.len() {
        return Err(ChainSkip::AmbiguousNumbering);
    }

    // rebuild over [min, max], synthesizing a gap row for every hole
    let by_position: HashMap<i64, char> = kept_positions
        .iter()
        .copied()
        .zip(kept_residues.iter().copied())
        .collect();
    let positions: Vec<i64> = (min..=max).collect();
    let residues: Vec<char> = positions
        .iter()
        .map(|p| by_position.get(p).copied().unwrap_or(GAP))
        .collect();

    Ok(ResidueSeries {
        positions,
        residues,
    })
}

/// Force every externally reported missing residue present in the series
/// to the gap marker; the explicit records win over whatever extraction
/// produced. Returns a warning when the missing residues spell out a
/// histidine stretch, the signature of an expression/purification tag.
pub fn apply_missing_residues(
    series: &mut ResidueSeries,
    missing: &[MissingResidue],
) -> Option<String> {
    if missing.is_empty() {
        return None;
    }

    for record in missing {
        if let Some(i) = series.positions.iter().position(|&p| p == record.position) {
            series.residues[i] = GAP;
        }
    }

    let missing_sequence: String = missing.iter().map(|m| one_letter(&m.name)).collect();
    if missing_sequence.contains("HHH") {
        Some("The structure likely contains an expression tag".to_string())
    } else {
        None
    }
}
