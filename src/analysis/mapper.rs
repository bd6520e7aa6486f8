//! Position projection onto aligned sequences
//!
//! Projects each side's original numbering onto its aligned (gap-padded)
//! string, then zips both sides into alignment columns.

use super::align::AlignedPair;
use super::residue::GAP;
use super::types::AlignmentColumn;

/// Assign a position to every column of an aligned sequence.
///
/// Leading pad columns map to the 0 sentinel. From the first non-pad
/// column onward every column consumes the next original position, pads
/// included; once the list is exhausted, remaining columns map to 0.
pub fn map_positions(aligned: &str, positions: &[i64]) -> Vec<i64> {
    let mut mapped = Vec::with_capacity(aligned.len());
    let mut remaining = positions.iter().copied();
    let mut started = false;

    for c in aligned.chars() {
        if !started && c == GAP {
            mapped.push(0);
            continue;
        }
        started = true;
        mapped.push(remaining.next().unwrap_or(0));
    }

    mapped
}

/// Zip an aligned pair into columns, keeping only columns where the
/// structure actually has density (structure side is not a pad/gap).
pub fn build_columns(
    pair: &AlignedPair,
    ref_positions: &[i64],
    struct_positions: &[i64],
) -> Vec<AlignmentColumn> {
    let ref_map = map_positions(&pair.reference, ref_positions);
    let struct_map = map_positions(&pair.structure, struct_positions);

    pair.reference
        .chars()
        .zip(pair.structure.chars())
        .zip(ref_map.into_iter().zip(struct_map))
        .filter(|&((_, struct_res), _)| struct_res != GAP)
        .map(|((ref_res, struct_res), (ref_pos, struct_pos))| AlignmentColumn {
            ref_pos,
            ref_res,
            struct_pos,
            struct_res,
        })
        .collect()
}
