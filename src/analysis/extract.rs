//! Residue extraction from raw structural chains
//!
//! Turns a chain's raw residue list into an ordered (position, residue)
//! series, normalizing insertion-code numbering so that repeated author
//! numbers become distinct consecutive integers.

use std::collections::HashSet;

use super::residue::one_letter;
use super::types::{ChainModel, ResidueSeries};

/// Extract the (position, residue) series for one chain.
///
/// Every residue carrying an insertion code bumps a running offset that is
/// added to its own and all subsequent author numbers, so insertion-coded
/// residues get their own integer positions.
///
/// A chain whose residues collapse to a single distinct value carries no
/// usable sequence; the returned series is empty and the chain must be
/// skipped.
pub fn extract_residues(chain: &ChainModel) -> ResidueSeries {
    let mut positions = Vec::with_capacity(chain.residues.len());
    let mut residues = Vec::with_capacity(chain.residues.len());

    let mut offset: i64 = 0;
    for raw in &chain.residues {
        if raw.insertion_code.is_some() {
            offset += 1;
        }
        positions.push(raw.number + offset);
        residues.push(one_letter(&raw.name));
    }

    let distinct: HashSet<char> = residues.iter().copied().collect();
    if distinct.len() <= 1 {
        return ResidueSeries::default();
    }

    ResidueSeries {
        positions,
        residues,
    }
}
