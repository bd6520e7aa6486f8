//! Mutation-site resolution against the trimmed column table

use std::collections::HashSet;

use super::types::{AlignmentColumn, MutationVerdict};

/// Deduplicate queried positions, preserving first-occurrence order.
pub fn dedup_queries(queries: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    queries
        .iter()
        .copied()
        .filter(|q| seen.insert(*q))
        .collect()
}

/// Resolve each queried reference position against the trimmed table.
///
/// Exactly one verdict is emitted per deduplicated query: the resolved
/// residue pair when the position is covered (self-pairing when the
/// structure agrees with the reference), "not in range" otherwise.
pub fn resolve_mutations(queries: &[i64], columns: &[AlignmentColumn]) -> Vec<MutationVerdict> {
    dedup_queries(queries)
        .into_iter()
        .map(|pos| match columns.iter().find(|c| c.ref_pos == pos) {
            Some(c) => MutationVerdict::Resolved {
                ref_res: c.ref_res,
                pos,
                struct_res: c.struct_res,
            },
            None => MutationVerdict::NotInRange(pos),
        })
        .collect()
}
