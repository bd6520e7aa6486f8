//! Confidence segmentation for predicted models
//!
//! Predicted models carry no experimental density; coverage is defined by
//! the per-residue confidence score instead of an alignment, and verdicts
//! echo the predicted residue unchanged.

use super::coverage::ranges_from_positions;
use super::residue::UNKNOWN;
use super::types::{ChainReport, MutationVerdict, PredictedModel};
use super::verdict::dedup_queries;

/// A residue is high-confidence iff its pLDDT score exceeds this (strict).
pub const PLDDT_THRESHOLD: f64 = 70.0;

/// Segment a predicted model into high-confidence coverage ranges and
/// resolve the queried mutation positions against them.
///
/// Predicted models always report a single chain "A", no discrepancies
/// and no warnings. When no residue is high-confidence, coverage is empty
/// and every verdict degrades to "NA".
pub fn segment_predicted(model: &PredictedModel, queries: Option<&[i64]>) -> ChainReport {
    let residues: Vec<char> = model.sequence.chars().collect();
    let high: Vec<i64> = model
        .plddt
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score > PLDDT_THRESHOLD)
        .map(|(i, _)| i as i64 + 1)
        .collect();

    let verdicts = match queries {
        None => Vec::new(),
        Some(positions) => {
            let positions = dedup_queries(positions);
            if high.is_empty() {
                positions
                    .iter()
                    .map(|_| MutationVerdict::NotApplicable)
                    .collect()
            } else {
                positions
                    .into_iter()
                    .map(|pos| {
                        let confident = pos >= 1
                            && model
                                .plddt
                                .get(pos as usize - 1)
                                .is_some_and(|&score| score > PLDDT_THRESHOLD);
                        if confident {
                            let res = residues.get(pos as usize - 1).copied().unwrap_or(UNKNOWN);
                            MutationVerdict::Resolved {
                                ref_res: res,
                                pos,
                                struct_res: res,
                            }
                        } else {
                            MutationVerdict::NotInConfidentRegion
                        }
                    })
                    .collect()
            }
        }
    };

    ChainReport {
        chain_id: "A".to_string(),
        coverage: ranges_from_positions(&high),
        discrepancies: Vec::new(),
        verdicts,
        warnings: Vec::new(),
    }
}
