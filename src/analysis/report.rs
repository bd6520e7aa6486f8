//! Per-chain and per-structure reconciliation drivers
//!
//! Wires extraction, repair, alignment, mapping, trimming and resolution
//! into one pipeline per chain, fans out over chains with rayon, and
//! renders reports into the delimited row format consumed downstream.
//! Each chain is a pure function of its inputs, so the fan-out needs no
//! coordination and a failed chain never aborts its structure.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::align::align_sequences;
use super::confidence::segment_predicted;
use super::coverage::{coverage_ranges, find_discrepancies, trim_terminal_attachments};
use super::error::ChainSkip;
use super::extract::extract_residues;
use super::mapper::build_columns;
use super::repair::{apply_missing_residues, repair_gaps};
use super::types::{
    ChainModel, ChainReport, ReferenceSequence, StructuralModel, StructureReport,
};
use super::verdict::resolve_mutations;

/// Reconcile one experimental chain against the reference.
///
/// `queries` is the list of mutation positions of interest, or `None`
/// when no mutations were requested.
pub fn reconcile_chain(
    reference: &ReferenceSequence,
    chain: &ChainModel,
    queries: Option<&[i64]>,
) -> Result<ChainReport, ChainSkip> {
    let extracted = extract_residues(chain);
    if extracted.is_empty() {
        return Err(ChainSkip::UnusableChain);
    }

    let mut series = repair_gaps(extracted)?;

    let mut warnings = Vec::new();
    if let Some(warning) = apply_missing_residues(&mut series, &chain.missing) {
        warnings.push(warning);
    }

    let pair = align_sequences(&reference.sequence, &series.sequence())
        .ok_or(ChainSkip::AlignmentFailure)?;

    let columns = build_columns(&pair, &reference.numbering(), &series.positions);
    let (columns, trim_warnings) = trim_terminal_attachments(columns);
    warnings.extend(trim_warnings);

    let verdicts = queries
        .map(|positions| resolve_mutations(positions, &columns))
        .unwrap_or_default();

    Ok(ChainReport {
        chain_id: chain.id.clone(),
        coverage: coverage_ranges(&columns),
        discrepancies: find_discrepancies(&columns),
        verdicts,
        warnings,
    })
}

/// Reconcile a whole structural model.
///
/// Experimental chains are processed in parallel and in input order;
/// chains that fail extraction, repair or alignment contribute nothing.
/// Predicted models go through the confidence segmenter as chain "A".
pub fn reconcile_structure(
    reference: &ReferenceSequence,
    model: &StructuralModel,
    queries: Option<&[i64]>,
) -> StructureReport {
    match model {
        StructuralModel::Experimental(chains) => {
            let chains: Vec<ChainReport> = chains
                .par_iter()
                .filter_map(|chain| reconcile_chain(reference, chain, queries).ok())
                .collect();
            StructureReport { chains }
        }
        StructuralModel::Predicted(predicted) => StructureReport {
            chains: vec![segment_predicted(predicted, queries)],
        },
    }
}

/// One tabular row per structure: every field is the per-chain values
/// joined with ';' (list values within one chain joined with ','), with
/// "NA" standing in for empty fields. This is the only place delimited
/// strings appear; everything upstream stays typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub chains: String,
    pub coverage: String,
    pub mutation_sites: String,
    pub discrepancies: String,
    pub warnings: String,
}

impl ReportRow {
    pub fn from_report(report: &StructureReport) -> Self {
        Self {
            chains: join_chains(report, |chain| chain.chain_id.clone()),
            coverage: join_chains(report, |chain| {
                join_items(chain.coverage.iter().map(|r| r.to_string()), ";")
            }),
            mutation_sites: join_chains(report, |chain| {
                join_items(chain.verdicts.iter().map(|v| v.to_string()), ",")
            }),
            discrepancies: join_chains(report, |chain| {
                join_items(chain.discrepancies.iter().map(|d| d.to_string()), ",")
            }),
            warnings: join_chains(report, |chain| join_items(chain.warnings.iter().cloned(), ",")),
        }
    }
}

fn join_items(items: impl Iterator<Item = String>, separator: &str) -> String {
    let joined = items.collect::<Vec<_>>().join(separator);
    if joined.is_empty() {
        "NA".to_string()
    } else {
        joined
    }
}

fn join_chains(report: &StructureReport, f: impl Fn(&ChainReport) -> String) -> String {
    if report.chains.is_empty() {
        return "NA".to_string();
    }
    report
        .chains
        .iter()
        .map(f)
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{CoverageRange, MissingResidue, PredictedModel, RawResidue};
    use pretty_assertions::assert_eq;

    const REFERENCE: &str = "MKTAYIAKQRQISFVKSHFSRQLEE";

    fn residue_name(c: char) -> &'static str {
        match c {
            'M' => "MET",
            'K' => "LYS",
            'T' => "THR",
            'A' => "ALA",
            'Y' => "TYR",
            'I' => "ILE",
            'Q' => "GLN",
            'R' => "ARG",
            'S' => "SER",
            'F' => "PHE",
            'V' => "VAL",
            'H' => "HIS",
            'L' => "LEU",
            'E' => "GLU",
            'G' => "GLY",
            _ => "UNL",
        }
    }

    fn chain_from(id: &str, sequence: &str, first_number: i64) -> ChainModel {
        ChainModel {
            id: id.to_string(),
            residues: sequence
                .chars()
                .enumerate()
                .map(|(i, c)| RawResidue::new(first_number + i as i64, residue_name(c)))
                .collect(),
            missing: Vec::new(),
        }
    }

    #[test]
    fn test_exact_chain_full_coverage() {
        let reference = ReferenceSequence::new(REFERENCE);
        let chain = chain_from("A", REFERENCE, 1);
        let report = reconcile_chain(&reference, &chain, Some(&[13, 999])).unwrap();

        assert_eq!(report.coverage, vec![CoverageRange { start: 1, end: 25 }]);
        assert!(report.discrepancies.is_empty());
        assert_eq!(report.verdicts[0].to_string(), "S13S");
        assert_eq!(
            report.verdicts[1].to_string(),
            "Mutation on position 999 not in range"
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_point_mutation_reported() {
        let reference = ReferenceSequence::new(REFERENCE);
        let mutated: String = REFERENCE
            .chars()
            .enumerate()
            .map(|(i, c)| if i == 12 { 'A' } else { c })
            .collect();
        let chain = chain_from("A", &mutated, 1);
        let report = reconcile_chain(&reference, &chain, Some(&[13])).unwrap();

        assert_eq!(report.discrepancies.len(), 1);
        assert_eq!(report.discrepancies[0].to_string(), "S13A");
        assert_eq!(report.verdicts[0].to_string(), "S13A");
        assert_eq!(report.coverage, vec![CoverageRange { start: 1, end: 25 }]);
    }

    #[test]
    fn test_numbering_hole_splits_coverage() {
        let reference = ReferenceSequence::new(REFERENCE);
        let mut chain = chain_from("A", REFERENCE, 1);
        chain.residues.remove(12); // position 13 unresolved
        let report = reconcile_chain(&reference, &chain, Some(&[13])).unwrap();

        assert_eq!(
            report.coverage,
            vec![
                CoverageRange { start: 1, end: 12 },
                CoverageRange { start: 14, end: 25 },
            ]
        );
        assert!(report.discrepancies.is_empty());
        assert_eq!(
            report.verdicts[0].to_string(),
            "Mutation on position 13 not in range"
        );
    }

    #[test]
    fn test_his_tag_trimmed_from_coverage() {
        let reference = ReferenceSequence::new(REFERENCE);
        let tagged = format!("HHHHHH{REFERENCE}");
        let chain = chain_from("A", &tagged, 1);
        let report = reconcile_chain(&reference, &chain, Some(&[13])).unwrap();

        assert_eq!(report.coverage, vec![CoverageRange { start: 1, end: 25 }]);
        assert!(report.discrepancies.is_empty());
        assert_eq!(report.verdicts[0].to_string(), "S13S");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0]
            .contains("attachment at N-terminal with length 6 have been removed from coverage"));
    }

    #[test]
    fn test_short_cterm_tag_reported_against_reference_residues() {
        // a 2-residue foreign tail replacing the chain's own C-terminus:
        // too short for the terminal trim, so it must surface as ordinary
        // discrepancies carrying the real reference residues
        let reference = ReferenceSequence::new(REFERENCE);
        let tagged = format!("{}GG", &REFERENCE[..20]);
        let chain = chain_from("A", &tagged, 1);
        let report = reconcile_chain(&reference, &chain, Some(&[21])).unwrap();

        let rendered: Vec<String> = report
            .discrepancies
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(rendered, vec!["R21G".to_string(), "Q22G".to_string()]);
        assert_eq!(report.verdicts[0].to_string(), "R21G");
        assert_eq!(report.coverage, vec![CoverageRange { start: 1, end: 22 }]);
    }

    #[test]
    fn test_short_nterm_tag_reported_against_reference_residues() {
        let reference = ReferenceSequence::new(REFERENCE);
        let tagged = format!("G{}", &REFERENCE[2..]);
        let chain = chain_from("A", &tagged, 1);
        let report = reconcile_chain(&reference, &chain, Some(&[2])).unwrap();

        assert_eq!(report.discrepancies.len(), 1);
        assert_eq!(report.discrepancies[0].to_string(), "K2G");
        assert_eq!(report.verdicts[0].to_string(), "K2G");
        assert_eq!(report.coverage, vec![CoverageRange { start: 2, end: 25 }]);
    }

    #[test]
    fn test_missing_residue_records_reduce_coverage() {
        let reference = ReferenceSequence::new(REFERENCE);
        let mut chain = chain_from("A", REFERENCE, 1);
        chain.missing = vec![MissingResidue {
            name: "SER".to_string(),
            position: 13,
        }];
        let report = reconcile_chain(&reference, &chain, None).unwrap();

        assert_eq!(
            report.coverage,
            vec![
                CoverageRange { start: 1, end: 12 },
                CoverageRange { start: 14, end: 25 },
            ]
        );
        assert!(report.verdicts.is_empty());
    }

    #[test]
    fn test_expression_tag_warning_propagates() {
        let reference = ReferenceSequence::new(REFERENCE);
        let mut chain = chain_from("A", REFERENCE, 1);
        chain.missing = (0..6)
            .map(|i| MissingResidue {
                name: "HIS".to_string(),
                position: -5 + i,
            })
            .collect();
        let report = reconcile_chain(&reference, &chain, None).unwrap();

        assert_eq!(
            report.warnings,
            vec!["The structure likely contains an expression tag".to_string()]
        );
        assert_eq!(report.coverage, vec![CoverageRange { start: 1, end: 25 }]);
    }

    #[test]
    fn test_degenerate_chain_skipped() {
        let reference = ReferenceSequence::new(REFERENCE);
        let chain = ChainModel {
            id: "B".to_string(),
            residues: (1..=10).map(|n| RawResidue::new(n, "UNL")).collect(),
            missing: Vec::new(),
        };
        assert_eq!(
            reconcile_chain(&reference, &chain, None),
            Err(ChainSkip::UnusableChain)
        );
    }

    #[test]
    fn test_unrelated_chain_fails_alignment() {
        let reference = ReferenceSequence::new("AAAAAAAAAA");
        let chain = chain_from("A", "GTGTGTGTGT", 1);
        assert_eq!(
            reconcile_chain(&reference, &chain, None),
            Err(ChainSkip::AlignmentFailure)
        );
    }

    #[test]
    fn test_structure_drops_failed_chains() {
        let reference = ReferenceSequence::new(REFERENCE);
        let good = chain_from("A", REFERENCE, 1);
        let degenerate = ChainModel {
            id: "B".to_string(),
            residues: (1..=10).map(|n| RawResidue::new(n, "UNL")).collect(),
            missing: Vec::new(),
        };
        let model = StructuralModel::Experimental(vec![good, degenerate]);
        let report = reconcile_structure(&reference, &model, Some(&[13]));

        assert_eq!(report.chains.len(), 1);
        assert_eq!(report.chains[0].chain_id, "A");
    }

    #[test]
    fn test_predicted_model_dispatch() {
        let reference = ReferenceSequence::new("MKTA");
        let model = StructuralModel::Predicted(PredictedModel {
            sequence: "MKTA".to_string(),
            plddt: vec![90.0, 90.0, 40.0, 90.0],
        });
        let report = reconcile_structure(&reference, &model, Some(&[2, 3]));
        let row = ReportRow::from_report(&report);

        assert_eq!(row.chains, "A");
        assert_eq!(row.coverage, "(1,2);(4,4)");
        assert_eq!(row.mutation_sites, "K2K,Mutation not in range");
        assert_eq!(row.discrepancies, "NA");
        assert_eq!(row.warnings, "NA");
    }

    #[test]
    fn test_row_rendering_multi_chain() {
        let reference = ReferenceSequence::new(REFERENCE);
        let model = StructuralModel::Experimental(vec![
            chain_from("A", REFERENCE, 1),
            chain_from("B", &REFERENCE[11..], 12),
        ]);
        let report = reconcile_structure(&reference, &model, Some(&[13]));
        let row = ReportRow::from_report(&report);

        assert_eq!(row.chains, "A;B");
        assert_eq!(row.coverage, "(1,25);(12,25)");
        assert_eq!(row.mutation_sites, "S13S;S13S");
        assert_eq!(row.discrepancies, "NA;NA");
        assert_eq!(row.warnings, "NA;NA");
    }

    #[test]
    fn test_empty_report_renders_na() {
        let row = ReportRow::from_report(&StructureReport::default());
        assert_eq!(row.chains, "NA");
        assert_eq!(row.coverage, "NA");
        assert_eq!(row.mutation_sites, "NA");
        assert_eq!(row.discrepancies, "NA");
        assert_eq!(row.warnings, "NA");
    }

    #[test]
    fn test_report_serde_round_trip() {
        let reference = ReferenceSequence::new(REFERENCE);
        let model = StructuralModel::Experimental(vec![chain_from("A", REFERENCE, 1)]);
        let report = reconcile_structure(&reference, &model, Some(&[13]));

        let json = serde_json::to_string(&report).unwrap();
        let restored: StructureReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }
}
