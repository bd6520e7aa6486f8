//! Data types for structure/reference reconciliation

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, gap-free amino-acid sequence for the chosen isoform,
/// numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSequence {
    pub sequence: String,
}

impl ReferenceSequence {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Reference numbering, 1-based and contiguous.
    pub fn numbering(&self) -> Vec<i64> {
        (1..=self.len() as i64).collect()
    }
}

/// One residue as reported by a structural model: its author-assigned
/// sequence number, an optional insertion code and the residue name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResidue {
    pub number: i64,
    pub insertion_code: Option<char>,
    pub name: String,
}

impl RawResidue {
    pub fn new(number: i64, name: impl Into<String>) -> Self {
        Self {
            number,
            insertion_code: None,
            name: name.into(),
        }
    }
}

/// A residue reported by the model as present in the construct but not
/// resolved in the density.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingResidue {
    pub name: String,
    pub position: i64,
}

/// One chain of an experimental structural model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainModel {
    pub id: String,
    pub residues: Vec<RawResidue>,
    pub missing: Vec<MissingResidue>,
}

/// A predicted model: the modeled sequence and its per-residue
/// confidence scores (pLDDT), aligned 1:1 with positions starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedModel {
    pub sequence: String,
    pub plddt: Vec<f64>,
}

/// A structural model, tagged at ingestion as experimental or predicted.
/// Experimental chains go through extraction and alignment; predicted
/// models go through confidence segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructuralModel {
    Experimental(Vec<ChainModel>),
    Predicted(PredictedModel),
}

/// Ordered (position, residue) series for one chain.
/// After gap repair, positions are a contiguous run with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueSeries {
    pub positions: Vec<i64>,
    pub residues: Vec<char>,
}

impl ResidueSeries {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// The residues as a plain string, gap markers included.
    pub fn sequence(&self) -> String {
        self.residues.iter().collect()
    }
}

/// One column of the zipped alignment: reference and structure residues
/// with their projected numbering. Position 0 is the sentinel for "no
/// position on this side" (pad columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentColumn {
    pub ref_pos: i64,
    pub ref_res: char,
    pub struct_pos: i64,
    pub struct_res: char,
}

/// Closed interval of reference positions physically present in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRange {
    pub start: i64,
    pub end: i64,
}

impl fmt::Display for CoverageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

/// A covered position where structure and reference residues differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub ref_res: char,
    pub ref_pos: i64,
    pub struct_res: char,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.ref_res, self.ref_pos, self.struct_res)
    }
}

/// Verdict for one queried mutation position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationVerdict {
    /// The position is covered; self-pairing (e.g. "E17E") when the
    /// structure agrees with the reference.
    Resolved {
        ref_res: char,
        pos: i64,
        struct_res: char,
    },
    /// The position is not covered by the chain.
    NotInRange(i64),
    /// Predicted-model path: the position is below the confidence cutoff.
    NotInConfidentRegion,
    /// No verdict applies (no mutations requested, or no confident region).
    NotApplicable,
}

impl fmt::Display for MutationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved {
                ref_res,
                pos,
                struct_res,
            } => write!(f, "{}{}{}", ref_res, pos, struct_res),
            Self::NotInRange(pos) => write!(f, "Mutation on position {} not in range", pos),
            Self::NotInConfidentRegion => write!(f, "Mutation not in range"),
            Self::NotApplicable => write!(f, "NA"),
        }
    }
}

/// Reconciliation result for one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainReport {
    pub chain_id: String,
    pub coverage: Vec<CoverageRange>,
    pub discrepancies: Vec<Discrepancy>,
    pub verdicts: Vec<MutationVerdict>,
    pub warnings: Vec<String>,
}

/// Reconciliation result for one structure: the per-chain reports of
/// every chain that produced data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub chains: Vec<ChainReport>,
}
