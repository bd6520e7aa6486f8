//! Per-chain skip conditions
//!
//! None of these abort a structure: the caller drops the offending chain
//! and keeps reconciling the rest.

use thiserror::Error;

/// Why a chain contributed no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainSkip {
    /// Extraction produced a degenerate (single residue value) series, or
    /// the series was too short after trimming to be a meaningful fragment.
    #[error("chain produced a degenerate or too-short residue series")]
    UnusableChain,
    /// Duplicate position assignments survived deduplication; the model's
    /// numbering cannot be trusted.
    #[error("chain assigns multiple residues to the same position")]
    AmbiguousNumbering,
    /// No local alignment was found between the reference and the
    /// structural sequence.
    #[error("no alignment between reference and structural sequence")]
    AlignmentFailure,
}
