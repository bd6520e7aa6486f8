//! Local alignment of reference vs structural sequence
//!
//! Uses Smith-Waterman from the bio crate with an asymmetric scoring
//! scheme: substitutions may be real mutations and cost little, while
//! insertions and deletions almost always signal a numbering or
//! extraction error and are punished hard.

use bio::alignment::pairwise::Aligner;
use bio::alignment::AlignmentOperation;

use super::residue::GAP;

pub const MATCH_SCORE: i32 = 1;
pub const MISMATCH_SCORE: i32 = -10;
pub const GAP_OPEN: i32 = -20;
pub const GAP_EXTEND: i32 = -10;

/// Equal-length aligned sequences, '-' padding both unaligned flanks and
/// true gaps. Gap markers already present in the structural sequence are
/// aligned like any other character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub reference: String,
    pub structure: String,
}

/// Align the reference against one chain's structural sequence.
///
/// Returns `None` when no positive-scoring local alignment exists; the
/// caller must skip the chain.
///
/// The aligned strings span the full extent of both inputs: the local
/// core plus both unaligned flanks. At each terminus the two flanks are
/// paired column-by-column and only the excess of the longer flank is
/// gap-opposed, at the very front for the head and at the very end for
/// the tail. A pure structure-side overhang thus still yields
/// reference-position-0 rows for the terminal trim, while a foreign
/// tail too short for the local core to absorb stays paired with the
/// true reference residues it replaces.
pub fn align_sequences(reference: &str, structure: &str) -> Option<AlignedPair> {
    if reference.is_empty() || structure.is_empty() {
        return None;
    }

    let x = reference.as_bytes();
    let y = structure.as_bytes();

    let mut aligner = Aligner::with_capacity(
        x.len(),
        y.len(),
        GAP_OPEN,
        GAP_EXTEND,
        |a: u8, b: u8| -> i32 {
            if a == b {
                MATCH_SCORE
            } else {
                MISMATCH_SCORE
            }
        },
    );

    let alignment = aligner.local(x, y);
    if alignment.operations.is_empty() || alignment.score <= 0 {
        return None;
    }

    let capacity = x.len() + y.len();
    let mut ref_aligned = String::with_capacity(capacity);
    let mut struct_aligned = String::with_capacity(capacity);

    let head_ref = &x[..alignment.xstart];
    let head_struct = &y[..alignment.ystart];
    let paired = head_ref.len().min(head_struct.len());
    for &b in &head_ref[..head_ref.len() - paired] {
        ref_aligned.push(b as char);
        struct_aligned.push(GAP);
    }
    for &b in &head_struct[..head_struct.len() - paired] {
        ref_aligned.push(GAP);
        struct_aligned.push(b as char);
    }
    for (&r, &s) in head_ref[head_ref.len() - paired..]
        .iter()
        .zip(&head_struct[head_struct.len() - paired..])
    {
        ref_aligned.push(r as char);
        struct_aligned.push(s as char);
    }

    let mut xi = alignment.xstart;
    let mut yi = alignment.ystart;
    for op in &alignment.operations {
        match op {
            AlignmentOperation::Match | AlignmentOperation::Subst => {
                ref_aligned.push(x[xi] as char);
                struct_aligned.push(y[yi] as char);
                xi += 1;
                yi += 1;
            }
            AlignmentOperation::Del => {
                // gap in the reference, residue in the structure
                ref_aligned.push(GAP);
                struct_aligned.push(y[yi] as char);
                yi += 1;
            }
            AlignmentOperation::Ins => {
                // residue in the reference, gap in the structure
                ref_aligned.push(x[xi] as char);
                struct_aligned.push(GAP);
                xi += 1;
            }
            AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {}
        }
    }

    let tail_ref = &x[alignment.xend..];
    let tail_struct = &y[alignment.yend..];
    let paired = tail_ref.len().min(tail_struct.len());
    for (&r, &s) in tail_ref[..paired].iter().zip(&tail_struct[..paired]) {
        ref_aligned.push(r as char);
        struct_aligned.push(s as char);
    }
    for &b in &tail_ref[paired..] {
        ref_aligned.push(b as char);
        struct_aligned.push(GAP);
    }
    for &b in &tail_struct[paired..] {
        ref_aligned.push(GAP);
        struct_aligned.push(b as char);
    }

    Some(AlignedPair {
        reference: ref_aligned,
        structure: struct_aligned,
    })
}
