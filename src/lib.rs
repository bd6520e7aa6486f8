//! Mutcover - mutation-site coverage screening
//!
//! Reconciles the residues observed in experimental protein structures
//! (and predicted models) against a canonical reference sequence, to
//! determine which structures physically cover a set of queried mutation
//! sites and with what residue-level fidelity.

pub mod analysis;

pub use analysis::*;
