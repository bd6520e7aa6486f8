//! Amino-acid residue codes and classification

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Pad character used for alignment flanks and missing density.
pub const GAP: char = '-';

/// Marker for residues whose identity could not be resolved.
/// Terminal runs of this marker are stripped by the gap repairer;
/// interior occurrences become gap markers.
pub const UNKNOWN: char = 'X';

/// Three-letter residue name to one-letter code, standard residues plus
/// the extended codes (selenocysteine, pyrrolysine, placeholders).
pub static THREE_TO_ONE: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("ALA", 'A');
    map.insert("ARG", 'R');
    map.insert("ASN", 'N');
    map.insert("ASP", 'D');
    map.insert("CYS", 'C');
    map.insert("GLN", 'Q');
    map.insert("GLU", 'E');
    map.insert("GLY", 'G');
    map.insert("HIS", 'H');
    map.insert("ILE", 'I');
    map.insert("LEU", 'L');
    map.insert("LYS", 'K');
    map.insert("MET", 'M');
    map.insert("PHE", 'F');
    map.insert("PRO", 'P');
    map.insert("SER", 'S');
    map.insert("THR", 'T');
    map.insert("TRP", 'W');
    map.insert("TYR", 'Y');
    map.insert("VAL", 'V');
    map.insert("SEC", 'U');
    map.insert("PYL", 'O');
    map.insert("ASX", 'B');
    map.insert("GLX", 'Z');
    map.insert("XLE", 'J');
    map.insert("XAA", 'X');
    map
});

/// Convert a residue name to its one-letter code.
///
/// An empty name has no residue at all and maps to the gap marker;
/// an unrecognized name maps to the unknown marker.
pub fn one_letter(name: &str) -> char {
    let name = name.trim();
    if name.is_empty() {
        return GAP;
    }
    THREE_TO_ONE
        .get(name.to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN)
}

/// Check if a character is one of the twenty standard one-letter codes
pub fn is_standard_residue(c: char) -> bool {
    matches!(
        c,
        'A' | 'C' | 'D' | 'E' | 'F' | 'G' | 'H' | 'I' | 'K' | 'L' | 'M' | 'N' | 'P' | 'Q' | 'R'
            | 'S' | 'T' | 'V' | 'W' | 'Y'
    )
}
