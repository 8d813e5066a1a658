use super::region::StructureKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // A
    Glycine,    // G
    Isoleucine, // I
    Leucine,    // L
    Proline,    // P
    Valine,     // V

    // --- Aromatic ---
    Phenylalanine, // F
    Tryptophan,    // W
    Tyrosine,      // Y

    // --- Polar, Uncharged ---
    Asparagine, // N
    Cysteine,   // C
    Glutamine,  // Q
    Serine,     // S
    Threonine,  // T
    Methionine, // M

    // --- Positively Charged (Basic) ---
    Arginine,  // R
    Histidine, // H
    Lysine,    // K

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // D
    GlutamicAcid, // E
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a standard one-letter amino acid code")]
pub struct ParseAminoAcidError(pub String);

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Cysteine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
        AminoAcid::Phenylalanine,
        AminoAcid::Glycine,
        AminoAcid::Histidine,
        AminoAcid::Isoleucine,
        AminoAcid::Lysine,
        AminoAcid::Leucine,
        AminoAcid::Methionine,
        AminoAcid::Asparagine,
        AminoAcid::Proline,
        AminoAcid::Glutamine,
        AminoAcid::Arginine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Valine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        let aa = match code {
            'A' => AminoAcid::Alanine,
            'C' => AminoAcid::Cysteine,
            'D' => AminoAcid::AsparticAcid,
            'E' => AminoAcid::GlutamicAcid,
            'F' => AminoAcid::Phenylalanine,
            'G' => AminoAcid::Glycine,
            'H' => AminoAcid::Histidine,
            'I' => AminoAcid::Isoleucine,
            'K' => AminoAcid::Lysine,
            'L' => AminoAcid::Leucine,
            'M' => AminoAcid::Methionine,
            'N' => AminoAcid::Asparagine,
            'P' => AminoAcid::Proline,
            'Q' => AminoAcid::Glutamine,
            'R' => AminoAcid::Arginine,
            'S' => AminoAcid::Serine,
            'T' => AminoAcid::Threonine,
            'V' => AminoAcid::Valine,
            'W' => AminoAcid::Tryptophan,
            'Y' => AminoAcid::Tyrosine,
            _ => return None,
        };
        Some(aa)
    }

    pub fn code(self) -> char {
        match self {
            AminoAcid::Alanine => 'A',
            AminoAcid::Cysteine => 'C',
            AminoAcid::AsparticAcid => 'D',
            AminoAcid::GlutamicAcid => 'E',
            AminoAcid::Phenylalanine => 'F',
            AminoAcid::Glycine => 'G',
            AminoAcid::Histidine => 'H',
            AminoAcid::Isoleucine => 'I',
            AminoAcid::Lysine => 'K',
            AminoAcid::Leucine => 'L',
            AminoAcid::Methionine => 'M',
            AminoAcid::Asparagine => 'N',
            AminoAcid::Proline => 'P',
            AminoAcid::Glutamine => 'Q',
            AminoAcid::Arginine => 'R',
            AminoAcid::Serine => 'S',
            AminoAcid::Threonine => 'T',
            AminoAcid::Valine => 'V',
            AminoAcid::Tryptophan => 'W',
            AminoAcid::Tyrosine => 'Y',
        }
    }
}

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                AminoAcid::from_code(c).ok_or_else(|| ParseAminoAcidError(s.to_string()))
            }
            _ => Err(ParseAminoAcidError(s.to_string())),
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single position of a loaded sequence with its cached propensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residue {
    pub index: usize,           // 0-based position in the sequence
    pub amino_acid: AminoAcid,  // Residue identity
    pub helix_propensity: f64,  // Pa
    pub strand_propensity: f64, // Pb
}

impl Residue {
    pub fn new(index: usize, amino_acid: AminoAcid, pa: f64, pb: f64) -> Self {
        Self {
            index,
            amino_acid,
            helix_propensity: pa,
            strand_propensity: pb,
        }
    }

    #[inline]
    pub fn propensity(&self, kind: StructureKind) -> f64 {
        match kind {
            StructureKind::Helix => self.helix_propensity,
            StructureKind::Strand => self.strand_propensity,
        }
    }
}
