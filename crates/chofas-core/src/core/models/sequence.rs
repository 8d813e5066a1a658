use super::region::StructureKind;
use super::residue::{AminoAcid, Residue};
use crate::core::propensity::table::PropensityTable;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Unrecognized residue symbol '{symbol}' at position {position}")]
    UnrecognizedSymbol { symbol: char, position: usize },

    #[error("No propensity defined for residue '{amino_acid}' at position {position}")]
    MissingPropensity {
        amino_acid: AminoAcid,
        position: usize,
    },
}

/// A protein sequence whose residues carry their looked-up propensities.
///
/// Construction fails on the first symbol that cannot be resolved; a sequence
/// never contains a residue with a substituted default value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinSequence {
    residues: Vec<Residue>,
}

impl ProteinSequence {
    /// Builds a sequence from upper-case one-letter codes.
    ///
    /// Positions reported in errors are 1-based.
    pub fn from_symbols(symbols: &str, table: &PropensityTable) -> Result<Self, SequenceError> {
        let residues = symbols
            .chars()
            .enumerate()
            .map(|(index, symbol)| {
                let amino_acid = AminoAcid::from_code(symbol).ok_or(
                    SequenceError::UnrecognizedSymbol {
                        symbol,
                        position: index + 1,
                    },
                )?;
                let propensity =
                    table
                        .lookup(amino_acid)
                        .ok_or(SequenceError::MissingPropensity {
                            amino_acid,
                            position: index + 1,
                        })?;
                Ok(Residue::new(
                    index,
                    amino_acid,
                    propensity.helix,
                    propensity.strand,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { residues })
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    #[inline]
    pub fn propensity(&self, index: usize, kind: StructureKind) -> f64 {
        self.residues[index].propensity(kind)
    }

    /// Sum of the `kind` propensity over an inclusive index range.
    pub fn propensity_sum(&self, range: RangeInclusive<usize>, kind: StructureKind) -> f64 {
        self.residues[range].iter().map(|r| r.propensity(kind)).sum()
    }

    /// Mean of the `kind` propensity over an inclusive index range.
    pub fn mean_propensity(&self, range: RangeInclusive<usize>, kind: StructureKind) -> f64 {
        let len = range.end() - range.start() + 1;
        self.propensity_sum(range, kind) / len as f64
    }

    pub fn subsequence(&self, range: RangeInclusive<usize>) -> String {
        self.residues[range]
            .iter()
            .map(|r| r.amino_acid.code())
            .collect()
    }
}

impl fmt::Display for ProteinSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for residue in &self.residues {
            write!(f, "{}", residue.amino_acid.code())?;
        }
        Ok(())
    }
}
