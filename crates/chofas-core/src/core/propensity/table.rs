use super::defaults::{HELIX_PROPENSITY, STRAND_PROPENSITY};
use crate::core::models::residue::AminoAcid;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// The (Pa, Pb) pair of a single amino acid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Propensity {
    pub helix: f64,
    pub strand: f64,
}

impl Propensity {
    pub fn new(helix: f64, strand: f64) -> Self {
        Self { helix, strand }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    residues: BTreeMap<String, Propensity>,
}

#[derive(Debug, Deserialize)]
struct TableRecord {
    symbol: String,
    helix: f64,
    strand: f64,
}

#[derive(Debug, Error)]
pub enum PropensityLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown residue symbol '{symbol}' in '{path}'")]
    UnknownSymbol { path: String, symbol: String },
    #[error("Residue '{symbol}' is defined more than once in '{path}'")]
    DuplicateSymbol { path: String, symbol: char },
    #[error("Propensity for '{symbol}' in '{path}' must be a finite, non-negative number")]
    InvalidValue { path: String, symbol: char },
}

/// Immutable amino acid → propensity mapping shared by every prediction stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PropensityTable {
    entries: HashMap<AminoAcid, Propensity>,
}

impl Default for PropensityTable {
    fn default() -> Self {
        Self::chou_fasman()
    }
}

impl PropensityTable {
    /// The published Chou–Fasman parameters for the 20 standard residues.
    pub fn chou_fasman() -> Self {
        let entries = AminoAcid::ALL
            .iter()
            .filter_map(|&aa| {
                let pa = HELIX_PROPENSITY.get(&aa.code())?;
                let pb = STRAND_PROPENSITY.get(&aa.code())?;
                Some((aa, Propensity::new(*pa, *pb)))
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (AminoAcid, Propensity)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, amino_acid: AminoAcid) -> Option<Propensity> {
        self.entries.get(&amino_acid).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by one-letter code.
    pub fn iter(&self) -> impl Iterator<Item = (AminoAcid, Propensity)> + '_ {
        let mut sorted: Vec<_> = self.entries.iter().map(|(aa, p)| (*aa, *p)).collect();
        sorted.sort_by_key(|(aa, _)| aa.code());
        sorted.into_iter()
    }

    /// Loads a table from disk. `.csv` files are read as `symbol,helix,strand`
    /// records, everything else as TOML with a `[residues.X]` table per residue.
    pub fn load(path: &Path) -> Result<Self, PropensityLoadError> {
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::load_csv(path)
        } else {
            Self::load_toml(path)
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let file = TableFile {
            residues: self
                .iter()
                .map(|(aa, p)| (aa.code().to_string(), p))
                .collect(),
        };
        toml::to_string(&file)
    }

    fn load_toml(path: &Path) -> Result<Self, PropensityLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| PropensityLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: TableFile = toml::from_str(&content).map_err(|e| PropensityLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut table = Self::from_entries([]);
        for (symbol, propensity) in file.residues {
            table.insert_checked(path, &symbol, propensity)?;
        }
        Ok(table)
    }

    fn load_csv(path: &Path) -> Result<Self, PropensityLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PropensityLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut table = Self::from_entries([]);
        for result in reader.deserialize::<TableRecord>() {
            let record = result.map_err(|e| PropensityLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            table.insert_checked(
                path,
                &record.symbol,
                Propensity::new(record.helix, record.strand),
            )?;
        }
        Ok(table)
    }

    fn insert_checked(
        &mut self,
        path: &Path,
        symbol: &str,
        propensity: Propensity,
    ) -> Result<(), PropensityLoadError> {
        let amino_acid: AminoAcid =
            symbol
                .parse()
                .map_err(|_| PropensityLoadError::UnknownSymbol {
                    path: path.to_string_lossy().to_string(),
                    symbol: symbol.to_string(),
                })?;

        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(propensity.helix) || !valid(propensity.strand) {
            return Err(PropensityLoadError::InvalidValue {
                path: path.to_string_lossy().to_string(),
                symbol: amino_acid.code(),
            });
        }

        if self.entries.insert(amino_acid, propensity).is_some() {
            return Err(PropensityLoadError::DuplicateSymbol {
                path: path.to_string_lossy().to_string(),
                symbol: amino_acid.code(),
            });
        }
        Ok(())
    }
}
