use bio::io::fasta;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Identifier given to sequence text that carries no FASTA header.
pub const DEFAULT_RECORD_ID: &str = "query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: Option<String>,
    /// Normalized residue symbols (see [`normalize`]).
    pub residues: String,
}

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed FASTA record #{index}: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("Record '{id}' (#{index}) contains no residues")]
    EmptyRecord { id: String, index: usize },

    #[error("Input contains no sequence")]
    NoRecords,
}

/// Strips whitespace and position numbers from pasted sequence text and upper-cases letters.
///
/// Any other character is kept so that the propensity lookup can reject it.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_digit())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Reader for FASTA files and for bare sequence text.
pub struct FastaFile;

impl FastaFile {
    /// Reads every record from `reader`. Input whose first non-blank line is a `>` header
    /// is parsed as FASTA; anything else is one raw record named [`DEFAULT_RECORD_ID`].
    pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<SequenceRecord>, FastaError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let body = text.trim_start();
        let records = if body.starts_with('>') {
            Self::parse_fasta(body)?
        } else {
            Self::parse_raw(body)
        };

        if records.is_empty() {
            return Err(FastaError::NoRecords);
        }
        Ok(records)
    }

    pub fn read_from_path(path: &Path) -> Result<Vec<SequenceRecord>, FastaError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn read_from_str(text: &str) -> Result<Vec<SequenceRecord>, FastaError> {
        Self::read_from(&mut text.as_bytes())
    }

    fn parse_fasta(body: &str) -> Result<Vec<SequenceRecord>, FastaError> {
        let reader = fasta::Reader::new(body.as_bytes());
        let mut records = Vec::new();

        for (i, result) in reader.records().enumerate() {
            let index = i + 1;
            let record = result.map_err(|source| FastaError::Malformed { index, source })?;
            let residues = normalize(&String::from_utf8_lossy(record.seq()));
            if residues.is_empty() {
                return Err(FastaError::EmptyRecord {
                    id: record.id().to_string(),
                    index,
                });
            }
            records.push(SequenceRecord {
                id: record.id().to_string(),
                description: record
                    .desc()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(String::from),
                residues,
            });
        }

        Ok(records)
    }

    fn parse_raw(body: &str) -> Vec<SequenceRecord> {
        let residues = normalize(body);
        if residues.is_empty() {
            return Vec::new();
        }
        vec![SequenceRecord {
            id: DEFAULT_RECORD_ID.to_string(),
            description: None,
            residues,
        }]
    }
}
