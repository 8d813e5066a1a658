//! Reads protein sequences from FASTA files and from bare, pasted sequence text.
//!
//! Input is normalized before lookup: whitespace and position numbers are dropped
//! and letters upper-cased. Anything else is kept for the propensity lookup to reject.

pub mod fasta;
