//! # Core Models Module
//!
//! Value types shared by every stage of the secondary-structure prediction.
//!
//! ## Key Components
//!
//! - [`residue`] - Amino acid identities and per-position residues with cached propensities
//! - [`sequence`] - A loaded protein sequence, resolved against a propensity table
//! - [`region`] - Helix/strand regions and the per-kind [`region::CandidateSet`]
//! - [`assignment`] - The final per-residue helix/strand/coil labelling
//!
//! ## Usage
//!
//! ```ignore
//! use chofas::core::models::sequence::ProteinSequence;
//! use chofas::core::propensity::table::PropensityTable;
//!
//! let table = PropensityTable::chou_fasman();
//! let sequence = ProteinSequence::from_symbols("MAQWNQLQQL", &table)?;
//! assert_eq!(sequence.len(), 10);
//! ```

pub mod assignment;
pub mod region;
pub mod residue;
pub mod sequence;
