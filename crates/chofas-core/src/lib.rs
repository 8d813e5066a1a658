//! # chofas
//!
//! Protein secondary structure prediction with the Chou–Fasman method: every residue
//! of a sequence is labelled helix (`H`), strand (`S`) or coil (`-`) from per-residue
//! conformational propensities.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ProteinSequence`, `Region`,
//!   `Assignment`), the propensity parameter set and sequence input.
//!
//! - **[`engine`]: The Logic Core.** The prediction stages as pure functions:
//!   nucleation scanning, region extension with same-kind merging, and helix/strand
//!   conflict resolution, plus their validated configuration.
//!
//! - **[`workflows`]: The Public API.** Chains the stages for a single sequence, a batch
//!   of records or a FASTA file, and renders the results as text or TOML reports.
//!
//! ```
//! use chofas::core::propensity::table::PropensityTable;
//! use chofas::engine::config::PredictionConfig;
//! use chofas::workflows::predict::predict;
//!
//! let table = PropensityTable::chou_fasman();
//! let prediction = predict("EEEEEEEEGGGGG", &table, &PredictionConfig::default()).unwrap();
//! assert_eq!(prediction.assignment().len(), 13);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
