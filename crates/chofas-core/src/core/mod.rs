//! # Core Module
//!
//! The stateless foundation of the predictor: data models, the propensity
//! parameter set, and sequence/report I/O.
//!
//! ## Architecture
//!
//! - **Sequence Representation** ([`models`]) - Residues, regions, candidate sets and assignments
//! - **Parameters** ([`propensity`]) - Chou–Fasman helix/strand propensities and their loaders
//! - **File I/O** ([`io`]) - FASTA and raw sequence input
//!
//! Nothing in this module runs the prediction itself; the nucleation, extension and
//! conflict-resolution stages live in [`crate::engine`].

pub mod io;
pub mod models;
pub mod propensity;
