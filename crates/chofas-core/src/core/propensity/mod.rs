//! # Propensity Module
//!
//! Conformational propensities used by every stage of the prediction pipeline.
//!
//! ## Overview
//!
//! Each of the 20 standard amino acids carries two statistical preferences:
//!
//! - **Pa** - the relative frequency with which the residue is found in alpha-helices
//! - **Pb** - the relative frequency with which the residue is found in beta-strands
//!
//! Values above `1.0` mark a residue as a former of that conformation, values below
//! `1.0` as a breaker. The [`table::PropensityTable`] is built once (either from the
//! built-in Chou–Fasman parameters or from a user-supplied TOML/CSV file) and then
//! shared read-only by the scanner, the extender and the resolver.
//!
//! ## Key Components
//!
//! - [`table`] - The lookup table, its file loaders and the TOML exporter
//! - `defaults` - The published Chou–Fasman parameter set as static maps

pub(crate) mod defaults;
pub mod table;
