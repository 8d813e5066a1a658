//! # Workflows Module
//!
//! High-level entry points that chain the [`engine`](crate::engine) stages over
//! sequences resolved against a propensity table.
//!
//! - [`predict`] - single-sequence, batch and FASTA-file prediction
//! - [`report`] - text and TOML rendering of prediction results

pub mod predict;
pub mod report;
