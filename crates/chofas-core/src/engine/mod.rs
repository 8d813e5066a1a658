//! # Engine Module
//!
//! The three stages of Chou–Fasman prediction, each a pure function over a loaded
//! [`ProteinSequence`](crate::core::models::sequence::ProteinSequence):
//!
//! 1. [`nucleation`] - scan fixed windows for helix and strand seeds
//! 2. [`extension`] - grow every seed while the boundary window passes its threshold,
//!    then merge regions of the same kind
//! 3. [`resolution`] - settle residues claimed by both kinds and emit the final labels
//!
//! Stage parameters live in [`config`]; [`progress`] carries batch progress events to
//! an optional observer.

pub mod config;
pub mod extension;
pub mod nucleation;
pub mod progress;
pub mod resolution;
