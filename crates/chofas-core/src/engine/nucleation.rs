use super::config::{NucleationParams, PredictionConfig};
use crate::core::models::region::{Region, StructureKind};
use crate::core::models::sequence::ProteinSequence;
use tracing::{debug, instrument};

/// Raw nucleation windows, in ascending start order and not merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Seeds {
    pub helix: Vec<Region>,
    pub strand: Vec<Region>,
}

/// Slides a window of `params.window` residues over the sequence and keeps every
/// window holding at least `params.min_favorable` residues whose `kind`
/// propensity is strictly above `params.cutoff`.
pub fn scan(
    sequence: &ProteinSequence,
    kind: StructureKind,
    params: &NucleationParams,
) -> Vec<Region> {
    let window = params.window;
    if window == 0 || sequence.len() < window {
        return Vec::new();
    }

    sequence
        .residues()
        .windows(window)
        .enumerate()
        .filter(|(_, residues)| {
            residues
                .iter()
                .filter(|r| r.propensity(kind) > params.cutoff)
                .count()
                >= params.min_favorable
        })
        .map(|(start, _)| Region::new(kind, start, start + window - 1))
        .collect()
}

#[instrument(skip_all, fields(residues = sequence.len()))]
pub fn scan_all(sequence: &ProteinSequence, config: &PredictionConfig) -> Seeds {
    let seeds = Seeds {
        helix: scan(sequence, StructureKind::Helix, &config.helix.nucleation),
        strand: scan(sequence, StructureKind::Strand, &config.strand.nucleation),
    };
    debug!(
        helix_seeds = seeds.helix.len(),
        strand_seeds = seeds.strand.len(),
        "Nucleation scan complete."
    );
    seeds
}
