use super::config::{ExtensionParams, PredictionConfig};
use super::nucleation::Seeds;
use crate::core::models::region::{CandidateSet, Region, StructureKind};
use crate::core::models::sequence::ProteinSequence;
use tracing::{debug, instrument, trace};

/// Extended and merged regions of both kinds, prior to conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub helix: CandidateSet,
    pub strand: CandidateSet,
}

impl Candidates {
    pub fn get(&self, kind: StructureKind) -> &CandidateSet {
        match kind {
            StructureKind::Helix => &self.helix,
            StructureKind::Strand => &self.strand,
        }
    }
}

/// Grows a seed one residue at a time in each direction.
///
/// A step to the right is accepted when the `params.window` residues ending at the
/// new residue pass the threshold test; a step to the left when the window starting
/// at the new residue does. Each loop either moves its bound outward or stops, and
/// the two directions never read each other's windows, so they run independently.
pub fn extend(seed: &Region, sequence: &ProteinSequence, params: &ExtensionParams) -> Region {
    let kind = seed.kind();
    let len = sequence.len();
    let window = params.window;
    if window == 0 || seed.end() >= len {
        return *seed;
    }

    let accepts = |first: usize, last: usize| {
        params
            .comparison
            .holds(sequence.propensity_sum(first..=last, kind), params.threshold)
    };

    let mut end = seed.end();
    while end + 1 < len {
        let candidate = end + 1;
        let Some(first) = (candidate + 1).checked_sub(window) else {
            break;
        };
        if !accepts(first, candidate) {
            break;
        }
        end = candidate;
    }

    let mut start = seed.start();
    while start > 0 {
        let candidate = start - 1;
        let last = candidate + window - 1;
        if last >= len || !accepts(candidate, last) {
            break;
        }
        start = candidate;
    }

    let extended = seed.with_bounds(start, end);
    if extended != *seed {
        trace!(kind = %kind, seed = %seed, region = %extended, "Seed extended.");
    }
    extended
}

/// Extends every seed of one kind and merges the results into a [`CandidateSet`].
pub fn extend_all(
    seeds: &[Region],
    kind: StructureKind,
    sequence: &ProteinSequence,
    params: &ExtensionParams,
) -> CandidateSet {
    let extended = seeds
        .iter()
        .map(|seed| extend(seed, sequence, params))
        .collect();
    CandidateSet::from_regions(kind, extended)
}

#[instrument(skip_all, fields(residues = sequence.len()))]
pub fn run(sequence: &ProteinSequence, seeds: &Seeds, config: &PredictionConfig) -> Candidates {
    let candidates = Candidates {
        helix: extend_all(
            &seeds.helix,
            StructureKind::Helix,
            sequence,
            &config.helix.extension,
        ),
        strand: extend_all(
            &seeds.strand,
            StructureKind::Strand,
            sequence,
            &config.strand.extension,
        ),
    };
    debug!(
        helix_regions = candidates.helix.len(),
        strand_regions = candidates.strand.len(),
        "Extension complete."
    );
    candidates
}
