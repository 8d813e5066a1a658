use super::config::TieBreak;
use super::extension::Candidates;
use crate::core::models::assignment::{Assignment, Label};
use crate::core::models::region::{Region, StructureKind};
use crate::core::models::sequence::ProteinSequence;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, instrument};

/// A maximal span claimed by both a helix and a strand candidate, and how it was settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conflict {
    pub start: usize,
    pub end: usize,
    pub mean_helix: f64,
    pub mean_strand: f64,
    pub resolved: StructureKind,
}

impl Conflict {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub assignment: Assignment,
    pub conflicts: Vec<Conflict>,
    /// Disjoint helix/strand runs of the final assignment.
    pub segments: Vec<Region>,
}

fn decide(mean_helix: f64, mean_strand: f64, tie_break: TieBreak) -> StructureKind {
    if mean_helix > mean_strand {
        StructureKind::Helix
    } else if mean_strand > mean_helix {
        StructureKind::Strand
    } else {
        tie_break.winner()
    }
}

/// Merges the helix and strand candidates into one label per residue.
///
/// Residues claimed by a single kind take that kind; unclaimed residues stay coil.
/// Every maximal run claimed by both kinds is settled as a whole by comparing the
/// mean Pa and mean Pb over that run only.
#[instrument(skip_all, fields(residues = sequence.len()))]
pub fn resolve(
    sequence: &ProteinSequence,
    candidates: &Candidates,
    tie_break: TieBreak,
) -> Resolution {
    let len = sequence.len();
    let helix = candidates.helix.coverage_mask(len);
    let strand = candidates.strand.coverage_mask(len);

    let mut labels: Vec<Label> = helix
        .iter()
        .zip(&strand)
        .map(|(&h, &s)| match (h, s) {
            (true, false) => Label::Helix,
            (false, true) => Label::Strand,
            _ => Label::Coil,
        })
        .collect();

    let contested = |i: usize| helix[i] && strand[i];
    let mut conflicts = Vec::new();
    let mut i = 0;
    while i < len {
        if !contested(i) {
            i += 1;
            continue;
        }
        let start = i;
        while i + 1 < len && contested(i + 1) {
            i += 1;
        }
        let end = i;

        let mean_helix = sequence.mean_propensity(start..=end, StructureKind::Helix);
        let mean_strand = sequence.mean_propensity(start..=end, StructureKind::Strand);
        let resolved = decide(mean_helix, mean_strand, tie_break);
        labels[start..=end].fill(resolved.into());

        let conflict = Conflict {
            start,
            end,
            mean_helix,
            mean_strand,
            resolved,
        };
        debug!(
            span = %conflict,
            mean_helix,
            mean_strand,
            resolved = %resolved,
            "Resolved helix/strand conflict."
        );
        conflicts.push(conflict);
        i += 1;
    }

    let assignment = Assignment::from_labels(labels);
    let segments = assignment.segments();
    Resolution {
        assignment,
        conflicts,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::region::CandidateSet;
    use crate::core::models::residue::AminoAcid;
    use crate::core::propensity::table::{Propensity, PropensityTable};

    fn synthetic_table() -> PropensityTable {
        PropensityTable::from_entries([
            (AminoAcid::GlutamicAcid, Propensity::new(1.5, 0.5)),
            (AminoAcid::Valine, Propensity::new(0.5, 1.5)),
            (AminoAcid::Alanine, Propensity::new(1.0, 1.0)),
            // Mean of K and M gives Pa 1.05, Pb 1.20.
            (AminoAcid::Lysine, Propensity::new(1.00, 1.30)),
            (AminoAcid::Methionine, Propensity::new(1.10, 1.10)),
        ])
    }

    fn seq(symbols: &str) -> ProteinSequence {
        ProteinSequence::from_symbols(symbols, &synthetic_table()).unwrap()
    }

    fn candidates(helix: &[(usize, usize)], strand: &[(usize, usize)]) -> Candidates {
        let build = |kind: StructureKind, spans: &[(usize, usize)]| {
            CandidateSet::from_regions(
                kind,
                spans
                    .iter()
                    .map(|&(s, e)| Region::new(kind, s, e))
                    .collect(),
            )
        };
        Candidates {
            helix: build(StructureKind::Helix, helix),
            strand: build(StructureKind::Strand, strand),
        }
    }

    #[test]
    fn unclaimed_residues_are_coil() {
        let sequence = seq("AAAAAA");
        let resolution = resolve(&sequence, &candidates(&[], &[]), TieBreak::Strand);
        assert_eq!(resolution.assignment.annotation(), "------");
        assert!(resolution.conflicts.is_empty());
        assert!(resolution.segments.is_empty());
    }

    #[test]
    fn single_kind_coverage_keeps_its_label() {
        let sequence = seq("AAAAAAAAAA");
        let resolution = resolve(
            &sequence,
            &candidates(&[(0, 3)], &[(6, 8)]),
            TieBreak::Strand,
        );
        assert_eq!(resolution.assignment.annotation(), "HHHH--SSS-");
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn contested_span_with_higher_mean_strand_resolves_to_strand() {
        // Span 2..=3 is K M: mean Pa = 1.05, mean Pb = 1.20.
        let sequence = seq("EEKMVV");
        let resolution = resolve(
            &sequence,
            &candidates(&[(0, 3)], &[(2, 5)]),
            TieBreak::Helix,
        );
        assert_eq!(resolution.assignment.annotation(), "HHSSSS");
        let conflict = resolution.conflicts[0];
        assert_eq!((conflict.start, conflict.end), (2, 3));
        assert!((conflict.mean_helix - 1.05).abs() < 1e-12);
        assert!((conflict.mean_strand - 1.20).abs() < 1e-12);
        assert_eq!(conflict.resolved, StructureKind::Strand);
    }

    #[test]
    fn only_the_overlapping_sub_span_is_contested() {
        // Helix 0..=5, strand 4..=9; overlap E E at 4..=5 favours helix.
        let sequence = seq("EEEEEEVVVV");
        let resolution = resolve(
            &sequence,
            &candidates(&[(0, 5)], &[(4, 9)]),
            TieBreak::Strand,
        );
        assert_eq!(resolution.assignment.annotation(), "HHHHHHSSSS");
        assert_eq!(resolution.conflicts.len(), 1);
        assert_eq!(resolution.conflicts[0].range(), 4..=5);
        assert_eq!(resolution.conflicts[0].resolved, StructureKind::Helix);
        assert_eq!(
            resolution.segments,
            vec![
                Region::new(StructureKind::Helix, 0, 5),
                Region::new(StructureKind::Strand, 6, 9),
            ]
        );
    }

    #[test]
    fn contained_strand_inside_helix_is_settled_by_span_means() {
        let sequence = seq("EEEVVVVEEE");
        let resolution = resolve(
            &sequence,
            &candidates(&[(0, 9)], &[(3, 6)]),
            TieBreak::Strand,
        );
        assert_eq!(resolution.assignment.annotation(), "HHHSSSSHHH");
        assert_eq!(resolution.segments.len(), 3);
    }

    #[test]
    fn equal_means_follow_the_tie_break_policy() {
        let sequence = seq("AAAAAA");
        let spans = candidates(&[(0, 5)], &[(0, 5)]);

        let default_policy = resolve(&sequence, &spans, TieBreak::default());
        assert_eq!(default_policy.assignment.annotation(), "SSSSSS");

        let helix_policy = resolve(&sequence, &spans, TieBreak::Helix);
        assert_eq!(helix_policy.assignment.annotation(), "HHHHHH");
    }

    #[test]
    fn each_contested_run_is_resolved_separately() {
        // Two helices overlapping one strand: runs 1..=2 (E E) and 7..=8 (V V).
        let sequence = seq("EEEAAAAVVV");
        let resolution = resolve(
            &sequence,
            &candidates(&[(0, 2), (7, 9)], &[(1, 8)]),
            TieBreak::Strand,
        );
        assert_eq!(resolution.conflicts.len(), 2);
        assert_eq!(resolution.conflicts[0].resolved, StructureKind::Helix);
        assert_eq!(resolution.conflicts[1].resolved, StructureKind::Strand);
        assert_eq!(resolution.assignment.annotation(), "HHHSSSSSSH");
    }

    #[test]
    fn empty_sequence_yields_empty_assignment() {
        let sequence = seq("");
        let resolution = resolve(&sequence, &candidates(&[], &[]), TieBreak::Strand);
        assert!(resolution.assignment.is_empty());
    }

    #[test]
    fn conflict_display_uses_one_based_bounds() {
        let conflict = Conflict {
            start: 4,
            end: 5,
            mean_helix: 1.0,
            mean_strand: 1.0,
            resolved: StructureKind::Strand,
        };
        assert_eq!(conflict.to_string(), "5-6");
        assert_eq!(conflict.len(), 2);
    }
}
