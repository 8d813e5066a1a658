use super::sequence::ProteinSequence;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Helix,
    Strand,
}

impl StructureKind {
    pub fn symbol(self) -> char {
        match self {
            StructureKind::Helix => 'H',
            StructureKind::Strand => 'S',
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureKind::Helix => write!(f, "helix"),
            StructureKind::Strand => write!(f, "strand"),
        }
    }
}

/// A contiguous run of residues predicted to adopt one conformation.
///
/// Bounds are 0-based and inclusive. Regions are plain values: growing a region
/// produces a new one through [`Region::with_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    kind: StructureKind,
    start: usize,
    end: usize,
}

impl Region {
    pub fn new(kind: StructureKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "region start {start} exceeds end {end}");
        Self { kind, start, end }
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when the two regions overlap or sit directly next to each other.
    pub fn touches(&self, other: &Region) -> bool {
        self.start <= other.end + 1 && other.start <= self.end + 1
    }

    pub fn with_bounds(&self, start: usize, end: usize) -> Region {
        Region::new(self.kind, start, end)
    }

    pub fn union(&self, other: &Region) -> Region {
        self.with_bounds(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn subsequence(&self, sequence: &ProteinSequence) -> String {
        sequence.subsequence(self.range())
    }
}

/// Displays the 1-based `start-end` span used in reports.
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

/// The regions of a single kind, sorted by start, with no two regions
/// overlapping or adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    kind: StructureKind,
    regions: Vec<Region>,
}

impl CandidateSet {
    /// Collects regions of `kind`, merging any that overlap or touch into their union.
    pub fn from_regions(kind: StructureKind, mut regions: Vec<Region>) -> Self {
        debug_assert!(regions.iter().all(|r| r.kind() == kind));
        regions.sort_by_key(|r| (r.start(), r.end()));

        let mut merged: Vec<Region> = Vec::with_capacity(regions.len());
        for region in regions {
            match merged.last_mut() {
                Some(last) if last.touches(&region) => *last = last.union(&region),
                _ => merged.push(region),
            }
        }
        Self {
            kind,
            regions: merged,
        }
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn covers(&self, index: usize) -> bool {
        self.regions
            .binary_search_by(|r| {
                if r.end() < index {
                    std::cmp::Ordering::Less
                } else if r.start() > index {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Per-residue coverage flags for a sequence of `len` residues.
    pub fn coverage_mask(&self, len: usize) -> Vec<bool> {
        let mut mask = vec![false; len];
        for region in self.regions.iter().filter(|r| r.start() < len) {
            mask[region.start()..=region.end().min(len - 1)].fill(true);
        }
        mask
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helix(start: usize, end: usize) -> Region {
        Region::new(StructureKind::Helix, start, end)
    }

    #[test]
    fn len_counts_inclusive_bounds() {
        assert_eq!(helix(0, 5).len(), 6);
        assert_eq!(helix(7, 7).len(), 1);
    }

    #[test]
    fn display_uses_one_based_bounds() {
        assert_eq!(helix(0, 5).to_string(), "1-6");
    }

    #[test]
    fn overlaps_and_touches_distinguish_adjacency() {
        let a = helix(0, 5);
        assert!(a.overlaps(&helix(5, 9)));
        assert!(!a.overlaps(&helix(6, 9)));
        assert!(a.touches(&helix(6, 9)));
        assert!(!a.touches(&helix(7, 9)));
        assert!(helix(6, 9).touches(&a));
    }

    #[test]
    fn with_bounds_returns_new_region_and_keeps_original() {
        let seed = helix(4, 9);
        let grown = seed.with_bounds(2, 11);
        assert_eq!(seed, helix(4, 9));
        assert_eq!(grown, helix(2, 11));
        assert_eq!(grown.kind(), StructureKind::Helix);
    }

    #[test]
    fn from_regions_merges_overlapping_and_adjacent_regions() {
        let set = CandidateSet::from_regions(
            StructureKind::Helix,
            vec![helix(4, 9), helix(0, 5), helix(10, 12), helix(20, 25)],
        );
        assert_eq!(set.regions(), &[helix(0, 12), helix(20, 25)]);
    }

    #[test]
    fn from_regions_absorbs_contained_regions() {
        let set = CandidateSet::from_regions(
            StructureKind::Helix,
            vec![helix(0, 20), helix(3, 8), helix(15, 22)],
        );
        assert_eq!(set.regions(), &[helix(0, 22)]);
    }

    #[test]
    fn covers_finds_indices_inside_regions_only() {
        let set = CandidateSet::from_regions(
            StructureKind::Strand,
            vec![
                Region::new(StructureKind::Strand, 2, 6),
                Region::new(StructureKind::Strand, 10, 14),
            ],
        );
        assert!(!set.covers(1));
        assert!(set.covers(2));
        assert!(set.covers(6));
        assert!(!set.covers(8));
        assert!(set.covers(14));
        assert!(!set.covers(15));
    }

    #[test]
    fn coverage_mask_marks_covered_residues() {
        let set = CandidateSet::from_regions(StructureKind::Helix, vec![helix(1, 2)]);
        assert_eq!(set.coverage_mask(4), vec![false, true, true, false]);
    }

    #[test]
    fn empty_set_has_no_regions() {
        let set = CandidateSet::from_regions(StructureKind::Strand, Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.kind(), StructureKind::Strand);
        assert!(!set.covers(0));
    }
}
