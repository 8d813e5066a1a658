use super::region::{Region, StructureKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Helix,
    Strand,
    Coil,
}

impl Label {
    /// Character used on the annotation line.
    pub fn symbol(self) -> char {
        match self {
            Label::Helix => 'H',
            Label::Strand => 'S',
            Label::Coil => '-',
        }
    }

    pub fn structure_kind(self) -> Option<StructureKind> {
        match self {
            Label::Helix => Some(StructureKind::Helix),
            Label::Strand => Some(StructureKind::Strand),
            Label::Coil => None,
        }
    }
}

impl From<StructureKind> for Label {
    fn from(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Helix => Label::Helix,
            StructureKind::Strand => Label::Strand,
        }
    }
}

/// Exactly one label per residue of the predicted sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    labels: Vec<Label>,
}

impl Assignment {
    pub(crate) fn from_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// One `H`/`S`/`-` character per residue.
    pub fn annotation(&self) -> String {
        self.labels.iter().map(|l| l.symbol()).collect()
    }

    /// Maximal helix and strand runs, in sequence order. Coil is the complement.
    pub fn segments(&self) -> Vec<Region> {
        let mut segments = Vec::new();
        let mut i = 0;
        while i < self.labels.len() {
            let label = self.labels[i];
            let start = i;
            while i + 1 < self.labels.len() && self.labels[i + 1] == label {
                i += 1;
            }
            if let Some(kind) = label.structure_kind() {
                segments.push(Region::new(kind, start, i));
            }
            i += 1;
        }
        segments
    }

    pub fn count(&self, label: Label) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    pub fn fraction(&self, label: Label) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        self.count(label) as f64 / self.labels.len() as f64
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.annotation())
    }
}
