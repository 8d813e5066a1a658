use super::predict::{Prediction, RecordPrediction};
use crate::core::models::assignment::Label;
use crate::core::models::region::{Region, StructureKind};
use crate::engine::resolution::Conflict;
use serde::Serialize;
use std::io::{self, Write};

/// Residues per line in the sequence/assignment block section.
pub const BLOCK_WIDTH: usize = 60;

fn write_regions(
    prediction: &Prediction,
    regions: &[Region],
    writer: &mut impl Write,
) -> io::Result<()> {
    if regions.is_empty() {
        return writeln!(writer, "  None");
    }
    for region in regions {
        writeln!(
            writer,
            "   {}  len={}  {}",
            region,
            region.len(),
            region.subsequence(&prediction.sequence)
        )?;
    }
    Ok(())
}

fn write_conflicts(
    prediction: &Prediction,
    conflicts: &[Conflict],
    writer: &mut impl Write,
) -> io::Result<()> {
    if conflicts.is_empty() {
        return writeln!(writer, "  None");
    }
    for conflict in conflicts {
        writeln!(
            writer,
            "  {}  len={}  avg Pa={:.3}  avg Pb={:.3}  -> assign {}   seg={}",
            conflict,
            conflict.len(),
            conflict.mean_helix,
            conflict.mean_strand,
            conflict.resolved.symbol(),
            prediction.sequence.subsequence(conflict.range())
        )?;
    }
    Ok(())
}

/// Writes the plain-text report for one prediction: candidate regions before
/// resolution, each settled conflict, the final annotation and a 60-column
/// sequence/annotation listing. Positions are 1-based.
pub fn write_text(prediction: &Prediction, writer: &mut impl Write) -> io::Result<()> {
    let sequence = prediction.sequence.to_string();
    let annotation = prediction.assignment().annotation();

    writeln!(writer, "Sequence length: {}", sequence.len())?;
    writeln!(writer)?;

    writeln!(writer, "HELICAL REGIONS (H):")?;
    write_regions(prediction, prediction.candidates.helix.regions(), writer)?;
    writeln!(writer)?;

    writeln!(writer, "BETA-STRAND REGIONS (S):")?;
    write_regions(prediction, prediction.candidates.strand.regions(), writer)?;
    writeln!(writer)?;

    writeln!(writer, "CONFLICTING REGIONS and RESOLUTION:")?;
    write_conflicts(prediction, prediction.conflicts(), writer)?;
    writeln!(writer)?;

    writeln!(writer, "FINAL ASSIGNMENT:")?;
    writeln!(writer, "{annotation}")?;
    writeln!(writer)?;

    writeln!(writer, "Sequence / Assignment (blocks of {BLOCK_WIDTH}):")?;
    // Both strings are ASCII, one byte per residue.
    for start in (0..sequence.len()).step_by(BLOCK_WIDTH) {
        let end = (start + BLOCK_WIDTH).min(sequence.len());
        writeln!(writer, "{:4}-{:4}  {}", start + 1, end, &sequence[start..end])?;
        writeln!(writer, "{}{}", " ".repeat(12), &annotation[start..end])?;
    }
    Ok(())
}

/// Writes one text report per record, each preceded by a `>id description` header.
pub fn write_batch_text(results: &[RecordPrediction], writer: &mut impl Write) -> io::Result<()> {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        match &result.record.description {
            Some(description) => writeln!(writer, ">{} {}", result.record.id, description)?,
            None => writeln!(writer, ">{}", result.record.id)?,
        }
        write_text(&result.prediction, writer)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionEntry {
    pub kind: StructureKind,
    /// 1-based, inclusive.
    pub start: usize,
    /// 1-based, inclusive.
    pub end: usize,
    pub length: usize,
    pub residues: String,
}

impl RegionEntry {
    fn new(region: &Region, prediction: &Prediction) -> Self {
        Self {
            kind: region.kind(),
            start: region.start() + 1,
            end: region.end() + 1,
            length: region.len(),
            residues: region.subsequence(&prediction.sequence),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictEntry {
    pub start: usize,
    pub end: usize,
    pub length: usize,
    pub mean_helix: f64,
    pub mean_strand: f64,
    pub resolved: StructureKind,
    pub residues: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub helix: f64,
    pub strand: f64,
    pub coil: f64,
}

/// Machine-readable counterpart of the text report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub length: usize,
    pub sequence: String,
    pub assignment: String,
    pub composition: Composition,
    pub helix_regions: Vec<RegionEntry>,
    pub strand_regions: Vec<RegionEntry>,
    pub conflicts: Vec<ConflictEntry>,
    pub segments: Vec<RegionEntry>,
}

impl ReportDocument {
    pub fn new(result: &RecordPrediction) -> Self {
        let prediction = &result.prediction;
        let assignment = prediction.assignment();
        let entries = |regions: &[Region]| {
            regions
                .iter()
                .map(|region| RegionEntry::new(region, prediction))
                .collect::<Vec<_>>()
        };

        Self {
            id: result.record.id.clone(),
            description: result.record.description.clone(),
            length: prediction.sequence.len(),
            sequence: prediction.sequence.to_string(),
            assignment: assignment.annotation(),
            composition: Composition {
                helix: assignment.fraction(Label::Helix),
                strand: assignment.fraction(Label::Strand),
                coil: assignment.fraction(Label::Coil),
            },
            helix_regions: entries(prediction.candidates.helix.regions()),
            strand_regions: entries(prediction.candidates.strand.regions()),
            conflicts: prediction
                .conflicts()
                .iter()
                .map(|conflict| ConflictEntry {
                    start: conflict.start + 1,
                    end: conflict.end + 1,
                    length: conflict.len(),
                    mean_helix: conflict.mean_helix,
                    mean_strand: conflict.mean_strand,
                    resolved: conflict.resolved,
                    residues: prediction.sequence.subsequence(conflict.range()),
                })
                .collect(),
            segments: entries(prediction.segments()),
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchDocument<'a> {
    records: &'a [ReportDocument],
}

/// Serializes all results as a TOML array of `[[records]]` tables.
pub fn to_toml_string(results: &[RecordPrediction]) -> Result<String, toml::ser::Error> {
    let records: Vec<ReportDocument> = results.iter().map(ReportDocument::new).collect();
    toml::to_string(&BatchDocument { records: &records })
}
