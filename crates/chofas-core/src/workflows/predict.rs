use crate::core::io::fasta::{FastaError, FastaFile, SequenceRecord};
use crate::core::models::assignment::Assignment;
use crate::core::models::region::Region;
use crate::core::models::sequence::{ProteinSequence, SequenceError};
use crate::core::propensity::table::PropensityTable;
use crate::engine::config::{ConfigError, PredictionConfig};
use crate::engine::extension::{self, Candidates};
use crate::engine::nucleation::{self, Seeds};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resolution::{self, Conflict, Resolution};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Invalid sequence: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Invalid sequence in record '{id}': {source}")]
    Record {
        id: String,
        #[source]
        source: SequenceError,
    },

    #[error("Invalid prediction parameters: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read sequences from '{path}': {source}")]
    Fasta {
        path: PathBuf,
        #[source]
        source: FastaError,
    },
}

/// Everything produced for one sequence, from raw seeds to the final labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub sequence: ProteinSequence,
    pub seeds: Seeds,
    pub candidates: Candidates,
    pub resolution: Resolution,
}

impl Prediction {
    pub fn assignment(&self) -> &Assignment {
        &self.resolution.assignment
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.resolution.conflicts
    }

    pub fn segments(&self) -> &[Region] {
        &self.resolution.segments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPrediction {
    pub record: SequenceRecord,
    pub prediction: Prediction,
}

/// Runs nucleation, extension and conflict resolution over a loaded sequence.
#[instrument(skip_all, name = "prediction_workflow", fields(residues = sequence.len()))]
pub fn run(sequence: ProteinSequence, config: &PredictionConfig) -> Prediction {
    let seeds = nucleation::scan_all(&sequence, config);
    let candidates = extension::run(&sequence, &seeds, config);
    let resolution = resolution::resolve(&sequence, &candidates, config.tie_break);
    Prediction {
        sequence,
        seeds,
        candidates,
        resolution,
    }
}

/// Resolves `symbols` against `table` and predicts. Fails before any prediction
/// work if a symbol is unknown or has no propensity in the table.
pub fn predict(
    symbols: &str,
    table: &PropensityTable,
    config: &PredictionConfig,
) -> Result<Prediction, PredictionError> {
    let sequence = ProteinSequence::from_symbols(symbols, table)?;
    Ok(run(sequence, config))
}

/// Predicts every record on the rayon pool. Results keep the input order; the
/// first invalid record aborts the batch.
#[instrument(skip_all, name = "batch_workflow", fields(records = records.len()))]
pub fn run_batch(
    records: &[SequenceRecord],
    table: &PropensityTable,
    config: &PredictionConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<RecordPrediction>, PredictionError> {
    config.validate()?;
    reporter.report(Progress::BatchStart {
        total: records.len() as u64,
    });

    let predictions = records
        .par_iter()
        .map(|record| {
            let sequence = ProteinSequence::from_symbols(&record.residues, table).map_err(
                |source| PredictionError::Record {
                    id: record.id.clone(),
                    source,
                },
            )?;
            let prediction = run(sequence, config);
            reporter.report(Progress::RecordFinished {
                id: record.id.clone(),
            });
            Ok(RecordPrediction {
                record: record.clone(),
                prediction,
            })
        })
        .collect::<Result<Vec<_>, PredictionError>>();

    reporter.report(Progress::BatchFinish);
    let predictions = predictions?;

    info!(
        records = predictions.len(),
        residues = predictions
            .iter()
            .map(|p| p.prediction.sequence.len())
            .sum::<usize>(),
        "Batch prediction complete."
    );
    Ok(predictions)
}

/// Reads every record of a FASTA (or bare sequence) file and predicts them as a batch.
pub fn run_fasta(
    path: &Path,
    table: &PropensityTable,
    config: &PredictionConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<RecordPrediction>, PredictionError> {
    let records = FastaFile::read_from_path(path).map_err(|source| PredictionError::Fasta {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), "Loaded sequence records.");
    reporter.report(Progress::Message(format!(
        "Read {} record(s) from {}",
        records.len(),
        path.display()
    )));
    run_batch(&records, table, config, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::assignment::Label;
    use crate::core::models::region::StructureKind;
    use crate::engine::config::{PredictionConfigBuilder, TieBreak};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // A natural 770-residue protein carrying both helix and strand stretches.
    const QUERY: &str = "MAQWNQLQQLDTRYLEQLHQLYSDSFPMELRQFLAPWIESQDWAYAASKESHATLVFHNLLGEIDQQYSRFLQESNVLYQHNLRRIKQFLQSRYLEKPMEIARIVARCLWEESRLLQTAATAAQQGGQANHPTAAVVTEKQQMLEQHLQDVRKRVQDLEQKMKVVENLQDDFDFNYKTLKSQGDMQDLNGNNQSVTRQKMQQLEQMLTALDQMRRSIVSELAGLLSAMEYVQKTLTDEELADWKRRQQIACIGGPPNICLDRLENWITSLAESQLQTRQQIKKLEELQQKVSYKGDPIVQHRPMLEERIVELFRNLMKSAFVVERQPCMPMHPDRPLVIKTGVQFTTKVRLLVKFPELNYQLKIKVCIDKDSGDVAALRGSRKFNILGTNTKVMNMEESNNGSLSAEFKHLTLREQRCGNGGRANCDASLIVTEELHLITFETEVYHQGLKIDLETHSLPVVVISNICQMPNAWASILWYNMLTNNPKNVNFFTKPPIGTWDQVAEVLSWQFSSTTKRGLSIEQLTTLAEKLLGPGVNYSGCQITWAKFCKENMAGKGFSFWVWLDNIIDLVKKYILALWNEGYIMGFISKERERAILSTKPPGTFLLRFSESSKEGGVTFTWVEKDISGKTQIQSVEPYTKQQLNNMSFAEIIMGYKIMDATNILVSPLVYLYPDIPKEEAFGKYCRPESQEHPEADPGSAAPYLKTKFICVTPTTCSNTIDLPMSPRTLDSLMQFGNNGEGAEPSAGGQFESLTFDMELTSECATSPM";

    fn record(id: &str, residues: &str) -> SequenceRecord {
        SequenceRecord {
            id: id.to_string(),
            description: None,
            residues: residues.to_string(),
        }
    }

    #[test]
    fn predict_labels_every_residue_exactly_once() {
        let prediction = predict(
            QUERY,
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
        )
        .unwrap();
        assert_eq!(prediction.assignment().len(), QUERY.len());
        assert_eq!(prediction.assignment().annotation().len(), QUERY.len());
    }

    #[test]
    fn predict_finds_both_kinds_in_a_natural_sequence() {
        let prediction = predict(
            QUERY,
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
        )
        .unwrap();
        assert!(!prediction.candidates.helix.is_empty());
        assert!(!prediction.candidates.strand.is_empty());
        assert!(prediction.assignment().count(Label::Helix) > 0);
        assert!(prediction.assignment().count(Label::Strand) > 0);
    }

    #[test]
    fn predict_is_deterministic() {
        let table = PropensityTable::chou_fasman();
        let config = PredictionConfig::default();
        let first = predict(QUERY, &table, &config).unwrap();
        let second = predict(QUERY, &table, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn poly_glutamate_is_all_helix_and_poly_valine_all_strand() {
        let table = PropensityTable::chou_fasman();
        let config = PredictionConfig::default();
        let helix = predict("EEEEEEEEEEEE", &table, &config).unwrap();
        assert_eq!(helix.assignment().annotation(), "HHHHHHHHHHHH");
        assert!(helix.conflicts().is_empty());

        let strand = predict("VVVVVVVVVV", &table, &config).unwrap();
        assert_eq!(strand.candidates.helix.len(), 1);
        assert_eq!(strand.conflicts().len(), 1);
        assert_eq!(strand.conflicts()[0].resolved, StructureKind::Strand);
        assert_eq!(strand.assignment().annotation(), "SSSSSSSSSS");
    }

    #[test]
    fn short_sequences_are_all_coil() {
        let table = PropensityTable::chou_fasman();
        let config = PredictionConfig::default();
        for symbols in ["", "V", "VVVV", "MVIC"] {
            let prediction = predict(symbols, &table, &config).unwrap();
            assert!(prediction.seeds.helix.is_empty());
            assert!(prediction.seeds.strand.is_empty());
            assert!(prediction.assignment().labels().iter().all(|&l| l == Label::Coil));
        }
    }

    #[test]
    fn predict_rejects_unknown_symbols_instead_of_defaulting() {
        let result = predict(
            "MAQWBNQ",
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
        );
        assert!(matches!(
            result,
            Err(PredictionError::Sequence(SequenceError::UnrecognizedSymbol {
                symbol: 'B',
                position: 5
            }))
        ));
    }

    #[test]
    fn tie_break_policy_flows_through_the_workflow() {
        // Leucine scored 1.2 for both kinds ties every contested span.
        use crate::core::models::residue::AminoAcid;
        use crate::core::propensity::table::Propensity;
        let table = PropensityTable::from_entries([(AminoAcid::Leucine, Propensity::new(1.2, 1.2))]);
        let strand_first = predict("LLLLLLLL", &table, &PredictionConfig::default()).unwrap();
        assert_eq!(strand_first.assignment().annotation(), "SSSSSSSS");

        let config = PredictionConfigBuilder::new()
            .tie_break(TieBreak::Helix)
            .build()
            .unwrap();
        let helix_first = predict("LLLLLLLL", &table, &config).unwrap();
        assert_eq!(helix_first.assignment().annotation(), "HHHHHHHH");
    }

    #[test]
    fn run_batch_preserves_input_order_and_reports_progress() {
        let records = vec![
            record("a", "EEEEEEEEEE"),
            record("b", "GGGGG"),
            record("c", "VVVVVVVV"),
        ];
        let finished = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::RecordFinished { .. } = event {
                finished.fetch_add(1, Ordering::SeqCst);
            }
        }));

        let results = run_batch(
            &records,
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
            &reporter,
        )
        .unwrap();
        drop(reporter);

        let ids: Vec<&str> = results.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(results[1].prediction.assignment().annotation(), "-----");
        assert_eq!(finished.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn run_batch_names_the_failing_record() {
        let records = vec![record("ok", "EEEEEE"), record("broken", "EEXEE")];
        let result = run_batch(
            &records,
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(PredictionError::Record { ref id, .. }) if id == "broken"
        ));
    }

    #[test]
    fn run_batch_rejects_hand_built_invalid_config() {
        let mut config = PredictionConfig::default();
        config.strand.nucleation.min_favorable = 9;
        let result = run_batch(
            &[record("a", "VVVVV")],
            &PropensityTable::chou_fasman(),
            &config,
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(PredictionError::Config(_))));
    }

    #[test]
    fn run_fasta_predicts_each_record_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.fasta");
        std::fs::write(&path, ">helix\nEEEEEEEE\n>strand\nVVVV VVVV\n").unwrap();

        let results = run_fasta(
            &path,
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(results[0].prediction.assignment().annotation(), "HHHHHHHH");
        assert_eq!(results[1].prediction.assignment().annotation(), "SSSSSSSS");
    }

    #[test]
    fn run_fasta_reports_the_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.fasta");
        let result = run_fasta(
            &missing,
            &PropensityTable::chou_fasman(),
            &PredictionConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(PredictionError::Fasta { ref path, .. }) if *path == missing));
    }
}
