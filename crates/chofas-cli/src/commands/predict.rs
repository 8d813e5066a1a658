use super::load_propensity_table;
use crate::cli::{PredictArgs, ReportFormat};
use crate::config::PartialPredictionConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chofas::core::io::fasta::FastaFile;
use chofas::engine::progress::ProgressReporter;
use chofas::workflows::predict::{self, RecordPrediction};
use chofas::workflows::report;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn run(args: PredictArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialPredictionConfig::from_optional_file(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let app_config = partial_config.merge_with_cli(&args)?;
    let table = load_propensity_table(app_config.propensities.as_deref())?;

    // Inline sequences finish instantly; only file batches get a bar.
    let progress_handler = if show_progress && args.source.input.is_some() {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the prediction workflow...");
    let results = match (&args.source.input, &args.source.sequence) {
        (Some(path), _) => predict::run_fasta(path, &table, &app_config.core_config, &reporter)?,
        (None, Some(sequence)) => {
            let records = FastaFile::read_from_str(sequence)?;
            predict::run_batch(&records, &table, &app_config.core_config, &reporter)?
        }
        (None, None) => {
            return Err(CliError::Argument(
                "either --input or --sequence is required".to_string(),
            ));
        }
    };
    info!("Workflow finished, predicted {} record(s).", results.len());

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_report(&results, args.format, &mut writer)?;
            writer.flush()?;
            info!("Report written to {:?}", path);
            println!("✓ Report written to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_report(&results, args.format, &mut stdout)?;
        }
    }
    Ok(())
}

fn write_report(
    results: &[RecordPrediction],
    format: ReportFormat,
    writer: &mut impl Write,
) -> Result<()> {
    match format {
        ReportFormat::Text => match results {
            [single] => report::write_text(&single.prediction, writer)?,
            _ => report::write_batch_text(results, writer)?,
        },
        ReportFormat::Toml => {
            let document =
                report::to_toml_string(results).map_err(|e| CliError::Other(e.into()))?;
            writer.write_all(document.as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use chofas::workflows::predict::PredictionError;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn predict_args(args: &[&str]) -> PredictArgs {
        let mut argv = vec!["chofas", "predict"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Predict(args) => args,
            _ => panic!("Expected 'predict' subcommand"),
        }
    }

    #[test]
    fn inline_sequence_report_is_written_to_output_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("report.txt");
        let args = predict_args(&[
            "--sequence",
            "vvvv vvvv vv",
            "-o",
            output.to_str().unwrap(),
        ]);

        run(args, false).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("Sequence length: 10\n"));
        assert!(text.contains("FINAL ASSIGNMENT:\nSSSSSSSSSS\n"));
        assert!(!text.contains(">query"));
    }

    #[test]
    fn multi_record_fasta_gets_one_headed_report_per_record() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("batch.fasta");
        let output = dir.path().join("report.txt");
        fs::write(&input, ">alpha helix former\nEEEEEEEE\n>beta\nVVVVVVVV\n").unwrap();

        let args = predict_args(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        run(args, false).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let alpha = text.find(">alpha helix former\n").unwrap();
        let beta = text.find(">beta\n").unwrap();
        assert!(alpha < beta);
        assert!(text.contains("FINAL ASSIGNMENT:\nHHHHHHHH\n"));
        assert!(text.contains("FINAL ASSIGNMENT:\nSSSSSSSS\n"));
    }

    #[test]
    fn toml_format_and_custom_config_are_honoured() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let table = dir.path().join("table.csv");
        let output = dir.path().join("report.toml");
        fs::write(&config, "[resolution]\ntie-break = \"helix\"\n").unwrap();
        fs::write(&table, "symbol,helix,strand\nL,1.2,1.2\n").unwrap();

        let args = predict_args(&[
            "--sequence",
            "LLLLLLLL",
            "-c",
            config.to_str().unwrap(),
            "-p",
            table.to_str().unwrap(),
            "--format",
            "toml",
            "-o",
            output.to_str().unwrap(),
        ]);
        run(args, false).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("assignment = \"HHHHHHHH\""));
        assert!(text.contains("resolved = \"helix\""));
    }

    #[test]
    fn unknown_residue_fails_the_command() {
        let args = predict_args(&["--sequence", "MAQBW"]);
        let result = run(args, false);
        assert!(matches!(
            result,
            Err(CliError::Prediction(PredictionError::Record { .. }))
        ));
    }

    #[test]
    fn missing_input_file_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.fasta");
        let args = predict_args(&["-i", missing.to_str().unwrap()]);
        let result = run(args, false);
        assert!(matches!(
            result,
            Err(CliError::Prediction(PredictionError::Fasta { .. }))
        ));
    }
}
