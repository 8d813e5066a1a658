use chofas::core::io::fasta::FastaError;
use chofas::core::propensity::table::PropensityLoadError;
use chofas::engine::config::ConfigError;
use chofas::workflows::predict::PredictionError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Propensity(#[from] PropensityLoadError),

    #[error("Invalid prediction parameters: {0}")]
    Parameters(#[from] ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid sequence input: {0}")]
    Sequence(#[from] FastaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
