use chofas::engine::config::TieBreak;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "chofas - Chou–Fasman protein secondary structure prediction (helix H, strand S, coil -).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for batch prediction.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict helix/strand/coil labels for one or more protein sequences.
    Predict(PredictArgs),
    /// Inspect or export the helix/strand propensity table.
    Params(ParamsArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakArg {
    Helix,
    Strand,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Helix => TieBreak::Helix,
            TieBreakArg::Strand => TieBreak::Strand,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable report with regions, conflicts and 60-column blocks
    #[default]
    Text,
    /// Machine-readable TOML document with one `[[records]]` table per sequence
    Toml,
}

/// Where the sequences to predict come from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SequenceSource {
    /// Path to a FASTA file, or a plain text file holding one bare sequence.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// A sequence given directly on the command line.
    #[arg(long, value_name = "RESIDUES")]
    pub sequence: Option<String>,
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub source: SequenceSource,

    /// Write the report to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a prediction configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a custom propensity table (TOML, or CSV with a `symbol,helix,strand` header).
    #[arg(short, long, value_name = "PATH")]
    pub propensities: Option<PathBuf>,

    /// Label to assign when a contested span has equal mean helix and strand propensity.
    #[arg(long, value_enum, value_name = "KIND")]
    pub tie_break: Option<TieBreakArg>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S helix.extension-threshold=4.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `params` subcommand.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    #[command(subcommand)]
    pub command: ParamsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ParamsCommands {
    /// Print the propensity table in use.
    Show {
        /// Show a custom table instead of the built-in Chou–Fasman values.
        #[arg(short, long, value_name = "PATH")]
        propensities: Option<PathBuf>,
    },
    /// Write the propensity table in use as TOML, ready to be edited and loaded back.
    Export {
        /// Destination file.
        #[arg(short, long, required = true, value_name = "PATH")]
        output: PathBuf,

        /// Export a custom table instead of the built-in Chou–Fasman values.
        #[arg(short, long, value_name = "PATH")]
        propensities: Option<PathBuf>,
    },
}
