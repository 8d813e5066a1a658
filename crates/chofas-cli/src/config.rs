use crate::cli::PredictArgs;
use crate::error::{CliError, Result};
use chofas::core::models::region::StructureKind;
use chofas::engine::config::{self as core_config, Comparison, PredictionConfigBuilder, TieBreak};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum PartialComparison {
    AtLeast,
    Exceeds,
}

impl From<PartialComparison> for Comparison {
    fn from(p: PartialComparison) -> Self {
        match p {
            PartialComparison::AtLeast => Comparison::AtLeast,
            PartialComparison::Exceeds => Comparison::Exceeds,
        }
    }
}

impl FromStr for PartialComparison {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "at-least" => Ok(Self::AtLeast),
            "exceeds" => Ok(Self::Exceeds),
            other => Err(format!(
                "unknown comparison '{other}', expected 'at-least' or 'exceeds'"
            )),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", what, key, value)))
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialKindConfig {
    nucleation_window: Option<usize>,
    min_favorable: Option<usize>,
    nucleation_cutoff: Option<f64>,
    extension_window: Option<usize>,
    extension_threshold: Option<f64>,
    extension_comparison: Option<PartialComparison>,
}

impl PartialKindConfig {
    fn apply(
        self,
        mut builder: PredictionConfigBuilder,
        kind: StructureKind,
    ) -> PredictionConfigBuilder {
        if let Some(window) = self.nucleation_window {
            builder = builder.nucleation_window(kind, window);
        }
        if let Some(count) = self.min_favorable {
            builder = builder.min_favorable(kind, count);
        }
        if let Some(cutoff) = self.nucleation_cutoff {
            builder = builder.nucleation_cutoff(kind, cutoff);
        }
        if let Some(window) = self.extension_window {
            builder = builder.extension_window(kind, window);
        }
        if let Some(threshold) = self.extension_threshold {
            builder = builder.extension_threshold(kind, threshold);
        }
        if let Some(comparison) = self.extension_comparison {
            builder = builder.extension_comparison(kind, comparison.into());
        }
        builder
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialResolutionConfig {
    tie_break: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPropensityConfig {
    table: Option<PathBuf>,
}

/// Everything the `predict` command needs once file values and CLI overrides are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub core_config: core_config::PredictionConfig,
    /// Custom propensity table; the built-in Chou–Fasman table when `None`.
    pub propensities: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialPredictionConfig {
    helix: Option<PartialKindConfig>,
    strand: Option<PartialKindConfig>,
    resolution: Option<PartialResolutionConfig>,
    propensities: Option<PartialPropensityConfig>,
}

impl PartialPredictionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        // Relative table paths resolve against the config file's directory.
        if let (Some(base), Some(table)) = (
            path.parent(),
            config.propensities.as_mut().and_then(|p| p.table.as_mut()),
        ) {
            if table.is_relative() {
                *table = base.join(&*table);
            }
        }
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from an empty partial config.
    pub fn from_optional_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Merges with command-line overrides. Precedence: CLI flags, then `-S` values,
    /// then the config file, then the built-in defaults.
    pub fn merge_with_cli(mut self, args: &PredictArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let mut builder = PredictionConfigBuilder::new();
        if let Some(helix) = self.helix.take() {
            builder = helix.apply(builder, StructureKind::Helix);
        }
        if let Some(strand) = self.strand.take() {
            builder = strand.apply(builder, StructureKind::Strand);
        }

        let file_tie_break = self
            .resolution
            .take()
            .and_then(|r| r.tie_break)
            .map(|value| value.parse::<TieBreak>())
            .transpose()?;
        let tie_break = args
            .tie_break
            .map(TieBreak::from)
            .or(file_tie_break)
            .unwrap_or_default();
        builder = builder.tie_break(tie_break);

        let file_table = self
            .propensities
            .take()
            .and_then(|p| p.table);
        let propensities = args.propensities.clone().or(file_table);

        let core_config = builder.build()?;
        debug!(?core_config, ?propensities, "Merged prediction configuration.");
        Ok(AppConfig {
            core_config,
            propensities,
        })
    }

    fn kind_mut(&mut self, section: &str) -> Option<&mut PartialKindConfig> {
        match section {
            "helix" => Some(self.helix.get_or_insert_with(Default::default)),
            "strand" => Some(self.strand.get_or_insert_with(Default::default)),
            _ => None,
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "resolution.tie-break" => {
                    self.resolution
                        .get_or_insert_with(Default::default)
                        .tie_break = Some(value_str.to_string());
                    continue;
                }
                "propensities.table" => {
                    self.propensities
                        .get_or_insert_with(Default::default)
                        .table = Some(PathBuf::from(value_str));
                    continue;
                }
                _ => {}
            }

            let unsupported = || {
                CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                ))
            };
            let (section, field) = key.split_once('.').ok_or_else(unsupported)?;
            let kind = self.kind_mut(section).ok_or_else(unsupported)?;
            match field {
                "nucleation-window" => {
                    kind.nucleation_window = Some(parse_value(key, value_str, "integer")?)
                }
                "min-favorable" => kind.min_favorable = Some(parse_value(key, value_str, "integer")?),
                "nucleation-cutoff" => {
                    kind.nucleation_cutoff = Some(parse_value(key, value_str, "float")?)
                }
                "extension-window" => {
                    kind.extension_window = Some(parse_value(key, value_str, "integer")?)
                }
                "extension-threshold" => {
                    kind.extension_threshold = Some(parse_value(key, value_str, "float")?)
                }
                "extension-comparison" => {
                    kind.extension_comparison = Some(parse_value(key, value_str, "comparison")?)
                }
                _ => return Err(unsupported()),
            }
        }
        Ok(())
    }
}
