use crate::core::models::region::StructureKind;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid {kind} parameter '{name}': {reason}")]
    InvalidParameter {
        kind: StructureKind,
        name: &'static str,
        reason: String,
    },
    #[error("Unknown tie-break policy '{0}'. Expected 'helix' or 'strand'.")]
    UnknownTieBreak(String),
}

/// Label given to a contested span whose average helix and strand propensities are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    Strand,
    Helix,
}

impl TieBreak {
    pub fn winner(self) -> StructureKind {
        match self {
            TieBreak::Strand => StructureKind::Strand,
            TieBreak::Helix => StructureKind::Helix,
        }
    }
}

impl FromStr for TieBreak {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strand" => Ok(TieBreak::Strand),
            "helix" => Ok(TieBreak::Helix),
            _ => Err(ConfigError::UnknownTieBreak(s.to_string())),
        }
    }
}

/// How an extension window sum is compared against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `sum >= threshold`
    AtLeast,
    /// `sum > threshold`
    Exceeds,
}

impl Comparison {
    #[inline]
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => value >= threshold,
            Comparison::Exceeds => value > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NucleationParams {
    /// Residues per scanned window.
    pub window: usize,
    /// Favourable residues a window needs to become a seed.
    pub min_favorable: usize,
    /// A residue is favourable when its propensity is strictly above this value.
    pub cutoff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtensionParams {
    /// Residues per boundary window (the new residue plus `window - 1` region residues).
    pub window: usize,
    pub threshold: f64,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindParams {
    pub nucleation: NucleationParams,
    pub extension: ExtensionParams,
}

impl KindParams {
    /// Hexapeptide nuclei with ≥4 helix formers, extended while the tetrapeptide ΣPa ≥ 4.0.
    pub fn helix_default() -> Self {
        Self {
            nucleation: NucleationParams {
                window: 6,
                min_favorable: 4,
                cutoff: 1.0,
            },
            extension: ExtensionParams {
                window: 4,
                threshold: 4.0,
                comparison: Comparison::AtLeast,
            },
        }
    }

    /// Pentapeptide nuclei with ≥3 strand formers, extended while the tetrapeptide ΣPb > 4.0.
    pub fn strand_default() -> Self {
        Self {
            nucleation: NucleationParams {
                window: 5,
                min_favorable: 3,
                cutoff: 1.0,
            },
            extension: ExtensionParams {
                window: 4,
                threshold: 4.0,
                comparison: Comparison::Exceeds,
            },
        }
    }

    fn validate(&self, kind: StructureKind) -> Result<(), ConfigError> {
        let invalid = |name: &'static str, reason: String| ConfigError::InvalidParameter {
            kind,
            name,
            reason,
        };

        let nucleation = &self.nucleation;
        if nucleation.window == 0 {
            return Err(invalid("nucleation-window", "must be at least 1".into()));
        }
        if nucleation.min_favorable == 0 || nucleation.min_favorable > nucleation.window {
            return Err(invalid(
                "min-favorable",
                format!("must be between 1 and {}", nucleation.window),
            ));
        }
        if !nucleation.cutoff.is_finite() {
            return Err(invalid("nucleation-cutoff", "must be finite".into()));
        }

        let extension = &self.extension;
        if extension.window == 0 || extension.window > nucleation.window {
            return Err(invalid(
                "extension-window",
                format!("must be between 1 and {}", nucleation.window),
            ));
        }
        if !extension.threshold.is_finite() {
            return Err(invalid("extension-threshold", "must be finite".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionConfig {
    pub helix: KindParams,
    pub strand: KindParams,
    pub tie_break: TieBreak,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            helix: KindParams::helix_default(),
            strand: KindParams::strand_default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl PredictionConfig {
    pub fn params(&self, kind: StructureKind) -> &KindParams {
        match kind {
            StructureKind::Helix => &self.helix,
            StructureKind::Strand => &self.strand,
        }
    }

    /// Checks both parameter sets. Configs built with [`PredictionConfigBuilder`]
    /// are already valid; hand-assembled ones are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.helix.validate(StructureKind::Helix)?;
        self.strand.validate(StructureKind::Strand)
    }
}

pub struct PredictionConfigBuilder {
    helix: KindParams,
    strand: KindParams,
    tie_break: TieBreak,
}

impl Default for PredictionConfigBuilder {
    fn default() -> Self {
        let defaults = PredictionConfig::default();
        Self {
            helix: defaults.helix,
            strand: defaults.strand,
            tie_break: defaults.tie_break,
        }
    }
}

impl PredictionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn params_mut(&mut self, kind: StructureKind) -> &mut KindParams {
        match kind {
            StructureKind::Helix => &mut self.helix,
            StructureKind::Strand => &mut self.strand,
        }
    }

    pub fn params(mut self, kind: StructureKind, params: KindParams) -> Self {
        *self.params_mut(kind) = params;
        self
    }
    pub fn nucleation_window(mut self, kind: StructureKind, window: usize) -> Self {
        self.params_mut(kind).nucleation.window = window;
        self
    }
    pub fn min_favorable(mut self, kind: StructureKind, count: usize) -> Self {
        self.params_mut(kind).nucleation.min_favorable = count;
        self
    }
    pub fn nucleation_cutoff(mut self, kind: StructureKind, cutoff: f64) -> Self {
        self.params_mut(kind).nucleation.cutoff = cutoff;
        self
    }
    pub fn extension_window(mut self, kind: StructureKind, window: usize) -> Self {
        self.params_mut(kind).extension.window = window;
        self
    }
    pub fn extension_threshold(mut self, kind: StructureKind, threshold: f64) -> Self {
        self.params_mut(kind).extension.threshold = threshold;
        self
    }
    pub fn extension_comparison(mut self, kind: StructureKind, comparison: Comparison) -> Self {
        self.params_mut(kind).extension.comparison = comparison;
        self
    }
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn build(self) -> Result<PredictionConfig, ConfigError> {
        let config = PredictionConfig {
            helix: self.helix,
            strand: self.strand,
            tie_break: self.tie_break,
        };
        config.validate()?;
        Ok(config)
    }
}
