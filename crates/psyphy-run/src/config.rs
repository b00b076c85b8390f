use anyhow::{Context, Result};
use psyphy_lib::artefact::{ArtefactPolicy, DetectorConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Recording layout of the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// One folder per participant with the E4 session CSVs.
    E4,
    /// `EDA_<part>.csv` / `BVP_<part>.csv` timestamped exports.
    Cut,
    /// Embrace Plus Avro sessions under `<part>/raw_data/v*/`.
    #[serde(rename = "e+", alias = "eplus")]
    EPlus,
}

impl FromStr for Device {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "e4" => Ok(Self::E4),
            "cut" => Ok(Self::Cut),
            "e+" | "eplus" => Ok(Self::EPlus),
            other => anyhow::bail!("unknown device '{}', expected e4, e+ or cut", other),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::E4 => "e4",
            Self::Cut => "cut",
            Self::EPlus => "e+",
        })
    }
}

/// Preprocessing settings for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreproConfig {
    /// Blocks with a larger artefact share are not preprocessed (percent).
    pub max_artefact_percent: f64,
    /// Replace artefact samples by interpolation before preprocessing.
    pub artefact_correction: bool,
    /// Gaussian smoothing width for EDA (samples).
    pub smoothing_window: usize,
    /// Render quality-control plots.
    pub plots: bool,
    /// Participants whose id contains any of these substrings are skipped.
    pub exclude: Vec<String>,
    pub detector: DetectorConfig,
}

impl Default for PreproConfig {
    fn default() -> Self {
        Self {
            max_artefact_percent: ArtefactPolicy::default().max_artefact_percent,
            artefact_correction: true,
            smoothing_window: 8,
            plots: true,
            exclude: Vec::new(),
            detector: DetectorConfig::default(),
        }
    }
}

impl PreproConfig {
    pub fn policy(&self) -> ArtefactPolicy {
        ArtefactPolicy::new(self.max_artefact_percent)
    }

    pub fn is_excluded(&self, part: &str) -> bool {
        self.exclude
            .iter()
            .any(|e| !e.is_empty() && part.contains(e.as_str()))
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.max_artefact_percent),
            "max_artefact_percent must lie within 0..=100, got {}",
            self.max_artefact_percent
        );
        Ok(())
    }
}

pub fn read_config(path: &Path) -> Result<PreproConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: PreproConfig =
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
