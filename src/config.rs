use crate::sequencer::{
    RowFormatter, SequenceAssembler, SequenceError, DEFAULT_CURRENT_A, DEFAULT_POWER_W,
    DEFAULT_RESOLUTION_S,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_current_a")]
    pub current_a: f64,
    #[serde(default = "OutputConfig::default_power_w")]
    pub power_w: f64,
}

impl OutputConfig {
    fn default_current_a() -> f64 {
        DEFAULT_CURRENT_A
    }
    fn default_power_w() -> f64 {
        DEFAULT_POWER_W
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            current_a: Self::default_current_a(),
            power_w: Self::default_power_w(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Seconds between setpoints; also the row's Millisecond field.
    #[serde(default = "SamplingConfig::default_resolution_s")]
    pub resolution_s: f64,
    /// Upper bound on generated setpoints, shutdown sample included.
    #[serde(default = "SamplingConfig::default_max_samples")]
    pub max_samples: usize,
}

impl SamplingConfig {
    fn default_resolution_s() -> f64 {
        DEFAULT_RESOLUTION_S
    }
    fn default_max_samples() -> usize {
        1_000_000
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            resolution_s: Self::default_resolution_s(),
            max_samples: Self::default_max_samples(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_sequence_file")]
    pub sequence_file: String,
    #[serde(default = "ExportConfig::default_steps_file")]
    pub steps_file: String,
}

impl ExportConfig {
    fn default_sequence_file() -> String {
        "uhs_sequence.csv".to_owned()
    }
    fn default_steps_file() -> String {
        "ramp_config.csv".to_owned()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sequence_file: Self::default_sequence_file(),
            steps_file: Self::default_steps_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SequencerConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl SequencerConfig {
    /// Reads `path`; a missing or unreadable file falls back to defaults.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if !path_obj.exists() {
            log::info!("no settings file at {path}, using defaults");
            return Self::default();
        }
        match fs::read_to_string(path_obj) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => {
                    log::info!("loaded settings from {path}");
                    cfg
                }
                Err(err) => {
                    log::warn!("failed to parse settings {path}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("failed to read settings {path}: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn assembler(&self) -> Result<SequenceAssembler, SequenceError> {
        SequenceAssembler::new(self.sampling.resolution_s, self.sampling.max_samples)
    }

    pub fn row_formatter(&self) -> RowFormatter {
        RowFormatter {
            current_a: self.output.current_a,
            power_w: self.output.power_w,
            resolution: self.sampling.resolution_s,
        }
    }
}
