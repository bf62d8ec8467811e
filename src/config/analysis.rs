// src/config/analysis.rs
//! Analysis configuration structures and TOML loading

use crate::config::constants::{
    DEFAULT_BLOCK_SIZE, MEL_FILTER_MAX_HZ, MEL_FILTER_MIN_HZ,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::processing::features::FeatureSelection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete analysis pipeline configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    /// Block size in samples; also the FFT size
    pub block_size: usize,
    /// Which features populate the feature matrix
    pub features: FeatureSelection,
    /// Mel filterbank frequency range
    pub mel: MelConfig,
}

/// Mel filterbank configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MelConfig {
    /// Lower filterbank edge in Hz
    pub min_freq_hz: f32,
    /// Upper filterbank edge in Hz; clamped to Nyquist when the filterbank
    /// is built against a concrete sample rate
    pub max_freq_hz: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            features: FeatureSelection::all(),
            mel: MelConfig::default(),
        }
    }
}

impl Default for MelConfig {
    fn default() -> Self {
        Self {
            min_freq_hz: MEL_FILTER_MIN_HZ,
            max_freq_hz: MEL_FILTER_MAX_HZ,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML string
    pub fn load_from_str(contents: &str) -> AnalysisResult<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|err| AnalysisError::Config(format!("parse error: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&contents)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.block_size < 2 {
            return Err(AnalysisError::Config(format!(
                "block_size must be at least 2, got {}",
                self.block_size
            )));
        }
        if !self.block_size.is_power_of_two() {
            return Err(AnalysisError::Config(format!(
                "block_size must be a power of two, got {}",
                self.block_size
            )));
        }
        if self.mel.min_freq_hz <= 0.0 || self.mel.max_freq_hz <= self.mel.min_freq_hz {
            return Err(AnalysisError::Config(format!(
                "mel frequency range [{}, {}] is not ascending and positive",
                self.mel.min_freq_hz, self.mel.max_freq_hz
            )));
        }
        Ok(())
    }
}
