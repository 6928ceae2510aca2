// src/config/analysis.rs
//
// Analysis parameters: transform size, framing, window and accumulation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::dsp::{CaptureMode, WindowType};
use crate::error::DspError;

/// Preset configurations for common use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPreset {
    /// Balanced defaults, 1024-point Hanning
    Standard,
    /// Coarse resolution, cheap enough for long captures
    Fast,
    /// Fine resolution with a flat-top Hamming window
    Precise,
}

impl AnalysisPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "standard" | "default" => Some(Self::Standard),
            "fast" => Some(Self::Fast),
            "precise" => Some(Self::Precise),
            _ => None,
        }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Transform length, must be a power of two (default: 1024)
    pub fft_size: usize,
    /// Samples between successive frames (default: 512)
    pub hop_size: usize,
    /// Window applied to every frame (default: Hanning)
    pub window: WindowType,
    /// Ramp length for flat-top windows, clamped to fft_size/2 (default: 0)
    pub overlap: usize,
    /// How frame spectra are combined (default: Average)
    pub capture_mode: CaptureMode,
    /// Whether the first frame of a run replaces previously accumulated data
    pub replace_first: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(AnalysisPreset::Standard)
    }
}

impl AnalysisConfig {
    pub fn from_preset(preset: AnalysisPreset) -> Self {
        match preset {
            AnalysisPreset::Standard => Self {
                fft_size: 1024,
                hop_size: 512,
                window: WindowType::Hanning,
                overlap: 0,
                capture_mode: CaptureMode::Average,
                replace_first: true,
            },
            AnalysisPreset::Fast => Self {
                fft_size: 256,
                hop_size: 256,
                window: WindowType::Hanning,
                overlap: 0,
                capture_mode: CaptureMode::Average,
                replace_first: true,
            },
            AnalysisPreset::Precise => Self {
                fft_size: 4096,
                hop_size: 1024,
                window: WindowType::HammingFlatTop,
                overlap: 512,
                capture_mode: CaptureMode::Average,
                replace_first: true,
            },
        }
    }

    pub fn with_fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = hop_size;
        self
    }

    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_capture_mode(mut self, mode: CaptureMode) -> Self {
        self.capture_mode = mode;
        self
    }

    pub fn with_replace_first(mut self, replace: bool) -> Self {
        self.replace_first = replace;
        self
    }

    /// Number of one-sided spectrum bins produced per frame
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2 + 1
    }

    pub fn validate(&self) -> Result<(), DspError> {
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(DspError::InvalidConfig(format!(
                "fft_size {} must be a power of two >= 2",
                self.fft_size
            )));
        }
        if self.hop_size == 0 {
            return Err(DspError::InvalidConfig("hop_size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse analysis config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for preset in [AnalysisPreset::Standard, AnalysisPreset::Fast, AnalysisPreset::Precise] {
            assert!(AnalysisConfig::from_preset(preset).validate().is_ok());
        }
        assert_eq!(AnalysisConfig::default().bin_count(), 513);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AnalysisConfig::from_json_str(
            r#"{ "fft_size": 2048, "window": "hamming_flat_top", "capture_mode": "max" }"#,
        )
        .unwrap();
        assert_eq!(config.fft_size, 2048);
        assert_eq!(config.hop_size, 512);
        assert_eq!(config.window, WindowType::HammingFlatTop);
        assert_eq!(config.capture_mode, CaptureMode::Max);
    }

    #[test]
    fn test_rejects_bad_fft_size() {
        assert!(AnalysisConfig::from_json_str(r#"{ "fft_size": 1000 }"#).is_err());
        assert!(AnalysisConfig::default().with_hop_size(0).validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnalysisConfig::from_preset(AnalysisPreset::Precise);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AnalysisConfig::from_json_str(&json).unwrap(), config);
    }
}
