//! CLI argument parsing

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{AnalysisConfig, AnalysisPreset};
use crate::core::dsp::{CaptureMode, WindowType};

#[derive(Parser, Debug)]
#[command(name = "freqcheck")]
#[command(about = "Measure the frequency response of recorded audio captures")]
pub struct Args {
    /// Input file or directory
    pub input: PathBuf,

    /// Preset (standard, fast, precise)
    #[arg(short, long, default_value = "standard")]
    pub preset: String,

    /// JSON analysis config; overrides the preset
    #[arg(short, long, env = "FREQCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// FFT size (power of two)
    #[arg(short = 'n', long)]
    pub fft_size: Option<usize>,

    /// Hop between frames in samples
    #[arg(long)]
    pub hop: Option<usize>,

    /// Window (rectangular, triangular, hamming, hanning, *_flat_top)
    #[arg(short, long)]
    pub window: Option<String>,

    /// Ramp length for flat-top windows
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Capture mode (average, max, min)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Accumulator state file, loaded before and saved after processing
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Number of spectral peaks to report
    #[arg(short, long, default_value = "5")]
    pub top: usize,

    /// Include the full accumulated spectrum in the output
    #[arg(long)]
    pub spectrum: bool,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve preset, config file and individual overrides into one config
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => {
                let preset = AnalysisPreset::from_name(&self.preset)
                    .ok_or_else(|| anyhow!("Unknown preset: {}", self.preset))?;
                AnalysisConfig::from_preset(preset)
            }
        };

        if let Some(size) = self.fft_size {
            config = config.with_fft_size(size);
        }
        if let Some(hop) = self.hop {
            config = config.with_hop_size(hop);
        }
        if let Some(name) = &self.window {
            let window =
                WindowType::from_name(name).ok_or_else(|| anyhow!("Unknown window: {}", name))?;
            config = config.with_window(window);
        }
        if let Some(overlap) = self.overlap {
            config = config.with_overlap(overlap);
        }
        if let Some(name) = &self.mode {
            let mode =
                CaptureMode::from_name(name).ok_or_else(|| anyhow!("Unknown mode: {}", name))?;
            config = config.with_capture_mode(mode);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("freqcheck").chain(args.iter().copied()))
    }

    #[test]
    fn test_overrides_apply_on_preset() {
        let args = parse(&["capture.wav", "--preset", "fast", "-n", "512", "-w", "hamming", "-m", "max"]);
        let config = args.analysis_config().unwrap();
        assert_eq!(config.fft_size, 512);
        assert_eq!(config.hop_size, 256);
        assert_eq!(config.window, WindowType::Hamming);
        assert_eq!(config.capture_mode, CaptureMode::Max);
    }

    #[test]
    fn test_rejects_unknown_names() {
        assert!(parse(&["x.wav", "--window", "kaiser"]).analysis_config().is_err());
        assert!(parse(&["x.wav", "--preset", "loud"]).analysis_config().is_err());
        assert!(parse(&["x.wav", "-n", "1000"]).analysis_config().is_err());
    }
}
