// src/core/analyzer.rs
//
// High-level file analysis API with builder pattern.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::analysis::SpectrumAnalyzer;
use super::decoder::{decode_audio, extract_mono, AudioData};
use super::dsp::stats::{amplitude_to_db, peak_amplitude, rms, spectral_centroid};
use super::dsp::{CaptureMode, RunningVectorAccumulator, WindowType};
use crate::config::AnalysisConfig;

/// A spectral peak in the accumulated spectrum
#[derive(Debug, Clone, Serialize)]
pub struct SpectralPeak {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// Result of analysing one file
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumReport {
    pub file_path: String,
    pub sample_rate: u32,
    pub channels: usize,
    pub duration_secs: f64,
    pub fft_size: usize,
    pub window: WindowType,
    pub capture_mode: CaptureMode,
    pub frames: usize,
    /// Observations held by the accumulator after this file
    pub accumulated_count: usize,
    pub rms_db: f64,
    pub peak_db: f64,
    pub centroid_hz: f64,
    pub peaks: Vec<SpectralPeak>,
    /// Accumulated magnitude spectrum in dB, bins `0..=fft_size/2`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrum_db: Option<Vec<f64>>,
}

/// Builder for AudioAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
    peak_count: usize,
    include_spectrum: bool,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            peak_count: 5,
            include_spectrum: false,
        }
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fft_size(mut self, size: usize) -> Self {
        self.config.fft_size = size;
        self
    }

    pub fn window(mut self, window: WindowType) -> Self {
        self.config.window = window;
        self
    }

    pub fn capture_mode(mut self, mode: CaptureMode) -> Self {
        self.config.capture_mode = mode;
        self
    }

    pub fn peak_count(mut self, count: usize) -> Self {
        self.peak_count = count;
        self
    }

    pub fn include_spectrum(mut self, include: bool) -> Self {
        self.include_spectrum = include;
        self
    }

    pub fn build<P: AsRef<Path>>(self, path: P) -> Result<AudioAnalyzer> {
        let audio = decode_audio(path.as_ref())?;
        Ok(AudioAnalyzer {
            path: path.as_ref().to_path_buf(),
            audio,
            config: self.config,
            peak_count: self.peak_count,
            include_spectrum: self.include_spectrum,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded file plus the settings used to analyse it
pub struct AudioAnalyzer {
    path: PathBuf,
    audio: AudioData,
    config: AnalysisConfig,
    peak_count: usize,
    include_spectrum: bool,
}

impl AudioAnalyzer {
    /// Create analyzer with default configuration
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        AnalyzerBuilder::new().build(path)
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn audio_data(&self) -> &AudioData {
        &self.audio
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the analysis from an empty accumulator
    pub fn analyze(&self) -> Result<SpectrumReport> {
        self.analyze_with_state(None).map(|(report, _)| report)
    }

    /// Run the analysis, continuing from a previously saved accumulator.
    /// Returns the report and the accumulator after this file.
    pub fn analyze_with_state(
        &self,
        state: Option<&RunningVectorAccumulator>,
    ) -> Result<(SpectrumReport, RunningVectorAccumulator)> {
        let mut analyzer = SpectrumAnalyzer::new(self.config.clone())?;
        if let Some(previous) = state {
            let mut restored = previous.clone();
            restored.set_mode(self.config.capture_mode);
            *analyzer.accumulator_mut() = restored;
        }

        let mono = extract_mono(&self.audio);
        let frames = analyzer.process(&mono)?;

        let spectrum = analyzer.averaged_spectrum(false);
        let peaks = analyzer
            .peak_frequencies(self.audio.sample_rate, self.peak_count)
            .into_iter()
            .map(|(frequency_hz, magnitude)| SpectralPeak {
                frequency_hz,
                magnitude_db: amplitude_to_db(magnitude),
            })
            .collect();

        let report = SpectrumReport {
            file_path: self.path.display().to_string(),
            sample_rate: self.audio.sample_rate,
            channels: self.audio.channels,
            duration_secs: self.audio.duration_secs,
            fft_size: self.config.fft_size,
            window: self.config.window,
            capture_mode: self.config.capture_mode,
            frames,
            accumulated_count: analyzer.accumulator().count(),
            rms_db: amplitude_to_db(rms(&mono)),
            peak_db: amplitude_to_db(peak_amplitude(&mono)),
            centroid_hz: spectral_centroid(&spectrum, self.config.fft_size, self.audio.sample_rate),
            peaks,
            spectrum_db: self
                .include_spectrum
                .then(|| spectrum.iter().map(|&m| amplitude_to_db(m)).collect()),
        };

        Ok((report, analyzer.accumulator().clone()))
    }
}
