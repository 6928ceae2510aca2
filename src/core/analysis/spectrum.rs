// src/core/analysis/spectrum.rs
//
// Framed spectral analysis: window, promote to complex, transform, derive
// magnitude/phase and accumulate magnitudes across frames.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::core::dsp::algebra;
use crate::core::dsp::stats::{bin_frequency, find_peaks};
use crate::core::dsp::{ComplexBuffer, FftEngine, RealBuffer, RunningVectorAccumulator, Window};
use crate::error::Result;

/// One-sided spectrum of a single frame (bins `0..=fft_size/2`)
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumFrame {
    /// Magnitudes normalised so a full-scale sine reads about 1.0
    pub magnitude: Vec<f64>,
    /// Phase in radians
    pub phase: Vec<f64>,
}

/// Spectrum analyzer holding one transform size and one window
pub struct SpectrumAnalyzer {
    config: AnalysisConfig,
    engine: FftEngine,
    window: Window,
    accumulator: RunningVectorAccumulator,
    frames_processed: usize,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let engine = FftEngine::new(config.fft_size)?;
        let window = Window::new(config.window, config.fft_size, config.overlap);
        let accumulator = RunningVectorAccumulator::new(config.capture_mode);
        Ok(Self {
            config,
            engine,
            window,
            accumulator,
            frames_processed: 0,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn engine(&self) -> &FftEngine {
        &self.engine
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn accumulator(&self) -> &RunningVectorAccumulator {
        &self.accumulator
    }

    pub fn accumulator_mut(&mut self) -> &mut RunningVectorAccumulator {
        &mut self.accumulator
    }

    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// Analyse up to `fft_size` samples; shorter input is zero padded
    pub fn analyze_frame(&self, samples: &[f64]) -> Result<SpectrumFrame> {
        let n = self.config.fft_size;
        let mut frame = RealBuffer::new(n);
        let take = samples.len().min(n);
        frame.data_mut()[..take].copy_from_slice(&samples[..take]);

        self.window.apply(&mut frame)?;

        let mut spectrum = ComplexBuffer::new(n);
        algebra::set(&mut spectrum, &frame)?;
        self.engine.forward(&mut spectrum)?;

        let norm = n as f64 / 2.0 * self.window.coherent_gain();
        let bins = self.config.bin_count();
        let (re, im) = (&spectrum.real()[..bins], &spectrum.imag()[..bins]);

        Ok(SpectrumFrame {
            magnitude: re.iter().zip(im).map(|(r, i)| r.hypot(*i) / norm).collect(),
            phase: re.iter().zip(im).map(|(r, i)| i.atan2(*r)).collect(),
        })
    }

    /// Number of frames `process` cuts from `len` samples
    pub fn frame_count(&self, len: usize) -> usize {
        let n = self.config.fft_size;
        if len == 0 {
            0
        } else if len <= n {
            1
        } else {
            (len - n) / self.config.hop_size + 1
        }
    }

    /// Frame the signal, analyse every frame and feed the magnitudes into the
    /// accumulator in order. Returns the number of frames.
    pub fn process(&mut self, samples: &[f64]) -> Result<usize> {
        let n = self.config.fft_size;
        let hop = self.config.hop_size;
        let count = self.frame_count(samples.len());

        let this = &*self;
        let frames: Vec<SpectrumFrame> = (0..count)
            .into_par_iter()
            .map(|i| {
                let start = i * hop;
                let end = (start + n).min(samples.len());
                this.analyze_frame(&samples[start..end])
            })
            .collect::<Result<_>>()?;

        for (i, frame) in frames.iter().enumerate() {
            let replace = i == 0 && self.config.replace_first;
            self.accumulator.feed(&frame.magnitude, replace);
        }
        self.frames_processed += count;

        log::debug!(
            "Processed {} samples in {} frames ({} total)",
            samples.len(),
            count,
            self.frames_processed
        );
        Ok(count)
    }

    /// Accumulated spectrum; averaged unless `raw`
    pub fn averaged_spectrum(&self, raw: bool) -> Vec<f64> {
        self.accumulator.extract(raw)
    }

    /// Frequencies of the strongest accumulated peaks, strongest first
    pub fn peak_frequencies(&self, sample_rate: u32, count: usize) -> Vec<(f64, f64)> {
        let spectrum = self.averaged_spectrum(false);
        find_peaks(&spectrum, count)
            .into_iter()
            .map(|bin| {
                (
                    bin_frequency(bin, self.config.fft_size, sample_rate),
                    spectrum[bin],
                )
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.accumulator.reset();
        self.frames_processed = 0;
    }
}
