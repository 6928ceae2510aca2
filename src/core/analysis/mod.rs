//! Spectral analysis built on the DSP primitives

mod spectrum;

pub use spectrum::{SpectrumAnalyzer, SpectrumFrame};
