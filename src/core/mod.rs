//! Core analysis and DSP modules

pub mod analysis;
pub mod analyzer;
pub mod decoder;
pub mod dsp;

pub use analysis::{SpectrumAnalyzer, SpectrumFrame};
pub use analyzer::{AnalyzerBuilder, AudioAnalyzer, SpectralPeak, SpectrumReport};
pub use decoder::{decode_audio, extract_mono, AudioData};
