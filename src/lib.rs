//! freqcheck - Spectral analysis of recorded audio
//!
//! A small numerical engine for measuring the frequency response of an
//! audio capture path, plus a command-line front end.
//!
//! ## Module Structure
//!
//! - `core::dsp` - Buffers, buffer algebra, windows, FFT, running accumulator
//! - `core::analysis` - Framed spectrum analysis pipeline
//! - `core` - Decoding and file-level analysis
//! - `config` - Analysis configuration and presets
//! - `cli` - Command-line interface
//! - `error` - Error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use freqcheck::core::dsp::{algebra, ComplexBuffer, FftEngine, RealBuffer, Window, WindowType};
//!
//! let engine = FftEngine::new(1024)?;
//! let window = Window::new(WindowType::Hanning, 1024, 0);
//!
//! let mut frame = RealBuffer::from_vec(samples);
//! window.apply(&mut frame)?;
//!
//! let mut spectrum = ComplexBuffer::new(1024);
//! algebra::set(&mut spectrum, &frame)?;
//! engine.forward(&mut spectrum)?;
//!
//! let magnitudes = spectrum.magnitudes();
//! ```
//!
//! ## Window Types
//!
//! | Window              | Ramp length | Notes                          |
//! |---------------------|-------------|--------------------------------|
//! | Rectangular         | none        | All ones                       |
//! | Triangular          | size/2      | Linear ramps                   |
//! | Hamming             | size/2      | 0.54 - 0.46 cos                |
//! | Hanning             | size/2      | Raised cosine, edges near zero |
//! | *FlatTop variants   | overlap     | Extended region of 1.0         |

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration and presets
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types at crate root for convenience
pub use config::{AnalysisConfig, AnalysisPreset};
pub use crate::core::dsp::{
    CaptureMode, ComplexBuffer, DspBuffer, FftDirection, FftEngine, OperandKind, RealBuffer,
    RunningVectorAccumulator, Window, WindowType,
};
pub use crate::core::{AudioAnalyzer, AnalyzerBuilder, SpectrumAnalyzer, SpectrumFrame, SpectrumReport};
pub use error::DspError;
