//! Digital Signal Processing utilities
//!
//! - `buffer` - real and complex sample buffers
//! - `algebra` - elementwise buffer arithmetic with real/complex promotion
//! - `windows` - window generation and scaling
//! - `fft` - in-place radix-2 FFT
//! - `accumulator` - running average/max/min of spectra
//! - `stats` - level and spectral statistics

pub mod accumulator;
pub mod algebra;
pub mod buffer;
pub mod fft;
pub mod stats;
pub mod windows;

pub use accumulator::{CaptureMode, RunningVectorAccumulator};
pub use algebra::OperandKind;
pub use buffer::{ComplexBuffer, DspBuffer, RealBuffer};
pub use fft::{FftDirection, FftEngine};
pub use windows::{Window, WindowType};
