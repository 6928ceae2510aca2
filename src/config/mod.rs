//! Configuration module for freqcheck

mod analysis;

pub use analysis::{AnalysisConfig, AnalysisPreset};
