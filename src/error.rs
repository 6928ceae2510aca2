//! Error types for the DSP engine

use thiserror::Error;

/// Errors raised by buffers, algebra, transforms and the accumulator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// FFT engine requested with a length that is not a power of two
    #[error("FFT length {length} is not a power of two")]
    NotPowerOfTwo { length: usize },

    /// Buffer handed to a transform does not match the configured length
    #[error("buffer size {actual} does not match FFT length {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Integer transform direction other than +1 or -1
    #[error("transform sign {sign} is neither 1 nor -1")]
    InvalidDirection { sign: i32 },

    /// Checked write past the end of a buffer
    #[error("index {index} out of range for buffer of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Algebra operand is neither a real nor a complex buffer
    #[error("undefined operand type")]
    UndefinedOperand,

    /// Algebra result buffer is neither a real nor a complex buffer
    #[error("unsupported result buffer type")]
    UnsupportedResult,

    /// Serialized accumulator text could not be parsed
    #[error("malformed accumulator text: {0}")]
    MalformedText(String),

    /// Analysis configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DspError>;
