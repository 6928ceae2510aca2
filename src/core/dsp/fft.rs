//! In-place radix-2 FFT with precomputed twiddle factors

use std::f64::consts::PI;

use super::buffer::{ComplexBuffer, RealBuffer};
use crate::error::{DspError, Result};

/// Transform direction; the value is the sign applied to the sine table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftDirection {
    Forward = 1,
    Inverse = -1,
}

impl TryFrom<i32> for FftDirection {
    type Error = DspError;

    fn try_from(sign: i32) -> Result<Self> {
        match sign {
            1 => Ok(FftDirection::Forward),
            -1 => Ok(FftDirection::Inverse),
            _ => Err(DspError::InvalidDirection { sign }),
        }
    }
}

impl FftDirection {
    pub fn sign(&self) -> f64 {
        match self {
            FftDirection::Forward => 1.0,
            FftDirection::Inverse => -1.0,
        }
    }
}

/// Decimation-in-time FFT for one power-of-two length.
///
/// The engine is immutable once built and can be shared across threads.
/// The inverse transform is not scaled by `1/N`.
#[derive(Debug, Clone)]
pub struct FftEngine {
    length: usize,
    order: u32,
    cos_table: RealBuffer,
    sin_table: RealBuffer,
}

impl FftEngine {
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 || !length.is_power_of_two() {
            return Err(DspError::NotPowerOfTwo { length });
        }
        let order = length.trailing_zeros();

        let half = length / 2;
        let mut cos_table = RealBuffer::new(half);
        let mut sin_table = RealBuffer::new(half);
        for i in 0..half {
            let angle = -2.0 * PI * i as f64 / length as f64;
            cos_table.set_at_unchecked(i, angle.cos());
            sin_table.set_at_unchecked(i, angle.sin());
        }

        log::debug!("Built FFT engine: length={}, order={}", length, order);

        Ok(Self {
            length,
            order,
            cos_table,
            sin_table,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn forward(&self, buffer: &mut ComplexBuffer) -> Result<()> {
        self.transform(buffer, FftDirection::Forward)
    }

    pub fn inverse(&self, buffer: &mut ComplexBuffer) -> Result<()> {
        self.transform(buffer, FftDirection::Inverse)
    }

    /// Transform with an integer sign: 1 is forward, -1 is inverse.
    /// Any other value is rejected and the buffer left untouched.
    pub fn transform_with_sign(&self, buffer: &mut ComplexBuffer, sign: i32) -> Result<()> {
        self.transform(buffer, FftDirection::try_from(sign)?)
    }

    /// Transform `buffer` in place. Its size must equal the engine length.
    pub fn transform(&self, buffer: &mut ComplexBuffer, direction: FftDirection) -> Result<()> {
        if buffer.size() != self.length {
            return Err(DspError::SizeMismatch {
                expected: self.length,
                actual: buffer.size(),
            });
        }

        let n = self.length;
        let sign = direction.sign();
        let (x, y) = buffer.parts_mut();

        // Bit-reversal permutation
        let mut j = 0usize;
        let half = n / 2;
        for i in 1..n.saturating_sub(1) {
            let mut n1 = half;
            while j >= n1 {
                j -= n1;
                n1 /= 2;
            }
            j += n1;

            if i < j {
                x.swap(i, j);
                y.swap(i, j);
            }
        }

        // Butterfly stages
        let cos = self.cos_table.data();
        let sin = self.sin_table.data();
        let mut n2 = 1usize;
        for stage in 0..self.order {
            let n1 = n2;
            n2 += n2;
            let step = 1usize << (self.order - stage - 1);
            let mut a = 0usize;

            for j in 0..n1 {
                let cc = cos[a];
                let ss = sign * sin[a];
                a += step;

                let mut k = j;
                while k < n {
                    let t1 = cc * x[k + n1] - ss * y[k + n1];
                    let t2 = ss * x[k + n1] + cc * y[k + n1];
                    x[k + n1] = x[k] - t1;
                    y[k + n1] = y[k] - t2;
                    x[k] += t1;
                    y[k] += t2;
                    k += n2;
                }
            }
        }

        Ok(())
    }
}
