// src/core/dsp/buffer.rs
//
// Owned sample buffers. Real buffers hold one array, complex buffers hold
// parallel real/imaginary arrays of equal length.

use num_complex::Complex;

use crate::error::{DspError, Result};

/// Common interface for buffers taking part in buffer algebra.
///
/// `RealBuffer` and `ComplexBuffer` are the two concrete kinds. Any other
/// implementor is treated as an unknown operand by `algebra`.
pub trait DspBuffer {
    /// Number of samples held
    fn size(&self) -> usize;

    /// Reallocate to `size` zeroed samples; no-op when the size is unchanged
    fn resize(&mut self, size: usize);

    fn as_real(&self) -> Option<&RealBuffer> {
        None
    }

    fn as_complex(&self) -> Option<&ComplexBuffer> {
        None
    }

    fn as_real_mut(&mut self) -> Option<&mut RealBuffer> {
        None
    }

    fn as_complex_mut(&mut self) -> Option<&mut ComplexBuffer> {
        None
    }
}

/// Real-valued sample buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealBuffer {
    data: Vec<f64>,
}

impl RealBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size],
        }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn resize(&mut self, size: usize) {
        if size != self.data.len() {
            self.data = vec![0.0; size];
        }
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Bounds-checked write
    pub fn set_at(&mut self, index: usize, value: f64) -> Result<()> {
        let size = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(DspError::IndexOutOfRange { index, size })?;
        *slot = value;
        Ok(())
    }

    /// Unchecked fast path; panics when `index >= size`
    #[inline]
    pub fn set_at_unchecked(&mut self, index: usize, value: f64) {
        self.data[index] = value;
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl From<Vec<f64>> for RealBuffer {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl DspBuffer for RealBuffer {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn resize(&mut self, size: usize) {
        RealBuffer::resize(self, size);
    }

    fn as_real(&self) -> Option<&RealBuffer> {
        Some(self)
    }

    fn as_real_mut(&mut self) -> Option<&mut RealBuffer> {
        Some(self)
    }
}

/// Complex sample buffer stored as split real/imaginary arrays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexBuffer {
    real: Vec<f64>,
    imag: Vec<f64>,
}

impl ComplexBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            real: vec![0.0; size],
            imag: vec![0.0; size],
        }
    }

    /// Build from parallel arrays. Fails when the lengths differ.
    pub fn from_parts(real: Vec<f64>, imag: Vec<f64>) -> Result<Self> {
        if real.len() != imag.len() {
            return Err(DspError::SizeMismatch {
                expected: real.len(),
                actual: imag.len(),
            });
        }
        Ok(Self { real, imag })
    }

    /// Purely real content, imaginary part zero
    pub fn from_real(real: Vec<f64>) -> Self {
        let imag = vec![0.0; real.len()];
        Self { real, imag }
    }

    pub fn size(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    pub fn resize(&mut self, size: usize) {
        if size != self.real.len() {
            self.real = vec![0.0; size];
            self.imag = vec![0.0; size];
        }
    }

    pub fn get(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.real.get(index)?, *self.imag.get(index)?))
    }

    /// Bounds-checked write of both components
    pub fn set_at(&mut self, index: usize, re: f64, im: f64) -> Result<()> {
        if index >= self.real.len() {
            return Err(DspError::IndexOutOfRange {
                index,
                size: self.real.len(),
            });
        }
        self.real[index] = re;
        self.imag[index] = im;
        Ok(())
    }

    /// Bounds-checked write of the real component; imaginary is cleared
    pub fn set_real_at(&mut self, index: usize, re: f64) -> Result<()> {
        self.set_at(index, re, 0.0)
    }

    /// Unchecked fast path; panics when `index >= size`
    #[inline]
    pub fn set_at_unchecked(&mut self, index: usize, re: f64, im: f64) {
        self.real[index] = re;
        self.imag[index] = im;
    }

    pub fn real(&self) -> &[f64] {
        &self.real
    }

    pub fn imag(&self) -> &[f64] {
        &self.imag
    }

    pub fn real_mut(&mut self) -> &mut [f64] {
        &mut self.real
    }

    pub fn imag_mut(&mut self) -> &mut [f64] {
        &mut self.imag
    }

    /// Both component arrays, mutably, for transforms working in place
    pub fn parts_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (self.real.as_mut_slice(), self.imag.as_mut_slice())
    }

    pub fn magnitude_at(&self, index: usize) -> Option<f64> {
        self.get(index).map(|(re, im)| re.hypot(im))
    }

    pub fn phase_at(&self, index: usize) -> Option<f64> {
        self.get(index).map(|(re, im)| im.atan2(re))
    }

    pub fn magnitudes(&self) -> RealBuffer {
        self.real
            .iter()
            .zip(&self.imag)
            .map(|(re, im)| re.hypot(*im))
            .collect::<Vec<_>>()
            .into()
    }

    pub fn phases(&self) -> RealBuffer {
        self.real
            .iter()
            .zip(&self.imag)
            .map(|(re, im)| im.atan2(*re))
            .collect::<Vec<_>>()
            .into()
    }

    pub fn to_complex_vec(&self) -> Vec<Complex<f64>> {
        self.real
            .iter()
            .zip(&self.imag)
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }
}

impl From<&[Complex<f64>]> for ComplexBuffer {
    fn from(values: &[Complex<f64>]) -> Self {
        Self {
            real: values.iter().map(|c| c.re).collect(),
            imag: values.iter().map(|c| c.im).collect(),
        }
    }
}

impl DspBuffer for ComplexBuffer {
    fn size(&self) -> usize {
        self.real.len()
    }

    fn resize(&mut self, size: usize) {
        ComplexBuffer::resize(self, size);
    }

    fn as_complex(&self) -> Option<&ComplexBuffer> {
        Some(self)
    }

    fn as_complex_mut(&mut self) -> Option<&mut ComplexBuffer> {
        Some(self)
    }
}
