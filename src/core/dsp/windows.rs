//! Window function implementations

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::algebra;
use super::buffer::{DspBuffer, RealBuffer};
use crate::error::Result;

/// Window function types
///
/// The flat-top variants use the overlap length as ramp length, leaving a
/// wider region of 1.0 in the middle of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    Rectangular,
    Triangular,
    TriangularFlatTop,
    Hamming,
    HammingFlatTop,
    Hanning,
    HanningFlatTop,
}

impl Default for WindowType {
    fn default() -> Self {
        Self::Hanning
    }
}

#[derive(Clone, Copy)]
enum Taper {
    Triangular,
    Hamming,
    Hanning,
}

impl WindowType {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Rectangular,
            Self::Triangular,
            Self::TriangularFlatTop,
            Self::Hamming,
            Self::HammingFlatTop,
            Self::Hanning,
            Self::HanningFlatTop,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangular => "rectangular",
            Self::Triangular => "triangular",
            Self::TriangularFlatTop => "triangular_flat_top",
            Self::Hamming => "hamming",
            Self::HammingFlatTop => "hamming_flat_top",
            Self::Hanning => "hanning",
            Self::HanningFlatTop => "hanning_flat_top",
        }
    }

    /// Parse a window name; accepts `-` or `_` separators and `hann`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "rectangular" | "rect" | "none" => Some(Self::Rectangular),
            "triangular" | "bartlett" => Some(Self::Triangular),
            "triangular_flat_top" => Some(Self::TriangularFlatTop),
            "hamming" => Some(Self::Hamming),
            "hamming_flat_top" => Some(Self::HammingFlatTop),
            "hanning" | "hann" => Some(Self::Hanning),
            "hanning_flat_top" | "hann_flat_top" => Some(Self::HanningFlatTop),
            _ => None,
        }
    }

    fn taper(&self) -> Option<(Taper, bool)> {
        match self {
            Self::Rectangular => None,
            Self::Triangular => Some((Taper::Triangular, false)),
            Self::TriangularFlatTop => Some((Taper::Triangular, true)),
            Self::Hamming => Some((Taper::Hamming, false)),
            Self::HammingFlatTop => Some((Taper::Hamming, true)),
            Self::Hanning => Some((Taper::Hanning, false)),
            Self::HanningFlatTop => Some((Taper::Hanning, true)),
        }
    }
}

/// Fill `result` (at its current size) with window coefficients.
///
/// `overlap` is clamped to `size / 2` and only matters for flat-top types.
pub fn generate(result: &mut RealBuffer, window_type: WindowType, overlap: usize) {
    let size = result.size();
    let overlap = overlap.min(size / 2);

    let (taper, flat_top) = match window_type.taper() {
        Some(t) => t,
        None => {
            result.data_mut().fill(1.0);
            return;
        }
    };
    let ramp = if flat_top { overlap } else { size / 2 };
    log::debug!(
        "Generating {} window: size={}, ramp={}",
        window_type.name(),
        size,
        ramp
    );

    let data = result.data_mut();
    for (i, value) in data.iter_mut().enumerate() {
        *value = if i < ramp {
            rising(taper, i, ramp)
        } else if i >= size - ramp {
            falling(taper, i, ramp, size)
        } else {
            1.0
        };
    }
}

fn rising(taper: Taper, i: usize, ramp: usize) -> f64 {
    match taper {
        Taper::Triangular => (2 * i + 1) as f64 / (2 * ramp) as f64,
        Taper::Hamming => 0.54 - 0.46 * raised_cosine(i, ramp),
        Taper::Hanning => 0.5 * (1.0 - raised_cosine(i, ramp)),
    }
}

fn falling(taper: Taper, i: usize, ramp: usize, size: usize) -> f64 {
    match taper {
        Taper::Triangular => (2 * (size - i) - 1) as f64 / (2 * ramp) as f64,
        Taper::Hamming | Taper::Hanning => rising(taper, i - (size - 2 * ramp), ramp),
    }
}

/// cos(2*pi*k / (2L - 1))
fn raised_cosine(k: usize, ramp: usize) -> f64 {
    (2.0 * PI * k as f64 / (2 * ramp - 1) as f64).cos()
}

/// Multiply `buffer` in place by `factor`
pub fn scale(buffer: &mut dyn DspBuffer, factor: f64) -> Result<()> {
    algebra::scale(buffer, factor)
}

/// Precomputed window coefficients for a fixed type, size and overlap
#[derive(Debug, Clone)]
pub struct Window {
    window_type: WindowType,
    overlap: usize,
    coefficients: RealBuffer,
}

impl Window {
    pub fn new(window_type: WindowType, size: usize, overlap: usize) -> Self {
        let mut coefficients = RealBuffer::new(size);
        generate(&mut coefficients, window_type, overlap);
        Self {
            window_type,
            overlap: overlap.min(size / 2),
            coefficients,
        }
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn size(&self) -> usize {
        self.coefficients.size()
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn coefficients(&self) -> &RealBuffer {
        &self.coefficients
    }

    /// Multiply `buffer` in place by the window. The buffer length becomes
    /// `min(buffer.size, window.size)`.
    pub fn apply(&self, buffer: &mut dyn DspBuffer) -> Result<()> {
        algebra::mult_assign(buffer, &self.coefficients)
    }

    /// Mean coefficient value, the amplitude loss a windowed sine suffers
    pub fn coherent_gain(&self) -> f64 {
        if self.coefficients.is_empty() {
            return 1.0;
        }
        self.coefficients.data().iter().sum::<f64>() / self.coefficients.size() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dsp::buffer::ComplexBuffer;

    fn window(window_type: WindowType, size: usize, overlap: usize) -> Vec<f64> {
        let mut buf = RealBuffer::new(size);
        generate(&mut buf, window_type, overlap);
        buf.into_vec()
    }

    #[test]
    fn test_rectangular_ignores_overlap() {
        for overlap in [0, 3, 100] {
            assert!(window(WindowType::Rectangular, 16, overlap).iter().all(|&v| v == 1.0));
        }
    }

    #[test]
    fn test_triangular_ramps() {
        let w = window(WindowType::Triangular, 8, 0);
        let expected = [0.125, 0.375, 0.625, 0.875, 0.875, 0.625, 0.375, 0.125];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_triangular_odd_size_has_flat_center() {
        let w = window(WindowType::Triangular, 5, 0);
        assert!((w[2] - 1.0).abs() < 1e-12);
        assert!((w[0] - w[4]).abs() < 1e-12);
        assert!((w[1] - w[3]).abs() < 1e-12);
    }

    #[test]
    fn test_flat_top_uses_overlap_as_ramp() {
        let w = window(WindowType::TriangularFlatTop, 16, 2);
        assert!((w[0] - 0.25).abs() < 1e-12);
        assert!((w[1] - 0.75).abs() < 1e-12);
        assert!(w[2..14].iter().all(|&v| v == 1.0));
        assert!((w[14] - 0.75).abs() < 1e-12);
        assert!((w[15] - 0.25).abs() < 1e-12);

        // Zero overlap leaves only the flat top
        assert!(window(WindowType::HanningFlatTop, 8, 0).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_hanning_edges_near_zero() {
        let size = 64;
        let w = window(WindowType::Hanning, size, size / 2);
        assert!(w[0].abs() < 1e-12);
        assert!(w[size - 1].abs() < 1e-12);
        assert!(w[size / 2 - 1] > 0.99);
        for i in 0..size / 2 {
            assert!((w[i] - w[size - 1 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hamming_symmetric() {
        let w = window(WindowType::Hamming, 32, 0);
        assert!((w[0] - 0.08).abs() < 1e-12);
        assert!((w[31] - 0.08).abs() < 1e-12);
        for i in 0..16 {
            assert!((w[i] - w[31 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_overlap_clamped() {
        let a = window(WindowType::HammingFlatTop, 10, 50);
        let b = window(WindowType::Hamming, 10, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scale_in_place() {
        let mut buf = RealBuffer::from_vec(vec![1.0, -2.0]);
        scale(&mut buf, 3.0).unwrap();
        assert_eq!(buf.data(), &[3.0, -6.0]);
    }

    #[test]
    fn test_apply_to_complex() {
        let win = Window::new(WindowType::Triangular, 4, 0);
        let mut buf = ComplexBuffer::from_parts(vec![1.0; 4], vec![2.0; 4]).unwrap();
        win.apply(&mut buf).unwrap();
        assert!((buf.real()[0] - 0.25).abs() < 1e-12);
        assert!((buf.imag()[1] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_window_names() {
        for w in WindowType::all() {
            assert_eq!(WindowType::from_name(w.name()), Some(w));
        }
        assert_eq!(WindowType::from_name("Hann"), Some(WindowType::Hanning));
        assert_eq!(WindowType::from_name("kaiser"), None);
    }
}
