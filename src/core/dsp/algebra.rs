// src/core/dsp/algebra.rs
//
// Elementwise buffer algebra over real and complex buffers.
//
// Promotion rules:
//   real    op real    -> real result, imaginary 0 when written to a complex buffer
//   complex op complex -> complex result, real part only when written to a real buffer
//   mixed              -> complex operand is reordered first, real operand second
//
// Every operation computes into locals before touching the result buffer,
// so the in-place forms read a consistent snapshot of their target.

use super::buffer::DspBuffer;
use crate::error::{DspError, Result};

/// Classification of an operand pair, selecting the algebra code path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    RealReal,
    ComplexComplex,
    Mixed,
    Unknown,
}

impl OperandKind {
    pub fn classify(a: &dyn DspBuffer, b: &dyn DspBuffer) -> Self {
        Self::resolve(a, b).0
    }

    /// Kind of the pair plus the views `combine` dispatches on, which are
    /// present unless the kind is `Unknown`
    fn resolve<'a>(
        a: &'a dyn DspBuffer,
        b: &'a dyn DspBuffer,
    ) -> (Self, Option<(View<'a>, View<'a>)>) {
        match (view(a), view(b)) {
            (Some(x), Some(y)) => {
                let kind = match (x, y) {
                    (View::Real(_), View::Real(_)) => OperandKind::RealReal,
                    (View::Complex(..), View::Complex(..)) => OperandKind::ComplexComplex,
                    _ => OperandKind::Mixed,
                };
                (kind, Some((x, y)))
            }
            _ => (OperandKind::Unknown, None),
        }
    }
}

#[derive(Clone, Copy)]
enum View<'a> {
    Real(&'a [f64]),
    Complex(&'a [f64], &'a [f64]),
}

fn view(buf: &dyn DspBuffer) -> Option<View<'_>> {
    if let Some(r) = buf.as_real() {
        return Some(View::Real(r.data()));
    }
    buf.as_complex().map(|c| View::Complex(c.real(), c.imag()))
}

#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Add,
    Mult,
}

/// Values computed ahead of the write-back
struct Computed {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl Computed {
    fn real(re: Vec<f64>) -> Self {
        let im = vec![0.0; re.len()];
        Self { re, im }
    }
}

fn combine(op: BinaryOp, a: View<'_>, b: View<'_>, len: usize) -> Computed {
    match (a, b) {
        (View::Real(x), View::Real(y)) => {
            let re = (0..len)
                .map(|i| match op {
                    BinaryOp::Add => x[i] + y[i],
                    BinaryOp::Mult => x[i] * y[i],
                })
                .collect();
            Computed::real(re)
        }
        (View::Complex(ar, ai), View::Complex(br, bi)) => {
            let mut re = Vec::with_capacity(len);
            let mut im = Vec::with_capacity(len);
            for i in 0..len {
                match op {
                    BinaryOp::Add => {
                        re.push(ar[i] + br[i]);
                        im.push(ai[i] + bi[i]);
                    }
                    BinaryOp::Mult => {
                        let (a, b) = (ar[i], ai[i]);
                        let (c, d) = (br[i], bi[i]);
                        re.push(c * a - b * d);
                        im.push(c * b + a * d);
                    }
                }
            }
            Computed { re, im }
        }
        (View::Complex(xr, xi), View::Real(y)) | (View::Real(y), View::Complex(xr, xi)) => {
            let mut re = Vec::with_capacity(len);
            let mut im = Vec::with_capacity(len);
            for i in 0..len {
                match op {
                    BinaryOp::Add => {
                        re.push(xr[i] + y[i]);
                        im.push(xi[i]);
                    }
                    BinaryOp::Mult => {
                        re.push(y[i] * xr[i]);
                        im.push(y[i] * xi[i]);
                    }
                }
            }
            Computed { re, im }
        }
    }
}

fn write(result: &mut dyn DspBuffer, computed: Computed) -> Result<()> {
    if let Some(r) = result.as_real_mut() {
        r.data_mut().copy_from_slice(&computed.re);
        return Ok(());
    }
    if let Some(c) = result.as_complex_mut() {
        c.real_mut().copy_from_slice(&computed.re);
        c.imag_mut().copy_from_slice(&computed.im);
        return Ok(());
    }
    Err(DspError::UnsupportedResult)
}

fn binary(
    op: BinaryOp,
    result: &mut dyn DspBuffer,
    a: &dyn DspBuffer,
    b: &dyn DspBuffer,
) -> Result<()> {
    let len = a.size().min(b.size());
    result.resize(len);
    let computed = operate(op, a, b, len)?;
    write(result, computed)
}

fn binary_assign(op: BinaryOp, target: &mut dyn DspBuffer, other: &dyn DspBuffer) -> Result<()> {
    let len = target.size().min(other.size());
    let computed = operate(op, &*target, other, len);
    target.resize(len);
    write(target, computed?)
}

fn operate(op: BinaryOp, a: &dyn DspBuffer, b: &dyn DspBuffer, len: usize) -> Result<Computed> {
    match OperandKind::resolve(a, b) {
        (kind, Some((x, y))) => {
            log::trace!("{:?} on {:?} operands, {} elements", op, kind, len);
            Ok(combine(op, x, y, len))
        }
        (kind, None) => {
            log::debug!("buffer algebra called with {:?} operand type", kind);
            Err(DspError::UndefinedOperand)
        }
    }
}

fn scaled(a: View<'_>, scalar: f64) -> Computed {
    match a {
        View::Real(x) => Computed::real(x.iter().map(|v| v * scalar).collect()),
        View::Complex(xr, xi) => Computed {
            re: xr.iter().map(|v| v * scalar).collect(),
            im: xi.iter().map(|v| v * scalar).collect(),
        },
    }
}

fn copied(a: View<'_>) -> Computed {
    match a {
        View::Real(x) => Computed::real(x.to_vec()),
        View::Complex(xr, xi) => Computed {
            re: xr.to_vec(),
            im: xi.to_vec(),
        },
    }
}

/// `result = a + b` over `min(a.size, b.size)` elements
pub fn add(result: &mut dyn DspBuffer, a: &dyn DspBuffer, b: &dyn DspBuffer) -> Result<()> {
    binary(BinaryOp::Add, result, a, b)
}

/// `result = a * b` elementwise over `min(a.size, b.size)` elements
pub fn mult(result: &mut dyn DspBuffer, a: &dyn DspBuffer, b: &dyn DspBuffer) -> Result<()> {
    binary(BinaryOp::Mult, result, a, b)
}

/// `target = target + other`
pub fn add_assign(target: &mut dyn DspBuffer, other: &dyn DspBuffer) -> Result<()> {
    binary_assign(BinaryOp::Add, target, other)
}

/// `target = target * other`
pub fn mult_assign(target: &mut dyn DspBuffer, other: &dyn DspBuffer) -> Result<()> {
    binary_assign(BinaryOp::Mult, target, other)
}

/// `result = a * scalar`
pub fn mult_scalar(result: &mut dyn DspBuffer, a: &dyn DspBuffer, scalar: f64) -> Result<()> {
    result.resize(a.size());
    let computed = view(a).map(|x| scaled(x, scalar)).ok_or(DspError::UndefinedOperand)?;
    write(result, computed)
}

/// `target = target * scalar`
pub fn scale(target: &mut dyn DspBuffer, scalar: f64) -> Result<()> {
    let computed = view(&*target)
        .map(|x| scaled(x, scalar))
        .ok_or(DspError::UndefinedOperand)?;
    write(target, computed)
}

/// Copy `a` into `result`, promoting or truncating to the result's kind
pub fn set(result: &mut dyn DspBuffer, a: &dyn DspBuffer) -> Result<()> {
    result.resize(a.size());
    let computed = view(a).map(copied).ok_or(DspError::UndefinedOperand)?;
    write(result, computed)
}

/// Fill every element of `result` without resizing it.
///
/// No values fills `(0, 0)`, one value `a` fills `(a, 0)`, two or more fill
/// `(values[0], values[1])`. A real result only receives the first component.
pub fn fill(result: &mut dyn DspBuffer, values: &[f64]) -> Result<()> {
    let re = values.first().copied().unwrap_or(0.0);
    let im = values.get(1).copied().unwrap_or(0.0);
    if let Some(r) = result.as_real_mut() {
        r.data_mut().fill(re);
        return Ok(());
    }
    if let Some(c) = result.as_complex_mut() {
        c.real_mut().fill(re);
        c.imag_mut().fill(im);
        return Ok(());
    }
    Err(DspError::UnsupportedResult)
}
