// src/core/dsp/accumulator.rs
//
// Running accumulator for equal-length vectors (typically magnitude spectra
// from successive capture windows), with a line-oriented text format.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DspError, Result};

/// Key of the version header line
pub const VERSION_KEY: &str = "VECTOR_AVERAGE_VERSION";
/// Key of the element count header line
pub const COUNT_KEY: &str = "COUNT";
/// Format version written by `to_text`
pub const FORMAT_VERSION: u32 = 1;
/// Largest element count accepted when parsing
pub const MAX_SERIALIZED_COUNT: usize = 20_000;

const MIN_TEXT_LINES: usize = 4;

/// How fed vectors are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Average,
    Max,
    Min,
}

impl Default for CaptureMode {
    fn default() -> Self {
        Self::Average
    }
}

impl CaptureMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "average" | "avg" | "mean" => Some(Self::Average),
            "max" | "peak" => Some(Self::Max),
            "min" => Some(Self::Min),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Max => "max",
            Self::Min => "min",
        }
    }
}

/// Running average/max/min over vectors of one length.
///
/// In `Max` and `Min` mode the count is held at 1 after every feed, so
/// `count()` only reflects the number of observations in `Average` mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningVectorAccumulator {
    accumulated: Vec<f64>,
    count: usize,
    mode: CaptureMode,
}

impl RunningVectorAccumulator {
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            accumulated: Vec::new(),
            count: 0,
            mode,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Length of the stored vector
    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Forget all observations; storage is kept and overwritten by the next feed
    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn feed(&mut self, vector: &[f64], replace: bool) {
        if self.accumulated.len() != vector.len() {
            if self.count > 0 {
                log::debug!(
                    "Accumulator length changed {} -> {}, restarting",
                    self.accumulated.len(),
                    vector.len()
                );
            }
            self.accumulated = vec![0.0; vector.len()];
            self.count = 0;
        }

        if replace || self.count == 0 {
            self.accumulated.copy_from_slice(vector);
            self.count = 1;
            return;
        }

        match self.mode {
            CaptureMode::Average => {
                for (acc, v) in self.accumulated.iter_mut().zip(vector) {
                    *acc += v;
                }
                self.count += 1;
            }
            CaptureMode::Max => {
                for (acc, v) in self.accumulated.iter_mut().zip(vector) {
                    *acc = acc.max(*v);
                }
                self.count = 1;
            }
            CaptureMode::Min => {
                for (acc, v) in self.accumulated.iter_mut().zip(vector) {
                    *acc = acc.min(*v);
                }
                self.count = 1;
            }
        }
    }

    /// Write the stored vector into `out` and return the number of elements
    /// written. Nothing is written when `out` is shorter than the stored vector.
    ///
    /// With `raw == false` averaged data is divided by the count.
    pub fn extract_into(&self, out: &mut [f64], raw: bool) -> usize {
        let len = self.accumulated.len();
        if out.len() < len {
            return 0;
        }
        let out = &mut out[..len];

        if self.count == 0 {
            out.fill(0.0);
        } else if !raw && self.count > 1 {
            let count = self.count as f64;
            for (o, acc) in out.iter_mut().zip(&self.accumulated) {
                *o = acc / count;
            }
        } else {
            out.copy_from_slice(&self.accumulated);
        }
        len
    }

    pub fn extract(&self, raw: bool) -> Vec<f64> {
        let mut out = vec![0.0; self.accumulated.len()];
        self.extract_into(&mut out, raw);
        out
    }

    /// Serialize the averaged vector as version line, count line and one
    /// value per line. Restoring it yields a single observation.
    pub fn to_text(&self) -> String {
        let values = self.extract(false);
        let mut text = String::new();
        text.push_str(&format!("{}={}\n", VERSION_KEY, FORMAT_VERSION));
        text.push_str(&format!("{}={}\n", COUNT_KEY, values.len()));
        for v in &values {
            text.push_str(&format!("{:.6}\n", v));
        }
        text
    }

    /// Replace the contents with a vector parsed from `to_text` output.
    /// On error the accumulator is left untouched.
    pub fn from_text(&mut self, text: &str) -> Result<()> {
        let values = parse_text(text).map_err(|e| {
            log::warn!("Rejected accumulator text: {}", e);
            e
        })?;
        self.feed(&values, true);
        Ok(())
    }
}

impl fmt::Display for RunningVectorAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .map(str::trim)
}

fn parse_text(text: &str) -> Result<Vec<f64>> {
    let lines: Vec<&str> = text.lines().collect();
    let total = lines.len();
    if total < MIN_TEXT_LINES {
        return Err(DspError::MalformedText(format!(
            "expected at least {} lines, found {}",
            MIN_TEXT_LINES, total
        )));
    }

    let version_idx = lines
        .iter()
        .position(|l| header_value(l, VERSION_KEY).is_some())
        .ok_or_else(|| DspError::MalformedText("missing version line".to_string()))?;
    header_value(lines[version_idx], VERSION_KEY)
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(|| DspError::MalformedText("unreadable version".to_string()))?;

    let count_idx = lines[version_idx + 1..]
        .iter()
        .position(|l| header_value(l, COUNT_KEY).is_some())
        .map(|p| p + version_idx + 1)
        .ok_or_else(|| DspError::MalformedText("missing count line".to_string()))?;
    let count = header_value(lines[count_idx], COUNT_KEY)
        .and_then(|v| v.parse::<usize>().ok())
        .ok_or_else(|| DspError::MalformedText("unreadable count".to_string()))?;

    if count == 0 || count > total - 2 || count >= MAX_SERIALIZED_COUNT {
        return Err(DspError::MalformedText(format!(
            "count {} out of range for {} lines",
            count, total
        )));
    }

    let value_lines = &lines[count_idx + 1..];
    if value_lines.len() < count {
        return Err(DspError::MalformedText(format!(
            "expected {} values, found {}",
            count,
            value_lines.len()
        )));
    }

    value_lines[..count]
        .iter()
        .map(|l| {
            l.trim()
                .parse::<f64>()
                .map_err(|_| DspError::MalformedText(format!("bad value: {:?}", l)))
        })
        .collect()
}
