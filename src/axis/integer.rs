//! Axis with unit-width integer bins

use std::fmt;

use crate::axis::{edge_or_infinity, Axis};
use crate::error::{Error, Result};

/// Axis for integers on the half-open range `[lo, hi)`, one bin per value.
///
/// Faster than a regular axis for integer data since indexing is a
/// single subtraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerAxis {
    lo: i64,
    hi: i64,
    label: String,
    uoflow: bool,
}

impl IntegerAxis {
    /// Create an axis covering `[lo, hi)`.
    pub fn new(lo: i64, hi: i64) -> Result<Self> {
        if lo >= hi {
            return Err(Error::bad_bounds(format!(
                "integer axis requires lo < hi, got [{lo}, {hi})"
            )));
        }
        Ok(Self {
            lo,
            hi,
            label: String::new(),
            uoflow: true,
        })
    }

    /// Set the label, builder style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Drop the under/overflow bins; out-of-domain samples are discarded.
    pub fn without_uoflow(mut self) -> Self {
        self.uoflow = false;
        self
    }

    /// Lower bound of the axis domain.
    pub fn lo(&self) -> i64 {
        self.lo
    }

    /// Upper bound of the axis domain (exclusive).
    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// All `size + 1` bin edges.
    pub fn edges(&self) -> Vec<f64> {
        (self.lo..=self.hi).map(|i| i as f64).collect()
    }
}

impl Axis for IntegerAxis {
    type Coordinate = i64;

    fn index(&self, coordinate: &i64) -> i32 {
        let size = self.size() as i64;
        (coordinate.saturating_sub(self.lo)).clamp(-1, size) as i32
    }

    fn size(&self) -> usize {
        (self.hi - self.lo) as usize
    }

    fn shape(&self) -> usize {
        if self.uoflow {
            self.size() + 2
        } else {
            self.size()
        }
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    fn lower(&self, bin: i32) -> Result<f64> {
        Ok(edge_or_infinity(self.size(), bin, |i| {
            (self.lo + i as i64) as f64
        }))
    }

    fn upper(&self, bin: i32) -> Result<f64> {
        self.lower(bin + 1)
    }
}

impl fmt::Display for IntegerAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integer({}, {}", self.lo, self.hi)?;
        if !self.label.is_empty() {
            write!(f, ", label='{}'", self.label)?;
        }
        if !self.uoflow {
            write!(f, ", uoflow=False")?;
        }
        write!(f, ")")
    }
}
