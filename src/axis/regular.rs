//! Axis with equal-width bins in transformed space

use std::fmt;

use crate::axis::transform::Transform;
use crate::axis::{edge_or_infinity, Axis};
use crate::error::{Error, Result};

/// Axis for real values with `n` bins of equal width between `lo` and
/// `hi`, measured after an optional monotone transform.
///
/// The workhorse axis: identity binning for uniform data, log/sqrt/pow
/// spacing for scale-free data, cos spacing for polar angles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegularAxis {
    size: usize,
    lo: f64,
    hi: f64,
    tmin: f64,
    tdelta: f64,
    transform: Transform,
    label: String,
    uoflow: bool,
}

impl RegularAxis {
    /// Create an axis with `n` equal-width bins on `[lo, hi)`.
    pub fn new(n: usize, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(n, lo, hi, Transform::Identity)
    }

    /// Create an axis with bins equal in log space; `lo` must be positive.
    pub fn log(n: usize, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(n, lo, hi, Transform::Log)
    }

    /// Create an axis with bins equal in sqrt space.
    pub fn sqrt(n: usize, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(n, lo, hi, Transform::Sqrt)
    }

    /// Create an axis with bins equal in cos space.
    pub fn cos(n: usize, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(n, lo, hi, Transform::Cos)
    }

    /// Create an axis with bins equal in `x^p` space.
    pub fn pow(n: usize, lo: f64, hi: f64, p: f64) -> Result<Self> {
        Self::with_transform(n, lo, hi, Transform::Pow(p))
    }

    /// Create an axis with an explicit transform.
    pub fn with_transform(n: usize, lo: f64, hi: f64, transform: Transform) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidAxis("need at least one bin".to_string()));
        }
        if !(lo < hi) {
            return Err(Error::bad_bounds(format!(
                "regular axis requires lo < hi, got [{lo}, {hi})"
            )));
        }
        let tmin = transform.forward(lo);
        let tdelta = transform.forward(hi) - tmin;
        if !tmin.is_finite() || !tdelta.is_finite() || tdelta == 0.0 {
            return Err(Error::bad_bounds(format!(
                "bounds [{lo}, {hi}) are degenerate under {transform:?}"
            )));
        }
        Ok(Self {
            size: n,
            lo,
            hi,
            tmin,
            tdelta,
            transform,
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
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound of the axis domain.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// The transform in effect.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// All `size + 1` bin edges, in coordinate space.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.size as i32).map(|i| self.edge(i)).collect()
    }

    fn edge(&self, i: i32) -> f64 {
        let frac = i as f64 / self.size as f64;
        self.transform.inverse(self.tmin + frac * self.tdelta)
    }
}

impl Axis for RegularAxis {
    type Coordinate = f64;

    fn index(&self, coordinate: &f64) -> i32 {
        let n = self.size as f64;
        // fraction of the transformed range; sign works out for
        // decreasing transforms (cos) because tdelta is negative too
        let z = (self.transform.forward(*coordinate) - self.tmin) / self.tdelta;
        if z.is_nan() {
            self.size as i32
        } else if z < 0.0 {
            -1
        } else if z >= 1.0 {
            self.size as i32
        } else {
            // z < 1 puts the value in the last bin at worst; the min
            // guards against z * n rounding up to n
            ((z * n).floor() as i32).min(self.size as i32 - 1)
        }
    }

    fn size(&self) -> usize {
        self.size
    }

    fn shape(&self) -> usize {
        if self.uoflow {
            self.size + 2
        } else {
            self.size
        }
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    fn lower(&self, bin: i32) -> Result<f64> {
        Ok(edge_or_infinity(self.size, bin, |i| self.edge(i)))
    }

    fn upper(&self, bin: i32) -> Result<f64> {
        self.lower(bin + 1)
    }
}

impl fmt::Display for RegularAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}, {}",
            self.transform.repr_prefix(),
            self.size,
            self.lo,
            self.hi
        )?;
        if let Transform::Pow(p) = self.transform {
            write!(f, ", {p}")?;
        }
        if !self.label.is_empty() {
            write!(f, ", label='{}'", self.label)?;
        }
        if !self.uoflow {
            write!(f, ", uoflow=False")?;
        }
        write!(f, ")")
    }
}
