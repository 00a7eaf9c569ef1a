//! The N-dimensional histogram facade
//!
//! Ties an axis container to a bin storage: converts coordinate tuples
//! into linear storage offsets, enforces arity, and carries the
//! structural operations (fill, query, projection, arithmetic).

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

use crate::axes::Axes;
use crate::axis::{fill_slot, AnyAxis, Axis};
use crate::error::{Error, Result};
use crate::storage::{AdaptiveStorage, Storage};
use crate::value::Value;

/// Marks a fill argument as a statistical weight.
///
/// A weight `w` grows the target cell's value by `w` and its variance
/// by `w²`, switching adaptive storage to weight counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight(pub f64);

/// Marks a fill argument as a repetition count.
///
/// `count(n)` is equivalent to `n` unit fills and stays on the exact
/// counting path. A fractional count (constructed directly) behaves
/// like a weight instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Count(pub f64);

/// Tag a weight at the call site: `h.fill_with(&coords, weight(2.0))`.
pub fn weight(w: f64) -> Weight {
    Weight(w)
}

/// Tag a repetition count at the call site: `h.fill_with(&coords, count(10))`.
pub fn count(n: u32) -> Count {
    Count(n as f64)
}

/// Either fill tag, for the common entry point
#[derive(Debug, Clone, Copy)]
pub enum FillValue {
    /// A statistical weight
    Weight(f64),
    /// A repetition count
    Count(f64),
}

impl From<Weight> for FillValue {
    fn from(w: Weight) -> Self {
        FillValue::Weight(w.0)
    }
}

impl From<Count> for FillValue {
    fn from(c: Count) -> Self {
        FillValue::Count(c.0)
    }
}

/// An N-dimensional histogram over an axis container `A` and a bin
/// storage `S`.
///
/// The compile-time form uses an axis tuple, the dynamic form a
/// `Vec<AnyAxis>` (see [`DynHistogram`]). Out-of-domain samples land
/// in under/overflow bins when the axis materializes them and are
/// dropped otherwise; `fill` never fails on out-of-range input.
#[derive(Debug, Clone)]
pub struct Histogram<A: Axes, S: Storage = AdaptiveStorage> {
    pub(crate) axes: A,
    pub(crate) storage: S,
}

/// Histogram with axes chosen at runtime
pub type DynHistogram<S = AdaptiveStorage> = Histogram<Vec<AnyAxis>, S>;

impl<A: Axes, S: Storage> Histogram<A, S> {
    /// Create a histogram over `axes` with zeroed storage sized to fit.
    pub fn new(axes: A) -> Self {
        let cells = axes.cell_count();
        Self {
            axes,
            storage: S::with_size(cells),
        }
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.axes.dim()
    }

    /// Total number of storage cells, under/overflow included.
    pub fn bincount(&self) -> usize {
        self.storage.size()
    }

    /// The axis container.
    pub fn axes(&self) -> &A {
        &self.axes
    }

    /// Axis `i` as a tagged variant.
    pub fn axis(&self, i: usize) -> Option<AnyAxis> {
        self.axes.to_any().into_iter().nth(i)
    }

    /// The bin storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Record one sample. Fails only on arity mismatch (slice-coordinate
    /// forms); out-of-domain values go to under/overflow or are dropped.
    pub fn fill(&mut self, coordinates: &A::Coordinate) -> Result<()> {
        if let Some(k) = self.axes.linear_index(coordinates)? {
            self.storage.increase(k);
        }
        Ok(())
    }

    /// Record one weighted or repeated sample:
    /// `h.fill_with(&coords, weight(2.0))` or `h.fill_with(&coords, count(10))`.
    pub fn fill_with(&mut self, coordinates: &A::Coordinate, fill: impl Into<FillValue>) -> Result<()> {
        let Some(k) = self.axes.linear_index(coordinates)? else {
            return Ok(());
        };
        match fill.into() {
            FillValue::Weight(w) => self.storage.add(k, w),
            FillValue::Count(c) if c >= 0.0 && c.fract() == 0.0 && c <= u64::MAX as f64 => {
                self.storage.add_count(k, c as u64)
            }
            // fractional counts cannot stay on the integer path
            FillValue::Count(c) => self.storage.add(k, c),
        }
        Ok(())
    }

    /// Value of the bin addressed by per-axis indices; `-1` and `size`
    /// address the under/overflow bins where materialized.
    pub fn value(&self, indices: &[i32]) -> Result<f64> {
        Ok(self.storage.value(self.axes.stride_index(indices)?))
    }

    /// Variance of the bin addressed by per-axis indices.
    pub fn variance(&self, indices: &[i32]) -> Result<f64> {
        Ok(self.storage.variance(self.axes.stride_index(indices)?))
    }

    /// Sum of every cell, under/overflow included.
    pub fn sum(&self) -> f64 {
        (0..self.storage.size()).map(|i| self.storage.value(i)).sum()
    }

    /// Zero all cells, keeping the axes.
    pub fn reset(&mut self) {
        self.storage.reset();
    }

    /// Project onto the axes listed in `keep` (order preserved). Each
    /// output cell sums every source cell with matching retained
    /// coordinates; dropped axes are summed over all their bins,
    /// under/overflow included.
    pub fn reduce_to(&self, keep: &[usize]) -> Result<Histogram<Vec<AnyAxis>, S>> {
        let axes = self.axes.to_any();
        let dim = axes.len();
        if keep.is_empty() {
            return Err(Error::InvalidReduction("no axes retained".to_string()));
        }
        for (pos, &k) in keep.iter().enumerate() {
            if k >= dim {
                return Err(Error::InvalidReduction(format!(
                    "axis index {k} out of range for dimension {dim}"
                )));
            }
            if keep[..pos].contains(&k) {
                return Err(Error::InvalidReduction(format!("axis index {k} repeats")));
            }
        }

        let shapes: Vec<usize> = axes.iter().map(|a| a.shape()).collect();
        let mut strides = vec![1usize; dim];
        for i in 1..dim {
            strides[i] = strides[i - 1] * shapes[i - 1];
        }
        let mut out_strides = vec![1usize; keep.len()];
        for j in 1..keep.len() {
            out_strides[j] = out_strides[j - 1] * shapes[keep[j - 1]];
        }

        let new_axes: Vec<AnyAxis> = keep.iter().map(|&k| axes[k].clone()).collect();
        let mut out: Histogram<Vec<AnyAxis>, S> = Histogram::new(new_axes);
        for cell in 0..self.storage.size() {
            let mut dst = 0;
            for (j, &k) in keep.iter().enumerate() {
                dst += (cell / strides[k]) % shapes[k] * out_strides[j];
            }
            out.storage.transfer(dst, &self.storage, cell);
        }
        Ok(out)
    }

    /// Checked in-place addition; fails when the axis structures differ.
    pub fn try_add_assign<A2: Axes>(&mut self, other: &Histogram<A2, S>) -> Result<()> {
        self.check_axes(other)?;
        self.storage.merge(&other.storage);
        Ok(())
    }

    /// In-place addition across storage types, cell values and
    /// variances carried numerically.
    pub fn merge<A2: Axes, S2: Storage>(&mut self, other: &Histogram<A2, S2>) -> Result<()> {
        self.check_axes(other)?;
        for i in 0..self.storage.size() {
            self.storage
                .add_cell(i, other.storage.value(i), other.storage.variance(i));
        }
        Ok(())
    }

    fn check_axes<A2: Axes, S2: Storage>(&self, other: &Histogram<A2, S2>) -> Result<()> {
        if self.axes.to_any() != other.axes.to_any() {
            return Err(Error::IncompatibleAxes(
                "operands have different axis structures".to_string(),
            ));
        }
        Ok(())
    }
}

impl<S: Storage> Histogram<Vec<AnyAxis>, S> {
    /// Build the dynamic form from any iterator of axes.
    pub fn from_axes<I, X>(axes: I) -> Self
    where
        I: IntoIterator<Item = X>,
        X: Into<AnyAxis>,
    {
        Self::new(axes.into_iter().map(Into::into).collect())
    }

    /// Record one sample per row of equally long per-axis columns.
    pub fn fill_bulk(&mut self, columns: &[&[Value]]) -> Result<()> {
        let rows = self.bulk_rows(columns)?;
        for row in 0..rows {
            if let Some(k) = self.row_offset(columns, row) {
                self.storage.increase(k);
            }
        }
        Ok(())
    }

    /// Record one weighted sample per row; `weights` must match the
    /// column length.
    pub fn fill_bulk_weighted(&mut self, columns: &[&[Value]], weights: &[f64]) -> Result<()> {
        let rows = self.bulk_rows(columns)?;
        if weights.len() != rows {
            return Err(Error::size_mismatch(rows, weights.len(), "weight column"));
        }
        for row in 0..rows {
            if let Some(k) = self.row_offset(columns, row) {
                self.storage.add(k, weights[row]);
            }
        }
        Ok(())
    }

    fn bulk_rows(&self, columns: &[&[Value]]) -> Result<usize> {
        if columns.len() != self.axes.len() {
            return Err(Error::arity(self.axes.len(), columns.len()));
        }
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        for column in columns {
            if column.len() != rows {
                return Err(Error::size_mismatch(rows, column.len(), "fill columns"));
            }
        }
        Ok(rows)
    }

    fn row_offset(&self, columns: &[&[Value]], row: usize) -> Option<usize> {
        let mut offset = 0;
        let mut stride = 1;
        for (axis, column) in self.axes.iter().zip(columns) {
            let slot = fill_slot(axis, axis.index(&column[row]))?;
            offset += slot * stride;
            stride *= axis.shape();
        }
        Some(offset)
    }
}

/// Structural equality across forms: a static histogram equals a
/// dynamic one with the same axes, an adaptive storage equals an array
/// storage with the same cell values and variances.
impl<A1, S1, A2, S2> PartialEq<Histogram<A2, S2>> for Histogram<A1, S1>
where
    A1: Axes,
    S1: Storage,
    A2: Axes,
    S2: Storage,
{
    fn eq(&self, other: &Histogram<A2, S2>) -> bool {
        if self.axes.to_any() != other.axes.to_any() {
            return false;
        }
        let n = self.storage.size();
        n == other.storage.size()
            && (0..n).all(|i| {
                self.storage.value(i) == other.storage.value(i)
                    && self.storage.variance(i) == other.storage.variance(i)
            })
    }
}

impl<A: Axes, A2: Axes, S: Storage> AddAssign<&Histogram<A2, S>> for Histogram<A, S> {
    /// Panics when the axis structures differ; use
    /// [`Histogram::try_add_assign`] for the checked form.
    fn add_assign(&mut self, other: &Histogram<A2, S>) {
        self.try_add_assign(other).unwrap_or_else(|e| panic!("{e}"));
    }
}

impl<A: Axes, A2: Axes, S: Storage> Add<&Histogram<A2, S>> for &Histogram<A, S> {
    type Output = Histogram<A, S>;

    fn add(self, other: &Histogram<A2, S>) -> Histogram<A, S> {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl<A: Axes, A2: Axes, S: Storage> Add<Histogram<A2, S>> for Histogram<A, S> {
    type Output = Histogram<A, S>;

    fn add(mut self, other: Histogram<A2, S>) -> Histogram<A, S> {
        self += &other;
        self
    }
}

impl<A: Axes, S: Storage> MulAssign<f64> for Histogram<A, S> {
    fn mul_assign(&mut self, factor: f64) {
        self.storage.scale(factor);
    }
}

impl<A: Axes, S: Storage> Mul<f64> for Histogram<A, S> {
    type Output = Histogram<A, S>;

    fn mul(mut self, factor: f64) -> Self::Output {
        self *= factor;
        self
    }
}

impl<A: Axes, S: Storage> Mul<f64> for &Histogram<A, S> {
    type Output = Histogram<A, S>;

    fn mul(self, factor: f64) -> Self::Output {
        self.clone() * factor
    }
}

impl<A: Axes, S: Storage> Mul<Histogram<A, S>> for f64 {
    type Output = Histogram<A, S>;

    fn mul(self, histogram: Histogram<A, S>) -> Self::Output {
        histogram * self
    }
}

impl<A: Axes, S: Storage> Mul<&Histogram<A, S>> for f64 {
    type Output = Histogram<A, S>;

    fn mul(self, histogram: &Histogram<A, S>) -> Self::Output {
        histogram.clone() * self
    }
}

impl<A: Axes, S: Storage> DivAssign<f64> for Histogram<A, S> {
    fn div_assign(&mut self, divisor: f64) {
        self.storage.scale(1.0 / divisor);
    }
}

impl<A: Axes, S: Storage> Div<f64> for Histogram<A, S> {
    type Output = Histogram<A, S>;

    fn div(mut self, divisor: f64) -> Self::Output {
        self /= divisor;
        self
    }
}

impl<A: Axes, S: Storage> Div<f64> for &Histogram<A, S> {
    type Output = Histogram<A, S>;

    fn div(self, divisor: f64) -> Self::Output {
        self.clone() / divisor
    }
}

impl<A: Axes, S: Storage> fmt::Display for Histogram<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "histogram(")?;
        for axis in self.axes.to_any() {
            writeln!(f, "  {axis},")?;
        }
        write!(f, ")")
    }
}
