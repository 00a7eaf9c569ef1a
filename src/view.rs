//! External views of histogram state
//!
//! Two read-only projections for collaborators outside the core:
//!
//! - [`HistogramView`] describes the cell buffer for zero-copy
//!   consumption by array libraries: element tag, logical shape, byte
//!   strides and the bytes themselves.
//! - [`HistogramState`] is the stable `(axes, storage-tag, cells)`
//!   tuple an external encoder walks; rebuilding from it restores an
//!   equal histogram.

use std::borrow::Cow;

use crate::axes::Axes;
use crate::axis::{AnyAxis, Axis};
use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::storage::{ElementKind, Storage, StorageState};

/// Buffer descriptor for zero-copy consumers.
///
/// Axis 0 varies fastest: the stride of axis `i` is the product of the
/// earlier axis shapes times the cell width. Weighted storage appends
/// a trailing dimension of 2 holding (Σw, Σw²) with the element
/// stride. The void state synthesizes a zero buffer; arbitrary-
/// precision cells are materialized as doubles, lossy beyond 2^53.
#[derive(Debug, Clone)]
pub struct HistogramView<'a> {
    /// Element tag of `data`
    pub element: ElementKind,
    /// Logical extents, one per axis (plus the trailing pair dimension
    /// for weighted storage); a zero-dimensional histogram reports `[0]`
    pub shape: Vec<usize>,
    /// Byte stride per dimension of `shape`
    pub strides: Vec<usize>,
    /// The cell bytes in linear offset order
    pub data: Cow<'a, [u8]>,
}

/// Portable snapshot of a histogram: the axes and every cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramState {
    /// The axes, in order
    pub axes: Vec<AnyAxis>,
    /// Representation tag and cells, in linear offset order
    pub cells: StorageState,
}

impl<A: Axes, S: Storage> Histogram<A, S> {
    /// Describe the storage buffer for zero-copy consumption.
    pub fn view(&self) -> HistogramView<'_> {
        let raw = self.storage.raw_view();
        let element = raw.kind.size_bytes();
        let cell = if raw.weighted { 2 * element } else { element };
        let axes = self.axes.to_any();

        let mut shape = Vec::with_capacity(axes.len() + 1);
        let mut strides = Vec::with_capacity(axes.len() + 1);
        let mut stride = cell;
        for axis in &axes {
            shape.push(axis.shape());
            strides.push(stride);
            stride *= axis.shape();
        }
        if axes.is_empty() {
            shape.push(0);
            strides.push(cell);
        }
        if raw.weighted {
            shape.push(2);
            strides.push(element);
        }
        HistogramView {
            element: raw.kind,
            shape,
            strides,
            data: raw.data,
        }
    }

    /// Snapshot the axes and cells for an external encoder.
    pub fn to_state(&self) -> HistogramState {
        HistogramState {
            axes: self.axes.to_any(),
            cells: self.storage.state(),
        }
    }
}

impl<S: Storage> Histogram<Vec<AnyAxis>, S> {
    /// Rebuild a histogram from a snapshot; the cell count must match
    /// the axes.
    pub fn from_state(state: HistogramState) -> Result<Self> {
        let expected = state.axes.cell_count();
        if state.cells.len() != expected {
            return Err(Error::size_mismatch(
                expected,
                state.cells.len(),
                "snapshot cells",
            ));
        }
        Ok(Self {
            axes: state.axes,
            storage: S::from_state(state.cells)?,
        })
    }
}
