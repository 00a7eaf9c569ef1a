//! Bin storage: dense cell arrays behind the histogram facade
//!
//! Two implementations share the [`Storage`] contract:
//!
//! - [`AdaptiveStorage`] keeps exact counts by promoting its element
//!   representation on demand, and switches to (Σw, Σw²) pairs on the
//!   first weighted fill.
//! - [`ArrayStorage<T>`] is a plain fixed-element array for callers who
//!   want a fixed memory footprint and accept overflow risk.

pub mod adaptive;
pub mod array;

pub use adaptive::{AdaptiveStorage, WeightCell};
pub use array::{ArrayStorage, Element};

use std::borrow::Cow;

use num_bigint::BigUint;

use crate::error::Result;

/// Element tag of a storage buffer, for zero-copy consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Unsigned 8-bit cells
    U8,
    /// Unsigned 16-bit cells
    U16,
    /// Unsigned 32-bit cells
    U32,
    /// Unsigned 64-bit cells
    U64,
    /// Double-precision cells
    F64,
    /// No allocation yet; all cells are zero
    OpaqueZero,
}

impl ElementKind {
    /// Width of one element in bytes.
    pub fn size_bytes(&self) -> usize {
        match self {
            ElementKind::U8 | ElementKind::OpaqueZero => 1,
            ElementKind::U16 => 2,
            ElementKind::U32 => 4,
            ElementKind::U64 | ElementKind::F64 => 8,
        }
    }
}

/// Read-only descriptor of a storage buffer.
///
/// `data` borrows the live buffer when the representation is directly
/// consumable and materializes one otherwise: the void state
/// synthesizes zeros, and arbitrary-precision cells are converted to
/// doubles (lossy for counts beyond 2^53).
#[derive(Debug, Clone)]
pub struct RawBuffer<'a> {
    /// Element tag of `data`
    pub kind: ElementKind,
    /// Whether each logical cell is a (Σw, Σw²) pair of elements
    pub weighted: bool,
    /// The cell bytes, in linear offset order
    pub data: Cow<'a, [u8]>,
}

/// Portable snapshot of a storage buffer: the representation tag plus
/// every cell, in linear offset order. Together with the axis sequence
/// this is the stable tuple an external encoder walks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageState {
    /// All cells zero, nothing allocated
    Void {
        /// Number of cells
        len: usize,
    },
    /// 8-bit counts
    U8(Vec<u8>),
    /// 16-bit counts
    U16(Vec<u16>),
    /// 32-bit counts
    U32(Vec<u32>),
    /// 64-bit counts
    U64(Vec<u64>),
    /// Arbitrary-precision counts
    Big(Vec<BigUint>),
    /// Weighted (Σw, Σw²) cells
    Weighted(Vec<WeightCell>),
}

impl StorageState {
    /// Number of cells in the snapshot.
    pub fn len(&self) -> usize {
        match self {
            StorageState::Void { len } => *len,
            StorageState::U8(v) => v.len(),
            StorageState::U16(v) => v.len(),
            StorageState::U32(v) => v.len(),
            StorageState::U64(v) => v.len(),
            StorageState::Big(v) => v.len(),
            StorageState::Weighted(v) => v.len(),
        }
    }

    /// Whether the snapshot has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value and variance of cell `i`, as doubles.
    pub fn cell(&self, i: usize) -> (f64, f64) {
        match self {
            StorageState::Void { .. } => (0.0, 0.0),
            StorageState::U8(v) => (v[i] as f64, v[i] as f64),
            StorageState::U16(v) => (v[i] as f64, v[i] as f64),
            StorageState::U32(v) => (v[i] as f64, v[i] as f64),
            StorageState::U64(v) => (v[i] as f64, v[i] as f64),
            StorageState::Big(v) => {
                let x = crate::storage::adaptive::big_to_f64(&v[i]);
                (x, x)
            }
            StorageState::Weighted(v) => (v[i].sum, v[i].sum2),
        }
    }
}

/// Contract of a dense array of non-negative cells with variances
pub trait Storage: Clone {
    /// Create a zeroed storage with `n` cells.
    fn with_size(n: usize) -> Self;

    /// Number of cells.
    fn size(&self) -> usize;

    /// Add one unit count to cell `i`.
    fn increase(&mut self, i: usize);

    /// Add `n` unit counts to cell `i`, exactly.
    fn add_count(&mut self, i: usize, n: u64);

    /// Add real weight `w` to cell `i`: value grows by `w`, variance by
    /// `w²`. May switch the representation to weighted.
    fn add(&mut self, i: usize, w: f64);

    /// Add a (value, variance) pair to cell `i`. Integral pairs with
    /// `variance == value` take the exact counting path.
    fn add_cell(&mut self, i: usize, value: f64, variance: f64);

    /// Add cell `src` of `other` to cell `dst`, exactly for every
    /// representation. Backs merging and axis projections.
    fn transfer(&mut self, dst: usize, other: &Self, src: usize);

    /// Value of cell `i`.
    fn value(&self, i: usize) -> f64;

    /// Variance of cell `i`; equals the value unless a weighted fill
    /// has occurred.
    fn variance(&self, i: usize) -> f64;

    /// Zero all cells, dropping any widened representation.
    fn reset(&mut self);

    /// Cell-wise addition of an equally sized storage.
    fn merge(&mut self, other: &Self);

    /// Multiply every cell by `factor` (variance by `factor²`).
    fn scale(&mut self, factor: f64);

    /// Snapshot the representation tag and cells.
    fn state(&self) -> StorageState;

    /// Rebuild a storage from a snapshot.
    fn from_state(state: StorageState) -> Result<Self>;

    /// Raw byte view of the cells for zero-copy consumers.
    fn raw_view(&self) -> RawBuffer<'_>;
}
