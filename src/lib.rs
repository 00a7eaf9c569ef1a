//! Multi-dimensional histograms with adaptive bin storage
//!
//! This crate maps tuples of input values (numeric, categorical, or
//! angular) to non-negative counts, supports weighted and unweighted
//! fills, and offers axis-level projections. It is meant as a reusable
//! building block for data-analysis libraries.
//!
//! # Key Features
//!
//! - **Closed axis family**: regular (optionally log/sqrt/cos/pow
//!   transformed), circular, variable-width, integer and categorical
//!   axes behind one trait
//! - **Two container forms**: compile-time axis tuples or a runtime
//!   sequence of tagged axis variants
//! - **Adaptive storage**: counts start in a single byte per bin and
//!   widen automatically up to arbitrary precision, or switch to
//!   (Σw, Σw²) pairs on the first weighted fill; no count is ever lost
//! - **Structural operations**: fill, query value and variance, axis
//!   projection, equality, addition, scalar scaling, reset
//!
//! # Examples
//!
//! ## Counting into an integer axis
//!
//! ```rust
//! use multihist::{histogram, IntegerAxis};
//!
//! let mut hist = histogram((IntegerAxis::new(0, 2)?,));
//! hist.fill(&(0,))?;
//! hist.fill(&(1,))?;
//! hist.fill(&(-3,))?; // lands in the underflow bin
//!
//! assert_eq!(hist.value(&[0])?, 1.0);
//! assert_eq!(hist.value(&[-1])?, 1.0);
//! assert_eq!(hist.sum(), 3.0);
//! # Ok::<(), multihist::Error>(())
//! ```
//!
//! ## Weighted fills track variance
//!
//! ```rust
//! use multihist::{histogram, weight, RegularAxis};
//!
//! let mut hist = histogram((RegularAxis::new(2, -1.0, 1.0)?,));
//! hist.fill(&(0.2,))?;
//! hist.fill_with(&(0.2,), weight(3.0))?;
//!
//! assert_eq!(hist.value(&[1])?, 4.0);
//! assert_eq!(hist.variance(&[1])?, 10.0); // 1 + 3²
//! # Ok::<(), multihist::Error>(())
//! ```
//!
//! ## Runtime axes and projection
//!
//! ```rust
//! use multihist::{dyn_histogram, AnyAxis, IntegerAxis, Value};
//!
//! let mut hist = dyn_histogram([
//!     AnyAxis::from(IntegerAxis::new(0, 2)?),
//!     AnyAxis::from(IntegerAxis::new(0, 3)?),
//! ]);
//! hist.fill(&[Value::from(0), Value::from(1)])?;
//! hist.fill(&[Value::from(1), Value::from(1)])?;
//!
//! let onto_second = hist.reduce_to(&[1])?;
//! assert_eq!(onto_second.value(&[1])?, 2.0);
//! assert_eq!(onto_second.sum(), hist.sum());
//! # Ok::<(), multihist::Error>(())
//! ```
//!
//! ## Fixed-footprint storage
//!
//! ```rust
//! use multihist::{histogram_with, ArrayStorage, IntegerAxis};
//!
//! let mut hist = histogram_with::<_, ArrayStorage<u32>>((IntegerAxis::new(0, 4)?,));
//! hist.fill(&(2,))?;
//! assert_eq!(hist.value(&[2])?, 1.0);
//! # Ok::<(), multihist::Error>(())
//! ```
//!
//! # Thread safety
//!
//! A histogram is a plain value: concurrent reads are safe, concurrent
//! fills are not synchronized. The intended pattern for parallel
//! filling is one histogram per thread merged afterwards with `+=`.

pub mod axes;
pub mod axis;
pub mod error;
pub mod histogram;
pub mod storage;
pub mod value;
pub mod view;

// Re-export main types and traits
pub use axes::Axes;
pub use axis::{
    AnyAxis, Axis, CategoryAxis, CircularAxis, IntegerAxis, RegularAxis, Transform, VariableAxis,
};
pub use axis::category::{str_categories, CategoryValue};
pub use error::{Error, Result};
pub use histogram::{count, weight, Count, DynHistogram, FillValue, Histogram, Weight};
pub use storage::{
    AdaptiveStorage, ArrayStorage, Element, ElementKind, RawBuffer, Storage, StorageState,
    WeightCell,
};
pub use value::Value;
pub use view::{HistogramState, HistogramView};

// Convenience constructors

/// Create a histogram with adaptive storage over an axis container.
pub fn histogram<A: Axes>(axes: A) -> Histogram<A, AdaptiveStorage> {
    Histogram::new(axes)
}

/// Create a histogram with adaptive storage over runtime axes.
pub fn dyn_histogram<I, X>(axes: I) -> DynHistogram
where
    I: IntoIterator<Item = X>,
    X: Into<AnyAxis>,
{
    DynHistogram::from_axes(axes)
}

/// Create a histogram with an explicit storage choice.
pub fn histogram_with<A: Axes, S: Storage>(axes: A) -> Histogram<A, S> {
    Histogram::new(axes)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
