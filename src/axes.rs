//! Axis containers: fixed tuples and dynamic sequences
//!
//! A histogram is generic over its axis container. Two families
//! implement [`Axes`]:
//!
//! - `Vec<A>` for any axis type `A` — with `A = AnyAxis` this is the
//!   runtime-heterogeneous form filled with [`Value`] slices; with a
//!   concrete `A` it is a homogeneous sequence filled with plain
//!   coordinate slices.
//! - Tuples `(A0, ..., An-1)` of concrete axis types up to arity 10 —
//!   the compile-time form, filled with a matching coordinate tuple.
//!
//! Both share the linearization convention: the storage slot of an
//! axis is its bin index shifted up by one when an underflow bin
//! precedes the finite bins, axis 0 has stride 1, and each later axis
//! strides by the product of the earlier shapes.

use crate::axis::{fill_slot, query_slot, AnyAxis, Axis};
use crate::error::{Error, Result};

/// A fixed-length sequence of axes backing a histogram
pub trait Axes: Clone {
    /// The bundle of coordinates consumed by one fill
    type Coordinate: ?Sized;

    /// Number of axes
    fn dim(&self) -> usize;

    /// Total number of storage cells: the product of the axis shapes,
    /// or zero for a zero-dimensional container
    fn cell_count(&self) -> usize;

    /// Linear storage offset for a coordinate bundle. `Ok(None)` means
    /// the sample fell into a sentinel bin that is not materialized and
    /// must be dropped. Fails only on arity mismatch (slice forms).
    fn linear_index(&self, coordinates: &Self::Coordinate) -> Result<Option<usize>>;

    /// Linear storage offset for a bin-index bundle, for queries. Bin
    /// `-1` addresses the underflow bin and `size` the overflow bin of
    /// an axis, when materialized; anything else out of range fails.
    fn stride_index(&self, indices: &[i32]) -> Result<usize>;

    /// The axes as tagged variants, for reflection (equality, display,
    /// reduction, persistence)
    fn to_any(&self) -> Vec<AnyAxis>;
}

impl<A> Axes for Vec<A>
where
    A: Axis + Into<AnyAxis>,
{
    type Coordinate = [A::Coordinate];

    fn dim(&self) -> usize {
        self.len()
    }

    fn cell_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.iter().map(|a| a.shape()).product()
        }
    }

    fn linear_index(&self, coordinates: &[A::Coordinate]) -> Result<Option<usize>> {
        if coordinates.len() != self.len() {
            return Err(Error::arity(self.len(), coordinates.len()));
        }
        if self.is_empty() {
            return Ok(None);
        }
        let mut offset = 0;
        let mut stride = 1;
        for (axis, coordinate) in self.iter().zip(coordinates) {
            match fill_slot(axis, axis.index(coordinate)) {
                Some(slot) => {
                    offset += slot * stride;
                    stride *= axis.shape();
                }
                None => return Ok(None),
            }
        }
        Ok(Some(offset))
    }

    fn stride_index(&self, indices: &[i32]) -> Result<usize> {
        stride_index_any(self.iter(), self.len(), indices)
    }

    fn to_any(&self) -> Vec<AnyAxis> {
        self.iter().map(|a| a.clone().into()).collect()
    }
}

/// Shared query-offset computation over any iterator of axes.
fn stride_index_any<'a, A, I>(axes: I, dim: usize, indices: &[i32]) -> Result<usize>
where
    A: Axis + 'a,
    I: Iterator<Item = &'a A>,
{
    if indices.len() != dim {
        return Err(Error::arity(dim, indices.len()));
    }
    let mut offset = 0;
    let mut stride = 1;
    for (i, (axis, &index)) in axes.zip(indices).enumerate() {
        let slot = query_slot(axis, index)
            .ok_or(Error::IndexOutOfRange { axis: i, index })?;
        offset += slot * stride;
        stride *= axis.shape();
    }
    Ok(offset)
}

macro_rules! impl_axes_for_tuple {
    ($dim:literal => $($A:ident : $idx:tt),+) => {
        impl<$($A,)+> Axes for ($($A,)+)
        where
            $($A: Axis + Into<AnyAxis>,)+
        {
            type Coordinate = ($($A::Coordinate,)+);

            fn dim(&self) -> usize {
                $dim
            }

            fn cell_count(&self) -> usize {
                let mut cells = 1;
                $(cells *= self.$idx.shape();)+
                cells
            }

            fn linear_index(&self, coordinates: &Self::Coordinate) -> Result<Option<usize>> {
                let mut offset = 0;
                let mut stride = 1;
                $(
                    match fill_slot(&self.$idx, self.$idx.index(&coordinates.$idx)) {
                        Some(slot) => {
                            offset += slot * stride;
                            stride *= self.$idx.shape();
                        }
                        None => return Ok(None),
                    }
                )+
                let _ = stride;
                Ok(Some(offset))
            }

            fn stride_index(&self, indices: &[i32]) -> Result<usize> {
                if indices.len() != $dim {
                    return Err(Error::arity($dim, indices.len()));
                }
                let mut offset = 0;
                let mut stride = 1;
                $(
                    let slot = query_slot(&self.$idx, indices[$idx])
                        .ok_or(Error::IndexOutOfRange { axis: $idx, index: indices[$idx] })?;
                    offset += slot * stride;
                    stride *= self.$idx.shape();
                )+
                let _ = stride;
                Ok(offset)
            }

            fn to_any(&self) -> Vec<AnyAxis> {
                vec![$(self.$idx.clone().into(),)+]
            }
        }
    };
}

impl_axes_for_tuple!(1 => A0: 0);
impl_axes_for_tuple!(2 => A0: 0, A1: 1);
impl_axes_for_tuple!(3 => A0: 0, A1: 1, A2: 2);
impl_axes_for_tuple!(4 => A0: 0, A1: 1, A2: 2, A3: 3);
impl_axes_for_tuple!(5 => A0: 0, A1: 1, A2: 2, A3: 3, A4: 4);
impl_axes_for_tuple!(6 => A0: 0, A1: 1, A2: 2, A3: 3, A4: 4, A5: 5);
impl_axes_for_tuple!(7 => A0: 0, A1: 1, A2: 2, A3: 3, A4: 4, A5: 5, A6: 6);
impl_axes_for_tuple!(8 => A0: 0, A1: 1, A2: 2, A3: 3, A4: 4, A5: 5, A6: 6, A7: 7);
impl_axes_for_tuple!(9 => A0: 0, A1: 1, A2: 2, A3: 3, A4: 4, A5: 5, A6: 6, A7: 7, A8: 8);
impl_axes_for_tuple!(10 => A0: 0, A1: 1, A2: 2, A3: 3, A4: 4, A5: 5, A6: 6, A7: 7, A8: 8, A9: 9);
