//! Fixed-element bin storage

use std::borrow::Cow;
use std::ops::AddAssign;

use num_traits::{NumCast, One, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::storage::{ElementKind, RawBuffer, Storage, StorageState};

/// Cell element types usable with [`ArrayStorage`]
pub trait Element:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + AddAssign
    + NumCast
    + ToPrimitive
    + bytemuck::Pod
    + 'static
{
    /// Native buffer-view tag, when the type is one of the portable
    /// element kinds; other types materialize a double view.
    const KIND: Option<ElementKind>;
}

macro_rules! impl_element {
    ($($t:ty => $kind:expr),+ $(,)?) => {
        $(
            impl Element for $t {
                const KIND: Option<ElementKind> = $kind;
            }
        )+
    };
}

impl_element!(
    u8 => Some(ElementKind::U8),
    u16 => Some(ElementKind::U16),
    u32 => Some(ElementKind::U32),
    u64 => Some(ElementKind::U64),
    f64 => Some(ElementKind::F64),
    i32 => None,
    i64 => None,
    f32 => None,
);

/// Dense bin storage over a caller-chosen element type.
///
/// No promotion ever happens: the memory footprint is fixed and
/// overflow is the caller's responsibility. The variance of a cell
/// always equals its value, so weighted fills lose their Σw² tracking
/// when routed here.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayStorage<T: Element> {
    cells: Vec<T>,
}

impl<T: Element> ArrayStorage<T> {
    /// Direct access to the cells.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Element> Storage for ArrayStorage<T> {
    fn with_size(n: usize) -> Self {
        Self {
            cells: vec![T::default(); n],
        }
    }

    fn size(&self) -> usize {
        self.cells.len()
    }

    fn increase(&mut self, i: usize) {
        self.cells[i] += T::one();
    }

    fn add_count(&mut self, i: usize, n: u64) {
        if let Some(x) = T::from(n) {
            self.cells[i] += x;
        }
    }

    fn add(&mut self, i: usize, w: f64) {
        if let Some(x) = T::from(w) {
            self.cells[i] += x;
        }
    }

    fn add_cell(&mut self, i: usize, value: f64, _variance: f64) {
        self.add(i, value);
    }

    fn transfer(&mut self, dst: usize, other: &Self, src: usize) {
        let x = other.cells[src];
        self.cells[dst] += x;
    }

    fn value(&self, i: usize) -> f64 {
        self.cells[i].to_f64().unwrap_or(0.0)
    }

    fn variance(&self, i: usize) -> f64 {
        self.value(i)
    }

    fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = T::default();
        }
    }

    fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size());
        for i in 0..other.size() {
            self.transfer(i, other, i);
        }
    }

    fn scale(&mut self, factor: f64) {
        for cell in &mut self.cells {
            let scaled = cell.to_f64().unwrap_or(0.0) * factor;
            *cell = T::from(scaled).unwrap_or_else(T::zero);
        }
    }

    fn state(&self) -> StorageState {
        // snapshot numerically; integral cell sets keep exact counts
        if self.cells.iter().all(|c| {
            c.to_f64()
                .map(|x| x >= 0.0 && x.fract() == 0.0 && x <= u64::MAX as f64)
                .unwrap_or(false)
        }) {
            StorageState::U64(
                self.cells
                    .iter()
                    .map(|c| c.to_u64().unwrap_or(0))
                    .collect(),
            )
        } else {
            StorageState::Weighted(
                self.cells
                    .iter()
                    .map(|c| {
                        let x = c.to_f64().unwrap_or(0.0);
                        crate::storage::WeightCell::from_count(x)
                    })
                    .collect(),
            )
        }
    }

    fn from_state(state: StorageState) -> Result<Self> {
        let mut cells = Vec::with_capacity(state.len());
        for i in 0..state.len() {
            let (value, _) = state.cell(i);
            cells.push(T::from(value).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "cell value {value} does not fit the array element type"
                ))
            })?);
        }
        Ok(Self { cells })
    }

    fn raw_view(&self) -> RawBuffer<'_> {
        match T::KIND {
            Some(kind) => RawBuffer {
                kind,
                weighted: false,
                data: Cow::Borrowed(bytemuck::cast_slice(&self.cells)),
            },
            None => {
                let doubles: Vec<f64> =
                    self.cells.iter().map(|c| c.to_f64().unwrap_or(0.0)).collect();
                RawBuffer {
                    kind: ElementKind::F64,
                    weighted: false,
                    data: Cow::Owned(bytemuck::cast_slice(&doubles).to_vec()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctor() {
        let a = ArrayStorage::<u32>::with_size(1);
        assert_eq!(a.size(), 1);
        assert_eq!(a.value(0), 0.0);
    }

    #[test]
    fn test_increase_and_add() {
        let mut a = ArrayStorage::<u32>::with_size(1);
        let mut b = ArrayStorage::<u32>::with_size(1);
        let mut c = ArrayStorage::<u8>::with_size(1);
        let mut d = ArrayStorage::<u8>::with_size(2);
        a.increase(0);
        b.increase(0);
        c.increase(0);
        c.increase(0);
        d.increase(0);
        d.add(1, 5.0);
        assert_eq!(a.value(0), 1.0);
        assert_eq!(b.value(0), 1.0);
        assert_eq!(c.value(0), 2.0);
        assert_eq!(d.value(0), 1.0);
        assert_eq!(d.value(1), 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_multiply() {
        let mut a = ArrayStorage::<u32>::with_size(2);
        a.increase(0);
        a.scale(3.0);
        assert_eq!(a.value(0), 3.0);
        assert_eq!(a.value(1), 0.0);
        a.add(1, 2.0);
        a.scale(3.0);
        assert_eq!(a.value(0), 9.0);
        assert_eq!(a.value(1), 6.0);
    }

    #[test]
    fn test_variance_tracks_value() {
        let mut a = ArrayStorage::<f64>::with_size(1);
        a.add(0, 2.5);
        assert_eq!(a.value(0), 2.5);
        assert_eq!(a.variance(0), 2.5);
    }

    #[test]
    fn test_float_add_truncates_into_integer_cells() {
        let mut a = ArrayStorage::<u32>::with_size(1);
        a.add(0, 2.7);
        assert_eq!(a.value(0), 2.0);
    }

    #[test]
    fn test_reset() {
        let mut a = ArrayStorage::<u16>::with_size(2);
        a.add_count(0, 40);
        a.reset();
        assert_eq!(a.value(0), 0.0);
        assert_eq!(a.size(), 2);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut a = ArrayStorage::<u32>::with_size(3);
        a.add_count(1, 7);
        let restored = ArrayStorage::<u32>::from_state(a.state()).unwrap();
        assert_eq!(a, restored);
    }

    #[test]
    fn test_raw_view() {
        let mut a = ArrayStorage::<u16>::with_size(2);
        a.increase(1);
        let view = a.raw_view();
        assert_eq!(view.kind, ElementKind::U16);
        assert_eq!(view.data.len(), 4);

        let b = ArrayStorage::<f32>::with_size(1);
        assert_eq!(b.raw_view().kind, ElementKind::F64);
    }
}
