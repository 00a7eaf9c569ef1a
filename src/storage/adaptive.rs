//! Count storage with automatic element promotion
//!
//! The dense bin array starts as an unallocated run of zeros and
//! widens its element type only when a cell is about to overflow:
//! void, u8, u16, u32, u64, then arbitrary precision. Every promotion
//! preserves every count exactly, so unweighted fills never lose
//! precision no matter how long they run. The first weighted fill
//! switches the whole buffer to (Σw, Σw²) pairs instead.
//!
//! Promotions allocate the new buffer, copy-convert every cell, then
//! swap; the old buffer stays intact until the copy completes.

use std::borrow::Cow;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::error::Result;
use crate::storage::{ElementKind, RawBuffer, Storage, StorageState};

/// One weighted cell: running sum of weights and of squared weights
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightCell {
    /// Σw — the cell value
    pub sum: f64,
    /// Σw² — the cell variance
    pub sum2: f64,
}

impl WeightCell {
    /// The weighted equivalent of `n` unit counts.
    pub fn from_count(n: f64) -> Self {
        Self { sum: n, sum2: n }
    }
}

/// Convert an arbitrary-precision count to a double; saturates to
/// infinity when the count exceeds the f64 range.
pub(crate) fn big_to_f64(n: &BigUint) -> f64 {
    n.to_f64().unwrap_or(f64::INFINITY)
}

#[derive(Clone, Debug)]
enum Buffer {
    Void { len: usize },
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    Big(Vec<BigUint>),
    Weighted(Vec<WeightCell>),
}

/// Dense bin storage with automatic element-type promotion
#[derive(Clone, Debug)]
pub struct AdaptiveStorage {
    buffer: Buffer,
}

impl AdaptiveStorage {
    /// Name of the current representation, for diagnostics.
    pub fn representation(&self) -> &'static str {
        match &self.buffer {
            Buffer::Void { .. } => "void",
            Buffer::U8(_) => "u8",
            Buffer::U16(_) => "u16",
            Buffer::U32(_) => "u32",
            Buffer::U64(_) => "u64",
            Buffer::Big(_) => "big",
            Buffer::Weighted(_) => "weighted",
        }
    }

    /// One promotion step: materialize the void state, then widen
    /// u8 -> u16 -> u32 -> u64 -> arbitrary precision.
    fn promote(&mut self) {
        let buffer = std::mem::replace(&mut self.buffer, Buffer::Void { len: 0 });
        self.buffer = match buffer {
            Buffer::Void { len } => {
                debug!(len, "materializing u8 count buffer");
                Buffer::U8(vec![0; len])
            }
            Buffer::U8(v) => {
                debug!(len = v.len(), "promoting counts u8 -> u16");
                Buffer::U16(v.iter().map(|&x| u16::from(x)).collect())
            }
            Buffer::U16(v) => {
                debug!(len = v.len(), "promoting counts u16 -> u32");
                Buffer::U32(v.iter().map(|&x| u32::from(x)).collect())
            }
            Buffer::U32(v) => {
                debug!(len = v.len(), "promoting counts u32 -> u64");
                Buffer::U64(v.iter().map(|&x| u64::from(x)).collect())
            }
            Buffer::U64(v) => {
                debug!(len = v.len(), "promoting counts u64 -> arbitrary precision");
                Buffer::Big(v.iter().map(|&x| BigUint::from(x)).collect())
            }
            done => done,
        };
    }

    /// Switch every cell to a (Σw, Σw²) pair; integer counts n become
    /// (n, n), exactly what n unit fills would have accumulated.
    fn to_weighted(&mut self) {
        if matches!(self.buffer, Buffer::Weighted(_)) {
            return;
        }
        debug!(from = self.representation(), "switching to weight counters");
        let buffer = std::mem::replace(&mut self.buffer, Buffer::Void { len: 0 });
        self.buffer = match buffer {
            Buffer::Void { len } => Buffer::Weighted(vec![WeightCell::default(); len]),
            Buffer::U8(v) => weighted_from(v.iter().map(|&x| x as f64)),
            Buffer::U16(v) => weighted_from(v.iter().map(|&x| x as f64)),
            Buffer::U32(v) => weighted_from(v.iter().map(|&x| x as f64)),
            Buffer::U64(v) => weighted_from(v.iter().map(|&x| x as f64)),
            Buffer::Big(v) => weighted_from(v.iter().map(big_to_f64)),
            done => done,
        };
    }

    /// Add an arbitrary-precision count to cell `i`.
    fn add_big(&mut self, i: usize, n: &BigUint) {
        if let Some(small) = n.to_u64() {
            self.add_count(i, small);
            return;
        }
        loop {
            match &mut self.buffer {
                Buffer::Big(v) => {
                    v[i] += n;
                    return;
                }
                Buffer::Weighted(v) => {
                    let x = big_to_f64(n);
                    v[i].sum += x;
                    v[i].sum2 += x;
                    return;
                }
                _ => {}
            }
            self.promote();
        }
    }
}

fn weighted_from(values: impl Iterator<Item = f64>) -> Buffer {
    Buffer::Weighted(values.map(WeightCell::from_count).collect())
}

impl Storage for AdaptiveStorage {
    fn with_size(n: usize) -> Self {
        Self {
            buffer: Buffer::Void { len: n },
        }
    }

    fn size(&self) -> usize {
        match &self.buffer {
            Buffer::Void { len } => *len,
            Buffer::U8(v) => v.len(),
            Buffer::U16(v) => v.len(),
            Buffer::U32(v) => v.len(),
            Buffer::U64(v) => v.len(),
            Buffer::Big(v) => v.len(),
            Buffer::Weighted(v) => v.len(),
        }
    }

    fn increase(&mut self, i: usize) {
        loop {
            match &mut self.buffer {
                Buffer::Void { .. } => {}
                Buffer::U8(v) => {
                    if let Some(x) = v[i].checked_add(1) {
                        v[i] = x;
                        return;
                    }
                }
                Buffer::U16(v) => {
                    if let Some(x) = v[i].checked_add(1) {
                        v[i] = x;
                        return;
                    }
                }
                Buffer::U32(v) => {
                    if let Some(x) = v[i].checked_add(1) {
                        v[i] = x;
                        return;
                    }
                }
                Buffer::U64(v) => {
                    if let Some(x) = v[i].checked_add(1) {
                        v[i] = x;
                        return;
                    }
                }
                Buffer::Big(v) => {
                    v[i] += 1u32;
                    return;
                }
                Buffer::Weighted(v) => {
                    v[i].sum += 1.0;
                    v[i].sum2 += 1.0;
                    return;
                }
            }
            self.promote();
        }
    }

    fn add_count(&mut self, i: usize, n: u64) {
        if n == 0 {
            return;
        }
        loop {
            match &mut self.buffer {
                Buffer::Void { .. } => {}
                Buffer::U8(v) => {
                    if n <= u8::MAX as u64 {
                        if let Some(x) = v[i].checked_add(n as u8) {
                            v[i] = x;
                            return;
                        }
                    }
                }
                Buffer::U16(v) => {
                    if n <= u16::MAX as u64 {
                        if let Some(x) = v[i].checked_add(n as u16) {
                            v[i] = x;
                            return;
                        }
                    }
                }
                Buffer::U32(v) => {
                    if n <= u32::MAX as u64 {
                        if let Some(x) = v[i].checked_add(n as u32) {
                            v[i] = x;
                            return;
                        }
                    }
                }
                Buffer::U64(v) => {
                    if let Some(x) = v[i].checked_add(n) {
                        v[i] = x;
                        return;
                    }
                }
                Buffer::Big(v) => {
                    v[i] += n;
                    return;
                }
                Buffer::Weighted(v) => {
                    let x = n as f64;
                    v[i].sum += x;
                    v[i].sum2 += x;
                    return;
                }
            }
            self.promote();
        }
    }

    fn add(&mut self, i: usize, w: f64) {
        self.to_weighted();
        if let Buffer::Weighted(v) = &mut self.buffer {
            v[i].sum += w;
            v[i].sum2 += w * w;
        }
    }

    fn add_cell(&mut self, i: usize, value: f64, variance: f64) {
        let is_count =
            variance == value && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64;
        if is_count {
            self.add_count(i, value as u64);
        } else {
            self.to_weighted();
            if let Buffer::Weighted(v) = &mut self.buffer {
                v[i].sum += value;
                v[i].sum2 += variance;
            }
        }
    }

    fn transfer(&mut self, dst: usize, other: &Self, src: usize) {
        match &other.buffer {
            Buffer::Void { .. } => {}
            Buffer::U8(v) => self.add_count(dst, v[src] as u64),
            Buffer::U16(v) => self.add_count(dst, v[src] as u64),
            Buffer::U32(v) => self.add_count(dst, v[src] as u64),
            Buffer::U64(v) => self.add_count(dst, v[src]),
            Buffer::Big(v) => self.add_big(dst, &v[src]),
            Buffer::Weighted(v) => {
                self.to_weighted();
                if let Buffer::Weighted(w) = &mut self.buffer {
                    w[dst].sum += v[src].sum;
                    w[dst].sum2 += v[src].sum2;
                }
            }
        }
    }

    fn value(&self, i: usize) -> f64 {
        match &self.buffer {
            Buffer::Void { .. } => 0.0,
            Buffer::U8(v) => v[i] as f64,
            Buffer::U16(v) => v[i] as f64,
            Buffer::U32(v) => v[i] as f64,
            Buffer::U64(v) => v[i] as f64,
            Buffer::Big(v) => big_to_f64(&v[i]),
            Buffer::Weighted(v) => v[i].sum,
        }
    }

    fn variance(&self, i: usize) -> f64 {
        match &self.buffer {
            Buffer::Weighted(v) => v[i].sum2,
            _ => self.value(i),
        }
    }

    fn reset(&mut self) {
        self.buffer = Buffer::Void { len: self.size() };
    }

    fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size());
        for i in 0..other.size() {
            self.transfer(i, other, i);
        }
    }

    fn scale(&mut self, factor: f64) {
        self.to_weighted();
        if let Buffer::Weighted(v) = &mut self.buffer {
            for cell in v {
                cell.sum *= factor;
                cell.sum2 *= factor * factor;
            }
        }
    }

    fn state(&self) -> StorageState {
        match &self.buffer {
            Buffer::Void { len } => StorageState::Void { len: *len },
            Buffer::U8(v) => StorageState::U8(v.clone()),
            Buffer::U16(v) => StorageState::U16(v.clone()),
            Buffer::U32(v) => StorageState::U32(v.clone()),
            Buffer::U64(v) => StorageState::U64(v.clone()),
            Buffer::Big(v) => StorageState::Big(v.clone()),
            Buffer::Weighted(v) => StorageState::Weighted(v.clone()),
        }
    }

    fn from_state(state: StorageState) -> Result<Self> {
        let buffer = match state {
            StorageState::Void { len } => Buffer::Void { len },
            StorageState::U8(v) => Buffer::U8(v),
            StorageState::U16(v) => Buffer::U16(v),
            StorageState::U32(v) => Buffer::U32(v),
            StorageState::U64(v) => Buffer::U64(v),
            StorageState::Big(v) => Buffer::Big(v),
            StorageState::Weighted(v) => Buffer::Weighted(v),
        };
        Ok(Self { buffer })
    }

    fn raw_view(&self) -> RawBuffer<'_> {
        match &self.buffer {
            Buffer::Void { len } => RawBuffer {
                kind: ElementKind::OpaqueZero,
                weighted: false,
                data: Cow::Owned(vec![0u8; *len]),
            },
            Buffer::U8(v) => RawBuffer {
                kind: ElementKind::U8,
                weighted: false,
                data: Cow::Borrowed(v.as_slice()),
            },
            Buffer::U16(v) => RawBuffer {
                kind: ElementKind::U16,
                weighted: false,
                data: Cow::Borrowed(bytemuck::cast_slice(v)),
            },
            Buffer::U32(v) => RawBuffer {
                kind: ElementKind::U32,
                weighted: false,
                data: Cow::Borrowed(bytemuck::cast_slice(v)),
            },
            Buffer::U64(v) => RawBuffer {
                kind: ElementKind::U64,
                weighted: false,
                data: Cow::Borrowed(bytemuck::cast_slice(v)),
            },
            Buffer::Big(v) => {
                let doubles: Vec<f64> = v.iter().map(big_to_f64).collect();
                RawBuffer {
                    kind: ElementKind::F64,
                    weighted: false,
                    data: Cow::Owned(bytemuck::cast_slice(&doubles).to_vec()),
                }
            }
            Buffer::Weighted(v) => RawBuffer {
                kind: ElementKind::F64,
                weighted: true,
                data: Cow::Borrowed(bytemuck::cast_slice(v)),
            },
        }
    }
}

impl PartialEq for AdaptiveStorage {
    /// Numeric comparison, independent of the representation: a u8
    /// buffer holding 3 equals a weighted buffer holding (3, 3).
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && (0..self.size())
                .all(|i| self.value(i) == other.value(i) && self.variance(i) == other.variance(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_reads_zero() {
        let s = AdaptiveStorage::with_size(3);
        assert_eq!(s.size(), 3);
        assert_eq!(s.representation(), "void");
        for i in 0..3 {
            assert_eq!(s.value(i), 0.0);
            assert_eq!(s.variance(i), 0.0);
        }
    }

    #[test]
    fn test_increase_materializes() {
        let mut s = AdaptiveStorage::with_size(2);
        s.increase(0);
        assert_eq!(s.representation(), "u8");
        assert_eq!(s.value(0), 1.0);
        assert_eq!(s.value(1), 0.0);
    }

    #[test]
    fn test_promotion_chain_preserves_counts() {
        let mut s = AdaptiveStorage::with_size(2);
        s.increase(1);
        for _ in 0..255 {
            s.increase(0);
        }
        assert_eq!(s.representation(), "u8");
        s.increase(0);
        assert_eq!(s.representation(), "u16");
        assert_eq!(s.value(0), 256.0);
        assert_eq!(s.value(1), 1.0);

        s.add_count(0, u16::MAX as u64);
        assert_eq!(s.representation(), "u32");
        assert_eq!(s.value(0), 256.0 + 65535.0);

        s.add_count(0, u32::MAX as u64);
        assert_eq!(s.representation(), "u64");

        s.add_count(0, u64::MAX);
        assert_eq!(s.representation(), "big");
        assert_eq!(s.value(1), 1.0);
    }

    #[test]
    fn test_big_counts_stay_exact() {
        let mut s = AdaptiveStorage::with_size(1);
        s.increase(0);
        // doubling via self-merge reaches 2^80, far past u64
        for _ in 0..80 {
            let copy = s.clone();
            s.merge(&copy);
        }
        assert_eq!(s.representation(), "big");
        match s.state() {
            StorageState::Big(v) => assert_eq!(v[0], BigUint::from(1u8) << 80),
            other => panic!("expected big state, got {other:?}"),
        }
        assert_eq!(s.value(0), (2f64).powi(80));
    }

    #[test]
    fn test_weighted_fill_converts() {
        let mut s = AdaptiveStorage::with_size(2);
        s.increase(0);
        s.add(0, 2.0);
        assert_eq!(s.representation(), "weighted");
        assert_eq!(s.value(0), 3.0);
        assert_eq!(s.variance(0), 5.0);
        assert_eq!(s.value(1), 0.0);
        // counts keep value == variance afterwards too
        s.increase(1);
        assert_eq!(s.value(1), 1.0);
        assert_eq!(s.variance(1), 1.0);
    }

    #[test]
    fn test_equality_across_representations() {
        let mut a = AdaptiveStorage::with_size(1);
        let mut b = AdaptiveStorage::with_size(1);
        a.increase(0);
        a.increase(0);
        b.add_count(0, 2);
        assert_eq!(a, b);
        b.add(0, 0.0); // switches representation, cell stays (2, 2)
        assert_eq!(b.representation(), "weighted");
        assert_eq!(a, b);
    }

    #[test]
    fn test_merge_mixed_representations() {
        let mut a = AdaptiveStorage::with_size(2);
        a.increase(0);
        let mut b = AdaptiveStorage::with_size(2);
        b.add(1, 3.0);
        a.merge(&b);
        assert_eq!(a.value(0), 1.0);
        assert_eq!(a.variance(0), 1.0);
        assert_eq!(a.value(1), 3.0);
        assert_eq!(a.variance(1), 9.0);
    }

    #[test]
    fn test_scale_goes_weighted() {
        let mut s = AdaptiveStorage::with_size(1);
        s.add_count(0, 2);
        s.scale(2.0);
        assert_eq!(s.value(0), 4.0);
        assert_eq!(s.variance(0), 8.0);
    }

    #[test]
    fn test_reset_returns_to_void() {
        let mut s = AdaptiveStorage::with_size(2);
        s.add(0, 2.5);
        s.reset();
        assert_eq!(s.representation(), "void");
        assert_eq!(s.size(), 2);
        assert_eq!(s.value(0), 0.0);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut s = AdaptiveStorage::with_size(3);
        s.increase(0);
        s.add(2, 1.5);
        let restored = AdaptiveStorage::from_state(s.state()).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn test_raw_view_kinds() {
        let mut s = AdaptiveStorage::with_size(2);
        assert_eq!(s.raw_view().kind, ElementKind::OpaqueZero);
        assert_eq!(s.raw_view().data.len(), 2);

        s.increase(0);
        let view = s.raw_view();
        assert_eq!(view.kind, ElementKind::U8);
        assert_eq!(&view.data[..], &[1, 0]);

        s.add(0, 1.0);
        let view = s.raw_view();
        assert_eq!(view.kind, ElementKind::F64);
        assert!(view.weighted);
        assert_eq!(view.data.len(), 2 * 2 * 8);
    }
}
