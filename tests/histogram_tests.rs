//! End-to-end tests of the histogram facade across axis containers and
//! storage choices.

use multihist::{
    count, dyn_histogram, histogram, histogram_with, str_categories, weight, AdaptiveStorage,
    AnyAxis, ArrayStorage, Axis, CircularAxis, DynHistogram, IntegerAxis, RegularAxis, Value,
    VariableAxis,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn v(x: impl Into<Value>) -> Value {
    x.into()
}

#[test]
fn test_init_dimensions_and_bincount() {
    let h1 = histogram((RegularAxis::new(3, -1.0, 1.0).unwrap(),));
    assert_eq!(h1.dim(), 1);
    assert_eq!(h1.bincount(), 5);

    let h2 = histogram((
        RegularAxis::new(3, -1.0, 1.0).unwrap(),
        IntegerAxis::new(-1, 2).unwrap(),
    ));
    assert_eq!(h2.dim(), 2);
    assert_eq!(h2.bincount(), 25);

    let h3 = histogram((
        RegularAxis::new(3, -1.0, 1.0).unwrap(),
        IntegerAxis::new(-1, 2).unwrap(),
        CircularAxis::new(3).unwrap(),
    ));
    assert_eq!(h3.dim(), 3);
    assert_eq!(h3.bincount(), 100); // circular carries one overflow bin

    let h4 = histogram((
        RegularAxis::new(3, -1.0, 1.0).unwrap(),
        IntegerAxis::new(-1, 2).unwrap(),
        CircularAxis::new(3).unwrap(),
        VariableAxis::new(vec![-1.0, 0.0, 1.0]).unwrap(),
    ));
    assert_eq!(h4.dim(), 4);
    assert_eq!(h4.bincount(), 400);

    let h5 = histogram((
        RegularAxis::new(3, -1.0, 1.0).unwrap(),
        IntegerAxis::new(-1, 2).unwrap(),
        CircularAxis::new(3).unwrap(),
        VariableAxis::new(vec![-1.0, 0.0, 1.0]).unwrap(),
        multihist::CategoryAxis::new(vec![0i64, 1, 2]).unwrap(),
    ));
    assert_eq!(h5.dim(), 5);
    assert_eq!(h5.bincount(), 1200);
}

#[test]
fn test_adaptive_and_array_storages_agree() {
    let axes = (RegularAxis::new(3, -1.0, 1.0).unwrap(),);
    let mut a = histogram(axes.clone());
    let mut b = histogram_with::<_, ArrayStorage<u32>>(axes);
    assert_eq!(a, b);
    a.fill(&(0.5,)).unwrap();
    b.fill(&(0.5,)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_equal_compare() {
    let a = histogram((IntegerAxis::new(0, 2).unwrap(),));
    let b = histogram((
        IntegerAxis::new(0, 2).unwrap(),
        IntegerAxis::new(0, 3).unwrap(),
    ));
    assert!(a != b);
    let mut c = histogram((IntegerAxis::new(0, 2).unwrap(),));
    assert!(b != c);
    assert!(a == c);
    let d = histogram((RegularAxis::new(2, 0.0, 1.0).unwrap(),));
    assert!(c != d);
    c.fill(&(0,)).unwrap();
    assert!(a != c);
    let mut a = a;
    a.fill(&(0,)).unwrap();
    assert!(a == c);
    a.fill(&(0,)).unwrap();
    assert!(a != c);
}

#[test]
fn test_one_dim_counts_with_uoflow() {
    let mut h = histogram((IntegerAxis::new(0, 2).unwrap(),));
    h.fill(&(0,)).unwrap();
    h.fill(&(0,)).unwrap();
    h.fill(&(-1,)).unwrap();
    h.fill_with(&(10,), count(10)).unwrap();

    assert_eq!(h.dim(), 1);
    assert_eq!(h.axis(0).unwrap().size(), 2);
    assert_eq!(h.axis(0).unwrap().shape(), 4);
    assert_eq!(h.bincount(), 4);
    assert_eq!(h.sum(), 13.0);

    assert!(h.value(&[-2]).is_err());
    assert_eq!(h.value(&[-1]).unwrap(), 1.0);
    assert_eq!(h.value(&[0]).unwrap(), 2.0);
    assert_eq!(h.value(&[1]).unwrap(), 0.0);
    assert_eq!(h.value(&[2]).unwrap(), 10.0);
    assert!(h.value(&[3]).is_err());

    assert!(h.variance(&[-2]).is_err());
    assert_eq!(h.variance(&[-1]).unwrap(), 1.0);
    assert_eq!(h.variance(&[0]).unwrap(), 2.0);
    assert_eq!(h.variance(&[1]).unwrap(), 0.0);
    assert_eq!(h.variance(&[2]).unwrap(), 10.0);
    assert!(h.variance(&[3]).is_err());
}

#[test]
fn test_one_dim_counts_without_uoflow() {
    let mut h = histogram((IntegerAxis::new(0, 2).unwrap().without_uoflow(),));
    h.fill(&(0,)).unwrap();
    h.fill(&(0,)).unwrap();
    h.fill(&(-1,)).unwrap();
    h.fill_with(&(10,), count(10)).unwrap();

    assert_eq!(h.axis(0).unwrap().shape(), 2);
    assert_eq!(h.sum(), 2.0);
    assert!(h.value(&[-1]).is_err());
    assert_eq!(h.value(&[0]).unwrap(), 2.0);
    assert_eq!(h.value(&[1]).unwrap(), 0.0);
    assert!(h.value(&[2]).is_err());
}

#[test]
fn test_string_categories_drop_unknown() {
    let mut h = histogram((str_categories(["A", "B"]).unwrap(),));
    h.fill(&("A".to_string(),)).unwrap();
    h.fill(&("B".to_string(),)).unwrap();
    h.fill(&("D".to_string(),)).unwrap();
    h.fill_with(&("E".to_string(),), count(10)).unwrap();

    assert_eq!(h.axis(0).unwrap().size(), 2);
    assert_eq!(h.axis(0).unwrap().shape(), 2);
    assert_eq!(h.sum(), 2.0);
    assert!(h.value(&[-1]).is_err());
    assert_eq!(h.value(&[0]).unwrap(), 1.0);
    assert_eq!(h.value(&[1]).unwrap(), 1.0);
    assert!(h.value(&[2]).is_err());
}

#[test]
fn test_one_dim_weighted() {
    let mut h = histogram((RegularAxis::new(2, -1.0, 1.0).unwrap(),));
    h.fill(&(0.0,)).unwrap();
    h.fill_with(&(-1.0,), weight(2.0)).unwrap();
    h.fill(&(-1.0,)).unwrap();
    h.fill(&(-2.0,)).unwrap();
    h.fill_with(&(10.0,), weight(5.0)).unwrap();

    assert_eq!(h.sum(), 10.0);
    assert_eq!(h.value(&[-1]).unwrap(), 1.0);
    assert_eq!(h.value(&[0]).unwrap(), 3.0);
    assert_eq!(h.value(&[1]).unwrap(), 1.0);
    assert_eq!(h.value(&[2]).unwrap(), 5.0);

    assert_eq!(h.variance(&[-1]).unwrap(), 1.0);
    assert_eq!(h.variance(&[0]).unwrap(), 5.0);
    assert_eq!(h.variance(&[1]).unwrap(), 1.0);
    assert_eq!(h.variance(&[2]).unwrap(), 25.0);
}

#[test]
fn test_one_dim_counts_in_array_storage() {
    let mut h = histogram_with::<_, ArrayStorage<f32>>((RegularAxis::new(2, -1.0, 1.0).unwrap(),));
    h.fill(&(0.0,)).unwrap();
    h.fill_with(&(-1.0,), count(2)).unwrap();
    h.fill(&(-1.0,)).unwrap();
    h.fill(&(-2.0,)).unwrap();
    h.fill_with(&(10.0,), count(5)).unwrap();

    assert_eq!(h.sum(), 10.0);
    assert_eq!(h.value(&[-1]).unwrap(), 1.0);
    assert_eq!(h.value(&[0]).unwrap(), 3.0);
    assert_eq!(h.value(&[1]).unwrap(), 1.0);
    assert_eq!(h.value(&[2]).unwrap(), 5.0);
}

#[test]
fn test_two_dim_mixed_uoflow() {
    let mut h = histogram((
        RegularAxis::new(2, -1.0, 1.0).unwrap(),
        IntegerAxis::new(-1, 2).unwrap().without_uoflow(),
    ));
    h.fill(&(-1.0, -1)).unwrap();
    h.fill(&(-1.0, 0)).unwrap();
    h.fill(&(-1.0, -10)).unwrap(); // dropped on the second axis
    h.fill(&(-10.0, 0)).unwrap();

    assert_eq!(h.dim(), 2);
    assert_eq!(h.axis(0).unwrap().shape(), 4);
    assert_eq!(h.axis(1).unwrap().shape(), 3);
    assert_eq!(h.sum(), 3.0);

    let expected = [
        ((-1, 0), 0.0),
        ((-1, 1), 1.0),
        ((-1, 2), 0.0),
        ((0, 0), 1.0),
        ((0, 1), 1.0),
        ((0, 2), 0.0),
        ((1, 0), 0.0),
        ((1, 1), 0.0),
        ((1, 2), 0.0),
        ((2, 0), 0.0),
        ((2, 1), 0.0),
        ((2, 2), 0.0),
    ];
    for ((i, j), want) in expected {
        assert_eq!(h.value(&[i, j]).unwrap(), want, "value({i}, {j})");
        assert_eq!(h.variance(&[i, j]).unwrap(), want, "variance({i}, {j})");
    }
}

#[test]
fn test_two_dim_weighted() {
    let mut h = histogram((
        RegularAxis::new(2, -1.0, 1.0).unwrap(),
        IntegerAxis::new(-1, 2).unwrap().without_uoflow(),
    ));
    h.fill(&(-1.0, 0)).unwrap();
    h.fill_with(&(-1.0, -1), weight(10.0)).unwrap();
    h.fill_with(&(-1.0, -10), weight(5.0)).unwrap(); // dropped
    h.fill_with(&(-10.0, 0), weight(7.0)).unwrap();

    assert_eq!(h.sum(), 18.0);
    assert_eq!(h.value(&[-1, 1]).unwrap(), 7.0);
    assert_eq!(h.variance(&[-1, 1]).unwrap(), 49.0);
    assert_eq!(h.value(&[0, 0]).unwrap(), 10.0);
    assert_eq!(h.variance(&[0, 0]).unwrap(), 100.0);
    assert_eq!(h.value(&[0, 1]).unwrap(), 1.0);
    assert_eq!(h.variance(&[0, 1]).unwrap(), 1.0);
    assert_eq!(h.value(&[1, 0]).unwrap(), 0.0);
    assert_eq!(h.value(&[2, 2]).unwrap(), 0.0);
}

#[test]
fn test_three_dim_weighted_grid() {
    let mut h = histogram((
        IntegerAxis::new(0, 3).unwrap(),
        IntegerAxis::new(0, 4).unwrap(),
        IntegerAxis::new(0, 5).unwrap(),
    ));
    for i in 0..3i64 {
        for j in 0..4i64 {
            for k in 0..5i64 {
                h.fill_with(&(i, j, k), weight((i + j + k) as f64)).unwrap();
            }
        }
    }
    for i in 0..3 {
        for j in 0..4 {
            for k in 0..5 {
                assert_eq!(
                    h.value(&[i, j, k]).unwrap(),
                    (i + j + k) as f64,
                    "value({i}, {j}, {k})"
                );
            }
        }
    }
}

#[test]
fn test_mixed_storage_merge() {
    let mut a = histogram((IntegerAxis::new(-1, 2).unwrap(),));
    let mut b = histogram_with::<_, ArrayStorage<u32>>((IntegerAxis::new(-1, 2).unwrap(),));
    a.fill(&(-1,)).unwrap();
    b.fill(&(1,)).unwrap();
    let mut c = a.clone();
    c.merge(&b).unwrap();
    assert_eq!(c.value(&[-1]).unwrap(), 0.0);
    assert_eq!(c.value(&[0]).unwrap(), 1.0);
    assert_eq!(c.value(&[1]).unwrap(), 0.0);
    assert_eq!(c.value(&[2]).unwrap(), 1.0);
    assert_eq!(c.value(&[3]).unwrap(), 0.0);
}

#[test]
fn test_add_weighted_and_counted() {
    let mut a = histogram((IntegerAxis::new(0, 2).unwrap(),));
    let mut b = histogram((IntegerAxis::new(0, 2).unwrap(),));
    a.fill(&(0,)).unwrap();
    assert_eq!(a.variance(&[0]).unwrap(), 1.0);
    b.fill_with(&(1,), weight(3.0)).unwrap();
    assert_eq!(b.variance(&[1]).unwrap(), 9.0);

    let mut c = a.clone();
    c += &b;
    assert_eq!(c.value(&[-1]).unwrap(), 0.0);
    assert_eq!(c.value(&[0]).unwrap(), 1.0);
    assert_eq!(c.variance(&[0]).unwrap(), 1.0);
    assert_eq!(c.value(&[1]).unwrap(), 3.0);
    assert_eq!(c.variance(&[1]).unwrap(), 9.0);
    assert_eq!(c.value(&[2]).unwrap(), 0.0);
}

#[test]
fn test_add_array_storages_of_different_elements() {
    let mut a = histogram_with::<_, ArrayStorage<u8>>((IntegerAxis::new(-1, 2).unwrap(),));
    let mut b = histogram_with::<_, ArrayStorage<u32>>((IntegerAxis::new(-1, 2).unwrap(),));
    a.fill(&(-1,)).unwrap();
    b.fill(&(1,)).unwrap();
    let mut c = a.clone();
    c.merge(&b).unwrap();
    assert_eq!(c.value(&[0]).unwrap(), 1.0);
    assert_eq!(c.value(&[2]).unwrap(), 1.0);
}

#[test]
fn test_incompatible_axes_fail() {
    let mut a = histogram((IntegerAxis::new(0, 2).unwrap(),));
    let b = histogram((IntegerAxis::new(0, 3).unwrap(),));
    assert!(a.try_add_assign(&b).is_err());
}

#[test]
#[should_panic(expected = "Incompatible axes")]
fn test_incompatible_axes_panic_through_operator() {
    let mut a = histogram((IntegerAxis::new(0, 2).unwrap(),));
    let b = histogram((IntegerAxis::new(0, 3).unwrap(),));
    a += &b;
}

#[test]
fn test_operators() {
    let mut a = histogram((IntegerAxis::new(0, 3).unwrap(),));
    let mut b = a.clone();
    a.fill(&(0,)).unwrap();
    b.fill(&(1,)).unwrap();

    let mut c = &a + &b;
    assert_eq!(c.value(&[0]).unwrap(), 1.0);
    assert_eq!(c.value(&[1]).unwrap(), 1.0);
    c += &b;
    assert_eq!(c.value(&[0]).unwrap(), 1.0);
    assert_eq!(c.value(&[1]).unwrap(), 2.0);

    let d = &(&a + &b) + &c;
    assert_eq!(d.value(&[0]).unwrap(), 2.0);
    assert_eq!(d.value(&[1]).unwrap(), 3.0);

    let e = 3.0 * &a;
    let f = &b * 2.0;
    assert_eq!(e.value(&[0]).unwrap(), 3.0);
    assert_eq!(e.value(&[1]).unwrap(), 0.0);
    assert_eq!(f.value(&[0]).unwrap(), 0.0);
    assert_eq!(f.value(&[1]).unwrap(), 2.0);

    let mut r = a.clone();
    r += &b;
    r += &e;
    assert_eq!(r.value(&[0]).unwrap(), 4.0);
    assert_eq!(r.value(&[1]).unwrap(), 1.0);
    assert_eq!(r, &(&a + &b) + &(3.0 * &a));

    let s = &r / 4.0;
    let mut r = r;
    r /= 4.0;
    assert_eq!(r.value(&[0]).unwrap(), 1.0);
    assert_eq!(r.value(&[1]).unwrap(), 0.25);
    assert_eq!(r, s);
}

#[test]
fn test_scalar_multiply_scales_variance_quadratically() {
    let mut h = histogram((IntegerAxis::new(0, 2).unwrap(),));
    h.fill(&(0,)).unwrap();
    h += &h.clone();
    assert_eq!(h.value(&[0]).unwrap(), 2.0);
    assert_eq!(h.variance(&[0]).unwrap(), 2.0);
    h *= 2.0;
    assert_eq!(h.value(&[0]).unwrap(), 4.0);
    assert_eq!(h.variance(&[0]).unwrap(), 8.0);

    let doubled = &h + &h;
    let scaled = 2.0 * &h;
    assert_eq!(doubled.value(&[0]).unwrap(), scaled.value(&[0]).unwrap());
    assert_ne!(doubled.variance(&[0]).unwrap(), scaled.variance(&[0]).unwrap());
}

#[test]
fn test_reset_and_refill_recovers_state() {
    let mut h = histogram((IntegerAxis::new(0, 2).unwrap().without_uoflow(),));
    h.fill(&(0,)).unwrap();
    h.fill(&(1,)).unwrap();
    let before = h.to_state();
    assert_eq!(h.value(&[0]).unwrap(), 1.0);

    h.reset();
    assert_eq!(h.value(&[0]).unwrap(), 0.0);
    assert_eq!(h.value(&[1]).unwrap(), 0.0);

    h.fill(&(0,)).unwrap();
    h.fill(&(1,)).unwrap();
    assert_eq!(h.to_state(), before);
}

#[test]
fn test_reduce_two_dim() {
    let mut h = histogram((
        IntegerAxis::new(0, 2).unwrap(),
        IntegerAxis::new(0, 3).unwrap(),
    ));
    for (i, j) in [(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)] {
        h.fill(&(i, j)).unwrap();
    }

    let h0 = h.reduce_to(&[0]).unwrap();
    assert_eq!(h0.dim(), 1);
    assert_eq!(h0.sum(), 5.0);
    assert_eq!(h0.value(&[0]).unwrap(), 2.0);
    assert_eq!(h0.value(&[1]).unwrap(), 3.0);
    assert_eq!(h0.axis(0).unwrap(), AnyAxis::from(IntegerAxis::new(0, 2).unwrap()));

    let h1 = h.reduce_to(&[1]).unwrap();
    assert_eq!(h1.dim(), 1);
    assert_eq!(h1.sum(), 5.0);
    assert_eq!(h1.value(&[0]).unwrap(), 2.0);
    assert_eq!(h1.value(&[1]).unwrap(), 2.0);
    assert_eq!(h1.value(&[2]).unwrap(), 1.0);
    assert_eq!(h1.axis(0).unwrap(), AnyAxis::from(IntegerAxis::new(0, 3).unwrap()));
}

#[test]
fn test_reduce_three_dim() {
    let mut h = histogram((
        IntegerAxis::new(0, 2).unwrap(),
        IntegerAxis::new(0, 3).unwrap(),
        IntegerAxis::new(0, 4).unwrap(),
    ));
    for (i, j, k) in [(0, 0, 0), (0, 1, 0), (0, 1, 1), (0, 0, 2), (1, 0, 2)] {
        h.fill(&(i, j, k)).unwrap();
    }

    let h0 = h.reduce_to(&[0]).unwrap();
    assert_eq!(h0.sum(), 5.0);
    assert_eq!(h0.value(&[0]).unwrap(), 4.0);
    assert_eq!(h0.value(&[1]).unwrap(), 1.0);

    let h1 = h.reduce_to(&[1]).unwrap();
    assert_eq!(h1.sum(), 5.0);
    assert_eq!(h1.value(&[0]).unwrap(), 3.0);
    assert_eq!(h1.value(&[1]).unwrap(), 2.0);

    let h2 = h.reduce_to(&[2]).unwrap();
    assert_eq!(h2.sum(), 5.0);
    assert_eq!(h2.value(&[0]).unwrap(), 2.0);
    assert_eq!(h2.value(&[1]).unwrap(), 1.0);
    assert_eq!(h2.value(&[2]).unwrap(), 2.0);

    let h01 = h.reduce_to(&[0, 1]).unwrap();
    assert_eq!(h01.dim(), 2);
    assert_eq!(h01.sum(), 5.0);
    assert_eq!(h01.value(&[0, 0]).unwrap(), 2.0);
    assert_eq!(h01.value(&[0, 1]).unwrap(), 2.0);
    assert_eq!(h01.value(&[1, 0]).unwrap(), 1.0);

    let h02 = h.reduce_to(&[0, 2]).unwrap();
    assert_eq!(h02.sum(), 5.0);
    assert_eq!(h02.value(&[0, 0]).unwrap(), 2.0);
    assert_eq!(h02.value(&[0, 1]).unwrap(), 1.0);
    assert_eq!(h02.value(&[0, 2]).unwrap(), 1.0);
    assert_eq!(h02.value(&[1, 2]).unwrap(), 1.0);

    let h12 = h.reduce_to(&[1, 2]).unwrap();
    assert_eq!(h12.sum(), 5.0);
    assert_eq!(h12.value(&[0, 0]).unwrap(), 1.0);
    assert_eq!(h12.value(&[1, 0]).unwrap(), 1.0);
    assert_eq!(h12.value(&[1, 1]).unwrap(), 1.0);
    assert_eq!(h12.value(&[0, 2]).unwrap(), 2.0);
}

#[test]
fn test_reduce_keeps_all_axes_is_identity() {
    let mut h = histogram((
        IntegerAxis::new(0, 2).unwrap(),
        IntegerAxis::new(0, 3).unwrap(),
    ));
    h.fill(&(0, 1)).unwrap();
    h.fill_with(&(1, 2), weight(2.0)).unwrap();
    let r = h.reduce_to(&[0, 1]).unwrap();
    assert_eq!(r, h);
}

#[test]
fn test_reduce_validation() {
    let h = histogram((
        IntegerAxis::new(0, 2).unwrap(),
        IntegerAxis::new(0, 3).unwrap(),
    ));
    assert!(h.reduce_to(&[]).is_err());
    assert!(h.reduce_to(&[2]).is_err());
    assert!(h.reduce_to(&[0, 0]).is_err());
}

#[test]
fn test_reduce_collapses_uoflow_of_dropped_axes() {
    let mut h = histogram((
        IntegerAxis::new(0, 2).unwrap(),
        IntegerAxis::new(0, 2).unwrap(),
    ));
    h.fill(&(0, -5)).unwrap(); // second axis underflow
    h.fill(&(0, 7)).unwrap(); // second axis overflow
    h.fill(&(0, 0)).unwrap();
    let r = h.reduce_to(&[0]).unwrap();
    assert_eq!(r.value(&[0]).unwrap(), 3.0);
    assert_eq!(r.sum(), h.sum());
}

#[test]
fn test_growth_through_promotions() {
    let mut h = histogram((IntegerAxis::new(-1, 2).unwrap(),));
    h.fill(&(-1,)).unwrap();
    h.fill(&(1,)).unwrap();
    h.fill(&(1,)).unwrap();
    for _ in 0..1000 {
        h.fill(&(0,)).unwrap();
    }
    assert_eq!(h.value(&[-1]).unwrap(), 0.0);
    assert_eq!(h.value(&[0]).unwrap(), 1.0);
    assert_eq!(h.value(&[1]).unwrap(), 1000.0);
    assert_eq!(h.value(&[2]).unwrap(), 2.0);
    assert_eq!(h.value(&[3]).unwrap(), 0.0);
}

#[test]
fn test_functional_fill() {
    let mut h = histogram((IntegerAxis::new(0, 10).unwrap(),));
    (0..10i64).for_each(|x| h.fill_with(&(x,), weight(2.0)).unwrap());
    assert_eq!(h.sum(), 20.0);
}

#[test]
fn test_static_and_dynamic_forms_compare_equal() {
    let mut a = histogram((
        RegularAxis::new(3, 0.0, 3.0).unwrap(),
        IntegerAxis::new(0, 2).unwrap(),
    ));
    let mut b = dyn_histogram([
        AnyAxis::from(RegularAxis::new(3, 0.0, 3.0).unwrap()),
        AnyAxis::from(IntegerAxis::new(0, 2).unwrap()),
    ]);
    assert_eq!(a, b);
    a.fill(&(1.0, 1)).unwrap();
    assert!(a != b);
    b.fill(&[v(1.0), v(1)]).unwrap();
    assert_eq!(a, b);

    let c = dyn_histogram([
        AnyAxis::from(IntegerAxis::new(0, 3).unwrap()),
        AnyAxis::from(IntegerAxis::new(0, 2).unwrap()),
    ]);
    assert!(a != c);
}

#[test]
fn test_dynamic_fill_with_slices() {
    let mut h = dyn_histogram([
        AnyAxis::from(RegularAxis::new(2, -1.0, 1.0).unwrap()),
        AnyAxis::from(RegularAxis::new(2, 2.0, 4.0).unwrap()),
    ]);
    h.fill(&[v(-0.5), v(2.5)]).unwrap();
    h.fill(&[v(0.5), v(3.5)]).unwrap();
    assert_eq!(h.value(&[0, 0]).unwrap(), 1.0);
    assert_eq!(h.variance(&[1, 1]).unwrap(), 1.0);
}

#[test]
fn test_bulk_fill() {
    let mut h = dyn_histogram([AnyAxis::from(IntegerAxis::new(0, 3).unwrap().without_uoflow())]);
    let column = [v(-1), v(0), v(1), v(2), v(1)];
    h.fill_bulk(&[&column]).unwrap();
    let column = [v(4), v(-1), v(0), v(1), v(2)];
    h.fill_bulk(&[&column]).unwrap();
    assert_eq!(h.value(&[0]).unwrap(), 2.0);
    assert_eq!(h.value(&[1]).unwrap(), 3.0);
    assert_eq!(h.value(&[2]).unwrap(), 2.0);
}

#[test]
fn test_bulk_fill_weighted() {
    let mut h = dyn_histogram([AnyAxis::from(IntegerAxis::new(0, 3).unwrap())]);
    let column = [v(-1), v(0), v(1), v(2), v(3), v(4)];
    let weights = [2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    h.fill_bulk_weighted(&[&column], &weights).unwrap();
    h.fill_bulk_weighted(&[&[v(0), v(1)][..]], &[2.0, 3.0]).unwrap();
    assert_eq!(h.value(&[-1]).unwrap(), 2.0);
    assert_eq!(h.value(&[0]).unwrap(), 5.0);
    assert_eq!(h.value(&[1]).unwrap(), 7.0);
    assert_eq!(h.value(&[2]).unwrap(), 5.0);
    assert_eq!(h.variance(&[-1]).unwrap(), 4.0);
    assert_eq!(h.variance(&[0]).unwrap(), 13.0);
    assert_eq!(h.variance(&[1]).unwrap(), 25.0);
    assert_eq!(h.variance(&[2]).unwrap(), 25.0);
}

#[test]
fn test_bulk_fill_length_mismatch() {
    let mut h = dyn_histogram([
        AnyAxis::from(IntegerAxis::new(0, 3).unwrap()),
        AnyAxis::from(IntegerAxis::new(0, 3).unwrap()),
    ]);
    let short = [v(0)];
    let long = [v(0), v(1)];
    assert!(h.fill_bulk(&[&short, &long]).is_err());
    assert!(h.fill_bulk(&[&short]).is_err());
    assert!(h.fill_bulk_weighted(&[&long, &long], &[1.0]).is_err());
}

#[test]
fn test_sum_equals_total_of_cells_randomized() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut h = histogram((
        RegularAxis::new(10, 0.0, 1.0).unwrap(),
        IntegerAxis::new(0, 5).unwrap(),
    ));
    for _ in 0..1000 {
        let x: f64 = rng.gen_range(-0.5..1.5);
        let k: i64 = rng.gen_range(-2..8);
        h.fill(&(x, k)).unwrap();
    }
    // under/overflow catches everything, so nothing is lost
    assert_eq!(h.sum(), 1000.0);

    // and the sum really is the total over every legal cell
    let mut total = 0.0;
    for i in -1..=10 {
        for j in -1..=5 {
            total += h.value(&[i, j]).unwrap();
        }
    }
    assert_eq!(total, 1000.0);
}

#[test]
fn test_state_roundtrip_all_axis_kinds() {
    let mut h = dyn_histogram([
        AnyAxis::from(RegularAxis::new(3, -1.0, 1.0).unwrap().with_label("r")),
        AnyAxis::from(CircularAxis::with_period(4, 0.0, 1.0).unwrap().with_label("p")),
        AnyAxis::from(RegularAxis::log(3, 1.0, 100.0).unwrap().with_label("lr")),
        AnyAxis::from(VariableAxis::new(vec![0.1, 0.2, 0.3, 0.4, 0.5]).unwrap().with_label("v")),
        AnyAxis::from(multihist::CategoryAxis::new(vec![0i64, 1, 2]).unwrap()),
        AnyAxis::from(IntegerAxis::new(0, 2).unwrap().with_label("i")),
    ]);
    h.fill(&[v(0.5), v(20.0), v(0.1), v(0.25), v(1), v(0)]).unwrap();
    let restored = DynHistogram::<AdaptiveStorage>::from_state(h.to_state()).unwrap();
    assert_eq!(h, restored);

    let empty = dyn_histogram([AnyAxis::from(IntegerAxis::new(0, 2).unwrap())]);
    assert!(empty != restored);
}

#[test]
fn test_display_matches_axis_reprs() {
    let h = histogram((
        RegularAxis::new(3, -1.0, 1.0).unwrap().with_label("r"),
        IntegerAxis::new(0, 2).unwrap().with_label("i"),
    ));
    assert_eq!(
        h.to_string(),
        "histogram(\n  regular(3, -1, 1, label='r'),\n  integer(0, 2, label='i'),\n)"
    );
}
