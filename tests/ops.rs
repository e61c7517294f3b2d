//! Elementwise and arithmetic tensor operations

use tensr::storage::Storage;
use tensr::tensor::Tensor;

#[test]
fn test_apply_on_covering_tensor() {
    let m = Tensor::new2(2, 2);
    m.fill(10.0).apply(|x| 2.0 * x + 1.0);
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(m.get2(i, j), 21.0);
        }
    }
    assert_eq!(m.storage().get(3), 21.0);
}

#[test]
fn test_apply_on_view_touches_only_viewed_cells() {
    let storage = Storage::new(4);
    storage.zero();

    let view = Tensor::new1_from_storage(&storage, 1, 2, 2);
    view.fill(5.0);

    assert_eq!(storage.get(0), 0.0);
    assert_eq!(storage.get(1), 5.0);
    assert_eq!(storage.get(2), 0.0);
    assert_eq!(storage.get(3), 5.0);
}

#[test]
fn test_apply_walks_views_in_logical_order() {
    let m = Tensor::new2(3, 2);
    m.zero();

    let col = m.select(1, 1);
    let mut next = 0.0;
    col.apply(|_| {
        next += 1.0;
        next
    });

    assert_eq!(m.get2(0, 1), 1.0);
    assert_eq!(m.get2(1, 1), 2.0);
    assert_eq!(m.get2(2, 1), 3.0);
    assert_eq!(m.get2(0, 0), 0.0);
}

#[test]
fn test_add_accumulates_scaled_other() {
    let a = Tensor::lin_space(1.0, 3.0, 3);
    let b = Tensor::lin_space(4.0, 6.0, 3);

    a.add(2.0, &b);
    assert_eq!(a.get1(0), 9.0);
    assert_eq!(a.get1(1), 12.0);
    assert_eq!(a.get1(2), 15.0);
    assert_eq!(b.get1(0), 4.0);
}

#[test]
fn test_add_tensor_to_itself() {
    let x = Tensor::lin_space(1.0, 6.0, 6);
    x.add(2.0, &x);
    for i in 0..6 {
        assert_eq!(x.get1(i), 3.0 * (i + 1) as f64);
    }
}

#[test]
fn test_add_2d_consumes_other_row_major() {
    let m = Tensor::new2(2, 3);
    for i in 0..2 {
        for j in 0..3 {
            m.set2(i, j, (i * 3 + j + 1) as f64);
        }
    }
    let v = Tensor::lin_space(1.0, 6.0, 6);

    m.add(2.0, &v);
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(m.get2(i, j), 3.0 * (i * 3 + j + 1) as f64);
        }
    }
}

#[test]
#[should_panic(expected = "Tensor::add")]
fn test_add_count_mismatch_panics() {
    let a = Tensor::new1(3);
    a.zero();
    let b = Tensor::new1(4);
    b.zero();
    a.add(1.0, &b);
}

#[test]
#[should_panic(expected = "Tensor::ravel failed")]
fn test_add_requires_covering_other() {
    let m = Tensor::new2(2, 3);
    m.zero();
    let row = m.select(0, 0);
    let a = Tensor::new1(3);
    a.zero();
    a.add(1.0, &row);
}

#[test]
fn test_mul_scales_in_place() {
    let v = Tensor::lin_space(1.0, 3.0, 3);
    v.mul(2.0);
    assert_eq!(v.get1(0), 2.0);
    assert_eq!(v.get1(1), 4.0);
    assert_eq!(v.get1(2), 6.0);
}

#[test]
fn test_mul_on_column_view() {
    let m = Tensor::new2(2, 3);
    m.fill(1.0);

    m.select(1, 2).mul(10.0);
    assert_eq!(m.get2(0, 2), 10.0);
    assert_eq!(m.get2(1, 2), 10.0);
    assert_eq!(m.get2(0, 0), 1.0);
    assert_eq!(m.get2(1, 1), 1.0);
}

#[test]
fn test_dot() {
    let two = Tensor::new1(1);
    two.fill(2.0);
    assert_eq!(two.dot(&two), 4.0);

    let ones = Tensor::new1(4);
    ones.fill(1.0);
    assert_eq!(ones.dot(&ones), 4.0);

    let twos = Tensor::new1(6);
    twos.fill(2.0);
    let threes = Tensor::new1(6);
    threes.fill(3.0);
    assert_eq!(twos.dot(&threes), 36.0);

    let v = Tensor::lin_space(1.0, 3.0, 3);
    let w = Tensor::new1(3);
    w.fill(1.5);
    assert_eq!(v.dot(&w), 9.0);
}

#[test]
fn test_dot_ravels_shapes_away() {
    let m = Tensor::new2(2, 3);
    m.fill(3.0);
    assert_eq!(m.dot(&m), 54.0);

    let other = Tensor::new2(3, 2);
    other.fill(4.0);
    assert_eq!(m.dot(&other), 72.0);

    let v = Tensor::new1(6);
    v.fill(2.0);
    assert_eq!(m.dot(&v), 36.0);
    assert_eq!(v.dot(&m), 36.0);
}

#[test]
#[should_panic(expected = "Tensor::dot")]
fn test_dot_count_mismatch_panics() {
    let a = Tensor::new1(3);
    a.zero();
    let b = Tensor::new1(4);
    b.zero();
    a.dot(&b);
}

#[test]
#[should_panic(expected = "Tensor::ravel failed")]
fn test_dot_requires_covering_tensors() {
    let m = Tensor::new2(2, 3);
    m.zero();
    let col = m.select(1, 0);
    let v = Tensor::new1(2);
    v.zero();
    col.dot(&v);
}

#[test]
fn test_chained_ops() {
    let t = Tensor::new1(3);
    t.zero().fill(2.0).mul(3.0);
    assert_eq!(t.get1(2), 6.0);
}
