//! Tensor construction, views and storage sharing

use tensr::error::Error;
use tensr::storage::Storage;
use tensr::tensor::Tensor;

#[test]
fn test_new1() {
    let t = Tensor::new1(4);
    assert_eq!(t.ndim(), 1);
    assert_eq!(t.size0(), 4);
    assert_eq!(t.stride0(), 1);
    assert_eq!(t.size1(), None);
    assert_eq!(t.offset(), 0);
    assert_eq!(t.elem_count(), 4);
    assert!(t.covers_storage());
    assert_eq!(t.storage().ref_count(), 1);
}

#[test]
fn test_new2_row_major() {
    let t = Tensor::new2(2, 3);
    assert_eq!(t.ndim(), 2);
    assert_eq!(t.size0(), 2);
    assert_eq!(t.size1(), Some(3));
    assert_eq!(t.stride0(), 3);
    assert_eq!(t.stride1(), Some(1));
    assert_eq!(t.elem_count(), 6);
    assert!(t.covers_storage());
    assert_eq!(t.storage().len(), 6);

    t.set2(1, 2, 42.0);
    assert_eq!(t.storage().get(5), 42.0);
}

#[test]
fn test_new1_from_storage_shares_buffer() {
    let storage = Storage::new(4);
    storage.fill(7.0);

    let view = Tensor::new1_from_storage(&storage, 0, 4, 1);
    assert_eq!(storage.ref_count(), 2);
    assert!(!view.covers_storage());
    assert_eq!(view.get1(3), 7.0);

    view.set1(2, -1.0);
    assert_eq!(storage.get(2), -1.0);

    drop(view);
    assert_eq!(storage.ref_count(), 1);
}

#[test]
fn test_new1_from_storage_strided() {
    let storage = Storage::new(4);
    storage.zero();

    let view = Tensor::new1_from_storage(&storage, 1, 2, 2);
    assert_eq!(view.size0(), 2);
    assert_eq!(view.offset(), 1);
    assert_eq!(view.stride0(), 2);

    view.set1(0, 1.0);
    view.set1(1, 2.0);
    assert_eq!(storage.get(0), 0.0);
    assert_eq!(storage.get(1), 1.0);
    assert_eq!(storage.get(2), 0.0);
    assert_eq!(storage.get(3), 2.0);
}

#[test]
fn test_new1_from_storage_rejects_bad_views() {
    let storage = Storage::new(4);

    let err = Tensor::try_new1_from_storage(&storage, 0, 0, 1).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = Tensor::try_new1_from_storage(&storage, 4, 1, 1).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfBounds { index: 4, size: 4 }));

    let err = Tensor::try_new1_from_storage(&storage, 0, 2, 0).unwrap_err();
    assert!(matches!(err, Error::ZeroStride));

    let err = Tensor::try_new1_from_storage(&storage, 1, 2, 3).unwrap_err();
    assert!(matches!(err, Error::ViewOutOfBounds { last: 4, size: 4 }));
}

#[test]
#[should_panic(expected = "Tensor::new1_from_storage failed")]
fn test_new1_from_storage_panics_on_bad_view() {
    let storage = Storage::new(2);
    Tensor::new1_from_storage(&storage, 0, 3, 1);
}

#[test]
fn test_deep_copy_is_independent() {
    let m = Tensor::new2(2, 3);
    for i in 0..2 {
        for j in 0..3 {
            m.set2(i, j, (i * 3 + j) as f64);
        }
    }

    let copy = m.deep_copy();
    assert!(copy.covers_storage());
    assert!(!m.storage().ptr_eq(copy.storage()));
    assert_eq!(copy.get2(1, 2), 5.0);

    copy.set2(0, 0, 99.0);
    assert_eq!(m.get2(0, 0), 0.0);
}

#[test]
fn test_deep_copy_of_view_covers_its_storage() {
    let m = Tensor::new2(2, 3);
    m.fill(1.0);
    m.set2(0, 1, 8.0);
    m.set2(1, 1, 9.0);

    let col = m.select(1, 1);
    assert!(!col.covers_storage());

    let copy = col.deep_copy();
    assert!(copy.covers_storage());
    assert_eq!(copy.size0(), 2);
    assert_eq!(copy.get1(0), 8.0);
    assert_eq!(copy.get1(1), 9.0);
    assert_eq!(copy.storage().len(), 2);
}

#[test]
fn test_lin_space() {
    let t = Tensor::lin_space(1.0, 10.0, 10);
    assert_eq!(t.size0(), 10);
    for i in 0..10 {
        assert_eq!(t.get1(i), (i + 1) as f64);
    }

    let t = Tensor::lin_space(1.0, 10.0, 3);
    assert_eq!(t.get1(0), 1.0);
    assert_eq!(t.get1(1), 5.5);
    assert_eq!(t.get1(2), 10.0);

    let t = Tensor::lin_space(1.0, 10.0, 2);
    assert_eq!(t.get1(0), 1.0);
    assert_eq!(t.get1(1), 10.0);
}

#[test]
fn test_lin_space_needs_two_points() {
    assert!(matches!(
        Tensor::try_lin_space(0.0, 1.0, 1),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        Tensor::try_lin_space(0.0, 1.0, 0),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_ravel_1d_is_equivalent_view() {
    let v = Tensor::lin_space(1.0, 3.0, 3);
    let r = v.ravel();
    assert_eq!(r.size0(), 3);
    assert_eq!(r.stride0(), 1);
    assert!(!r.covers_storage());
    assert!(v.storage().ptr_eq(r.storage()));

    r.set1(0, -5.0);
    assert_eq!(v.get1(0), -5.0);
}

#[test]
fn test_ravel_2d_flattens_row_major() {
    let m = Tensor::new2(2, 3);
    for i in 0..2 {
        for j in 0..3 {
            m.set2(i, j, (i * 3 + j + 1) as f64);
        }
    }

    let flat = m.ravel();
    assert_eq!(flat.ndim(), 1);
    assert_eq!(flat.size0(), 6);
    assert_eq!(flat.stride0(), 1);
    for n in 0..6 {
        assert_eq!(flat.get1(n), (n + 1) as f64);
    }
}

#[test]
fn test_ravel_refuses_plain_views() {
    let m = Tensor::new2(2, 3);
    m.zero();

    let row = m.select(0, 0);
    assert!(matches!(row.try_ravel(), Err(Error::NotCoveringStorage)));

    // A ravel result is itself a plain view and cannot be raveled again.
    let flat = m.ravel();
    assert!(matches!(flat.try_ravel(), Err(Error::NotCoveringStorage)));
}

#[test]
fn test_select_rows_and_columns() {
    let m = Tensor::new2(5, 6);
    for i in 0..5 {
        for j in 0..6 {
            m.set2(i, j, (i * 10 + j) as f64);
        }
    }

    let row = m.select(0, 2);
    assert_eq!(row.ndim(), 1);
    assert_eq!(row.size0(), 6);
    assert_eq!(row.stride0(), 1);
    assert_eq!(row.offset(), 12);
    for j in 0..6 {
        assert_eq!(row.get1(j), m.get2(2, j));
    }

    let col = m.select(1, 3);
    assert_eq!(col.size0(), 5);
    assert_eq!(col.stride0(), 6);
    assert_eq!(col.offset(), 3);
    for i in 0..5 {
        assert_eq!(col.get1(i), m.get2(i, 3));
    }

    let flat = m.ravel();
    assert_eq!(m.storage().ref_count(), 4);

    row.set1(0, -1.0);
    col.set1(0, -2.0);
    assert_eq!(m.get2(2, 0), -1.0);
    assert_eq!(m.get2(0, 3), -2.0);
    assert_eq!(flat.get1(3), -2.0);

    drop(row);
    assert_eq!(m.storage().ref_count(), 3);
    drop(col);
    drop(flat);
    assert_eq!(m.storage().ref_count(), 1);
    assert!(m.storage().is_unique());
}

#[test]
fn test_select_grid_composite() {
    let m = Tensor::new2(5, 6);
    m.zero();

    let row1 = m.select(0, 1);
    row1.fill(2.0);
    let row4 = m.select(0, 4);
    row4.fill(3.0);
    assert_eq!(m.storage().ref_count(), 3);

    let col3 = m.select(1, 3);
    col3.fill(5.0);
    assert_eq!(m.storage().ref_count(), 4);

    // The column fill landed last, so it wins in every row.
    for i in 0..5 {
        for j in 0..6 {
            let expected = if j == 3 {
                5.0
            } else if i == 1 {
                2.0
            } else if i == 4 {
                3.0
            } else {
                0.0
            };
            assert_eq!(m.get2(i, j), expected, "cell ({i}, {j})");
        }
    }
    assert_eq!(row1.get1(3), 5.0);
    assert_eq!(row4.get1(3), 5.0);
}

#[test]
fn test_select_on_1d_returns_whole_view() {
    let v = Tensor::lin_space(1.0, 3.0, 3);
    let s = v.select(0, 0);
    assert_eq!(s.size0(), 3);
    assert_eq!(s.offset(), v.offset());
    assert_eq!(s.stride0(), v.stride0());
    assert!(v.storage().ptr_eq(s.storage()));

    assert!(matches!(
        v.try_select(0, 1),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        v.try_select(1, 0),
        Err(Error::InvalidDimension { dim: 1, ndim: 1 })
    ));
}

#[test]
fn test_select_errors() {
    let m = Tensor::new2(5, 6);
    m.zero();

    assert!(matches!(
        m.try_select(2, 0),
        Err(Error::InvalidDimension { dim: 2, ndim: 2 })
    ));
    assert!(matches!(
        m.try_select(0, 5),
        Err(Error::IndexOutOfBounds { index: 5, size: 5 })
    ));
    assert!(matches!(
        m.try_select(1, 6),
        Err(Error::IndexOutOfBounds { index: 6, size: 6 })
    ));
}

#[test]
#[should_panic(expected = "Tensor::select failed")]
fn test_select_panics_out_of_bounds() {
    let m = Tensor::new2(2, 2);
    m.zero();
    m.select(0, 2);
}

#[test]
#[should_panic(expected = "Tensor::new1: size0 must be positive")]
fn test_new1_zero_size_panics() {
    Tensor::new1(0);
}

#[test]
#[should_panic(expected = "Tensor::get1")]
fn test_get1_out_of_bounds_panics() {
    let v = Tensor::new1(2);
    v.zero();
    v.get1(2);
}

#[test]
#[should_panic(expected = "Tensor::get2")]
fn test_get2_on_1d_panics() {
    let v = Tensor::new1(2);
    v.zero();
    v.get2(0, 0);
}

#[test]
fn test_display_includes_storage_header() {
    let m = Tensor::new2(2, 3);
    m.fill(1.0);
    let text = format!("{m}");
    assert!(text.starts_with("Tensor size 2x3 stride 3,1 offset 0"));
    assert!(text.contains("Storage size 6 refs"));

    let v = Tensor::lin_space(0.0, 1.0, 2);
    let text = format!("{v}");
    assert!(text.contains("Tensor size 2 stride 1 offset 0"));
    assert!(text.contains("[1]=1"));
}

#[test]
fn test_display_caps_at_ten_per_dimension() {
    let long = Tensor::lin_space(0.0, 14.0, 15);
    let text = format!("{long}");
    assert!(text.contains("[9]=9"));
    assert!(!text.contains("[10]="));
    assert!(text.ends_with("..."));

    let wide = Tensor::new2(12, 12);
    wide.fill(1.0);
    let text = format!("{wide}");
    assert!(text.contains("..."));
    assert_eq!(text.lines().count(), 2 + 10 + 1);
}
