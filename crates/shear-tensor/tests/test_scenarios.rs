use std::thread;

use shear_tensor::Selector::{All, List, Range, Single};
use shear_tensor::{Selector, Tensor, TensorError};

fn matrix() -> Tensor<i64> {
    Tensor::from_vec(&[2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap()
}

#[test]
fn test_element_access() {
    let t = matrix();
    assert_eq!(t.element_at(&[1, 2]).unwrap(), 5);
    assert_eq!(t.element_at_linear(5).unwrap(), 5);
}

#[test]
fn test_list_slice() {
    let v = matrix().slice(&[All, List(vec![0, 2])]).unwrap();
    assert_eq!(v.dims(), &[2, 2]);
    assert_eq!(v.all_elements().collect::<Vec<_>>(), vec![0, 2, 3, 5]);
}

#[test]
fn test_reshape_keeps_order() {
    let r = matrix().reshape(&[3, 2]).unwrap();
    assert_eq!(r.all_elements().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_enclose_columns() {
    let e = matrix().enclose(&[0]).unwrap();
    assert_eq!(e.dims(), &[3]);
    let first = e.element_at_linear(0).unwrap();
    assert_eq!(first.dims(), &[2]);
    assert_eq!(first.to_vec(), vec![0, 3]);
}

#[test]
fn test_unit_dims_collapse() {
    let t = Tensor::from_vec(&[1, 5], vec![1, 2, 3, 4, 5]).unwrap();
    assert_eq!(t.dims(), &[5]);
    assert_eq!(t.reshape(&[5, 1]).unwrap(), t);
}

#[test]
fn test_deep_reslicing() {
    let mut t = Tensor::iota(4096).unwrap().reshape(&[64, 64]).unwrap();
    let mut lo = 0;
    for _ in 0..30 {
        t = t.slice(&[Range(1, t.size(0)), All]).unwrap();
        lo += 1;
    }
    assert_eq!(t.dims(), &[34, 64]);
    assert_eq!(t.element_at(&[0, 0]).unwrap(), lo * 64);
    let row = t.slice(&[Single(3), Range(10, 12)]).unwrap();
    assert_eq!(row.to_vec(), vec![(lo + 3) * 64 + 10, (lo + 3) * 64 + 11]);
}

#[test]
fn test_concurrent_reads() {
    let t = Tensor::from_linear_fn(&[8, 8], |i| i * 3).unwrap();
    let view = t.slice(&[Range(2, 6), List(vec![7, 0, 3])]).unwrap();
    let expected = view.to_vec();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let view = view.clone();
            thread::spawn(move || view.all_elements().collect::<Vec<_>>())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_errors_are_recoverable() {
    let t = matrix();
    assert!(matches!(
        Tensor::<i64>::constant(&[2, 0], 1),
        Err(TensorError::InvalidShape { .. })
    ));
    assert!(matches!(t.element_at(&[0, 3]), Err(TensorError::InvalidIndex { .. })));
    assert!(matches!(t.slice(&[All]), Err(TensorError::InvalidSlice(_))));
    assert!(matches!(t.reshape(&[5]), Err(TensorError::InvalidReshape { .. })));
    let ragged = Tensor::from_vec(&[2], vec![t.clone(), t.transpose().unwrap()]).unwrap();
    assert!(matches!(ragged.disclose(), Err(TensorError::ShapeMismatch { .. })));
}

#[test]
fn test_oversized_shapes_are_rejected() {
    let big = usize::MAX / 2 + 1;
    assert!(matches!(
        Tensor::from_cartesian_fn(&[big, big], |_| 0u8),
        Err(TensorError::InvalidShape { .. })
    ));
    assert!(matches!(
        Tensor::constant(&[big, 4], 0u8),
        Err(TensorError::InvalidShape { .. })
    ));
}

#[test]
fn test_reslicing_out_of_range_is_an_error() {
    let columns = matrix().slice(&[All, List(vec![0, 2])]).unwrap();
    assert!(matches!(
        columns.slice(&[All, Single(5)]),
        Err(TensorError::InvalidSlice(_))
    ));
    assert!(matches!(
        columns.slice(&[All, Range(1, 3)]),
        Err(TensorError::InvalidSlice(_))
    ));

    let rows = Tensor::iota(20).unwrap().slice(&[Range(4, 8)]).unwrap();
    assert!(matches!(rows.slice(&[Single(4)]), Err(TensorError::InvalidSlice(_))));
    assert_eq!(rows.slice(&[Single(3)]).unwrap().as_scalar(), Some(7));
}

#[test]
fn test_closed_range_to_max_is_an_error() {
    let t = matrix();
    assert!(matches!(
        t.slice(&[All, Selector::from(0..=usize::MAX)]),
        Err(TensorError::InvalidSlice(_))
    ));
    assert_eq!(
        t.slice(&[All, Selector::from(1..=2)]).unwrap().to_vec(),
        vec![1, 2, 4, 5]
    );
}

#[test]
fn test_row_totals() {
    let totals = matrix().reduce(|a, b| a + b).unwrap();
    assert_eq!(totals.to_vec(), vec![3, 12]);
    let grand = totals.reduce(|a, b| a + b).unwrap();
    assert_eq!(grand.as_scalar(), Some(15));
}
