// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{Array1, Array2, ArrayD, IxDyn, array};

use ksg_mi::KsgError;
use ksg_mi::estimators::approaches::common_nd::dataset::{DistanceMatrix, SampleSet};

use crate::test_helpers::generate_gaussian_data;

#[test]
fn sample_set_from_array_construction() {
    let x: Array1<f64> = array![0.0, 2.0, 5.0];
    let s1 = SampleSet::from_array1(x);
    assert_eq!(s1.n_samples(), 3);
    assert_eq!(s1.n_features(), 1);
    assert!(s1.observation_shape().is_empty());
    assert_abs_diff_eq!(s1.view()[[1, 0]], 2.0, epsilon = 1e-12);

    let data: Array2<f64> = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
    let s2 = SampleSet::from_array2(data);
    assert_eq!(s2.n_samples(), 4);
    assert_eq!(s2.n_features(), 2);
    assert_eq!(s2.observation_shape(), &[2]);
}

#[test]
fn sample_set_flattens_higher_rank_observations() {
    // 3 observations of 2x2 "images"
    let data = ArrayD::from_shape_vec(IxDyn(&[3, 2, 2]), (0..12).map(|v| v as f64).collect())
        .unwrap();
    let s = SampleSet::from_array_dyn(data);
    assert_eq!(s.n_samples(), 3);
    assert_eq!(s.n_features(), 4);
    assert_eq!(s.observation_shape(), &[2, 2]);
    assert_eq!(s.view().row(1).to_vec(), vec![4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn sample_set_flattens_in_logical_order() {
    // A transposed (column-major) array: logical order must win over memory order.
    let base: Array2<f64> = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let t = base.reversed_axes().into_dyn();
    let s = SampleSet::from(t);
    assert_eq!(s.view(), array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]].view());
}

#[test]
fn sample_set_from_observations_checks_shapes() {
    let ok = vec![
        ArrayD::from_elem(IxDyn(&[2, 3]), 1.0),
        ArrayD::from_elem(IxDyn(&[2, 3]), 2.0),
    ];
    let s = SampleSet::from_observations(&ok).unwrap();
    assert_eq!(s.n_samples(), 2);
    assert_eq!(s.n_features(), 6);
    assert_eq!(s.view()[[1, 5]], 2.0);

    let bad = vec![
        ArrayD::from_elem(IxDyn(&[2, 3]), 1.0),
        ArrayD::from_elem(IxDyn(&[2, 3]), 2.0),
        ArrayD::from_elem(IxDyn(&[3, 2]), 3.0),
    ];
    let err = SampleSet::from_observations(&bad).unwrap_err();
    assert_eq!(
        err,
        KsgError::InconsistentObservationShape {
            index: 2,
            expected: vec![2, 3],
            found: vec![3, 2],
        }
    );
}

#[test]
fn sample_set_validation() {
    let empty_features = SampleSet::from_array2(Array2::zeros((4, 0)));
    assert_eq!(empty_features.validate(), Err(KsgError::EmptyObservation));

    let with_nan = SampleSet::from_array1(array![0.0, 1.0, f64::NAN]);
    assert_eq!(with_nan.validate(), Err(KsgError::NonFiniteSample { index: 2 }));

    let fine = SampleSet::from_array1(array![0.0, 1.0, 2.0]);
    assert!(fine.validate().is_ok());
}

#[test]
fn distance_row_is_euclidean() {
    let data: Array2<f64> = array![[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]];
    let s = SampleSet::from_array2(data);
    assert_eq!(s.distance_row(0), array![0.0, 5.0, 10.0]);
    assert_eq!(s.distance_row(1), array![5.0, 0.0, 5.0]);
}

#[test]
fn distance_row_survives_extreme_magnitudes() {
    // squaring these components directly would overflow or underflow
    for factor in [1e200, 1e-200] {
        let data: Array2<f64> = array![[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]].mapv(|v| v * factor);
        let s = SampleSet::from_array2(data);
        let row = s.distance_row(0);
        assert_eq!(row[0], 0.0);
        assert_relative_eq!(row[1], 5.0 * factor, max_relative = 1e-12);
        assert_relative_eq!(row[2], 10.0 * factor, max_relative = 1e-12);
    }
}

#[test]
fn scalar_without_sample_axis_has_no_observations() {
    let s = SampleSet::from(ArrayD::from_elem(IxDyn(&[]), 4.0));
    assert_eq!(s.n_samples(), 0);
    assert_eq!(s.validate(), Err(KsgError::NoObservations));
}

#[test]
fn distance_matrix_symmetric_with_zero_diagonal() {
    let data = generate_gaussian_data(60, 3, 0.0, 1.0, 7);
    let s = SampleSet::from_array2(data.clone());
    let d = DistanceMatrix::from_samples(&s);
    assert_eq!(d.n_samples(), 60);
    for i in 0..60 {
        assert_eq!(d.view()[[i, i]], 0.0);
        for j in 0..60 {
            assert_eq!(d.view()[[i, j]], d.view()[[j, i]]);
        }
    }

    // spot-check against a scalar computation
    let diff = &data.row(4) - &data.row(17);
    let expected = diff.mapv(|v| v * v).sum().sqrt();
    assert_abs_diff_eq!(d.view()[[4, 17]], expected, epsilon = 1e-12);
}

#[test]
fn distance_matrix_parallel_matches_serial() {
    let data = generate_gaussian_data(128, 4, 1.0, 2.0, 11);
    let s = SampleSet::from_array2(data);
    assert_eq!(DistanceMatrix::from_samples(&s), DistanceMatrix::from_samples_par(&s));
}

#[test]
fn distance_matrix_rows_match_distance_row() {
    let data = generate_gaussian_data(20, 2, 0.0, 1.0, 3);
    let s = SampleSet::from_array2(data);
    let d = DistanceMatrix::from_samples(&s);
    for i in [0, 9, 19] {
        assert_eq!(d.row(i), s.distance_row(i).view());
    }
}
