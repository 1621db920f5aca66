// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;

use ksg_mi::estimators::approaches::ksg::{KsgConfig, KsgMutualInformation, Scaling};
use ksg_mi::estimators::utils::special::digamma_count;
use ksg_mi::estimators::{
    GlobalValue, LocalValues, MutualInformationEstimator, OptionalLocalValues,
};

use crate::test_helpers::{correlated_gaussian, generate_uniform_data, sine_fixture};

#[test]
fn mean_of_local_values_is_raw_estimate() {
    let (x, y) = sine_fixture();
    let est = KsgMutualInformation::new(x, y, KsgConfig::new(5)).unwrap();
    let locals = est.local_values();
    assert_eq!(locals.len(), 100);
    assert_abs_diff_eq!(est.global_from_local(), est.estimate().raw, epsilon = 1e-10);
    assert_abs_diff_eq!(est.global_value(), 1.419408087071405, epsilon = 1e-9);
}

#[test]
fn local_values_follow_neighbour_counts() {
    let (x, y) = correlated_gaussian(80, 0.5, 6);
    let k = 4;
    let n = 80;
    let est = KsgMutualInformation::new(x, y, KsgConfig::new(k).with_base(2.0)).unwrap();
    let locals = est.local_values();
    let counts = est.neighbour_counts();

    let offset = digamma_count(k) - 1.0 / k as f64 + digamma_count(n);
    for (local, c) in locals.iter().zip(&counts) {
        let expected =
            (offset - digamma_count(c.nx) - digamma_count(c.ny)) / std::f64::consts::LN_2;
        assert_abs_diff_eq!(*local, expected, epsilon = 1e-10);
    }
}

#[test]
fn local_values_are_not_floored() {
    // independent data: some samples contribute negatively
    let data = generate_uniform_data(200, 2, 99);
    let est = KsgMutualInformation::new(
        data.column(0).to_owned(),
        data.column(1).to_owned(),
        KsgConfig::new(3).with_scaling(Scaling::None),
    )
    .unwrap();
    let locals = est.local_values();
    assert!(locals.iter().any(|&v| v < 0.0));
    assert!(est.global_value() >= 0.0);
}

#[test]
fn optional_interface_reports_support() {
    let (x, y) = sine_fixture();
    let est = KsgMutualInformation::new(x, y, KsgConfig::default()).unwrap();
    assert!(est.supports_local());
    let locals = est.local_values_opt().unwrap();
    assert_eq!(locals, est.local_values());
}

#[test]
fn estimator_trait_object_exposes_raw_value() {
    let data = generate_uniform_data(150, 2, 5);
    let est = KsgMutualInformation::new(
        data.column(0).to_owned(),
        data.column(1).to_owned(),
        KsgConfig::new(4),
    )
    .unwrap();
    let boxed: Box<dyn MutualInformationEstimator> = Box::new(est);
    assert_eq!(boxed.n_samples(), 150);
    assert_eq!(boxed.global_value(), boxed.raw_value().max(0.0));
}
