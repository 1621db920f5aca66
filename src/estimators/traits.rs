// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

pub trait GlobalValue {
    /// Estimate over the whole sample, in the estimator's configured unit.
    fn global_value(&self) -> f64;
}

pub trait LocalValues: GlobalValue {
    /// One contribution per observation, in observation order.
    fn local_values(&self) -> Array1<f64>;

    /// Mean of the local values.
    ///
    /// Estimators that floor their global value (KSG mutual information is
    /// floored at zero) return the unfloored estimate here.
    fn global_from_local(&self) -> f64 {
        self.local_values()
            .mean()
            .expect("estimators reject empty samples on construction")
    }
}

/// Local values for estimators that may or may not decompose per observation.
///
/// `local_values_opt` returns `Err` with a short reason when
/// `supports_local()` is false.
pub trait OptionalLocalValues {
    fn supports_local(&self) -> bool;
    fn local_values_opt(&self) -> Result<Array1<f64>, &'static str>;
}

/// Estimators of I(X; Y) between two paired sample collections.
pub trait MutualInformationEstimator: GlobalValue + OptionalLocalValues {
    /// Number of paired observations.
    fn n_samples(&self) -> usize;

    /// Estimate before flooring at zero; may be slightly negative when X and
    /// Y are independent.
    fn raw_value(&self) -> f64;
}
