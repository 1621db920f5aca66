// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::estimators::approaches::common_nd::dataset::SampleSet;
use crate::estimators::approaches::ksg::{KsgConfig, KsgMutualInformation};
use crate::estimators::traits::GlobalValue;

/// Mutual information estimation methods
///
/// This struct provides static methods for creating mutual information
/// estimators for continuous multivariate data.
pub struct MutualInformation;

impl MutualInformation {
    /// Creates a new KSG estimator with default settings and `k` neighbours
    ///
    /// # Arguments
    ///
    /// * `x` - Samples of the first variable; axis 0 indexes observations
    /// * `y` - Samples of the second variable, same number of observations
    /// * `k` - Rank of the joint-space neighbour defining the counting radius
    ///
    /// # Returns
    ///
    /// An estimator using row-max scaling, inclusive counts and algorithm 2,
    /// reporting nats
    pub fn new_ksg(
        x: impl Into<SampleSet>,
        y: impl Into<SampleSet>,
        k: usize,
    ) -> Result<KsgMutualInformation> {
        KsgMutualInformation::new(x, y, KsgConfig::new(k))
    }

    /// Creates a new KSG estimator with a full configuration
    ///
    /// # Arguments
    ///
    /// * `x` - Samples of the first variable; axis 0 indexes observations
    /// * `y` - Samples of the second variable, same number of observations
    /// * `config` - Neighbour count, base, scaling, counting, algorithm and execution
    pub fn new_ksg_with_config(
        x: impl Into<SampleSet>,
        y: impl Into<SampleSet>,
        config: KsgConfig,
    ) -> Result<KsgMutualInformation> {
        KsgMutualInformation::new(x, y, config)
    }
}

/// Estimate I(X; Y) with the KSG k-nearest-neighbour estimator.
///
/// Returns a non-negative value in the unit set by `config.base`
/// (e → nats, 2 → bits).
///
/// # Errors
///
/// Fails when X and Y hold different numbers of observations, when there are
/// not more than `k` observations, or when the configuration or the samples
/// are invalid (see [`crate::KsgError`]).
///
/// # Examples
///
/// ```
/// use ksg_mi::{estimate_mutual_information, KsgConfig};
/// use ndarray::Array1;
///
/// let x = Array1::linspace(0.0, 10.0, 100);
/// let y = x.mapv(f64::sin);
/// let nats = estimate_mutual_information(x.clone(), y.clone(), &KsgConfig::default()).unwrap();
/// let bits = estimate_mutual_information(x, y, &KsgConfig::default().with_base(2.0)).unwrap();
/// assert!((bits - nats / std::f64::consts::LN_2).abs() < 1e-12);
/// ```
pub fn estimate_mutual_information(
    x: impl Into<SampleSet>,
    y: impl Into<SampleSet>,
    config: &KsgConfig,
) -> Result<f64> {
    Ok(KsgMutualInformation::new(x, y, config.clone())?.global_value())
}
