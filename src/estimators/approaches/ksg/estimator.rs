// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Kraskov–Stögbauer–Grassberger mutual information
//!
//! Non-parametric estimate of I(X; Y) from N paired samples using distances
//! to the k-th nearest neighbour in the joint space (Kraskov, Stögbauer and
//! Grassberger, Phys. Rev. E 69, 066138, 2004).
//!
//! ## Algorithm
//!
//! 1. Build the Euclidean distance matrix of X and of Y.
//! 2. For every sample i, normalise both rows (see [`Scaling`]), combine them
//!    with the max-norm and locate the k nearest joint neighbours.
//! 3. Count nx(i), ny(i): samples within the marginal radii εx, εy, by
//!    default the largest X and Y distance among those neighbours (see
//!    [`Radius`](super::config::Radius)).
//! 4. Close the formula:
//!
//! Algorithm 2 (default):
//!
//! I = ψ(k) - 1/k - <ψ(nx) + ψ(ny)> + ψ(N)
//!
//! Algorithm 1:
//!
//! I = ψ(k) - <ψ(nx + 1) + ψ(ny + 1)> + ψ(N)
//!
//! The result is divided by ln(base) and floored at zero. Negative raw values
//! are a small-sample artifact of a quantity that cannot be negative.

use log::{debug, warn};
use ndarray::Array1;

use super::config::{Algorithm, DistanceStrategy, KsgConfig, Scaling};
use super::neighbours::{NeighbourCounts, RowSource};
use super::reducer::{self, PartialSum};
use crate::error::{KsgError, Result};
use crate::estimators::approaches::common_nd::dataset::{DistanceMatrix, SampleSet};
use crate::estimators::traits::{
    GlobalValue, LocalValues, MutualInformationEstimator, OptionalLocalValues,
};
use crate::estimators::utils::special::HarmonicDigamma;

/// Outcome of one estimation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiEstimate {
    /// Mutual information in the configured base, floored at zero.
    pub value: f64,
    /// Value before flooring; may be slightly negative for independent data.
    pub raw: f64,
    /// Rows of the X distances whose scale divisor was zero and replaced by 1.
    pub degenerate_x_rows: usize,
    /// Same for Y.
    pub degenerate_y_rows: usize,
}

/// KSG mutual information estimator for two paired sample collections.
///
/// Inputs are validated on construction, so evaluating the estimate cannot fail.
///
/// # Examples
///
/// ```
/// use ksg_mi::estimators::approaches::ksg::{KsgConfig, KsgMutualInformation};
/// use ksg_mi::estimators::GlobalValue;
/// use ndarray::Array1;
///
/// let x = Array1::linspace(0.0, 10.0, 100);
/// let y = x.mapv(f64::sin);
/// let est = KsgMutualInformation::new(x, y, KsgConfig::new(5)).unwrap();
/// assert!(est.global_value() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct KsgMutualInformation {
    x: SampleSet,
    y: SampleSet,
    config: KsgConfig,
}

impl KsgMutualInformation {
    pub fn new(x: impl Into<SampleSet>, y: impl Into<SampleSet>, config: KsgConfig) -> Result<Self> {
        let x = x.into();
        let y = y.into();
        config.validate()?;

        let n = x.n_samples();
        if n != y.n_samples() {
            return Err(KsgError::ShapeMismatch { x: n, y: y.n_samples() });
        }
        x.validate()?;
        y.validate()?;
        if n <= config.k {
            return Err(KsgError::InsufficientSamples { n, k: config.k });
        }

        Ok(Self { x, y, config })
    }

    pub fn n_samples(&self) -> usize {
        self.x.n_samples()
    }

    pub fn config(&self) -> &KsgConfig {
        &self.config
    }

    /// Run the estimator and return the value together with diagnostics.
    pub fn estimate(&self) -> MiEstimate {
        let n = self.n_samples();
        debug!(
            "KSG estimate: n={n}, k={}, dx={}, dy={}, {:?}",
            self.config.k,
            self.x.n_features(),
            self.y.n_features(),
            self.config
        );

        let table = HarmonicDigamma::up_to(n);
        let totals = self.with_rows(|rows| {
            reducer::reduce(n, &self.config.execution, |i| {
                let stats = rows.sample_statistics(i, &self.config);
                PartialSum {
                    psi: self.psi_terms(&table, stats.counts),
                    samples: 1,
                    degenerate_x: usize::from(stats.degenerate_x),
                    degenerate_y: usize::from(stats.degenerate_y),
                }
            })
        });
        debug!("reduced {} samples", totals.samples);

        self.report_degenerate(totals.degenerate_x, "x");
        self.report_degenerate(totals.degenerate_y, "y");

        let raw = self.close_formula(&table, totals.psi / n as f64);
        MiEstimate {
            value: raw.max(0.0),
            raw,
            degenerate_x_rows: totals.degenerate_x,
            degenerate_y_rows: totals.degenerate_y,
        }
    }

    /// Marginal neighbour counts (nx, ny) of every sample, in sample order.
    pub fn neighbour_counts(&self) -> Vec<NeighbourCounts> {
        self.with_rows(|rows| {
            reducer::map_collect(self.n_samples(), &self.config.execution, |i| {
                rows.sample_statistics(i, &self.config).counts
            })
        })
    }

    fn with_rows<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce(RowSource<'_>) -> R + Send,
    {
        let execution = &self.config.execution;
        reducer::install(execution, || match self.config.distances {
            DistanceStrategy::Precomputed => {
                let (dx, dy) = if execution.is_parallel() {
                    rayon::join(
                        || DistanceMatrix::from_samples_par(&self.x),
                        || DistanceMatrix::from_samples_par(&self.y),
                    )
                } else {
                    (DistanceMatrix::from_samples(&self.x), DistanceMatrix::from_samples(&self.y))
                };
                debug!("built {}x{} distance matrices", dx.n_samples(), dy.n_samples());
                f(RowSource::Precomputed { x: &dx, y: &dy })
            }
            DistanceStrategy::PerRow => f(RowSource::PerRow { x: &self.x, y: &self.y }),
        })
    }

    fn psi_terms(&self, table: &HarmonicDigamma, counts: NeighbourCounts) -> f64 {
        match self.config.algorithm {
            Algorithm::One => table.get(counts.nx + 1) + table.get(counts.ny + 1),
            Algorithm::Two => table.get(counts.nx) + table.get(counts.ny),
        }
    }

    /// Constant part of the formula, ψ(k) [- 1/k] + ψ(N), in nats.
    fn offset(&self, table: &HarmonicDigamma) -> f64 {
        let k = self.config.k;
        let psi_k = table.get(k);
        let psi_n = table.get(self.n_samples());
        match self.config.algorithm {
            Algorithm::One => psi_k + psi_n,
            Algorithm::Two => psi_k - 1.0 / k as f64 + psi_n,
        }
    }

    fn close_formula(&self, table: &HarmonicDigamma, mean_psi: f64) -> f64 {
        (self.offset(table) - mean_psi) / self.config.base.ln()
    }

    fn report_degenerate(&self, rows: usize, space: &str) {
        if rows > 0 && self.config.scaling != Scaling::None {
            warn!(
                "{rows} of {} {space}-distance rows had a zero {:?} divisor (duplicate samples?); used 1 instead",
                self.n_samples(),
                self.config.scaling
            );
        }
    }
}

/// Linfoot's informational coefficient of correlation, sqrt(1 - exp(-2 I)).
///
/// Maps a mutual information value in nats onto [0, 1). For a bivariate
/// Gaussian it recovers |ρ|. Negative inputs are treated as zero.
pub fn information_correlation(mi_nats: f64) -> f64 {
    (1.0 - (-2.0 * mi_nats.max(0.0)).exp()).sqrt()
}

impl GlobalValue for KsgMutualInformation {
    fn global_value(&self) -> f64 {
        self.estimate().value
    }
}

impl LocalValues for KsgMutualInformation {
    /// Per-sample contributions; their mean is the unfloored global estimate.
    fn local_values(&self) -> Array1<f64> {
        let n = self.n_samples();
        let table = HarmonicDigamma::up_to(n);
        let offset = self.offset(&table);
        let ln_base = self.config.base.ln();
        self.neighbour_counts()
            .into_iter()
            .map(|counts| (offset - self.psi_terms(&table, counts)) / ln_base)
            .collect()
    }
}

impl OptionalLocalValues for KsgMutualInformation {
    fn supports_local(&self) -> bool {
        true
    }

    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str> {
        Ok(self.local_values())
    }
}

impl MutualInformationEstimator for KsgMutualInformation {
    fn n_samples(&self) -> usize {
        self.x.n_samples()
    }

    fn raw_value(&self) -> f64 {
        self.estimate().raw
    }
}
