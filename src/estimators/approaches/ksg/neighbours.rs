// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-sample neighbour statistics under the max-combined metric.
//!
//! For sample i the scaled X and Y rows (self removed) are combined pointwise
//! with `max`, the k closest joint neighbours are located, and the number of
//! samples inside the marginal radii εx, εy is counted in each space. The
//! radii come from those neighbours as selected by [`Radius`].
//!
//! Equidistant joint neighbours are ordered as a stable ascending sort would
//! order them: the lower sample index wins. Which of several tied samples
//! becomes the k-th neighbour can change εx and εy, so ties are a known source
//! of estimator variance between implementations.

use ndarray::{Array1, ArrayView1, Zip};

use super::config::{Counting, KsgConfig, Radius};
use super::scaling::scale_row;
use crate::estimators::approaches::common_nd::dataset::{DistanceMatrix, SampleSet};

/// Marginal neighbour counts of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourCounts {
    pub nx: usize,
    pub ny: usize,
}

/// Counts of one sample plus whether either row needed the unit-divisor fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleStatistics {
    pub counts: NeighbourCounts,
    pub degenerate_x: bool,
    pub degenerate_y: bool,
}

/// Where the distance rows for a sample come from.
#[derive(Debug, Clone, Copy)]
pub enum RowSource<'a> {
    Precomputed {
        x: &'a DistanceMatrix,
        y: &'a DistanceMatrix,
    },
    PerRow {
        x: &'a SampleSet,
        y: &'a SampleSet,
    },
}

impl RowSource<'_> {
    pub fn n_samples(&self) -> usize {
        match self {
            RowSource::Precomputed { x, .. } => x.n_samples(),
            RowSource::PerRow { x, .. } => x.n_samples(),
        }
    }

    /// Neighbour statistics of sample `i`.
    pub fn sample_statistics(&self, i: usize, config: &KsgConfig) -> SampleStatistics {
        match self {
            RowSource::Precomputed { x, y } => sample_statistics(x.row(i), y.row(i), i, config),
            RowSource::PerRow { x, y } => {
                let dx = x.distance_row(i);
                let dy = y.distance_row(i);
                sample_statistics(dx.view(), dy.view(), i, config)
            }
        }
    }
}

/// Neighbour statistics of sample `i` from its full X and Y distance rows.
pub fn sample_statistics(
    dx_row: ArrayView1<'_, f64>,
    dy_row: ArrayView1<'_, f64>,
    i: usize,
    config: &KsgConfig,
) -> SampleStatistics {
    let x = scale_row(dx_row, i, config.scaling);
    let y = scale_row(dy_row, i, config.scaling);

    let joint: Array1<f64> = Zip::from(&x.values)
        .and(&y.values)
        .map_collect(|&a, &b| a.max(b));
    let nearest = k_nearest(joint.view(), config.k);
    let j = nearest[config.k - 1];

    let (eps_x, eps_y) = match config.radius {
        Radius::Neighbourhood => nearest.iter().fold((0.0_f64, 0.0_f64), |(ex, ey), &m| {
            (ex.max(x.values[m]), ey.max(y.values[m]))
        }),
        Radius::Marginal => (x.values[j], y.values[j]),
        Radius::Joint => (joint[j], joint[j]),
    };

    SampleStatistics {
        counts: NeighbourCounts {
            nx: count_within(x.values.view(), eps_x, config.counting),
            ny: count_within(y.values.view(), eps_y, config.counting),
        },
        degenerate_x: x.degenerate,
        degenerate_y: y.degenerate,
    }
}

/// Position of the k-th smallest entry (1-indexed rank) of `dists`.
///
/// Uses an O(N) selection under the total order (distance, position), which
/// picks exactly the element a stable ascending sort would put at rank k.
///
/// # Panics
///
/// Panics unless `1 <= k <= dists.len()`.
pub fn kth_neighbour(dists: ArrayView1<'_, f64>, k: usize) -> usize {
    k_nearest(dists, k)[k - 1]
}

/// Positions of the `k` smallest entries of `dists`; the last one is the
/// k-th neighbour, the others come in no particular order.
///
/// # Panics
///
/// Panics unless `1 <= k <= dists.len()`.
pub fn k_nearest(dists: ArrayView1<'_, f64>, k: usize) -> Vec<usize> {
    assert!(
        k >= 1 && k <= dists.len(),
        "k must be in 1..={} (got {k})",
        dists.len()
    );
    let mut order: Vec<usize> = (0..dists.len()).collect();
    order.select_nth_unstable_by(k - 1, |&a, &b| {
        dists[a].total_cmp(&dists[b]).then(a.cmp(&b))
    });
    order.truncate(k);
    order
}

/// Number of entries of `dists` within `eps` under the given comparison.
pub fn count_within(dists: ArrayView1<'_, f64>, eps: f64, counting: Counting) -> usize {
    match counting {
        Counting::Inclusive => dists.iter().filter(|&&d| d <= eps).count(),
        Counting::Strict => dists.iter().filter(|&&d| d < eps).count(),
    }
}
