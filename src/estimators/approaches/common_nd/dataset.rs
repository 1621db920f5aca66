// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Axis};

use crate::error::{KsgError, Result};

/// Collection of N observations of one random variable, flattened to (N, F).
///
/// Each observation may be a scalar, a vector or any higher-rank tensor (an
/// image, a 3D field, ...). Distances only ever look at the flattened feature
/// vector, so the original per-observation shape is kept for reporting only.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    data: Array2<f64>,
    observation_shape: Vec<usize>,
}

impl SampleSet {
    /// One scalar observation per element.
    pub fn from_array1(data: Array1<f64>) -> Self {
        Self {
            data: data.insert_axis(Axis(1)),
            observation_shape: Vec::new(),
        }
    }

    /// Rows are observations, columns are features.
    pub fn from_array2(data: Array2<f64>) -> Self {
        let observation_shape = vec![data.ncols()];
        Self { data, observation_shape }
    }

    /// Axis 0 indexes observations; every trailing axis is flattened.
    ///
    /// A 0-d array has no observation axis and yields a set without
    /// observations, which [`SampleSet::validate`] rejects.
    pub fn from_array_dyn(data: ArrayD<f64>) -> Self {
        if data.ndim() == 0 {
            return Self {
                data: Array2::zeros((0, 1)),
                observation_shape: Vec::new(),
            };
        }
        let n = data.shape()[0];
        let observation_shape = data.shape()[1..].to_vec();
        let n_features: usize = observation_shape.iter().product();
        // `iter` walks in logical row-major order whatever the memory layout
        let flat: Vec<f64> = data.iter().copied().collect();
        let data = Array2::from_shape_fn((n, n_features), |(i, j)| flat[i * n_features + j]);
        Self { data, observation_shape }
    }

    /// Stack individually supplied observations, which must all share one shape.
    pub fn from_observations(observations: &[ArrayD<f64>]) -> Result<Self> {
        let Some(first) = observations.first() else {
            return Ok(Self {
                data: Array2::zeros((0, 1)),
                observation_shape: Vec::new(),
            });
        };
        let expected = first.shape().to_vec();
        for (index, obs) in observations.iter().enumerate().skip(1) {
            if obs.shape() != expected.as_slice() {
                return Err(KsgError::InconsistentObservationShape {
                    index,
                    expected,
                    found: obs.shape().to_vec(),
                });
            }
        }

        let n_features = first.len();
        let mut data = Array2::zeros((observations.len(), n_features));
        for (mut row, obs) in data.axis_iter_mut(Axis(0)).zip(observations) {
            row.iter_mut().zip(obs.iter()).for_each(|(dst, &src)| *dst = src);
        }
        Ok(Self { data, observation_shape: expected })
    }

    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Flattened size F of a single observation.
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn observation_shape(&self) -> &[usize] {
        &self.observation_shape
    }

    /// Return a view of the dataset as a 2D array (samples x flattened features)
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Check that there are observations and that they are non-empty and finite.
    pub fn validate(&self) -> Result<()> {
        if self.n_samples() == 0 {
            return Err(KsgError::NoObservations);
        }
        if self.n_features() == 0 {
            return Err(KsgError::EmptyObservation);
        }
        for (index, row) in self.data.axis_iter(Axis(0)).enumerate() {
            if !row.iter().all(|v| v.is_finite()) {
                return Err(KsgError::NonFiniteSample { index });
            }
        }
        Ok(())
    }

    /// Euclidean distances from observation `i` to every observation (self included, = 0).
    ///
    /// Computed as a single broadcast subtraction over the whole collection.
    pub fn distance_row(&self, i: usize) -> Array1<f64> {
        let diff = &self.data - &self.data.row(i);
        diff.rows().into_iter().map(euclidean_norm).collect()
    }
}

/// ‖v‖₂ computed as s·‖v/s‖₂ with s = max |vᵢ|, so squaring neither
/// overflows for huge components nor underflows for tiny ones.
fn euclidean_norm(v: ArrayView1<'_, f64>) -> f64 {
    let scale = v.fold(0.0_f64, |acc, &d| acc.max(d.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let sum_sq = v.fold(0.0, |acc, &d| {
        let r = d / scale;
        acc + r * r
    });
    sum_sq.sqrt() * scale
}

impl From<Array1<f64>> for SampleSet {
    fn from(array: Array1<f64>) -> Self {
        SampleSet::from_array1(array)
    }
}

impl From<Array2<f64>> for SampleSet {
    fn from(array: Array2<f64>) -> Self {
        SampleSet::from_array2(array)
    }
}

impl From<ArrayD<f64>> for SampleSet {
    fn from(array: ArrayD<f64>) -> Self {
        SampleSet::from_array_dyn(array)
    }
}

/// N×N matrix of pairwise Euclidean distances within one feature space.
///
/// Symmetric with a zero diagonal by construction. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    values: Array2<f64>,
}

impl DistanceMatrix {
    /// Build the full matrix one broadcast row at a time.
    pub fn from_samples(samples: &SampleSet) -> Self {
        let n = samples.n_samples();
        let mut values = Array2::zeros((n, n));
        for (i, mut row) in values.axis_iter_mut(Axis(0)).enumerate() {
            row.assign(&samples.distance_row(i));
        }
        Self { values }
    }

    /// Same as [`DistanceMatrix::from_samples`], filling rows on the current rayon pool.
    pub fn from_samples_par(samples: &SampleSet) -> Self {
        let n = samples.n_samples();
        let mut values = Array2::zeros((n, n));
        values
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut row)| row.assign(&samples.distance_row(i)));
        Self { values }
    }

    pub fn n_samples(&self) -> usize {
        self.values.nrows()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }
}
