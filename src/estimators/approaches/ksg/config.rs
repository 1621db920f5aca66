// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::sync::Arc;

use rayon::ThreadPool;

use crate::error::{KsgError, Result};

/// How each marginal distance row is normalised before the max-combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    /// Divide by the largest distance in the row (self excluded).
    #[default]
    RowMax,
    /// Divide by the population standard deviation of the row, counting the
    /// zero self-distance as one of the entries.
    RowStd,
    /// Divide by the population standard deviation of the row without the
    /// self-distance.
    RowStdExcludingSelf,
    /// Use raw Euclidean distances.
    None,
}

/// Comparison used when counting marginal neighbours against the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Counting {
    /// `d <= eps`; the k-th neighbour itself is always counted, so counts are >= 1.
    #[default]
    Inclusive,
    /// `d < eps`; counts may be zero.
    Strict,
}

/// KSG closed form used to turn neighbour counts into an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// I = ψ(k) - <ψ(nx + 1) + ψ(ny + 1)> + ψ(N)
    One,
    /// I = ψ(k) - 1/k - <ψ(nx) + ψ(ny)> + ψ(N)
    #[default]
    Two,
}

/// Source of the counting radius in each marginal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radius {
    /// Largest X and largest Y distance among the k nearest joint neighbours
    /// (εx, εy of Kraskov et al. algorithm 2). Guarantees nx, ny >= k.
    #[default]
    Neighbourhood,
    /// The k-th joint neighbour's own X and Y distances. Counts can fall
    /// below k, which biases independent samples upward.
    Marginal,
    /// The joint distance to the k-th neighbour, shared by both spaces.
    Joint,
}

/// Whether distance rows come from precomputed matrices or are rebuilt per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceStrategy {
    /// Build both N×N matrices once and share them read-only.
    #[default]
    Precomputed,
    /// Compute only row i of each space when sample i is processed; O(N)
    /// memory per worker at the price of computing each distance twice.
    PerRow,
}

/// Execution context for the per-sample map-reduce.
#[derive(Clone, Default)]
pub enum Execution {
    #[default]
    Serial,
    /// Rayon's global thread pool.
    Parallel,
    /// A caller-owned pool; its lifetime is managed outside the estimator.
    Pool(Arc<ThreadPool>),
}

impl Execution {
    pub fn is_parallel(&self) -> bool {
        !matches!(self, Execution::Serial)
    }
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Serial => f.write_str("Serial"),
            Execution::Parallel => f.write_str("Parallel"),
            Execution::Pool(pool) => write!(f, "Pool({} threads)", pool.current_num_threads()),
        }
    }
}

/// Parameters of the KSG estimator.
///
/// Defaults: k = 5, natural logarithm (nats), row-max scaling, inclusive
/// counting with algorithm 2 and neighbourhood radii, serial execution over
/// precomputed distance matrices.
#[derive(Debug, Clone)]
pub struct KsgConfig {
    pub k: usize,
    pub base: f64,
    pub scaling: Scaling,
    pub counting: Counting,
    pub algorithm: Algorithm,
    pub radius: Radius,
    pub execution: Execution,
    pub distances: DistanceStrategy,
}

impl Default for KsgConfig {
    fn default() -> Self {
        Self {
            k: 5,
            base: std::f64::consts::E,
            scaling: Scaling::default(),
            counting: Counting::default(),
            algorithm: Algorithm::default(),
            radius: Radius::default(),
            execution: Execution::default(),
            distances: DistanceStrategy::default(),
        }
    }
}

impl KsgConfig {
    pub fn new(k: usize) -> Self {
        Self { k, ..Self::default() }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_counting(mut self, counting: Counting) -> Self {
        self.counting = counting;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_radius(mut self, radius: Radius) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Run on a caller-supplied rayon pool.
    pub fn with_thread_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.execution = Execution::Pool(pool);
        self
    }

    pub fn with_distances(mut self, distances: DistanceStrategy) -> Self {
        self.distances = distances;
        self
    }

    /// Shorthand for the reference "algorithm 1" setup: strict counts against the joint radius.
    pub fn algorithm_one(self) -> Self {
        self.with_algorithm(Algorithm::One)
            .with_counting(Counting::Strict)
            .with_radius(Radius::Joint)
    }

    /// Check parameters that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(KsgError::InvalidNeighbourCount);
        }
        if !self.base.is_finite() || self.base <= 0.0 || self.base == 1.0 {
            return Err(KsgError::InvalidBase(self.base));
        }
        if self.algorithm == Algorithm::Two && self.counting == Counting::Strict {
            return Err(KsgError::InvalidConfiguration(
                "algorithm 2 evaluates ψ(n) directly and needs inclusive counts (n >= 1)",
            ));
        }
        Ok(())
    }
}
