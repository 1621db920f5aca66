// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ksg-mi
//!
//! Mutual information between two multivariate samples with the
//! Kraskov–Stögbauer–Grassberger (KSG) k-nearest-neighbour estimator.
//!
//! ## Quick Start
//!
//! ```rust
//! use ksg_mi::{estimate_mutual_information, KsgConfig};
//! use ndarray::Array1;
//!
//! let x = Array1::linspace(0.0, 10.0, 100);
//! let y = x.mapv(f64::sin);
//!
//! // Defaults: k = 5, nats, row-max scaling, algorithm 2
//! let mi = estimate_mutual_information(x, y, &KsgConfig::default()).unwrap();
//! assert!(mi > 0.0);
//! ```
//!
//! Observations may be scalars (`Array1`), vectors (`Array2`, one row per
//! observation) or tensors of any rank (`ArrayD`, axis 0 = observations).
//! X and Y may have different per-observation shapes.
//!
//! ## Configuration
//!
//! | Option | Choices | Default |
//! |--------|---------|---------|
//! | `k` | any `k >= 1` with `N > k` | 5 |
//! | `base` | e (nats), 2 (bits), ... | e |
//! | [`Scaling`] | `RowMax`, `RowStd`, `RowStdExcludingSelf`, `None` | `RowMax` |
//! | [`Counting`] | `Inclusive` (≤), `Strict` (<) | `Inclusive` |
//! | [`Algorithm`] | `One`, `Two` | `Two` |
//! | [`Radius`] | `Neighbourhood`, `Marginal`, `Joint` | `Neighbourhood` |
//! | [`Execution`] | `Serial`, `Parallel`, `Pool(Arc<ThreadPool>)` | `Serial` |
//! | [`DistanceStrategy`] | `Precomputed`, `PerRow` | `Precomputed` |
//!
//! ## Architecture
//!
//! 1. **Public API Layer**: [`estimate_mutual_information`] and the
//!    [`MutualInformation`](estimators::mutual_information::MutualInformation) factory
//! 2. **Estimator**: [`KsgMutualInformation`], neighbour statistics and the sample reducer
//! 3. **Core Infrastructure**: sample sets, distance matrices, digamma, shared traits
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: configuration and phase
//! boundaries at `debug`, rows whose scale divisor was zero at `warn`.

pub mod error;
pub mod estimators;

pub use error::{KsgError, Result};
pub use estimators::approaches::common_nd::dataset::{DistanceMatrix, SampleSet};
pub use estimators::approaches::ksg::{
    Algorithm, Counting, DistanceStrategy, Execution, KsgConfig, KsgMutualInformation, MiEstimate,
    Radius, Scaling, information_correlation,
};
pub use estimators::mutual_information::estimate_mutual_information;
pub use estimators::traits::{GlobalValue, LocalValues, OptionalLocalValues};
