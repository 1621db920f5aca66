// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// k-nearest-neighbour (KSG) mutual information: configuration, row scaling,
// neighbour statistics, the sample reducer and the estimator itself.

pub mod config;
pub mod estimator;
pub mod neighbours;
pub mod reducer;
pub mod scaling;

pub use config::{Algorithm, Counting, DistanceStrategy, Execution, KsgConfig, Radius, Scaling};
pub use estimator::{KsgMutualInformation, MiEstimate, information_correlation};
pub use neighbours::NeighbourCounts;
