// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors raised while validating inputs for mutual information estimation.
///
/// Every variant is fatal for the estimation call that produced it; no partial
/// result is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KsgError {
    #[error("sample count mismatch: x has {x} observations, y has {y}")]
    ShapeMismatch { x: usize, y: usize },

    #[error("observation {index} has shape {found:?}, expected {expected:?}")]
    InconsistentObservationShape {
        index: usize,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("sample collection holds no observations")]
    NoObservations,

    #[error("observations must have at least one feature")]
    EmptyObservation,

    #[error("insufficient samples: need more than k = {k} observations, got {n}")]
    InsufficientSamples { n: usize, k: usize },

    #[error("number of neighbours k must be >= 1")]
    InvalidNeighbourCount,

    #[error("logarithm base must be finite, positive and != 1 (got {0})")]
    InvalidBase(f64),

    #[error("observation {index} contains a non-finite value")]
    NonFiniteSample { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

pub type Result<T> = std::result::Result<T, KsgError>;
