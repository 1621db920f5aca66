// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Digamma function
//!
//! Two evaluators of ψ(x) = d/dx ln Γ(x):
//!
//! - [`digamma`]: general real argument x > 0 (Bernardo, Algorithm AS 103).
//!   Small arguments use the expansion ψ(x) ≈ -γ - 1/x + (π²/6)·x, moderate
//!   arguments are shifted upward with ψ(x) = ψ(x+1) - 1/x, and large arguments
//!   use the de Moivre asymptotic series.
//! - [`digamma_count`] and [`HarmonicDigamma`]: exact harmonic-sum identity
//!   ψ(n) = -γ + Σ_{j=1}^{n-1} 1/j for positive integer counts.
//!
//! Neither evaluator recurses, so arbitrarily large neighbour counts are safe.

/// Euler–Mascheroni constant γ.
pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// π²/6, the first derivative of ψ at 0⁺ after removing the pole.
const PI_SQUARED_OVER_6: f64 = 1.644_934_066_848_226_4;

const SMALL_ARGUMENT: f64 = 1e-6;
const ASYMPTOTIC_THRESHOLD: f64 = 8.5;

/// Digamma function for real x > 0.
///
/// # Panics
///
/// Panics if `x` is not finite or `x <= 0`. Neighbour counts fed into the KSG
/// estimator are always positive, so reaching this is a caller bug.
pub fn digamma(x: f64) -> f64 {
    assert!(
        x.is_finite() && x > 0.0,
        "digamma is only defined here for finite x > 0 (got {x})"
    );

    if x <= SMALL_ARGUMENT {
        return -EULER_GAMMA - 1.0 / x + PI_SQUARED_OVER_6 * x;
    }

    let mut x = x;
    let mut value = 0.0;
    while x < ASYMPTOTIC_THRESHOLD {
        value -= 1.0 / x;
        x += 1.0;
    }

    let r = 1.0 / x;
    value += x.ln() - 0.5 * r;
    let r = r * r;
    value
        - r * (1.0 / 12.0
            - r * (1.0 / 120.0 - r * (1.0 / 252.0 - r * (1.0 / 240.0 - r * (1.0 / 132.0)))))
}

/// Exact ψ(n) for a positive integer `n` via the harmonic sum.
///
/// # Panics
///
/// Panics if `n == 0`.
pub fn digamma_count(n: usize) -> f64 {
    assert!(n >= 1, "digamma of a neighbour count requires n >= 1");
    let mut value = -EULER_GAMMA;
    for j in 1..n {
        value += 1.0 / j as f64;
    }
    value
}

/// Precomputed ψ(1), ψ(2), …, ψ(max) built with one pass of the harmonic sum.
///
/// One estimation call looks up O(N) counts that are all bounded by N, so
/// building the table once keeps each lookup O(1).
#[derive(Debug, Clone)]
pub struct HarmonicDigamma {
    values: Vec<f64>,
}

impl HarmonicDigamma {
    /// Build the table for arguments `1..=max`.
    pub fn up_to(max: usize) -> Self {
        let mut values = Vec::with_capacity(max);
        let mut acc = -EULER_GAMMA;
        for n in 1..=max {
            values.push(acc);
            acc += 1.0 / n as f64;
        }
        Self { values }
    }

    /// Largest argument covered by the table.
    pub fn max(&self) -> usize {
        self.values.len()
    }

    /// ψ(n) for `1 <= n <= self.max()`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0` or `n` exceeds the table.
    pub fn get(&self, n: usize) -> f64 {
        assert!(n >= 1, "digamma of a neighbour count requires n >= 1");
        assert!(
            n <= self.values.len(),
            "digamma table covers 1..={} (requested {n})",
            self.values.len()
        );
        self.values[n - 1]
    }
}
