// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Map-reduce over sample indices.
//!
//! Every sample is processed independently against read-only inputs, so
//! partial sums can be produced by any number of workers and combined in any
//! order. The pool is chosen by [`Execution`]; nothing is spun up here.

use rayon::prelude::*;

use super::config::Execution;

/// Running totals over a subset of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialSum {
    /// Σ ψ-terms of the marginal counts.
    pub psi: f64,
    pub samples: usize,
    pub degenerate_x: usize,
    pub degenerate_y: usize,
}

impl PartialSum {
    pub fn merge(self, other: Self) -> Self {
        Self {
            psi: self.psi + other.psi,
            samples: self.samples + other.samples,
            degenerate_x: self.degenerate_x + other.degenerate_x,
            degenerate_y: self.degenerate_y + other.degenerate_y,
        }
    }
}

/// Map every index in `0..n` through `map` and add up the partial sums.
pub fn reduce<F>(n: usize, execution: &Execution, map: F) -> PartialSum
where
    F: Fn(usize) -> PartialSum + Sync + Send,
{
    match execution {
        Execution::Serial => (0..n).map(map).fold(PartialSum::default(), PartialSum::merge),
        Execution::Parallel => par_reduce(n, map),
        Execution::Pool(pool) => pool.install(|| par_reduce(n, map)),
    }
}

fn par_reduce<F>(n: usize, map: F) -> PartialSum
where
    F: Fn(usize) -> PartialSum + Sync + Send,
{
    (0..n)
        .into_par_iter()
        .map(map)
        .reduce(PartialSum::default, PartialSum::merge)
}

/// Map every index in `0..n` and keep the results in index order.
pub fn map_collect<T, F>(n: usize, execution: &Execution, map: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    match execution {
        Execution::Serial => (0..n).map(map).collect(),
        Execution::Parallel => (0..n).into_par_iter().map(map).collect(),
        Execution::Pool(pool) => pool.install(|| (0..n).into_par_iter().map(map).collect()),
    }
}

/// Run `op` inside the configured pool so nested rayon work lands there.
pub fn install<R, OP>(execution: &Execution, op: OP) -> R
where
    R: Send,
    OP: FnOnce() -> R + Send,
{
    match execution {
        Execution::Pool(pool) => pool.install(op),
        Execution::Serial | Execution::Parallel => op(),
    }
}
