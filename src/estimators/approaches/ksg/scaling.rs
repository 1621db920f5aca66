// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row-wise normalisation of marginal distances.
//!
//! X-space and Y-space distances may live in unrelated units and
//! dimensionalities. Each row is normalised independently so that the
//! pointwise maximum defining the joint metric compares like with like.

use ndarray::{Array1, ArrayView1};

use super::config::Scaling;

/// One distance row with the self-entry removed, after scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledRow {
    pub values: Array1<f64>,
    /// The divisor was zero (or not finite) and was replaced by 1.
    pub degenerate: bool,
}

/// Remove entry `self_index` from `row` and normalise the rest according to `scaling`.
///
/// `row` is the full distance row of sample `self_index`, so `row[self_index] == 0`.
pub fn scale_row(row: ArrayView1<'_, f64>, self_index: usize, scaling: Scaling) -> ScaledRow {
    let others = without_index(row, self_index);
    if scaling == Scaling::None {
        return ScaledRow { values: others, degenerate: false };
    }

    // The row maximum is divided out first, so the spread below is taken over
    // values in [0, 1] and stays finite for distances near the f64 limits.
    let peak = others.fold(0.0_f64, |acc, &d| acc.max(d));
    if !usable_divisor(peak) {
        return ScaledRow { values: others, degenerate: true };
    }
    let unit = others.mapv(|d| d / peak);

    let spread = match scaling {
        Scaling::RowStd => row.mapv(|d| d / peak).std(0.0),
        Scaling::RowStdExcludingSelf => unit.std(0.0),
        Scaling::RowMax | Scaling::None => return ScaledRow { values: unit, degenerate: false },
    };
    if !usable_divisor(spread) {
        return ScaledRow { values: others, degenerate: true };
    }
    ScaledRow {
        values: unit.mapv_into(|d| d / spread),
        degenerate: false,
    }
}

fn usable_divisor(divisor: f64) -> bool {
    divisor.is_finite() && divisor > 0.0
}

fn without_index(row: ArrayView1<'_, f64>, index: usize) -> Array1<f64> {
    row.iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .map(|(_, &d)| d)
        .collect()
}
