// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Common N-D sample containers and distance matrices shared by the kNN estimators

pub mod dataset;
