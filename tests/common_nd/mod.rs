//! Module containing tests for sample sets and distance matrices.
mod dataset_tests;
