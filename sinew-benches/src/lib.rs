//! Benchmark support crate for sinew.
//!
//! Provides the parameter labels, population fixtures and setup error used by
//! the Criterion benchmarks for the grid, decay and random generators.

pub mod error;
pub mod params;
