//! Shared test utilities used across sinew crates.

pub mod proptest_profile;
pub mod tracing;
