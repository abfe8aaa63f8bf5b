//! Helpers shared by the `sinew-core` integration suites.
#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use proptest::test_runner::Config as ProptestConfig;
use sinew_core::Connection;
use sinew_test_support::proptest_profile::ProptestRunProfile;

/// Builds the proptest configuration shared by the property suites.
#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Returns the `(pre, post)` pairs in emission order.
#[must_use]
pub fn pairs(connection: &Connection) -> Vec<(usize, usize)> {
    connection.edges().map(|edge| (edge.pre, edge.post)).collect()
}

/// Counts the edges arriving at each post index in `0..posts`.
#[must_use]
pub fn in_degrees(connection: &Connection, posts: usize) -> Vec<usize> {
    let mut degrees = vec![0; posts];
    for &post in connection.post_ids() {
        degrees[post] += 1;
    }
    degrees
}

/// Counts the edges leaving each pre index in `0..pres`.
#[must_use]
pub fn out_degrees(connection: &Connection, pres: usize) -> Vec<usize> {
    let mut degrees = vec![0; pres];
    for &pre in connection.pre_ids() {
        degrees[pre] += 1;
    }
    degrees
}
