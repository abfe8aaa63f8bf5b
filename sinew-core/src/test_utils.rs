//! Shared test utilities for `sinew-core`.

use proptest::test_runner::Config as ProptestConfig;
use sinew_test_support::proptest_profile::ProptestRunProfile;

/// Builds the proptest configuration shared by the in-crate property suites.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}
