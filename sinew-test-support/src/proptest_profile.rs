//! Environment-driven property-test tuning.
//!
//! CI raises the case count on nightly runs and local developers lower it
//! while iterating; every property suite reads the same two variables.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "SINEW_PBT_CASES";
/// Environment variable enabling forked execution of proptest cases.
pub const FORK_ENV_KEY: &str = "SINEW_PBT_FORK";

/// Resolved case count and fork flag for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides from the process environment.
    ///
    /// Unparseable overrides are reported with a `warn!` event and ignored.
    ///
    /// # Examples
    /// ```
    /// use sinew_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Resolves the profile through `lookup` instead of the environment.
    #[must_use]
    pub fn from_lookup(
        default_cases: u32,
        default_fork: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            cases: override_or(&lookup, CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(&lookup, FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn override_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    parse: fn(&str) -> Option<T>,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    parse(raw.trim()).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn profile(cases: Option<&str>, fork: Option<&str>) -> ProptestRunProfile {
        ProptestRunProfile::from_lookup(64, false, |key| match key {
            CASES_ENV_KEY => cases.map(str::to_owned),
            FORK_ENV_KEY => fork.map(str::to_owned),
            _ => None,
        })
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(profile(None, None), ProptestRunProfile { cases: 64, fork: false });
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn accepts_case_overrides(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(profile(Some(raw), None).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("lots")]
    fn ignores_invalid_case_overrides(#[case] raw: &str) {
        assert_eq!(profile(Some(raw), None).cases(), 64);
    }

    #[rstest]
    #[case("TRUE", true)]
    #[case("on", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("maybe", false)]
    fn reads_fork_flag(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(profile(None, Some(raw)).fork(), expected);
    }
}
