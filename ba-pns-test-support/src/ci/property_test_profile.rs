//! Property-test sizing shared by every suite.
//!
//! CI shortens or lengthens property runs through environment variables
//! instead of editing the suites.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const BA_PNS_PBT_FORK_ENV_KEY: &str = "BA_PNS_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides from the environment, keeping the suite's
    /// defaults for unset or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ba_pns_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_from_env(PROGTEST_CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: override_from_env(BA_PNS_PBT_FORK_ENV_KEY, parse_switch).unwrap_or(default_fork),
        }
    }

    /// Cases per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_from_env<T>(key: &'static str, parse: fn(&str) -> Result<T, String>) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse(&raw)
        .inspect_err(|reason| {
            tracing::warn!(env = key, raw = %raw, %reason, "ignoring malformed property-test override");
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("`{other}` is not a boolean switch")),
    }
}
