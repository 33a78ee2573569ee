//! Supported testing-framework idioms.
//!
//! Per-framework behavior is a fixed set of variants sharing one extraction
//! contract: each variant supplies a marker-recognition table (which
//! identifiers open suites, open tests, skip, and so on) consumed by the
//! shared traversal + suite-stack algorithm in [`extract`].

mod extract;

pub use extract::extract;

use crate::errors::{Result, ScanError};

/// A framework idiom the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    /// BDD call style: `describe`/`context` suites, `it`/`test` tests.
    Mocha,
    /// Mocha's shape plus `test.todo` and `.each(...)` data-driven tests.
    Jest,
    /// Scenario call style: `Feature`/`Scenario`, `xScenario`,
    /// `Data(...).Scenario(...)`.
    Codecept,
}

impl Framework {
    /// Maps a user-supplied framework name to a variant. Mocha-compatible
    /// runners (cypress, webdriverio, jasmine, ...) share the BDD tables.
    /// An unrecognized name is an error rather than a silent guess.
    pub fn from_name(name: &str) -> Result<Framework> {
        match name.to_lowercase().as_str() {
            "mocha" | "cypress" | "cypress.io" | "cypressio" | "webdriverio"
            | "webdriverio-mocha" | "jasmine" | "protractor" => Ok(Framework::Mocha),
            "jest" | "jestio" | "playwright" => Ok(Framework::Jest),
            "codecept" | "codeceptjs" => Ok(Framework::Codecept),
            _ => Err(ScanError::UnknownFramework {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Framework::Mocha => "mocha",
            Framework::Jest => "jest",
            Framework::Codecept => "codeceptjs",
        }
    }

    pub(crate) fn markers(&self) -> &'static MarkerTable {
        match self {
            Framework::Mocha => &MOCHA,
            Framework::Jest => &JEST,
            Framework::Codecept => &CODECEPT,
        }
    }
}

/// Marker identifiers recognized by one framework variant.
pub(crate) struct MarkerTable {
    /// Calls that open a suite when given a string-literal title.
    pub suites: &'static [&'static str],
    /// Calls that declare a test.
    pub tests: &'static [&'static str],
    /// Calls that declare an already-skipped test (e.g. `xScenario`).
    pub skipped_tests: &'static [&'static str],
    /// Receivers whose `.only` member is the fatal exclusivity marker.
    pub exclusive: &'static [&'static str],
    /// Receivers of scenario-style data-driven chains
    /// (`Data(...).Scenario(...)`).
    pub data: &'static [&'static str],
    /// Whether `<test>.todo("...")` counts as a skipped test.
    pub todo: bool,
    /// Whether `<marker>.each(table)("title", fn)` declarations exist.
    pub each: bool,
    /// Flat suites: a suite call is a standalone statement scoping
    /// everything until the next suite call, not a callback span.
    pub flat_suites: bool,
}

static MOCHA: MarkerTable = MarkerTable {
    suites: &["describe", "context"],
    tests: &["it", "test", "specify"],
    skipped_tests: &[],
    exclusive: &["describe", "context", "it", "test", "specify"],
    data: &[],
    todo: false,
    each: false,
    flat_suites: false,
};

static JEST: MarkerTable = MarkerTable {
    suites: &["describe"],
    tests: &["it", "test"],
    skipped_tests: &[],
    exclusive: &["describe", "it", "test"],
    data: &[],
    todo: true,
    each: true,
    flat_suites: false,
};

static CODECEPT: MarkerTable = MarkerTable {
    suites: &["Feature"],
    tests: &["Scenario"],
    skipped_tests: &["xScenario"],
    exclusive: &["Scenario", "Data"],
    data: &["Data"],
    todo: false,
    each: false,
    flat_suites: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_resolve_to_their_variant() {
        assert_eq!(Framework::from_name("Mocha").unwrap(), Framework::Mocha);
        assert_eq!(Framework::from_name("cypress").unwrap(), Framework::Mocha);
        assert_eq!(Framework::from_name("jasmine").unwrap(), Framework::Mocha);
        assert_eq!(Framework::from_name("jestio").unwrap(), Framework::Jest);
        assert_eq!(Framework::from_name("playwright").unwrap(), Framework::Jest);
        assert_eq!(
            Framework::from_name("codeceptjs").unwrap(),
            Framework::Codecept
        );
    }

    #[test]
    fn misspelled_framework_is_rejected() {
        let err = Framework::from_name("jets").unwrap_err();
        assert!(matches!(err, ScanError::UnknownFramework { ref name } if name == "jets"));
    }
}
