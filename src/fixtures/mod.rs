//! Fixtures
//!
//! Load rule sets from YAML files so a discount policy can be configured without
//! recompiling.

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{fixtures::rules::RuleSetFixture, rules::RuleSet};

pub mod rules;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid percentage format or a rate outside 0%-100%
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    /// Invalid amount format or a negative amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Month outside 1-12
    #[error("Invalid month {month} in season {season}")]
    InvalidMonth {
        /// Season name
        season: String,

        /// Offending month
        month: i8,
    },

    /// Two rules share a name
    #[error("Duplicate rule name: {0}")]
    DuplicateRule(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a new fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load the rule set `<base>/rules/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or contains invalid rules.
    pub fn load_rules(&self, name: &str) -> Result<RuleSet, FixtureError> {
        let file_path = self.base_path.join("rules").join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "loading rule set");

        rules_from_path(file_path)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a rule set from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or contains invalid rules.
pub fn rules_from_path(path: impl Into<PathBuf>) -> Result<RuleSet, FixtureError> {
    let contents = fs::read_to_string(path.into())?;

    rules_from_str(&contents)
}

/// Parse a rule set from YAML.
///
/// # Errors
///
/// Returns an error if the YAML cannot be parsed or contains invalid rules.
pub fn rules_from_str(yaml: &str) -> Result<RuleSet, FixtureError> {
    let fixture: RuleSetFixture = serde_norway::from_str(yaml)?;

    RuleSet::try_from(fixture)
}
