//! Error types for rule table construction.
//!
//! Segmentation itself never fails; only building a [`crate::RuleSet`] from
//! user-supplied patterns can.

use thiserror::Error;

use crate::types::NumeralKind;

/// Errors raised while compiling or loading a rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern is not a valid regular expression.
    #[error("Invalid pattern for {kind} rule: {source}")]
    InvalidPattern {
        kind: NumeralKind,
        #[source]
        source: regex::Error,
    },

    /// The pattern lacks the numeral and remainder capture groups.
    #[error("Pattern for {kind} rule has {found} capture group(s), expected at least 2: {pattern}")]
    MissingCaptureGroups {
        kind: NumeralKind,
        pattern: String,
        found: usize,
    },

    /// A rule table must contain at least one rule.
    #[error("Rule table is empty")]
    EmptyRuleSet,

    /// Rule file could not be parsed.
    #[error("Rule file parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
