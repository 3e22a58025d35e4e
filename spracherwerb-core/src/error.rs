//! Error types for text normalization.
//!
//! Two classes exist: configuration errors, raised while a ruleset is being
//! loaded and compiled, and resolution errors, raised per call when a rule
//! has no replacement for the requested locale.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NormalizeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A rule definition is malformed: bad regex, bad capture reference,
    /// empty pattern, shadowed by an earlier rule, or missing a served locale.
    #[error("Configuration error in rule #{index} ({rule}): {reason}")]
    Configuration {
        index: usize,
        rule: String,
        reason: String,
    },

    /// A ruleset-level setting is invalid (not tied to a single rule).
    #[error("Configuration error in setting '{setting}': {reason}")]
    InvalidSetting { setting: String, reason: String },

    /// A locale-mapped rule has neither an entry for the locale nor a `default` entry.
    #[error("Rule #{index} ({rule}) has no replacement for locale '{locale}' and no 'default' entry")]
    Resolution {
        index: usize,
        rule: String,
        locale: String,
    },
}

impl NormalizeError {
    pub(crate) fn configuration(index: usize, rule: &str, reason: impl Into<String>) -> Self {
        NormalizeError::Configuration {
            index,
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }

    /// True for load-time failures. A ruleset that produced one of these was never built.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NormalizeError::Configuration { .. } | NormalizeError::InvalidSetting { .. }
        )
    }

    /// Resolution errors are per call; the caller may retry with another locale
    /// or skip synthesis for that utterance. Configuration errors are fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NormalizeError::Resolution { .. })
    }

    /// Index of the offending rule in the configured rule list, if any.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            NormalizeError::Configuration { index, .. }
            | NormalizeError::Resolution { index, .. } => Some(*index),
            NormalizeError::InvalidSetting { .. } => None,
        }
    }
}
