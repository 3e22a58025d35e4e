use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the explicit fallback entry in a locale-mapped replacement.
pub const DEFAULT_LOCALE_KEY: &str = "default";

fn default_true() -> bool {
    true
}

// ===== RULE DEFINITIONS =====
// These are the configuration-facing records. They are compiled into
// `rules::CompiledRule` before any text is touched.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMode {
    /// Literal substring swap, no capture interpolation
    #[default]
    Simple,
    /// Regex substitution with positional capture interpolation
    Complex,
}

impl RuleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleMode::Simple => "simple",
            RuleMode::Complex => "complex",
        }
    }
}

/// A value that is either shared by every locale or chosen per locale.
///
/// Lookup of a per-locale table tries the requested locale, then the
/// `default` entry. There is no other fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Localized<T> {
    Uniform(T),
    PerLocale(BTreeMap<String, T>),
}

pub type Replacement = Localized<String>;

impl<T> Localized<T> {
    pub fn resolve(&self, locale: &str) -> Option<&T> {
        match self {
            Localized::Uniform(value) => Some(value),
            Localized::PerLocale(table) => table
                .get(locale)
                .or_else(|| table.get(DEFAULT_LOCALE_KEY)),
        }
    }

    pub fn covers(&self, locale: &str) -> bool {
        self.resolve(locale).is_some()
    }

    pub fn is_locale_mapped(&self) -> bool {
        matches!(self, Localized::PerLocale(_))
    }

    /// All entries in a stable order; the uniform value has no locale key.
    pub fn entries(&self) -> Vec<(Option<&str>, &T)> {
        match self {
            Localized::Uniform(value) => vec![(None, value)],
            Localized::PerLocale(table) => table
                .iter()
                .map(|(locale, value)| (Some(locale.as_str()), value))
                .collect(),
        }
    }

    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<Localized<U>, E> {
        match self {
            Localized::Uniform(value) => Ok(Localized::Uniform(f(value)?)),
            Localized::PerLocale(table) => {
                let mut mapped = BTreeMap::new();
                for (locale, value) in table {
                    mapped.insert(locale.clone(), f(value)?);
                }
                Ok(Localized::PerLocale(mapped))
            }
        }
    }
}

impl Replacement {
    pub fn per_locale<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Localized::PerLocale(
            entries
                .into_iter()
                .map(|(locale, text)| (locale.to_string(), text.to_string()))
                .collect(),
        )
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Localized::Uniform(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Localized::Uniform(text)
    }
}

/// One configured rule. Unknown keys are rejected: a misspelled `mode` would
/// otherwise load a regex as a literal that never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    /// Optional label used in diagnostics and traces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Literal text (simple mode) or regular expression (complex mode)
    pub pattern: String,
    /// Template string or locale -> template table
    pub replacement: Replacement,
    #[serde(default)]
    pub mode: RuleMode,
    /// Rules sharing a family are checked against each other for shadowing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Disabled rules are dropped when the ruleset is compiled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RuleDefinition {
    pub fn simple(pattern: &str, replacement: impl Into<Replacement>) -> Self {
        Self::new(pattern, replacement.into(), RuleMode::Simple)
    }

    pub fn complex(pattern: &str, replacement: impl Into<Replacement>) -> Self {
        Self::new(pattern, replacement.into(), RuleMode::Complex)
    }

    fn new(pattern: &str, replacement: Replacement, mode: RuleMode) -> Self {
        Self {
            name: None,
            pattern: pattern.to_string(),
            replacement,
            mode,
            family: None,
            enabled: true,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn in_family(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Name if configured, otherwise `rule #<index>` for its position in the
    /// configured list.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("rule #{index}"),
        }
    }
}

// ===== NORMALIZATION OUTPUT =====

/// A rule that changed the text during one normalization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredRule {
    /// Position of the rule in the configured rule list
    pub index: usize,
    pub name: String,
    /// Number of non-overlapping occurrences replaced
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalization {
    pub text: String,
    /// Fired rules in application order
    pub fired: Vec<FiredRule>,
}

/// Normalized text together with the chunks handed to the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedSpeech {
    pub locale: String,
    pub text: String,
    pub fired: Vec<FiredRule>,
    pub chunks: Vec<String>,
}
