use crate::error::Result;
use crate::types::{FiredRule, Normalization, RuleDefinition};

use super::compiled::CompiledRule;
use super::validation::{RuleSetValidator, ValidationOptions};

/// An ordered, immutable sequence of compiled rules.
///
/// Rules run strictly in the configured order, each one over the text left by
/// the previous one. The engine never reorders rules; getting longer patterns
/// ahead of their prefixes is the ruleset author's job (and is checked for
/// literal rules when the set is compiled).
///
/// A `RuleSet` holds no interior mutability, so one instance can be shared
/// across threads and used by concurrent `normalize` calls without locking.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile with the default checks (ordering on, no served locales).
    pub fn compile(definitions: &[RuleDefinition]) -> Result<Self> {
        Self::compile_with(definitions, &ValidationOptions::default())
    }

    /// Compile and validate every enabled definition. Either the whole set is
    /// built or an error is returned; there is no partially loaded ruleset.
    pub fn compile_with(definitions: &[RuleDefinition], options: &ValidationOptions) -> Result<Self> {
        let enabled: Vec<(usize, &RuleDefinition)> = definitions
            .iter()
            .enumerate()
            .filter(|(_, definition)| definition.enabled)
            .collect();

        let rules = enabled
            .iter()
            .map(|(index, definition)| CompiledRule::compile(*index, definition))
            .collect::<Result<Vec<_>>>()?;

        RuleSetValidator::new(options).validate(&enabled).into_result()?;

        Ok(Self { rules })
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Apply every rule in order and return the final text.
    pub fn normalize(&self, text: &str, locale: &str) -> Result<String> {
        self.run(text, locale, None)
    }

    /// Like `normalize`, also reporting which rules changed the text.
    pub fn normalize_with_trace(&self, text: &str, locale: &str) -> Result<Normalization> {
        let mut fired = Vec::new();
        let text = self.run(text, locale, Some(&mut fired))?;
        Ok(Normalization { text, fired })
    }

    fn run(&self, text: &str, locale: &str, mut fired: Option<&mut Vec<FiredRule>>) -> Result<String> {
        let mut current = text.to_string();

        for rule in &self.rules {
            if let Some(rewrite) = rule.apply(&current, locale)? {
                if let Some(fired) = fired.as_deref_mut() {
                    fired.push(FiredRule {
                        index: rule.index(),
                        name: rule.name().to_string(),
                        matches: rewrite.matches,
                    });
                }
                current = rewrite.text;
            }
        }

        Ok(current)
    }
}

/// Normalize `text` for `locale` with `ruleset`.
pub fn normalize(text: &str, locale: &str, ruleset: &RuleSet) -> Result<String> {
    ruleset.normalize(text, locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;
    use crate::types::Replacement;

    #[test]
    fn test_rules_compose_sequentially() {
        // The second rule only matches text produced by the first.
        let ruleset = RuleSet::compile(&[
            RuleDefinition::simple("&", " and "),
            RuleDefinition::complex(r"\band\b", "und"),
        ])
        .unwrap();
        assert_eq!(ruleset.normalize("A&B", "de").unwrap(), "A und B");
    }

    #[test]
    fn test_disabled_rules_are_skipped_but_keep_indices() {
        let ruleset = RuleSet::compile(&[
            RuleDefinition::simple("a", "b").disabled(),
            RuleDefinition::simple("x", "y").named("x-to-y"),
        ])
        .unwrap();
        assert_eq!(ruleset.len(), 1);
        let trace = ruleset.normalize_with_trace("xax", "en").unwrap();
        assert_eq!(trace.text, "yay");
        assert_eq!(
            trace.fired,
            vec![FiredRule {
                index: 1,
                name: "x-to-y".to_string(),
                matches: 2,
            }]
        );
    }

    #[test]
    fn test_unnamed_rule_traced_by_index() {
        let ruleset = RuleSet::compile(&[
            RuleDefinition::simple("x", "y").named("x-to-y"),
            RuleDefinition::simple("&", " and "),
        ])
        .unwrap();
        let trace = ruleset.normalize_with_trace("x&x", "en").unwrap();
        let names: Vec<&str> = trace.fired.iter().map(|fired| fired.name.as_str()).collect();
        assert_eq!(names, vec!["x-to-y", "rule #1"]);
    }

    #[test]
    fn test_one_bad_rule_rejects_whole_set() {
        let err = RuleSet::compile(&[
            RuleDefinition::simple("ok", "fine"),
            RuleDefinition::complex("[", "broken"),
        ])
        .unwrap_err();
        assert!(matches!(err, NormalizeError::Configuration { index: 1, .. }));
    }

    #[test]
    fn test_empty_text_and_empty_ruleset() {
        let ruleset = RuleSet::compile(&[RuleDefinition::simple("&", " and ")]).unwrap();
        assert_eq!(ruleset.normalize("", "en").unwrap(), "");
        assert_eq!(RuleSet::empty().normalize("A&B", "en").unwrap(), "A&B");
    }

    #[test]
    fn test_resolution_error_stops_pipeline() {
        let ruleset = RuleSet::compile(&[
            RuleDefinition::simple("&", " and "),
            RuleDefinition::simple("%", Replacement::per_locale([("de", " Prozent")])),
        ])
        .unwrap();
        let err = ruleset.normalize("50% & more", "en").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.rule_index(), Some(1));
    }
}
