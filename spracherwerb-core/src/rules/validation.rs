use crate::error::NormalizeError;
use crate::types::{RuleDefinition, RuleMode};

// RuleSetValidator - load-time consistency checks over the whole rule list.
// Rules are applied strictly in order, so a literal rule whose pattern already
// contains an earlier literal pattern of the same family can never fire.

#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Reject simple-mode rules shadowed by an earlier rule of the same family
    pub check_ordering: bool,
    /// Every locale-mapped replacement must cover these locales (explicitly or via `default`)
    pub served_locales: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_ordering: true,
            served_locales: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    ShadowedRule {
        earlier_index: usize,
        earlier: String,
        later_index: usize,
        later: String,
    },
    UncoveredLocale {
        index: usize,
        rule: String,
        locale: String,
    },
}

impl ValidationIssue {
    pub fn into_error(self) -> NormalizeError {
        match self {
            ValidationIssue::ShadowedRule {
                earlier_index,
                earlier,
                later_index,
                later,
            } => NormalizeError::Configuration {
                index: later_index,
                rule: later,
                reason: format!(
                    "pattern contains the pattern of earlier rule #{earlier_index} ({earlier}) and can never match; order longer patterns first"
                ),
            },
            ValidationIssue::UncoveredLocale { index, rule, locale } => {
                NormalizeError::Configuration {
                    index,
                    rule,
                    reason: format!("no replacement for served locale '{locale}' and no 'default' entry"),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The first issue as an error, in rule order.
    pub fn into_result(self) -> Result<(), NormalizeError> {
        match self.issues.into_iter().next() {
            Some(issue) => Err(issue.into_error()),
            None => Ok(()),
        }
    }
}

pub struct RuleSetValidator<'a> {
    options: &'a ValidationOptions,
}

impl<'a> RuleSetValidator<'a> {
    pub fn new(options: &'a ValidationOptions) -> Self {
        Self { options }
    }

    /// Check enabled rules, given with their index in the configured list.
    pub fn validate(&self, rules: &[(usize, &RuleDefinition)]) -> ValidationReport {
        let mut issues = Vec::new();

        for (position, (index, rule)) in rules.iter().enumerate() {
            for locale in &self.options.served_locales {
                if rule.replacement.is_locale_mapped() && !rule.replacement.covers(locale) {
                    issues.push(ValidationIssue::UncoveredLocale {
                        index: *index,
                        rule: rule.label(*index),
                        locale: locale.clone(),
                    });
                }
            }

            if self.options.check_ordering {
                if let Some((earlier_index, earlier)) = self.find_shadowing_rule(&rules[..position], rule) {
                    issues.push(ValidationIssue::ShadowedRule {
                        earlier_index,
                        earlier: earlier.label(earlier_index),
                        later_index: *index,
                        later: rule.label(*index),
                    });
                }
            }
        }

        issues.sort_by_key(|issue| match issue {
            ValidationIssue::ShadowedRule { later_index, .. } => *later_index,
            ValidationIssue::UncoveredLocale { index, .. } => *index,
        });
        ValidationReport { issues }
    }

    fn find_shadowing_rule<'r>(
        &self,
        earlier_rules: &[(usize, &'r RuleDefinition)],
        rule: &RuleDefinition,
    ) -> Option<(usize, &'r RuleDefinition)> {
        if rule.mode != RuleMode::Simple {
            return None;
        }
        earlier_rules
            .iter()
            .find(|(_, earlier)| {
                earlier.mode == RuleMode::Simple
                    && earlier.family == rule.family
                    && rule.pattern.contains(earlier.pattern.as_str())
            })
            .map(|(index, earlier)| (*index, *earlier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Replacement;

    fn indexed(rules: &[RuleDefinition]) -> Vec<(usize, &RuleDefinition)> {
        rules.iter().enumerate().collect()
    }

    #[test]
    fn test_prefix_ordered_first_is_shadowing() {
        let rules = vec![
            RuleDefinition::simple("I.", "first"),
            RuleDefinition::simple("IIII.", "fourth"),
        ];
        let options = ValidationOptions::default();
        let report = RuleSetValidator::new(&options).validate(&indexed(&rules));
        assert_eq!(
            report.issues,
            vec![ValidationIssue::ShadowedRule {
                earlier_index: 0,
                earlier: "rule #0".to_string(),
                later_index: 1,
                later: "rule #1".to_string(),
            }]
        );
    }

    #[test]
    fn test_longest_first_passes() {
        let rules = vec![
            RuleDefinition::simple("IIII.", "fourth"),
            RuleDefinition::simple("III.", "third"),
            RuleDefinition::simple("II.", "second"),
        ];
        let options = ValidationOptions::default();
        assert!(RuleSetValidator::new(&options).validate(&indexed(&rules)).is_valid());
    }

    #[test]
    fn test_families_are_checked_separately() {
        let rules = vec![
            RuleDefinition::simple("C", "c").in_family("letters"),
            RuleDefinition::simple("°C", "degrees").in_family("temperature"),
        ];
        let options = ValidationOptions::default();
        assert!(RuleSetValidator::new(&options).validate(&indexed(&rules)).is_valid());
    }

    #[test]
    fn test_complex_rules_not_checked_for_shadowing() {
        let rules = vec![
            RuleDefinition::complex(r"\bI\.", "first"),
            RuleDefinition::complex(r"\bIIII\.", "fourth"),
        ];
        let options = ValidationOptions::default();
        assert!(RuleSetValidator::new(&options).validate(&indexed(&rules)).is_valid());
    }

    #[test]
    fn test_ordering_check_can_be_disabled() {
        let rules = vec![
            RuleDefinition::simple("I.", "first"),
            RuleDefinition::simple("IIII.", "fourth"),
        ];
        let options = ValidationOptions {
            check_ordering: false,
            served_locales: Vec::new(),
        };
        assert!(RuleSetValidator::new(&options).validate(&indexed(&rules)).is_valid());
    }

    #[test]
    fn test_served_locale_coverage() {
        let rules = vec![
            RuleDefinition::simple("&", Replacement::per_locale([("de", " und "), ("en", " and ")])),
            RuleDefinition::simple("%", Replacement::per_locale([("de", " Prozent")])).named("percent"),
            RuleDefinition::simple("§", Replacement::per_locale([("default", "section ")])),
            RuleDefinition::simple("BWV ", "Bach-Werke-Verzeichnis "),
        ];
        let options = ValidationOptions {
            check_ordering: true,
            served_locales: vec!["de".to_string(), "en".to_string()],
        };
        let report = RuleSetValidator::new(&options).validate(&indexed(&rules));
        assert_eq!(
            report.issues,
            vec![ValidationIssue::UncoveredLocale {
                index: 1,
                rule: "percent".to_string(),
                locale: "en".to_string(),
            }]
        );
        let err = report.into_result().unwrap_err();
        assert_eq!(err.rule_index(), Some(1));
    }
}
