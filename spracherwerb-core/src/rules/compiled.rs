use crate::error::{NormalizeError, Result};
use crate::types::{Localized, Replacement, RuleDefinition, RuleMode};
use regex::{Captures, Regex, Replacer};

use super::template::Template;

/// Outcome of applying one rule to a piece of text.
pub(crate) struct Rewrite {
    pub text: String,
    pub matches: usize,
}

#[derive(Debug, Clone)]
enum Matcher {
    Simple {
        needle: String,
        replacements: Replacement,
    },
    Complex {
        regex: Regex,
        templates: Localized<Template>,
    },
}

/// A validated, ready-to-apply rule. Immutable once built.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    index: usize,
    name: String,
    definition: RuleDefinition,
    matcher: Matcher,
}

impl CompiledRule {
    /// Compile one definition. `index` is its position in the configured list
    /// and is carried into every error raised for it.
    pub fn compile(index: usize, definition: &RuleDefinition) -> Result<Self> {
        let name = definition.label(index);

        if definition.pattern.is_empty() {
            return Err(NormalizeError::configuration(index, &name, "pattern is empty"));
        }
        if let Localized::PerLocale(table) = &definition.replacement {
            if table.is_empty() {
                return Err(NormalizeError::configuration(
                    index,
                    &name,
                    "locale-mapped replacement has no entries",
                ));
            }
        }

        let matcher = match definition.mode {
            RuleMode::Simple => Matcher::Simple {
                needle: definition.pattern.clone(),
                replacements: definition.replacement.clone(),
            },
            RuleMode::Complex => {
                let regex = Regex::new(&definition.pattern).map_err(|e| {
                    NormalizeError::configuration(index, &name, format!("invalid regular expression: {e}"))
                })?;
                // captures_len counts the implicit whole-match group 0
                let available = regex.captures_len() - 1;
                let templates = definition.replacement.try_map(|source| {
                    let template = Template::parse(source)
                        .map_err(|reason| NormalizeError::configuration(index, &name, reason))?;
                    if let Some(group) = template.max_group() {
                        if group > available {
                            return Err(NormalizeError::configuration(
                                index,
                                &name,
                                format!(
                                    "template {source:?} refers to group {group} but the pattern has {available} capture group(s)"
                                ),
                            ));
                        }
                    }
                    Ok(template)
                })?;
                Matcher::Complex { regex, templates }
            }
        };

        Ok(Self {
            index,
            name,
            definition: definition.clone(),
            matcher,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> RuleMode {
        self.definition.mode
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    fn resolution_error(&self, locale: &str) -> NormalizeError {
        NormalizeError::Resolution {
            index: self.index,
            rule: self.name.clone(),
            locale: locale.to_string(),
        }
    }

    /// Apply the rule once over the whole text. Returns `None` when nothing matched.
    ///
    /// The locale is resolved before matching, so a missing locale fails even
    /// on text the rule would leave alone.
    pub(crate) fn apply(&self, text: &str, locale: &str) -> Result<Option<Rewrite>> {
        match &self.matcher {
            Matcher::Simple {
                needle,
                replacements,
            } => {
                let replacement = replacements
                    .resolve(locale)
                    .ok_or_else(|| self.resolution_error(locale))?;
                let matches = text.matches(needle.as_str()).count();
                if matches == 0 {
                    return Ok(None);
                }
                Ok(Some(Rewrite {
                    text: text.replace(needle.as_str(), replacement),
                    matches,
                }))
            }
            Matcher::Complex { regex, templates } => {
                let template = templates
                    .resolve(locale)
                    .ok_or_else(|| self.resolution_error(locale))?;
                let mut replacer = TemplateReplacer {
                    template,
                    matches: 0,
                };
                let rewritten = regex.replace_all(text, replacer.by_ref());
                if replacer.matches == 0 {
                    return Ok(None);
                }
                Ok(Some(Rewrite {
                    text: rewritten.into_owned(),
                    matches: replacer.matches,
                }))
            }
        }
    }
}

struct TemplateReplacer<'t> {
    template: &'t Template,
    matches: usize,
}

impl Replacer for TemplateReplacer<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        self.matches += 1;
        self.template.expand_into(caps, dst);
    }
}
