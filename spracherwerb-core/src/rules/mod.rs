// Main rules module - delegates to the pieces of the normalization engine:
// - template.rs: replacement templates with positional capture references
// - compiled.rs: a single validated rule (simple or complex) and how it applies
// - validation.rs: load-time ordering and locale coverage checks
// - engine.rs: RuleSet, the ordered pipeline that runs the rules
// - builtin.rs: the built-in German/English ruleset

pub mod builtin;
pub mod compiled;
pub mod engine;
pub mod template;
pub mod validation;

pub use builtin::{default_locales, default_rules};
pub use compiled::CompiledRule;
pub use engine::{normalize, RuleSet};
pub use template::Template;
pub use validation::{RuleSetValidator, ValidationIssue, ValidationOptions, ValidationReport};
