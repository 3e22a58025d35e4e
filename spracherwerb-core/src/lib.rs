// Spracherwerb Core Library
//
// Rule-driven text normalization between the text generator and the speech
// synthesizer. A ruleset is loaded once, compiled into an immutable RuleSet
// and then applied to each utterance for the requested locale.

pub mod chunking;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod processor;
pub mod rules;
pub mod types;

// Re-export main types and functions for easy use
pub use chunking::chunk_for_synthesis;
pub use config::{ConfigFormat, NormalizerConfig};
pub use error::{NormalizeError, Result};
pub use processor::SpeechTextProcessor;
pub use rules::{default_rules, normalize, RuleSet, ValidationOptions};
pub use types::*;
