use crate::chunking::chunk_for_synthesis;
use crate::error::Result;
use crate::rules::RuleSet;
use crate::types::PreparedSpeech;

/// Prepares generator output for the speech synthesizer: normalization
/// first, then splitting into token-bounded chunks.
///
/// Built once from a loaded config and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct SpeechTextProcessor {
    ruleset: RuleSet,
    max_chunk_tokens: usize,
}

impl SpeechTextProcessor {
    pub fn new(ruleset: RuleSet, max_chunk_tokens: usize) -> Self {
        Self {
            ruleset,
            max_chunk_tokens,
        }
    }

    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    pub fn max_chunk_tokens(&self) -> usize {
        self.max_chunk_tokens
    }

    pub fn normalize(&self, text: &str, locale: &str) -> Result<String> {
        self.ruleset.normalize(text, locale)
    }

    /// Normalize and chunk. On error nothing is returned, so no partially
    /// normalized text can reach the synthesizer.
    pub fn prepare(&self, text: &str, locale: &str) -> Result<PreparedSpeech> {
        let normalization = self.ruleset.normalize_with_trace(text, locale)?;
        let chunks = chunk_for_synthesis(&normalization.text, self.max_chunk_tokens);

        Ok(PreparedSpeech {
            locale: locale.to_string(),
            text: normalization.text,
            fired: normalization.fired,
            chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Replacement, RuleDefinition};

    #[test]
    fn test_prepare_normalizes_then_chunks() {
        let ruleset = RuleSet::compile(&[RuleDefinition::simple("&", Replacement::per_locale([("en", " and ")]))]).unwrap();
        let processor = SpeechTextProcessor::new(ruleset, 3);
        let prepared = processor.prepare("Salt&pepper. Bread.", "en").unwrap();
        assert_eq!(prepared.text, "Salt and pepper. Bread.");
        assert_eq!(prepared.chunks, vec!["Salt and pepper.", "Bread."]);
        assert_eq!(prepared.fired.len(), 1);
    }

    #[test]
    fn test_prepare_fails_without_output() {
        let ruleset = RuleSet::compile(&[RuleDefinition::simple("&", Replacement::per_locale([("en", " and ")]))]).unwrap();
        let processor = SpeechTextProcessor::new(ruleset, 3);
        assert!(processor.prepare("Salt&pepper", "de").is_err());
    }
}
