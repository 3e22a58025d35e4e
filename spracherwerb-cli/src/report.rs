use chrono::{DateTime, Utc};
use serde::Serialize;
use spracherwerb_core::{FiredRule, PreparedSpeech, SpeechTextProcessor};
use std::path::Path;

/// Machine-readable result of one CLI run, printed with `--json`
#[derive(Debug, Clone, Serialize)]
pub struct NormalizationReport {
    pub generated_at: DateTime<Utc>,
    /// Config file the ruleset came from; `None` for the built-in rules
    pub config_source: Option<String>,
    pub ruleset_fingerprint: String,
    pub rule_count: usize,
    pub locale: String,
    pub input: String,
    pub text: String,
    pub fired: Vec<FiredRule>,
    pub chunks: Vec<String>,
}

impl NormalizationReport {
    pub fn new(
        processor: &SpeechTextProcessor,
        config_source: Option<&Path>,
        input: &str,
        prepared: PreparedSpeech,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            config_source: config_source.map(|path| path.display().to_string()),
            ruleset_fingerprint: processor.ruleset().fingerprint(),
            rule_count: processor.ruleset().len(),
            locale: prepared.locale,
            input: input.to_string(),
            text: prepared.text,
            fired: prepared.fired,
            chunks: prepared.chunks,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spracherwerb_core::{Replacement, RuleDefinition, RuleSet};

    #[test]
    fn test_report_serializes_run() {
        let ruleset = RuleSet::compile(&[
            RuleDefinition::simple("&", Replacement::per_locale([("de", " und "), ("en", " and ")])).named("ampersand"),
        ])
        .unwrap();
        let processor = SpeechTextProcessor::new(ruleset, 200);
        let prepared = processor.prepare("Brot&Butter", "de").unwrap();

        let report = NormalizationReport::new(&processor, None, "Brot&Butter", prepared);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["text"], "Brot und Butter");
        assert_eq!(value["locale"], "de");
        assert_eq!(value["rule_count"], 1);
        assert_eq!(value["fired"][0]["name"], "ampersand");
        assert_eq!(value["fired"][0]["matches"], 1);
        assert!(value["config_source"].is_null());
        assert_eq!(value["ruleset_fingerprint"].as_str().unwrap().len(), 64);
        assert!(value["generated_at"].is_string());
    }
}
