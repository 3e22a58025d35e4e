use crate::error::NormalizeError;
use crate::processor::SpeechTextProcessor;
use crate::rules::{default_rules, RuleSet, ValidationOptions};
use crate::types::RuleDefinition;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_max_chunk_tokens() -> usize {
    200
}

/// Normalization settings as read from the application config file.
///
/// Unknown keys are ignored, so the same `config.json` that drives the rest
/// of the application can be loaded directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Ordered rule list; the built-in ruleset when absent
    #[serde(default = "default_rules")]
    pub text_cleaner_ruleset: Vec<RuleDefinition>,
    /// Locales the ruleset must be able to serve; checked at load time
    #[serde(default)]
    pub locales: Vec<String>,
    /// Reject literal rules shadowed by an earlier rule of the same family
    #[serde(default = "default_true")]
    pub validate_ordering: bool,
    /// Upper bound of whitespace tokens per synthesis chunk
    #[serde(default = "default_max_chunk_tokens")]
    pub max_chunk_tokens: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            text_cleaner_ruleset: default_rules(),
            locales: Vec::new(),
            validate_ordering: true,
            max_chunk_tokens: default_max_chunk_tokens(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            _ => Err(anyhow!(
                "Unsupported config file extension for {} (expected .json, .yaml or .yml)",
                path.display()
            )),
        }
    }
}

impl NormalizerConfig {
    /// Load config from file path, picking the parser from the extension
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_str(&content, format)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(
            path = %path.display(),
            rules = config.text_cleaner_ruleset.len(),
            "loaded normalizer config"
        );
        Ok(config)
    }

    /// Load the given file, or the defaults when no path is given.
    ///
    /// A path that cannot be loaded is an error, never a silent fallback:
    /// skipping the ruleset would send unexpanded symbols to the synthesizer.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                debug!("no config file given, using built-in ruleset");
                Ok(Self::default())
            }
        }
    }

    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            check_ordering: self.validate_ordering,
            served_locales: self.locales.clone(),
        }
    }

    /// Compile and validate the configured rules.
    pub fn build_ruleset(&self) -> Result<RuleSet, NormalizeError> {
        RuleSet::compile_with(&self.text_cleaner_ruleset, &self.validation_options())
    }

    /// Compile the ruleset and pair it with the chunking settings.
    pub fn build_processor(&self) -> Result<SpeechTextProcessor, NormalizeError> {
        if self.max_chunk_tokens == 0 {
            return Err(NormalizeError::InvalidSetting {
                setting: "max_chunk_tokens".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let ruleset = self.build_ruleset()?;
        Ok(SpeechTextProcessor::new(ruleset, self.max_chunk_tokens))
    }
}
