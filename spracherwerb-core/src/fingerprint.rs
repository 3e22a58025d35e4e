use crate::rules::RuleSet;
use crate::types::Localized;
use sha2::{Digest, Sha256};

/// Version of the fingerprint layout; bump when the hashed fields change.
pub const FINGERPRINT_VERSION: &str = "2";

const UNIFORM_TAG: &[u8] = b"U";
const PER_LOCALE_TAG: &[u8] = b"L";

impl RuleSet {
    /// SHA-256 over the compiled rules in order: mode, pattern and every
    /// replacement entry (locale tables are already sorted by locale).
    ///
    /// Every field is length-prefixed and each replacement carries a
    /// uniform/per-locale tag, so no two different rulesets share a byte
    /// stream. Names, families and disabled rules do not affect the output
    /// text and are left out.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        update_field(&mut hasher, FINGERPRINT_VERSION.as_bytes());
        hasher.update((self.rules().len() as u64).to_le_bytes());

        for rule in self.rules() {
            let definition = rule.definition();
            update_field(&mut hasher, definition.mode.as_str().as_bytes());
            update_field(&mut hasher, definition.pattern.as_bytes());

            match &definition.replacement {
                Localized::Uniform(template) => {
                    hasher.update(UNIFORM_TAG);
                    update_field(&mut hasher, template.as_bytes());
                }
                Localized::PerLocale(table) => {
                    hasher.update(PER_LOCALE_TAG);
                    hasher.update((table.len() as u64).to_le_bytes());
                    for (locale, template) in table {
                        update_field(&mut hasher, locale.as_bytes());
                        update_field(&mut hasher, template.as_bytes());
                    }
                }
            }
        }

        format!("{:x}", hasher.finalize())
    }
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
