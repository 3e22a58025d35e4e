use crate::types::{Replacement, RuleDefinition};

/// The built-in German/English ruleset, in application order.
///
/// `configs/config_example.json` carries the same rules in file form.
pub fn default_rules() -> Vec<RuleDefinition> {
    vec![
        // Catalog numbers
        RuleDefinition::simple("BWV ", "Bach-Werke-Verzeichnis ")
            .named("bwv-catalog")
            .in_family("catalog"),
        RuleDefinition::complex(r"\bKV (\d)", "Köchelverzeichnis $1")
            .named("koechel-catalog")
            .in_family("catalog"),
        RuleDefinition::complex(r"\bop\. ?(\d)", "Opus $1")
            .named("opus")
            .in_family("catalog"),

        // Same wording as the shipped configuration, Celsius included
        RuleDefinition::complex("° ?C", de_en(" Grad Fahrenheit", " degrees Fahrenheit"))
            .named("celsius")
            .in_family("temperature"),
        RuleDefinition::complex("° ?F", de_en(" Grad Fahrenheit", " degrees Fahrenheit"))
            .named("fahrenheit")
            .in_family("temperature"),

        // Symbols
        RuleDefinition::simple("%", de_en(" Prozent", " percent"))
            .named("percent")
            .in_family("symbols"),
        RuleDefinition::simple("&", de_en(" und ", " and "))
            .named("ampersand")
            .in_family("symbols"),
        RuleDefinition::complex("§ ?", de_en("Paragraf ", "section "))
            .named("paragraph-sign")
            .in_family("symbols"),

        // Abbreviations
        RuleDefinition::complex(r"\bz\. ?B\.", de_en("zum Beispiel", "for example"))
            .named("abbrev-zb")
            .in_family("abbreviations"),
        RuleDefinition::simple("usw.", de_en("und so weiter", "and so on"))
            .named("abbrev-usw")
            .in_family("abbreviations"),
        RuleDefinition::simple("bzw.", de_en("beziehungsweise", "or rather"))
            .named("abbrev-bzw")
            .in_family("abbreviations"),
        RuleDefinition::simple("e.g.", de_en("zum Beispiel", "for example"))
            .named("abbrev-eg")
            .in_family("abbreviations"),
        RuleDefinition::simple("i.e.", de_en("das heißt", "that is"))
            .named("abbrev-ie")
            .in_family("abbreviations"),
        RuleDefinition::simple("etc.", de_en("et cetera", "et cetera"))
            .named("abbrev-etc")
            .in_family("abbreviations"),
        RuleDefinition::complex(r"\bNr\.", de_en("Nummer", "number"))
            .named("abbrev-nr")
            .in_family("abbreviations"),
        RuleDefinition::complex(r"\bDr\.", de_en("Doktor", "Doctor"))
            .named("abbrev-dr")
            .in_family("abbreviations"),

        // Roman ordinals, longest form first. Bare "I." is left alone (pronoun).
        roman_ordinal("XII", "zwölfte", "twelfth"),
        roman_ordinal("XI", "elfte", "eleventh"),
        roman_ordinal("X", "zehnte", "tenth"),
        roman_ordinal("IX", "neunte", "ninth"),
        roman_ordinal("VIII", "achte", "eighth"),
        roman_ordinal("VII", "siebte", "seventh"),
        roman_ordinal("VI", "sechste", "sixth"),
        roman_ordinal("V", "fünfte", "fifth"),
        roman_ordinal("IV", "vierte", "fourth"),
        roman_ordinal("IIII", "vierte", "fourth"),
        roman_ordinal("III", "dritte", "third"),
        roman_ordinal("II", "zweite", "second"),

        // One-digit ordinals; "4.5" and "14." do not match
        digit_ordinal(1, "erste", "first"),
        digit_ordinal(2, "zweite", "second"),
        digit_ordinal(3, "dritte", "third"),
        digit_ordinal(4, "vierte", "fourth"),
        digit_ordinal(5, "fünfte", "fifth"),
        digit_ordinal(6, "sechste", "sixth"),
        digit_ordinal(7, "siebte", "seventh"),
        digit_ordinal(8, "achte", "eighth"),
        digit_ordinal(9, "neunte", "ninth"),
    ]
}

/// What may follow an ordinal's period: whitespace, closing punctuation or
/// the end of the text. Captured and written back as `$1`.
const ORDINAL_END: &str = r"(\s|[,;:!?)\]]|$)";

fn ordinal(numeral: &str, de: &str, en: &str) -> RuleDefinition {
    RuleDefinition::complex(
        &format!(r"\b{numeral}\.{ORDINAL_END}"),
        de_en(&format!("{de}$1"), &format!("{en}$1")),
    )
}

fn roman_ordinal(numeral: &str, de: &str, en: &str) -> RuleDefinition {
    ordinal(numeral, de, en)
        .named(&format!("roman-ordinal-{numeral}"))
        .in_family("roman-ordinals")
}

fn digit_ordinal(digit: u8, de: &str, en: &str) -> RuleDefinition {
    ordinal(&digit.to_string(), de, en)
        .named(&format!("ordinal-{digit}"))
        .in_family("digit-ordinals")
}

fn de_en(de: &str, en: &str) -> Replacement {
    Replacement::per_locale([("de", de), ("en", en)])
}

/// Locales every built-in rule can serve.
pub fn default_locales() -> Vec<String> {
    vec!["de".to_string(), "en".to_string()]
}
