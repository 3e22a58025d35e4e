use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import from spracherwerb-core
use spracherwerb_core::{NormalizerConfig, PreparedSpeech, RuleMode, SpeechTextProcessor};

// Import CLI utilities
use spracherwerb_cli::{ConfigLocator, NormalizationReport};

#[derive(Parser)]
#[command(name = "spracherwerb-normalize")]
#[command(about = "Rewrite generated text into a form a speech synthesizer reads correctly")]
struct Args {
    /// Text to normalize (joined with spaces); read from stdin when empty
    text: Vec<String>,

    /// Locale used to pick per-language replacements (e.g. de, en)
    #[arg(short, long, required_unless_present = "show_rules")]
    locale: Option<String>,

    /// Path to config file (JSON or YAML); searched in ./configs and the
    /// user config directory when not given
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the text from a file instead of the arguments
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,

    /// List the rules that fired, in application order
    #[arg(long)]
    trace: bool,

    /// Print the synthesis chunks, one per line
    #[arg(long)]
    chunks: bool,

    /// Print a JSON report instead of plain text
    #[arg(long, conflicts_with_all = ["trace", "chunks"])]
    json: bool,

    /// List the loaded rules and exit
    #[arg(long)]
    show_rules: bool,

    /// Print status lines about config and ruleset
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("❌ Normalization failed: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    // Status lines would break the JSON document on stdout
    let status = args.verbose && !args.json;
    if status {
        println!("🗣️  Spracherwerb speech text normalizer");
    }

    let config_path = ConfigLocator::new().locate(args.config.as_deref());
    let config = NormalizerConfig::load_or_default(config_path.as_deref())?;
    let processor = config
        .build_processor()
        .context("Failed to build ruleset from config")?;
    info!(
        rules = processor.ruleset().len(),
        fingerprint = %processor.ruleset().fingerprint(),
        "ruleset ready"
    );

    if status {
        match &config_path {
            Some(path) => println!("📋 Loaded config from: {}", path.display()),
            None => println!("📋 Using built-in ruleset"),
        }
        println!("📏 Rules: {}", processor.ruleset().len());
        println!("🔑 Fingerprint: {}", processor.ruleset().fingerprint());
    }

    if args.show_rules {
        show_rules(&processor);
        return Ok(());
    }

    let locale = args
        .locale
        .as_deref()
        .context("--locale is required to normalize text")?;
    let input = read_input(args)?;
    let prepared = processor.prepare(&input, locale)?;

    if args.json {
        let report = NormalizationReport::new(&processor, config_path.as_deref(), &input, prepared);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_prepared(args, &prepared);
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(path) = &args.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    if buffer.is_empty() {
        bail!("No text given: pass TEXT arguments, --input FILE or pipe text on stdin");
    }
    // Keep the text itself intact, only drop the newline the shell adds
    Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
}

fn print_prepared(args: &Args, prepared: &PreparedSpeech) {
    if args.chunks {
        for chunk in &prepared.chunks {
            println!("{chunk}");
        }
    } else {
        println!("{}", prepared.text);
    }

    if args.trace {
        eprintln!("\n🔍 Fired rules ({}):", prepared.fired.len());
        for fired in &prepared.fired {
            eprintln!("   #{:<3} {} ({}x)", fired.index, fired.name, fired.matches);
        }
    }
}

fn show_rules(processor: &SpeechTextProcessor) {
    println!("\n📋 Loaded rules ({}):", processor.ruleset().len());
    for rule in processor.ruleset().rules() {
        let definition = rule.definition();
        let mode = match rule.mode() {
            RuleMode::Simple => "simple ",
            RuleMode::Complex => "complex",
        };
        let locales: Vec<String> = definition
            .replacement
            .entries()
            .into_iter()
            .map(|(locale, _)| locale.unwrap_or("*").to_string())
            .collect();
        println!(
            "  #{:<3} {} {:<22} {:<28} [{}]",
            rule.index(),
            mode,
            rule.name(),
            format!("{:?}", definition.pattern),
            locales.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_show_rules_needs_no_locale() {
        let args = Args::try_parse_from(["spracherwerb-normalize", "--show-rules"]).unwrap();
        assert!(args.show_rules);
        assert!(args.locale.is_none());
    }

    #[test]
    fn test_normalizing_requires_locale() {
        assert!(Args::try_parse_from(["spracherwerb-normalize", "BWV 100"]).is_err());

        let args = Args::try_parse_from(["spracherwerb-normalize", "-l", "de", "BWV", "100"]).unwrap();
        assert_eq!(args.locale.as_deref(), Some("de"));
        assert_eq!(args.text, vec!["BWV", "100"]);
    }
}
