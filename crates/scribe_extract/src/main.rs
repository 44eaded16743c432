//! Scribe Extract - structured intent extraction CLI
//!
//! Reads one user utterance, runs it through the defensive extraction
//! prompt, and prints the resulting record as JSON on stdout. The record is
//! always well-formed: parse and transport failures come back as an error
//! record, and inputs the model classifies as prompt injection come back as
//! the fixed SECURITY_ALERT record.

use clap::Parser;
use scribe::{IntentExtractor, ScribeConfig};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scribe_extract")]
#[command(about = "Extract a structured intent record from user text")]
struct Args {
    /// Text to analyze (reads stdin when omitted)
    text: Option<String>,

    /// Model to use (overrides DEEPSEEK_MODEL_NAME)
    #[arg(short, long)]
    model: Option<String>,

    /// API base URL (overrides DEEPSEEK_BASE_URL)
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// API key (overrides DEEPSEEK_API_KEY)
    #[arg(short = 'k', long)]
    api_key: Option<String>,
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ScribeConfig::from_env();
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(url) = args.base_url {
        config.base_url = Some(url);
    }
    if let Some(key) = args.api_key {
        config.api_key = Some(key);
    }

    let input = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Failed to read stdin: {}", e);
                std::process::exit(1);
            }
            buf.trim().to_string()
        }
    };

    if input.is_empty() {
        eprintln!("No input text given");
        std::process::exit(1);
    }

    let extractor = match IntentExtractor::new(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Failed to create extractor: {}", e);
            std::process::exit(1);
        }
    };

    let record = extractor.extract(&input);
    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize record: {}", e);
            std::process::exit(1);
        }
    }
}
