//! Scribe Write - long-form article generation CLI
//!
//! Pipeline: plan a 12-15 chapter outline for the topic, generate chapters
//! sequentially with a rolling summary as cross-chapter context, and write
//! the assembled markdown to disk. A failed chapter is skipped; a failed
//! outline aborts the run.

use clap::Parser;
use scribe::{LongFormWriter, ScribeConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scribe_write")]
#[command(about = "Generate a long-form article chapter by chapter")]
struct Args {
    /// Topic to write about
    topic: String,

    /// Model to use (overrides DEEPSEEK_MODEL_NAME)
    #[arg(short, long)]
    model: Option<String>,

    /// API base URL (overrides DEEPSEEK_BASE_URL)
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// API key (overrides DEEPSEEK_API_KEY)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Output file path
    #[arg(short, long, default_value = "final_article.md")]
    output: PathBuf,

    /// Seconds to pause between chapter calls (rate limiting)
    #[arg(long, default_value = "1")]
    pause_secs: u64,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = ScribeConfig::from_env()
        .with_output_path(args.output)
        .with_chapter_pause(Duration::from_secs(args.pause_secs));
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(url) = args.base_url {
        config.base_url = Some(url);
    }
    if let Some(key) = args.api_key {
        config.api_key = Some(key);
    }

    tracing::info!("Model: {}", config.model);
    tracing::info!(
        "Endpoint: {}",
        config.base_url.as_deref().unwrap_or(scribe::types::DEFAULT_BASE_URL)
    );

    let writer = match LongFormWriter::new(config) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to create writer: {}", e);
            std::process::exit(1);
        }
    };

    match writer.run(&args.topic) {
        Ok(Some(path)) => {
            println!("Article saved to {}", path.display());
        }
        Ok(None) => {
            eprintln!("No chapters were generated; nothing saved");
        }
        Err(e) => {
            eprintln!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}
