//! # Scribe
//!
//! Structured intent extraction and outline-driven long-form article
//! generation over an OpenAI-compatible chat-completion API.

pub mod client;
pub mod error;
pub mod extract;
pub mod parsing;
pub mod types;
pub mod writer;

mod prompts;

// Re-exports
pub use client::ChatClient;
pub use error::{Result, ScribeError};
pub use extract::IntentExtractor;
pub use types::{
    Article, Chapter, Extraction, IntentRecord, Message, Role, ScribeConfig, Sentiment,
};
pub use writer::LongFormWriter;
