use thiserror::Error;

/// Scribe error types
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("chat API error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable outline in model response: {0}")]
    Outline(String),

    #[error("No API key found. Set DEEPSEEK_API_KEY environment variable.")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for scribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;
