use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "DEEPSEEK_API_KEY";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "DEEPSEEK_BASE_URL";
/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "DEEPSEEK_MODEL_NAME";

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Sentiment classification attached to an extracted intent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Urgent,
}

/// Structured record extracted from one user utterance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntentRecord {
    pub intent: String,
    pub params: HashMap<String, String>,
    pub sentiment: Sentiment,
}

impl IntentRecord {
    /// The fixed record returned when the model flags the input as a
    /// prompt-injection attempt.
    pub fn security_alert() -> Self {
        Self {
            intent: "SECURITY_ALERT".to_string(),
            params: HashMap::new(),
            sentiment: Sentiment::Neutral,
        }
    }

    pub fn is_security_alert(&self) -> bool {
        self.intent == "SECURITY_ALERT"
    }
}

/// Outcome of an extraction call.
///
/// Extraction never raises: a transport or parse failure is surfaced as the
/// `Failed` variant so callers always receive a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Extraction {
    Intent(IntentRecord),
    Failed { error: String, raw_content: String },
}

impl Extraction {
    pub fn failed(error: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Extraction::Failed {
            error: error.into(),
            raw_content: raw_content.into(),
        }
    }
}

/// OpenAI-style message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One generated chapter: outline title plus model prose
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub body: String,
}

/// The assembled long-form document.
///
/// Chapters are appended in outline order; a chapter whose generation call
/// failed is simply absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub topic: String,
    pub chapters: Vec<Chapter>,
}

impl Article {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            chapters: Vec::new(),
        }
    }

    pub fn push(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.chapters.push(Chapter {
            title: title.into(),
            body: body.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Render as markdown: topic heading, then one `##` section per chapter.
    pub fn render(&self) -> String {
        let sections: Vec<String> = self
            .chapters
            .iter()
            .map(|c| format!("## {}\n\n{}", c.title, c.body))
            .collect();
        format!("# {}\n\n{}\n", self.topic, sections.join("\n\n"))
    }
}

/// Configuration for scribe
#[derive(Debug, Clone)]
pub struct ScribeConfig {
    pub model: String,
    /// Base URL for the API (None = `DEFAULT_BASE_URL`)
    pub base_url: Option<String>,
    /// API key (None = read from env var)
    pub api_key: Option<String>,
    /// Pause between chapter generations, for external rate limits
    pub chapter_pause: Duration,
    /// Where the assembled article is written
    pub output_path: PathBuf,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
            chapter_pause: Duration::from_secs(1),
            output_path: PathBuf::from("final_article.md"),
        }
    }
}

impl ScribeConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Build a config from the `DEEPSEEK_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = ScribeConfig::default();
        if let Ok(model) = std::env::var(ENV_MODEL) {
            config.model = model;
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = Some(url);
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            config.api_key = Some(key);
        }
        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_chapter_pause(mut self, pause: Duration) -> Self {
        self.chapter_pause = pause;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ScribeConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, None);
        assert_eq!(config.chapter_pause, Duration::from_secs(1));
        assert_eq!(config.output_path, PathBuf::from("final_article.md"));
    }

    #[test]
    fn test_config_builder() {
        let config = ScribeConfig::new("deepseek-reasoner")
            .with_base_url("http://localhost:8080")
            .with_api_key("sk-test")
            .with_chapter_pause(Duration::ZERO)
            .with_output_path("/tmp/out.md");

        assert_eq!(config.model, "deepseek-reasoner");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.chapter_pause, Duration::ZERO);
    }

    #[test]
    fn test_security_alert_record() {
        let record = IntentRecord::security_alert();
        assert_eq!(record.intent, "SECURITY_ALERT");
        assert!(record.params.is_empty());
        assert_eq!(record.sentiment, Sentiment::Neutral);
        assert!(record.is_security_alert());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "intent": "SECURITY_ALERT",
                "params": {},
                "sentiment": "neutral"
            })
        );
    }

    #[test]
    fn test_sentiment_round_trip() {
        for (variant, text) in [
            (Sentiment::Positive, "\"positive\""),
            (Sentiment::Neutral, "\"neutral\""),
            (Sentiment::Negative, "\"negative\""),
            (Sentiment::Urgent, "\"urgent\""),
        ] {
            assert_eq!(serde_json::to_string(&variant).unwrap(), text);
        }
        assert!(serde_json::from_str::<Sentiment>("\"angry\"").is_err());
    }

    #[test]
    fn test_article_render() {
        let mut article = Article::new("Topic");
        article.push("One", "first body");
        article.push("Two", "second body");

        let rendered = article.render();
        assert!(rendered.starts_with("# Topic\n\n"));
        assert!(rendered.contains("## One\n\nfirst body"));
        assert!(rendered.contains("## Two\n\nsecond body"));
        let one = rendered.find("## One").unwrap();
        let two = rendered.find("## Two").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_extraction_failed_serialization() {
        let outcome = Extraction::failed("bad json", "not json at all");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "bad json");
        assert_eq!(json["raw_content"], "not json at all");
    }
}
