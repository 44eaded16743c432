use std::path::PathBuf;

use crate::client::ChatClient;
use crate::error::{Result, ScribeError};
use crate::parsing::parse_outline;
use crate::prompts::{
    chapter_completed_fallback, chapter_completed_summary, chapter_prompt, compress_prompt,
    initial_summary, outline_prompt, outline_system_prompt,
};
use crate::types::{Article, Message, ScribeConfig};

/// Chapters shorter than this are carried into the next prompt verbatim,
/// saving the compression round trip.
const COMPRESS_THRESHOLD: usize = 200;

const OUTLINE_TEMPERATURE: f32 = 0.7;
const CHAPTER_TEMPERATURE: f32 = 0.7;
const COMPRESS_TEMPERATURE: f32 = 0.3;

/// Whether a chapter body is long enough to warrant a compression call
pub fn needs_compression(content: &str) -> bool {
    content.chars().count() >= COMPRESS_THRESHOLD
}

/// Outline-then-chapters long-form generator.
///
/// Keeps later generation calls within context limits by carrying a single
/// rolling summary instead of the full text. The summary is rewritten from
/// the immediately preceding chapter only, so its hold on early chapters
/// degrades over a long outline; that narrowing is part of the contract.
pub struct LongFormWriter {
    client: ChatClient,
    config: ScribeConfig,
}

impl LongFormWriter {
    pub fn new(config: ScribeConfig) -> Result<Self> {
        let client = ChatClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Request 12-15 ordered chapter titles for the topic.
    ///
    /// An outline that cannot be parsed into a title list is fatal: without
    /// it there is nothing to iterate over.
    pub fn plan_outline(&self, topic: &str) -> Result<Vec<String>> {
        tracing::info!("planning outline for: {}", topic);

        let messages = [
            Message::system(outline_system_prompt()),
            Message::user(outline_prompt(topic)),
        ];
        let content = self.client.chat(&messages, OUTLINE_TEMPERATURE, true)?;

        let outline = parse_outline(&content).ok_or_else(|| {
            ScribeError::Outline("response contained no chapter title list".to_string())
        })?;

        tracing::info!("outline ready with {} chapters", outline.len());
        for (i, title) in outline.iter().enumerate() {
            tracing::debug!("{}. {}", i + 1, title);
        }

        Ok(outline)
    }

    /// Generate chapters in outline order.
    ///
    /// Iteration n+1's prompt depends on iteration n's compressed summary,
    /// so the loop is strictly sequential. A failed chapter call is logged
    /// and skipped; the loop continues with the summary it last had, which
    /// can leave gaps in the article without aborting the run.
    pub fn write_chapters(&self, topic: &str, outline: &[String]) -> Article {
        let mut article = Article::new(topic);
        let mut running_summary = initial_summary(topic);

        for (i, title) in outline.iter().enumerate() {
            tracing::info!("[{}/{}] writing chapter: {}", i + 1, outline.len(), title);

            let messages = [Message::user(chapter_prompt(topic, title, &running_summary))];
            match self.client.chat(&messages, CHAPTER_TEMPERATURE, false) {
                Ok(content) => {
                    let body = content.trim().to_string();
                    running_summary = self.compress_context(title, &body);
                    article.push(title.clone(), body);

                    let total: usize = article
                        .chapters
                        .iter()
                        .map(|c| c.body.chars().count())
                        .sum();
                    tracing::info!("chapter done ({} chars written so far)", total);

                    // External rate limit
                    std::thread::sleep(self.config.chapter_pause);
                }
                Err(e) => {
                    tracing::warn!("chapter \"{}\" failed, skipping: {}", title, e);
                }
            }
        }

        article
    }

    /// Replace the rolling summary with a compressed form of the newest
    /// chapter. Short bodies pass through verbatim; a failed compression
    /// call degrades to a bare completion phrase, silently dropping that
    /// chapter's contribution to later context.
    fn compress_context(&self, title: &str, content: &str) -> String {
        if !needs_compression(content) {
            return content.to_string();
        }

        let messages = [Message::user(compress_prompt(title, content))];
        match self.client.chat(&messages, COMPRESS_TEMPERATURE, false) {
            Ok(summary) => chapter_completed_summary(title, summary.trim()),
            Err(e) => {
                tracing::warn!("compression for \"{}\" failed, context degraded: {}", title, e);
                chapter_completed_fallback(title)
            }
        }
    }

    /// Write the rendered article to the configured path.
    ///
    /// Returns None without touching the filesystem when no chapter was
    /// produced.
    pub fn save(&self, article: &Article) -> Result<Option<PathBuf>> {
        if article.is_empty() {
            tracing::warn!("no chapters were generated, nothing to save");
            return Ok(None);
        }

        std::fs::write(&self.config.output_path, article.render())?;
        tracing::info!("article saved to {}", self.config.output_path.display());
        Ok(Some(self.config.output_path.clone()))
    }

    /// Full pipeline: outline, chapter loop, save.
    pub fn run(&self, topic: &str) -> Result<Option<PathBuf>> {
        let outline = self.plan_outline(topic)?;
        let article = self.write_chapters(topic, &outline);
        self.save(&article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_compression_below_threshold() {
        let short = "a".repeat(COMPRESS_THRESHOLD - 1);
        assert!(!needs_compression(&short));
    }

    #[test]
    fn test_needs_compression_at_threshold() {
        let exact = "a".repeat(COMPRESS_THRESHOLD);
        assert!(needs_compression(&exact));
    }

    #[test]
    fn test_needs_compression_counts_chars_not_bytes() {
        // 199 multibyte chars stay under the threshold even though the
        // byte length is far over it.
        let short = "汉".repeat(COMPRESS_THRESHOLD - 1);
        assert!(short.len() > COMPRESS_THRESHOLD);
        assert!(!needs_compression(&short));
    }
}
