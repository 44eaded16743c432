use crate::client::ChatClient;
use crate::error::Result;
use crate::parsing::{parse_intent, strip_code_fences};
use crate::prompts::extraction_system_prompt;
use crate::types::{Extraction, Message, ScribeConfig};

/// Sampling temperature for extraction calls; near-deterministic output.
const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Single-shot structured intent extractor with a defensive system prompt.
pub struct IntentExtractor {
    client: ChatClient,
}

impl IntentExtractor {
    pub fn new(config: &ScribeConfig) -> Result<Self> {
        Ok(Self {
            client: ChatClient::new(config)?,
        })
    }

    /// Extract an intent record from untrusted user text.
    ///
    /// Never fails: a transport error or malformed response is returned as
    /// `Extraction::Failed` carrying the error text and whatever raw content
    /// was available, so callers always receive a record. Injection screening
    /// happens inside the model per the system prompt; when the model flags
    /// an attack the parsed record is the fixed SECURITY_ALERT value.
    pub fn extract(&self, user_input: &str) -> Extraction {
        let messages = [
            Message::system(extraction_system_prompt()),
            Message::user(user_input),
        ];

        let content = match self.client.chat(&messages, EXTRACTION_TEMPERATURE, true) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("extraction call failed: {}", e);
                return Extraction::failed(e.to_string(), "");
            }
        };

        match parse_intent(&content) {
            Ok(record) => Extraction::Intent(record),
            Err(e) => {
                tracing::warn!("extraction response did not parse: {}", e);
                Extraction::failed(e.to_string(), strip_code_fences(&content))
            }
        }
    }
}
