use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use tokio::runtime::Runtime;

use crate::error::{Result, ScribeError};
use crate::types::{Message, Role, ScribeConfig, DEFAULT_BASE_URL, ENV_API_KEY};

/// Blocking client for an OpenAI-compatible chat-completion endpoint.
///
/// Owns its tokio runtime; every call blocks until the response arrives.
/// This matches the sequential control flow of both pipelines, which never
/// issue overlapping requests.
pub struct ChatClient {
    client: Client<OpenAIConfig>,
    runtime: Runtime,
    model: String,
}

impl ChatClient {
    /// Create a client from the given config.
    ///
    /// The API key comes from the config or the DEEPSEEK_API_KEY environment
    /// variable; absence of both is a fatal configuration error.
    pub fn new(config: &ScribeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(ENV_API_KEY).ok())
            .ok_or(ScribeError::MissingApiKey)?;
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url)
            .with_api_key(api_key);
        let client = Client::with_config(openai_config);
        let runtime = Runtime::new()?;

        Ok(Self {
            client,
            runtime,
            model: config.model.clone(),
        })
    }

    /// Issue one chat-completion call and return the assistant message text.
    ///
    /// `json_mode` sets the vendor's forced-JSON response mode; the returned
    /// text is still treated as JSON or prose by the call site.
    pub fn chat(&self, messages: &[Message], temperature: f32, json_mode: bool) -> Result<String> {
        let mut request_messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(messages.len());
        for m in messages {
            let message = match m.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(m.content.clone())
                    .build()?
                    .into(),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(m.content.clone())
                    .build()?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(m.content.clone())
                    .build()?
                    .into(),
            };
            request_messages.push(message);
        }

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(request_messages)
            .temperature(temperature);

        if json_mode {
            request_builder.response_format(ResponseFormat::JsonObject);
        }

        let request = request_builder.build()?;

        let response = self
            .runtime
            .block_on(async { self.client.chat().create(request).await })?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(content)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
