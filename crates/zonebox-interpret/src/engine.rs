use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, StructuredOutputFormat};

use zonebox_core::ProviderSettings;

/// Failure of the provider call itself (transport, auth, rate limit).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// A chat-completion endpoint that answers a single user message.
///
/// `Ok(None)` means the provider answered without any message content.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, ProviderError>;

    fn describe(&self) -> String {
        "provider".to_string()
    }
}

fn map_backend(provider: &str) -> Result<LLMBackend, ProviderError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(ProviderError(format!("unknown provider: {other}"))),
    }
}

/// Response format asking for any JSON object. The shape is left open;
/// validation happens on the consumer side.
///
/// `additionalProperties` must be spelled out: the OpenAI backend adds
/// `false` when it is absent, which only admits `{}`.
fn json_object_format() -> StructuredOutputFormat {
    StructuredOutputFormat {
        name: "command".to_string(),
        description: Some("A single JSON command object".to_string()),
        schema: Some(serde_json::json!({
            "type": "object",
            "additionalProperties": true,
        })),
        strict: None,
    }
}

/// Production provider backed by the `llm` crate.
pub struct LlmProvider {
    provider: String,
    model: String,
    api_key: Option<String>,
}

impl LlmProvider {
    /// `None` unless [`ProviderSettings::is_configured`] holds.
    pub fn from_settings(settings: &ProviderSettings) -> Option<Self> {
        if !settings.is_configured() {
            return None;
        }
        Some(Self {
            provider: settings.provider.clone(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for LlmProvider {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        let backend = map_backend(&self.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&self.model)
            .schema(json_object_format());

        if let Some(api_key) = &self.api_key {
            builder = builder.api_key(api_key);
        }

        let llm = builder
            .build()
            .map_err(|e| ProviderError(format!("build LLM: {e}")))?;

        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| ProviderError(format!("chat: {e}")))?;

        Ok(response.text())
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.provider, self.model)
    }
}
