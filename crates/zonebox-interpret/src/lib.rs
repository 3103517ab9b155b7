pub mod engine;
mod parse;
pub mod prompt;

use std::sync::Arc;

use serde_json::Value;
use zonebox_core::ProviderSettings;

pub use engine::{CompletionProvider, LlmProvider, ProviderError};
pub use parse::parse_completion;

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("text must be a non-empty string")]
    InvalidInput,
    #[error("Missing {missing}")]
    Misconfigured { missing: String },
    #[error("empty response from provider")]
    UpstreamEmpty,
    #[error("unable to parse provider response: {0}")]
    UpstreamUnparseable(#[source] serde_json::Error),
    #[error("provider call failed: {0}")]
    UpstreamError(#[from] ProviderError),
}

/// Translates free-form text into a JSON command via the configured provider.
pub struct Interpreter {
    provider: Option<Arc<dyn CompletionProvider>>,
    missing: String,
}

impl Interpreter {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
            missing: String::new(),
        }
    }

    /// An interpreter that fails every request with `Misconfigured`,
    /// reporting `missing` (usually a credential variable) as absent.
    pub fn unconfigured(missing: impl Into<String>) -> Self {
        Self {
            provider: None,
            missing: missing.into(),
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        match LlmProvider::from_settings(settings) {
            Some(provider) => Self::new(Arc::new(provider)),
            None => Self::unconfigured(settings.missing().unwrap_or_default()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Precondition check, done before looking at the request at all.
    pub fn ensure_configured(&self) -> Result<&Arc<dyn CompletionProvider>, InterpretError> {
        self.provider
            .as_ref()
            .ok_or_else(|| InterpretError::Misconfigured {
                missing: self.missing.clone(),
            })
    }

    /// Ask the provider for a command. The returned value is whatever JSON
    /// the model produced; it has not been checked against any command shape.
    pub async fn interpret(&self, text: &str) -> Result<Value, InterpretError> {
        let provider = self.ensure_configured()?;
        if text.trim().is_empty() {
            return Err(InterpretError::InvalidInput);
        }

        tracing::info!(provider = %provider.describe(), "interpreting command");

        let content = provider
            .complete(&prompt::render(text))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "provider call failed"))?;

        tracing::debug!(raw = ?content, "provider output");
        parse_completion(content)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Replays one canned answer and records the prompts it was sent.
    struct Scripted {
        answer: Result<Option<String>, ProviderError>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn answering(answer: Result<Option<String>, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionProvider for Scripted {
        async fn complete(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn returns_parsed_model_output() {
        let provider = Scripted::answering(Ok(Some(
            r#"{"action":"resize","axis":"y","value":5}"#.to_string(),
        )));
        let interpreter = Interpreter::new(provider.clone());

        let value = interpreter.interpret("make it 5 meters tall").await.unwrap();

        assert_eq!(value, json!({"action": "resize", "axis": "y", "value": 5}));
        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("Command: \"make it 5 meters tall\"\n"));
    }

    #[tokio::test]
    async fn unconfigured_fails_before_calling_out() {
        let interpreter = Interpreter::unconfigured("OPENAI_API_KEY");
        let err = interpreter.interpret("make it red").await.unwrap_err();
        assert!(matches!(err, InterpretError::Misconfigured { .. }));
        assert_eq!(err.to_string(), "Missing OPENAI_API_KEY");
    }

    #[test]
    fn ollama_without_credential_is_configured() {
        let settings = ProviderSettings {
            provider: "ollama".to_string(),
            model: "llama3".to_string(),
            api_key: None,
        };
        assert!(Interpreter::from_settings(&settings).is_configured());
    }

    #[tokio::test]
    async fn settings_and_interpreter_agree_on_configuration() {
        let no_model = ProviderSettings {
            model: String::new(),
            api_key: Some("sk-test".to_string()),
            ..ProviderSettings::default()
        };
        let no_key = ProviderSettings::default();

        let cases = [
            (no_model, "Missing model"),
            (no_key, "Missing OPENAI_API_KEY"),
        ];
        for (settings, missing) in cases {
            let interpreter = Interpreter::from_settings(&settings);
            assert_eq!(interpreter.is_configured(), settings.is_configured());
            let err = interpreter.interpret("make it red").await.unwrap_err();
            assert_eq!(err.to_string(), missing);
        }
    }

    #[tokio::test]
    async fn blank_text_is_invalid_input() {
        let provider = Scripted::answering(Ok(Some("{}".to_string())));
        let interpreter = Interpreter::new(provider.clone());

        let err = interpreter.interpret(" \n\t").await.unwrap_err();

        assert!(matches!(err, InterpretError::InvalidInput));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_error_without_retry() {
        let provider = Scripted::answering(Err(ProviderError("rate limited".to_string())));
        let interpreter = Interpreter::new(provider.clone());

        let err = interpreter.interpret("make it red").await.unwrap_err();

        assert!(matches!(err, InterpretError::UpstreamError(_)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn empty_content_is_upstream_empty() {
        let interpreter = Interpreter::new(Scripted::answering(Ok(None)));
        assert!(matches!(
            interpreter.interpret("make it red").await,
            Err(InterpretError::UpstreamEmpty)
        ));
    }

    #[tokio::test]
    async fn prose_is_upstream_unparseable() {
        let answer = Ok(Some("Sure! Here it is".to_string()));
        let interpreter = Interpreter::new(Scripted::answering(answer));
        assert!(matches!(
            interpreter.interpret("make it red").await,
            Err(InterpretError::UpstreamUnparseable(_))
        ));
    }
}
