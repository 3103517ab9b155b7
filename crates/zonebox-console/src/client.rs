use serde_json::Value;
use zonebox_core::InterpretRequest;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/interpret";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("interpret endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Talks to `POST /api/interpret`.
#[derive(Debug, Clone)]
pub struct InterpretClient {
    http: reqwest::Client,
    endpoint: String,
}

impl InterpretClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Submit text and return the raw JSON the service produced.
    pub async fn submit(&self, text: &str) -> Result<Value, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&InterpretRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl Default for InterpretClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
