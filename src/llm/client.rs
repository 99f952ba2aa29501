//! Chat-completions client for an OpenAI-compatible API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::QaError;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A single-prompt completion backend.
///
/// The orchestrator depends on this trait rather than on the HTTP client so
/// its transitions can be tested against a mock.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, QaError>;
}

/// HTTP client for a chat-completions endpoint, sampling at temperature 0.
pub struct LlmClient {
    http: Client,
    model: String,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(config: &AppConfig) -> Result<Self, QaError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QaError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
        })
    }

    async fn try_complete(&self, body: &Value) -> Result<String, QaError> {
        let res = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| QaError::ModelInvocation(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let error_text = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QaError::ModelInvocation(format!(
                "HTTP error {status}: {error_text}"
            )));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| QaError::ModelInvocation(e.to_string()))?;
        extract_content(&json)
    }
}

#[async_trait]
impl Completion for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, QaError> {
        // temperature 0 keeps query generation as deterministic as the
        // backend allows
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.0,
        });

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_complete(&body).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt >= MAX_RETRIES {
                        return Err(QaError::ModelInvocation(format!(
                            "failed after {MAX_RETRIES} attempts: {e}"
                        )));
                    }
                    // Exponential backoff
                    let backoff = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                    tracing::warn!(%e, ?backoff, "LLM API call failed, retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

fn extract_content(json: &Value) -> Result<String, QaError> {
    if let Some(choice) = json["choices"].as_array().and_then(|arr| arr.first()) {
        if let Some(msg) = choice["message"]["content"].as_str() {
            return Ok(msg.to_string());
        }
    }

    // Check for an error message in the response body
    if let Some(error) = json["error"].as_object() {
        if let Some(message) = error["message"].as_str() {
            return Err(QaError::ModelInvocation(format!("API error: {message}")));
        }
    }

    Err(QaError::ModelInvocation(
        "invalid response format from LLM API".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_content() {
        let json = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "MATCH (n) RETURN n"}}
            ]
        });
        assert_eq!(extract_content(&json).unwrap(), "MATCH (n) RETURN n");
    }

    #[test]
    fn surfaces_api_error_message() {
        let json = serde_json::json!({
            "error": {"message": "invalid api key", "type": "invalid_request_error"}
        });
        let err = extract_content(&json).unwrap_err();
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn unexpected_payload_is_a_model_invocation_error() {
        let err = extract_content(&serde_json::json!({"choices": []})).unwrap_err();
        assert!(matches!(err, QaError::ModelInvocation(_)));
    }
}
