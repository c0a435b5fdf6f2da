//! OpenAI-style Completion Client
//!
//! Posts the rendered signature inside a developer-facing prompt to a chat completion
//! endpoint. Accepts both completion (`choices[0].text`) and chat
//! (`choices[0].message.content`) response shapes.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{CompletionClient, http_client, read_success_body, require, validate_endpoint};
use crate::config::OpenAiConfig;
use crate::constants::remote::{MAX_TOKENS, TEMPERATURE};
use crate::types::{BackendError, Result};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// OpenAI-style client with secure API key handling
pub struct OpenAiClient {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    url: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"[REDACTED]")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self> {
        let env_key = std::env::var("OPENAI_API_KEY").ok();
        let api_key = require(
            config.api_key.as_deref().or(env_key.as_deref()),
            "openai",
            "api_key",
        )?;
        let url = require(config.url.as_deref(), "openai", "url")?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            url: validate_endpoint("openai", &url)?,
            model: config.model.clone(),
            client: http_client(timeout)?,
        })
    }

    fn build_request(&self, signature: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(signature),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

fn user_prompt(signature: &str) -> String {
    format!(
        "Generate a detailed comment in English for the following Go function. \
         The comment should be written in a way that is helpful for other developers. \
         Include the purpose of the function, a description of its parameters and return values, \
         potential error conditions, and any side effects or important details. \
         Here is the function :\n{}",
        signature
    )
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        signature: &str,
        _cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError> {
        let request = self.build_request(signature);
        debug!("Sending request to OpenAI-style API (model: {})", self.model);

        let response = self
            .client
            .post(&self.url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?;
        let body = read_success_body(response).await?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            BackendError::decode(
                format!("Failed to parse completion response: {}", e),
                body.as_str(),
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(Choice::into_text)
            .ok_or_else(|| BackendError::decode("no choices found in response", body.as_str()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: Option<String>,
    message: Option<ResponseMessage>,
}

impl Choice {
    fn into_text(self) -> Option<String> {
        self.text.or_else(|| self.message.and_then(|m| m.content))
    }
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock;
    use crate::types::BackendErrorKind;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    fn client_for(url: String) -> OpenAiClient {
        let config = OpenAiConfig {
            active: true,
            url: Some(url),
            api_key: Some("sk-test".to_string()),
            ..OpenAiConfig::default()
        };
        OpenAiClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_completion_text_shape() {
        let router = Router::new().route(
            "/v1/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "gpt-3.5-turbo");
                assert_eq!(body["max_tokens"], 150);
                assert_eq!(body["messages"][0]["role"], "system");
                let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
                assert!(prompt.ends_with("Here is the function :\nfunc Run()"));
                Json(json!({"choices": [{"text": "Run starts the loop"}]}))
            }),
        );
        let base = mock::serve(router).await;

        let text = client_for(format!("{}/v1/completions", base))
            .complete("func Run()", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(text, "Run starts the loop");
    }

    #[tokio::test]
    async fn test_chat_message_shape() {
        let router = Router::new().route(
            "/chat",
            post(|| async {
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "chat text"}}]
                }))
            }),
        );
        let base = mock::serve(router).await;

        let text = client_for(format!("{}/chat", base))
            .complete("func Run()", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(text, "chat text");
    }

    #[tokio::test]
    async fn test_empty_choices_keeps_body() {
        let router = Router::new().route("/chat", post(|| async { Json(json!({"choices": []})) }));
        let base = mock::serve(router).await;

        let err = client_for(format!("{}/chat", base))
            .complete("func Run()", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::Decode);
        assert_eq!(err.body.as_deref(), Some(r#"{"choices":[]}"#));
    }

    #[tokio::test]
    async fn test_unauthorized_status() {
        let router = Router::new().route(
            "/chat",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid key") }),
        );
        let base = mock::serve(router).await;

        let err = client_for(format!("{}/chat", base))
            .complete("func Run()", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = client_for("https://api.example.com/v1/chat/completions".to_string());
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sk-test"));
    }
}
