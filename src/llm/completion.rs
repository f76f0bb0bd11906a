use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, RoastError};
use crate::llm::truncate_for_log;
use crate::media::{self, DecodedImage};

/// Boundary to the external chat-completion service. Failures here always
/// propagate to the caller; there is no substitute for the final roast text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, image: Option<&DecodedImage>) -> Result<String>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpCompletionClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
    client: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            base_url: config.completion_base_url.clone(),
            api_key: config.completion_api_key.clone(),
            model: config.completion_model.clone(),
            temperature: config.completion_temperature,
            top_p: config.completion_top_p,
            client,
        }
    }
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

fn build_message_content(prompt: &str, image: Option<&DecodedImage>) -> Value {
    let Some(image) = image else {
        return Value::String(prompt.to_string());
    };

    let mime_type =
        media::detect_mime_type(&image.bytes).unwrap_or_else(|| image.mime_type.clone());
    let encoded = general_purpose::STANDARD.encode(&image.bytes);
    let data_url = format!("data:{};base64,{}", mime_type, encoded);

    json!([
        { "type": "text", "text": prompt },
        { "type": "image_url", "image_url": { "url": data_url } }
    ])
}

fn extract_completion_text(response: &Value) -> Option<String> {
    let content = response
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionClient {
    async fn complete(&self, prompt: &str, image: Option<&DecodedImage>) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": build_message_content(prompt, image) }
            ],
            "temperature": self.temperature,
            "top_p": self.top_p,
        });

        debug!(
            "Completion request: model={}, prompt_chars={}, has_image={}",
            self.model,
            prompt.chars().count(),
            image.is_some()
        );

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            warn!(
                "Completion API error: status={}, body={}",
                status, body_summary
            );
            return Err(RoastError::Upstream {
                status: status.as_u16(),
                body: message.unwrap_or(body_summary),
            });
        }

        let value = response.json::<Value>().await.map_err(|err| {
            RoastError::ContractViolation(format!("invalid completion response: {err}"))
        })?;

        extract_completion_text(&value).ok_or_else(|| {
            RoastError::ContractViolation(
                "completion response missing message content".to_string(),
            )
        })
    }
}
