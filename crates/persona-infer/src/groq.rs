//! OpenAI-compatible chat-completions client (Groq by default)

use crate::{ChatBackend, ChatRequest, Completion, InferenceError};
use async_trait::async_trait;
use persona_core::InferenceSettings;
use reqwest::Client;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct GroqClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    fallback_model: Option<String>,
    max_tokens: u32,
}

impl GroqClient {
    pub fn new(settings: &InferenceSettings) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            fallback_model: settings.fallback_model.clone(),
            max_tokens: settings.max_tokens,
        })
    }

    async fn complete_with(&self, model: &str, request: &ChatRequest) -> Result<String, InferenceError> {
        let body = json!({
            "model": model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": self.max_tokens,
            "stream": false,
        });

        info!(model, url = %self.api_url, "calling chat completions");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e))?;

        if !status.is_success() {
            return Err(InferenceError::from_status(status.as_u16(), &text));
        }
        debug!(model, bytes = text.len(), "chat completion received");
        message_content(&text)
    }
}

/// Pull `choices[0].message.content` out of a chat-completions response body
fn message_content(body: &str) -> Result<String, InferenceError> {
    let data: Value = serde_json::from_str(body).map_err(|e| InferenceError::Parse(e.to_string()))?;
    match data["choices"][0]["message"]["content"].as_str() {
        Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
        _ => Err(InferenceError::EmptyResponse),
    }
}

/// Run `call` against the primary model. A rejected request (non-success
/// status) is retried once on the fallback model; other failures are final.
async fn with_model_fallback<F, Fut>(
    primary: &str,
    fallback: Option<&str>,
    call: F,
) -> Result<Completion, InferenceError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, InferenceError>>,
{
    match call(primary.to_string()).await {
        Ok(text) => Ok(Completion {
            text,
            model: primary.to_string(),
        }),
        Err(InferenceError::Status { status, body }) => {
            let Some(fallback) = fallback else {
                return Err(InferenceError::Status { status, body });
            };
            warn!(
                model = %primary,
                fallback,
                status,
                "primary model rejected, retrying with fallback model"
            );
            let text = call(fallback.to_string()).await?;
            Ok(Completion {
                text,
                model: fallback.to_string(),
            })
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, InferenceError> {
        with_model_fallback(&self.model, self.fallback_model.as_deref(), |model| async move {
            self.complete_with(&model, request).await
        })
        .await
    }
}
