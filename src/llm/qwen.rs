//! Live DashScope-style text-generation client.

use crate::domain::model::{BackendFailure, LlmRequest, LlmResponse};
use crate::llm::LlmSettings;
use crate::utils::error::Result;
use reqwest::Client;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";

#[derive(Debug, Clone)]
pub struct QwenClient {
    client: Client,
    settings: LlmSettings,
}

impl QwenClient {
    /// Validate the settings and build the client. No network I/O happens
    /// here; a bad key only surfaces on the first call.
    pub fn new(settings: LlmSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            client: Client::new(),
            settings,
        })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn request_body(&self, request: &LlmRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "input": { "messages": request.messages() },
            "parameters": {
                "temperature": self.settings.temperature,
                "top_p": self.settings.top_p,
                "max_tokens": self.settings.max_tokens,
                "result_format": "message",
            }
        })
    }

    /// Send one completion request. Never returns an `Err`: every failure
    /// mode is folded into an `LlmResponse` the caller can display.
    pub async fn complete(&self, request: &LlmRequest) -> LlmResponse {
        tracing::debug!("Making API request to: {}", self.settings.api_endpoint);

        let result = self
            .client
            .post(&self.settings.api_endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(request))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("API request error: {}", e);
                return LlmResponse::failure(BackendFailure::Transport, format!("request error: {e}"));
            }
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "unknown error".to_string());
            return LlmResponse::failure(
                BackendFailure::Http,
                format!("HTTP status {}, message: {}", status.as_u16(), message),
            );
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => match body
                .pointer("/output/choices/0/message/content")
                .and_then(|content| content.as_str())
            {
                Some(content) => LlmResponse::Text(content.to_string()),
                None => LlmResponse::failure(
                    BackendFailure::MalformedBody,
                    "response body carries no generated text",
                ),
            },
            Err(e) => LlmResponse::failure(
                BackendFailure::MalformedBody,
                format!("invalid response body: {e}"),
            ),
        }
    }
}
