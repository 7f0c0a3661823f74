//! LLM client layer.
//!
//! `LlmClient` is an enum over the live backend and the fallback responder.
//! The variant is selected once at construction from the validated
//! settings; both answer the same `complete` contract and neither can
//! crash the interactive session.

pub mod fallback;
pub mod qwen;

use crate::domain::model::{LlmRequest, LlmResponse};
use crate::utils::error::{Result, TarotError};
use crate::utils::validation;

pub use fallback::FallbackResponder;
pub use qwen::{QwenClient, DEFAULT_API_ENDPOINT};

/// Everything the live backend needs. `api_key` is required and non-empty;
/// the sampling parameters are validated at the config boundary.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl LlmSettings {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(TarotError::MissingConfigError {
                field: "api_key".to_string(),
            });
        }
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_range("temperature", self.temperature, 0.0, 1.0)?;
        validation::validate_range("top_p", self.top_p, 0.0, 1.0)?;
        validation::validate_positive_number("max_tokens", self.max_tokens as usize, 1)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum LlmClient {
    Live(QwenClient),
    Fallback(FallbackResponder),
}

impl LlmClient {
    /// Build the live client, or degrade to the fallback responder when the
    /// settings are invalid (typically a missing API key). Degrading is a
    /// session-level decision: every later call answers with the same
    /// static notice.
    pub fn from_settings(settings: LlmSettings) -> Self {
        match QwenClient::new(settings) {
            Ok(client) => {
                tracing::info!("LLM backend configured: {}", client.model());
                LlmClient::Live(client)
            }
            Err(e) => {
                tracing::warn!("LLM backend unavailable, using fallback responder: {}", e);
                LlmClient::Fallback(FallbackResponder::new(e.to_string()))
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LlmClient::Fallback(_))
    }

    pub async fn complete(&self, request: &LlmRequest) -> LlmResponse {
        match self {
            LlmClient::Live(client) => client.complete(request).await,
            LlmClient::Fallback(responder) => responder.complete(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: &str) -> LlmSettings {
        LlmSettings {
            api_key: api_key.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: "qwen-plus".to_string(),
            temperature: 0.8,
            top_p: 0.8,
            max_tokens: 2000,
        }
    }

    #[test]
    fn empty_api_key_selects_fallback() {
        let client = LlmClient::from_settings(settings(""));
        assert!(client.is_fallback());
    }

    #[test]
    fn whitespace_api_key_selects_fallback() {
        let client = LlmClient::from_settings(settings("   "));
        assert!(client.is_fallback());
    }

    #[test]
    fn valid_settings_select_live_client() {
        let client = LlmClient::from_settings(settings("sk-test"));
        assert!(!client.is_fallback());
    }

    #[tokio::test]
    async fn fallback_answers_consistently_across_calls() {
        let client = LlmClient::from_settings(settings(""));
        let request = LlmRequest {
            system: "sys".to_string(),
            user: "ask".to_string(),
        };
        let first = client.complete(&request).await.display_text();
        let second = client.complete(&request).await.display_text();
        assert!(first.contains("api_key"));
        assert_eq!(first, second, "no retry-then-succeed behavior");
    }

    #[test]
    fn settings_validation_bounds_sampling_parameters() {
        let mut s = settings("sk-test");
        assert!(s.validate().is_ok());
        s.temperature = 1.2;
        assert!(s.validate().is_err());
        s.temperature = 0.8;
        s.max_tokens = 0;
        assert!(s.validate().is_err());
    }
}
