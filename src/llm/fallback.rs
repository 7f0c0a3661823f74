//! Static responder used when the live backend could not be configured.

use crate::domain::model::{LlmRequest, LlmResponse};

/// Answers every completion with a fixed apology quoting the configuration
/// error that put the session into degraded mode.
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    reason: String,
}

impl FallbackResponder {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn complete(&self, _request: &LlmRequest) -> LlmResponse {
        LlmResponse::Text(format!(
            "Sorry, the AI model is currently unavailable: {}. Please retry later or check the configuration.",
            self.reason
        ))
    }
}
