use crate::domain::model::{LlmRequest, PromptInput};
use crate::utils::error::{Result, TarotError};

/// Default system template. The three placeholders are substituted verbatim.
pub const SYSTEM_TEMPLATE: &str = "\
You are a mystical tarot reader with deep knowledge of symbolism and psychology.
Analyze the following tarot cards based on the provided meanings (taking into account whether they are reversed):
{card_details}
Pay particular attention to the following:
- Analyze each card's meaning in detail (upright or reversed).
- Then give an overall, context-aware interpretation for the question: {context}.
- Stay mystical, and ground the reading in the cards' symbolism: {symbolism}.
- Always close the reading with advice for improving or handling the situation, drawing on your knowledge of psychology.
";

/// Default user template: the context passes straight through. Kept as a
/// separate message for protocol symmetry.
pub const USER_TEMPLATE: &str = "{context}";

const SYSTEM_PLACEHOLDERS: [&str; 3] = ["{card_details}", "{context}", "{symbolism}"];

/// Renders a resolved draw into the two-message LLM request.
///
/// Templates are fixed at construction; `TemplateError` only fires when a
/// custom template drops a required placeholder.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_template: String,
    user_template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            system_template: SYSTEM_TEMPLATE.to_string(),
            user_template: USER_TEMPLATE.to_string(),
        }
    }

    pub fn with_templates(
        system_template: impl Into<String>,
        user_template: impl Into<String>,
    ) -> Self {
        Self {
            system_template: system_template.into(),
            user_template: user_template.into(),
        }
    }

    pub fn build(&self, input: &PromptInput) -> Result<LlmRequest> {
        for placeholder in SYSTEM_PLACEHOLDERS {
            if !self.system_template.contains(placeholder) {
                return Err(TarotError::TemplateError {
                    message: format!("system template is missing the {} placeholder", placeholder),
                });
            }
        }
        if !self.user_template.contains("{context}") {
            return Err(TarotError::TemplateError {
                message: "user template is missing the {context} placeholder".to_string(),
            });
        }

        let system = self
            .system_template
            .replace("{card_details}", &input.card_details)
            .replace("{symbolism}", &input.symbolism)
            .replace("{context}", &input.context);
        let user = self.user_template.replace("{context}", &input.context);

        Ok(LlmRequest { system, user })
    }
}
