use crate::core::deck::Deck;
use crate::core::prompt::PromptBuilder;
use crate::core::{draw, resolver, Pipeline};
use crate::domain::model::{DrawResult, LlmRequest, LlmResponse, PromptInput};
use crate::llm::LlmClient;
use crate::utils::error::Result;

/// The concrete reading pipeline: a read-only deck, the prompt builder and
/// the (live or fallback) LLM client. Shared by every sequential action in
/// the session; no mutable state.
pub struct TarotPipeline {
    deck: Deck,
    builder: PromptBuilder,
    client: LlmClient,
}

impl TarotPipeline {
    pub fn new(deck: Deck, client: LlmClient) -> Self {
        Self {
            deck,
            builder: PromptBuilder::new(),
            client,
        }
    }

    pub fn with_builder(mut self, builder: PromptBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}

#[async_trait::async_trait]
impl Pipeline for TarotPipeline {
    fn draw(&self, count: usize) -> Result<DrawResult> {
        draw::draw(count, &self.deck)
    }

    fn resolve(&self, draw: &DrawResult, context: &str) -> PromptInput {
        resolver::resolve(draw, &self.deck, context)
    }

    fn build(&self, input: &PromptInput) -> Result<LlmRequest> {
        self.builder.build(input)
    }

    async fn complete(&self, request: &LlmRequest) -> LlmResponse {
        self.client.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmSettings, DEFAULT_API_ENDPOINT};
    use crate::utils::error::TarotError;

    fn pipeline() -> TarotPipeline {
        let deck = Deck::from_csv_str(
            "card;upright;reversed;symbolism\nFool;new beginnings;recklessness;innocence\n",
        )
        .unwrap();
        let client = LlmClient::from_settings(LlmSettings {
            api_key: String::new(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: "qwen-plus".to_string(),
            temperature: 0.8,
            top_p: 0.8,
            max_tokens: 2000,
        });
        TarotPipeline::new(deck, client)
    }

    #[test]
    fn draw_respects_deck_size() {
        let p = pipeline();
        assert_eq!(p.draw(1).unwrap().len(), 1);
        assert!(matches!(
            p.draw(2),
            Err(TarotError::InsufficientCardsError { .. })
        ));
    }

    #[tokio::test]
    async fn stages_compose_into_a_request() {
        let p = pipeline();
        let draw = p.draw(1).unwrap();
        let input = p.resolve(&draw, "quo vadis?");
        let request = p.build(&input).unwrap();
        assert!(request.system.contains("Fool"));
        assert_eq!(request.user, "quo vadis?");

        // Fallback client: completion still yields displayable text.
        let response = p.complete(&request).await;
        assert!(!response.display_text().is_empty());
    }
}
