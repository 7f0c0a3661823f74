use crate::core::Pipeline;
use crate::domain::model::Reading;
use crate::utils::error::Result;
use chrono::Local;

/// Runs the draw → resolve → build → complete chain for one user action.
pub struct ReadingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReadingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, count: usize, context: &str) -> Result<Reading> {
        tracing::info!("Drawing {} cards", count);
        let draw = self.pipeline.draw(count)?;
        tracing::debug!(
            "Drawn: {}",
            draw.cards
                .iter()
                .map(|c| format!("{} ({})", c.name, c.orientation_label()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        tracing::info!("Resolving card meanings");
        let input = self.pipeline.resolve(&draw, context);

        let request = self.pipeline.build(&input)?;

        tracing::info!("Consulting the interpreter model");
        let response = self.pipeline.complete(&request).await;
        if response.is_failure() {
            tracing::warn!("LLM backend failed; surfacing the failure as reading text");
        }

        Ok(Reading {
            cards: draw.cards,
            interpretation: response.display_text(),
            generated_at: Local::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        BackendFailure, DrawResult, DrawnCard, LlmRequest, LlmResponse, PromptInput,
    };
    use crate::utils::error::TarotError;

    /// Scripted pipeline so engine behavior is testable without a deck or
    /// network.
    struct ScriptedPipeline {
        deck_size: usize,
        response: LlmResponse,
    }

    #[async_trait::async_trait]
    impl Pipeline for ScriptedPipeline {
        fn draw(&self, count: usize) -> Result<DrawResult> {
            if count > self.deck_size {
                return Err(TarotError::InsufficientCardsError {
                    requested: count,
                    available: self.deck_size,
                });
            }
            Ok(DrawResult {
                cards: (0..count)
                    .map(|i| DrawnCard {
                        name: format!("Card {i}"),
                        is_reversed: false,
                    })
                    .collect(),
            })
        }

        fn resolve(&self, draw: &DrawResult, context: &str) -> PromptInput {
            PromptInput {
                card_details: format!("{} cards", draw.len()),
                context: context.to_string(),
                symbolism: String::new(),
            }
        }

        fn build(&self, input: &PromptInput) -> Result<LlmRequest> {
            Ok(LlmRequest {
                system: input.card_details.clone(),
                user: input.context.clone(),
            })
        }

        async fn complete(&self, _request: &LlmRequest) -> LlmResponse {
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn run_produces_a_reading_with_all_cards() {
        let engine = ReadingEngine::new(ScriptedPipeline {
            deck_size: 10,
            response: LlmResponse::Text("the cards are kind".to_string()),
        });
        let reading = engine.run(3, "hello").await.unwrap();
        assert_eq!(reading.cards.len(), 3);
        assert_eq!(reading.interpretation, "the cards are kind");
    }

    #[tokio::test]
    async fn insufficient_deck_aborts_before_any_backend_call() {
        let engine = ReadingEngine::new(ScriptedPipeline {
            deck_size: 1,
            response: LlmResponse::Text(String::new()),
        });
        assert!(matches!(
            engine.run(2, "hello").await,
            Err(TarotError::InsufficientCardsError { .. })
        ));
    }

    #[tokio::test]
    async fn backend_failure_becomes_reading_text_not_an_error() {
        let engine = ReadingEngine::new(ScriptedPipeline {
            deck_size: 10,
            response: LlmResponse::failure(BackendFailure::Http, "HTTP status 500"),
        });
        let reading = engine.run(1, "hello").await.unwrap();
        assert!(reading.interpretation.contains("API call failed"));
        assert!(reading.interpretation.contains("HTTP status 500"));
    }
}
