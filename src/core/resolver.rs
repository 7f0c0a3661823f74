use crate::core::deck::Deck;
use crate::domain::model::{DrawResult, PromptInput};

/// Placeholders substituted when a known card has an empty text field.
pub const UPRIGHT_MEANING_UNKNOWN: &str = "upright meaning unknown";
pub const REVERSED_MEANING_UNKNOWN: &str = "reversed meaning unknown";
pub const SYMBOLISM_UNKNOWN: &str = "symbolism unknown";

/// Placeholders substituted when a drawn card is missing from the deck
/// entirely (tolerated, never an error).
pub const MEANING_PENDING: &str = "interpretation pending";
pub const SYMBOLISM_PENDING: &str = "symbolism pending";

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}

/// Resolve a draw into the text blocks the prompt builder consumes.
///
/// Pure function of its inputs: one details line and one symbolism line per
/// card, in draw order, joined with newlines; `context` passes through
/// verbatim.
pub fn resolve(draw: &DrawResult, deck: &Deck, context: &str) -> PromptInput {
    let mut detail_lines = Vec::with_capacity(draw.len());
    let mut symbolism_lines = Vec::with_capacity(draw.len());

    for card in &draw.cards {
        let orientation = card.orientation_label();
        match deck.get(&card.name) {
            Some(meaning) => {
                let text = if card.is_reversed {
                    or_placeholder(&meaning.reversed, REVERSED_MEANING_UNKNOWN)
                } else {
                    or_placeholder(&meaning.upright, UPRIGHT_MEANING_UNKNOWN)
                };
                let symbolism = or_placeholder(&meaning.symbolism, SYMBOLISM_UNKNOWN);
                detail_lines.push(format!("**{}** ({}): {}", card.name, orientation, text));
                symbolism_lines.push(format!("**{}**: {}", card.name, symbolism));
            }
            None => {
                detail_lines.push(format!(
                    "**{}** ({}): {}",
                    card.name, orientation, MEANING_PENDING
                ));
                symbolism_lines.push(format!("**{}**: {}", card.name, SYMBOLISM_PENDING));
            }
        }
    }

    PromptInput {
        card_details: detail_lines.join("\n"),
        context: context.to_string(),
        symbolism: symbolism_lines.join("\n"),
    }
}
