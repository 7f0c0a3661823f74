use crate::core::deck::Deck;
use crate::domain::model::{DrawnCard, DrawResult};
use crate::utils::error::{Result, TarotError};
use rand::Rng;

/// Chance that any drawn card lands reversed. One Bernoulli trial per card,
/// independent of the name selection and of the other cards.
pub const REVERSED_PROBABILITY: f64 = 0.3;

/// Draw `count` distinct cards from `deck` using the thread-local RNG.
pub fn draw(count: usize, deck: &Deck) -> Result<DrawResult> {
    draw_with_rng(&mut rand::thread_rng(), count, deck)
}

/// Draw with a caller-supplied RNG so tests can seed a `StdRng`.
///
/// Names are sampled uniformly without replacement; output order is
/// selection order. Fails before touching the RNG when the deck is too
/// small, so there is never a partial result.
pub fn draw_with_rng<R: Rng>(rng: &mut R, count: usize, deck: &Deck) -> Result<DrawResult> {
    if count > deck.len() {
        return Err(TarotError::InsufficientCardsError {
            requested: count,
            available: deck.len(),
        });
    }

    let picks = rand::seq::index::sample(rng, deck.len(), count);
    let cards = picks
        .iter()
        .map(|position| DrawnCard {
            name: deck.name_at(position).to_string(),
            is_reversed: rng.gen_bool(REVERSED_PROBABILITY),
        })
        .collect();

    Ok(DrawResult { cards })
}
