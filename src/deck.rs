use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::catalog::full_deck;
use crate::error::GameError;

/// Draw stack. The top of the stack is the last element.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Full catalog, shuffled deterministically from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self { cards, rng }
    }

    /// Uses `cards` in the given order. `seed` only drives later reshuffles.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    /// Moves every discard except the active card back under the deck, shuffled.
    /// Returns the number of cards recovered.
    pub fn reshuffle_from(&mut self, discard_pile: &mut Vec<Card>) -> usize {
        if discard_pile.len() <= 1 {
            return 0;
        }
        let top = discard_pile.len() - 1;
        let mut recovered: Vec<Card> = discard_pile.drain(..top).collect();
        recovered.shuffle(&mut self.rng);
        let count = recovered.len();
        recovered.append(&mut self.cards);
        self.cards = recovered;
        log::debug!("reshuffled {count} discards into the deck");
        count
    }
}
