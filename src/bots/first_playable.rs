use crate::card::{Card, Color};
use crate::strategy::Strategy;

/// Rule-based agent: always plays the first playable card in hand order and leaves
/// the wild color to the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPlayableBot;

impl FirstPlayableBot {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for FirstPlayableBot {
    fn choose(
        &mut self,
        _hand: &[Card],
        _top_card: Card,
        _current_color: Option<Color>,
        playable: &[usize],
    ) -> Option<usize> {
        if playable.is_empty() { None } else { Some(0) }
    }
}
