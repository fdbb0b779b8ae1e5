use rand::Rng;

use crate::card::{Card, Color};
use crate::strategy::Strategy;

/// Baseline bot that samples uniformly from the playable cards and colors.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for RandomBot<R> {
    fn choose(
        &mut self,
        _hand: &[Card],
        _top_card: Card,
        _current_color: Option<Color>,
        playable: &[usize],
    ) -> Option<usize> {
        if playable.is_empty() {
            return None;
        }
        Some(self.rng.gen_range(0..playable.len()))
    }

    fn choose_color(&mut self, _hand: &[Card]) -> Option<Color> {
        Some(Color::ALL[self.rng.gen_range(0..Color::ALL.len())])
    }
}
