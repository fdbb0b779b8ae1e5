use crate::card::{Card, Color};

/// Decision interface for automated players.
///
/// `playable` lists positions in `hand` whose cards may legally be played. `choose`
/// returns a position within `playable` (not within `hand`), or `None` to draw.
pub trait Strategy {
    fn choose(
        &mut self,
        hand: &[Card],
        top_card: Card,
        current_color: Option<Color>,
        playable: &[usize],
    ) -> Option<usize>;

    /// Color to name after playing a wild. `hand` excludes the wild just played.
    /// Returning `None` leaves the pick to the game's color policy.
    fn choose_color(&mut self, _hand: &[Card]) -> Option<Color> {
        None
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose(
        &mut self,
        hand: &[Card],
        top_card: Card,
        current_color: Option<Color>,
        playable: &[usize],
    ) -> Option<usize> {
        (**self).choose(hand, top_card, current_color, playable)
    }

    fn choose_color(&mut self, hand: &[Card]) -> Option<Color> {
        (**self).choose_color(hand)
    }
}
