use crate::card::{ActionKind, Card, Color, Face, WildKind};
use crate::rules::score_of;
use crate::strategy::Strategy;

/// Rule-based bot that sheds points without search or learning.
///
/// In plain English:
/// - Get rid of expensive colored cards first: actions before high numbers before low ones.
/// - Prefer cards that hurt the next player (draw two, then skip).
/// - Keep wild cards for when nothing else fits; a draw four is held longer than a plain wild.
/// - Stay in the color we hold most of, so the following turn is more likely to have a play.
/// - After a wild, name the color we hold most of.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    fn color_counts(hand: &[Card]) -> [i32; Color::ALL.len()] {
        let mut counts = [0; Color::ALL.len()];
        for color in hand.iter().filter_map(|card| card.color()) {
            counts[color.index()] += 1;
        }
        counts
    }

    /// Larger scores are better.
    fn score_play(card: Card, counts: &[i32; Color::ALL.len()]) -> i32 {
        let face = card.face();
        // Shedding points matters most when the opponent goes out first.
        let points = score_of(card) as i32 * 10;
        let attack_bonus = match face {
            Face::ColorAction { kind: ActionKind::DrawTwo, .. } => 150,
            Face::ColorAction { kind: ActionKind::Skip, .. } => 80,
            _ => 0,
        };
        // Staying in a well-stocked color keeps options open next turn.
        let color_bonus = face.color().map(|color| counts[color.index()] * 15).unwrap_or(0);
        let wild_penalty = match face {
            Face::Wild { kind: WildKind::DrawFour } => 2_000,
            Face::Wild { .. } => 1_500,
            _ => 0,
        };
        points + attack_bonus + color_bonus - wild_penalty
    }
}

impl Strategy for HeuristicBot {
    fn choose(
        &mut self,
        hand: &[Card],
        _top_card: Card,
        _current_color: Option<Color>,
        playable: &[usize],
    ) -> Option<usize> {
        let counts = Self::color_counts(hand);
        playable
            .iter()
            .enumerate()
            .filter_map(|(position, hand_index)| {
                hand.get(*hand_index).map(|card| (position, Self::score_play(*card, &counts)))
            })
            // Earlier positions win ties.
            .max_by_key(|(position, score)| (*score, std::cmp::Reverse(*position)))
            .map(|(position, _)| position)
    }

    fn choose_color(&mut self, hand: &[Card]) -> Option<Color> {
        let counts = Self::color_counts(hand);
        Color::ALL
            .into_iter()
            .filter(|color| counts[color.index()] > 0)
            .max_by_key(|color| (counts[color.index()], std::cmp::Reverse(color.index())))
    }
}
