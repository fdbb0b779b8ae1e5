//! Legality and scoring rules.
//!
//! A wild card is always playable. A colored card is playable when its color is the
//! color in effect, or when it shows the same rank or action as the top card,
//! whatever the top card's color. While a wild color is still pending
//! (`current_color == None`) colored cards only match by rank or action.
//!
//! Scoring: wilds 50, colored actions 20, numbered cards their face value.

use crate::card::{Card, Color, Face};

pub const WILD_POINTS: u32 = 50;
pub const ACTION_POINTS: u32 = 20;

pub fn is_playable(card: Card, top_card: Card, current_color: Option<Color>) -> bool {
    let face = card.face();
    match face.color() {
        None => true,
        Some(color) => current_color == Some(color) || face.same_symbol(&top_card.face()),
    }
}

/// Indices into `hand` of every playable card, in hand order.
pub fn playable_indices(hand: &[Card], top_card: Card, current_color: Option<Color>) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| is_playable(**card, top_card, current_color))
        .map(|(index, _)| index)
        .collect()
}

pub fn score_of(card: Card) -> u32 {
    match card.face() {
        Face::Wild { .. } => WILD_POINTS,
        Face::ColorAction { .. } => ACTION_POINTS,
        Face::Numbered { rank, .. } => rank as u32,
    }
}

pub fn hand_score(hand: &[Card]) -> u32 {
    hand.iter().copied().map(score_of).sum()
}

/// Points won by `winner`: everything left in every other hand.
pub fn round_score(hands: &[Vec<Card>], winner: usize) -> u32 {
    hands
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != winner)
        .map(|(_, hand)| hand_score(hand))
        .sum()
}
