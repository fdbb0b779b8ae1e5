//! Fixed universe of 108 cards and its dense integer encoding.
//!
//! Index layout, in order:
//! - `0..4`: the single zero of each color
//! - `4..76`: ranks 1 to 9 of each color, two copies each
//! - `76..100`: draw two, reverse and skip of each color, two copies each
//! - `100..108`: four plain wilds followed by four wild draw fours
//!
//! A played wild keeps its index; the color chosen for it is tracked by the game.

use crate::card::{ActionKind, Card, Color, Face, MAX_RANK, WildKind};
use crate::error::GameError;

pub const DECK_SIZE: usize = 108;

/// Value used by [`encode_hand`] to fill empty slots.
pub const HAND_PADDING: i32 = -1;

const ZERO_BASE: usize = 0;
const NUMBERED_BASE: usize = ZERO_BASE + Color::ALL.len();
const NUMBERED_COPIES: usize = 2;
const NUMBERED_PER_COLOR: usize = MAX_RANK as usize * NUMBERED_COPIES;
const ACTION_BASE: usize = NUMBERED_BASE + NUMBERED_PER_COLOR * Color::ALL.len();
const ACTION_COPIES: usize = 2;
const ACTION_PER_COLOR: usize = ActionKind::ALL.len() * ACTION_COPIES;
const WILD_BASE: usize = ACTION_BASE + ACTION_PER_COLOR * Color::ALL.len();
const WILD_COPIES: usize = 4;

const _: () = assert!(WILD_BASE + WildKind::ALL.len() * WILD_COPIES == DECK_SIZE);

/// Number of physical copies of a face in a full deck. Zero for faces that do not exist.
pub fn copies_of(face: Face) -> usize {
    match face {
        Face::Numbered { rank: 0, .. } => 1,
        Face::Numbered { rank, .. } if rank <= MAX_RANK => NUMBERED_COPIES,
        Face::Numbered { .. } => 0,
        Face::ColorAction { .. } => ACTION_COPIES,
        Face::Wild { .. } => WILD_COPIES,
    }
}

pub(crate) fn index_of(face: Face, copy: usize) -> Option<usize> {
    if copy >= copies_of(face) {
        return None;
    }
    let index = match face {
        Face::Numbered { color, rank: 0 } => ZERO_BASE + color.index(),
        Face::Numbered { color, rank } => {
            NUMBERED_BASE
                + color.index() * NUMBERED_PER_COLOR
                + (rank as usize - 1) * NUMBERED_COPIES
                + copy
        }
        Face::ColorAction { color, kind } => {
            let kind_index = ActionKind::ALL.iter().position(|k| *k == kind)?;
            ACTION_BASE + color.index() * ACTION_PER_COLOR + kind_index * ACTION_COPIES + copy
        }
        Face::Wild { kind } => {
            let kind_index = WildKind::ALL.iter().position(|k| *k == kind)?;
            WILD_BASE + kind_index * WILD_COPIES + copy
        }
    };
    Some(index)
}

pub(crate) fn face_of(index: usize) -> Face {
    debug_assert!(index < DECK_SIZE, "card index {index} outside the catalog");
    if index < NUMBERED_BASE {
        Face::Numbered { color: Color::ALL[index - ZERO_BASE], rank: 0 }
    } else if index < ACTION_BASE {
        let offset = index - NUMBERED_BASE;
        Face::Numbered {
            color: Color::ALL[offset / NUMBERED_PER_COLOR],
            rank: ((offset % NUMBERED_PER_COLOR) / NUMBERED_COPIES) as u8 + 1,
        }
    } else if index < WILD_BASE {
        let offset = index - ACTION_BASE;
        Face::ColorAction {
            color: Color::ALL[offset / ACTION_PER_COLOR],
            kind: ActionKind::ALL[(offset % ACTION_PER_COLOR) / ACTION_COPIES],
        }
    } else {
        let offset = index - WILD_BASE;
        Face::Wild { kind: WildKind::ALL[offset / WILD_COPIES] }
    }
}

#[inline]
pub fn encode(card: Card) -> usize {
    card.index()
}

pub fn decode(index: usize) -> Result<Card, GameError> {
    if index < DECK_SIZE {
        Ok(Card::from_index_unchecked(index))
    } else {
        Err(GameError::UnknownCardIndex(index))
    }
}

/// Builds the full 108-card deck in catalog order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE).map(Card::from_index_unchecked).collect()
}

/// Encodes a hand into a fixed-width vector, padded with [`HAND_PADDING`].
/// Hands longer than `width` are truncated.
pub fn encode_hand(hand: &[Card], width: usize) -> Vec<i32> {
    let mut out: Vec<i32> = hand.iter().take(width).map(|card| encode(*card) as i32).collect();
    out.resize(width, HAND_PADDING);
    out
}

pub fn decode_hand(encoded: &[i32]) -> Result<Vec<Card>, GameError> {
    encoded
        .iter()
        .filter(|value| **value != HAND_PADDING)
        .map(|value| {
            usize::try_from(*value)
                .map_err(|_| GameError::InvalidEncodedCard(*value))
                .and_then(decode)
        })
        .collect()
}
