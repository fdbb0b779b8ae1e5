use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::GameError;

pub const HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const MAX_RANK: u8 = 9;

/// One of the four card colors. Wild cards have none until one is chosen.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Position of the color in [`Color::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Color::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GameError::UnknownColor(trimmed.to_string()))
    }
}

/// Colored special cards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    DrawTwo,
    Reverse,
    Skip,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::DrawTwo, ActionKind::Reverse, ActionKind::Skip];
}

/// Uncolored wild variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WildKind {
    Plain,
    DrawFour,
}

impl WildKind {
    pub const ALL: [WildKind; 2] = [WildKind::Plain, WildKind::DrawFour];
}

/// What is printed on a card, independent of which physical copy it is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Face {
    Numbered { color: Color, rank: u8 },
    ColorAction { color: Color, kind: ActionKind },
    Wild { kind: WildKind },
}

impl Face {
    /// Printed color; `None` for wild cards.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Face::Numbered { color, .. } | Face::ColorAction { color, .. } => Some(*color),
            Face::Wild { .. } => None,
        }
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Face::Wild { .. })
    }

    /// True when both faces carry the same rank or kind, ignoring color.
    pub fn same_symbol(&self, other: &Face) -> bool {
        match (self, other) {
            (Face::Numbered { rank: a, .. }, Face::Numbered { rank: b, .. }) => a == b,
            (Face::ColorAction { kind: a, .. }, Face::ColorAction { kind: b, .. }) => a == b,
            (Face::Wild { kind: a }, Face::Wild { kind: b }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Numbered { color, rank } => write!(f, "{color} {rank}"),
            Face::ColorAction { color, kind } => {
                let label = match kind {
                    ActionKind::DrawTwo => "+2",
                    ActionKind::Reverse => "reverse",
                    ActionKind::Skip => "skip",
                };
                write!(f, "{color} {label}")
            }
            Face::Wild { kind: WildKind::Plain } => f.write_str("wild"),
            Face::Wild { kind: WildKind::DrawFour } => f.write_str("wild +4"),
        }
    }
}

/// A physical card: one of the 108 catalog instances, identified by its index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Looks up a specific copy of a face. `None` if the face or copy does not exist.
    pub fn new(face: Face, copy: usize) -> Option<Card> {
        catalog::index_of(face, copy).map(|index| Card(index as u8))
    }

    /// First catalog copy of a face.
    pub fn first(face: Face) -> Option<Card> {
        Self::new(face, 0)
    }

    pub(crate) fn from_index_unchecked(index: usize) -> Card {
        debug_assert!(index < catalog::DECK_SIZE);
        Card(index as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn face(self) -> Face {
        catalog::face_of(self.index())
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        self.face().color()
    }

    #[inline]
    pub fn is_wild(self) -> bool {
        self.face().is_wild()
    }
}

impl TryFrom<u8> for Card {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        catalog::decode(value as usize)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.face(), f)
    }
}
