use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Order in which seats take turns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat that acts after `from` at a table of `num_players`.
    pub fn next(self, from: PlayerId, num_players: usize) -> PlayerId {
        match self {
            Direction::Clockwise => (from + 1) % num_players,
            Direction::CounterClockwise => (from + num_players - 1) % num_players,
        }
    }
}

/// How the color of a played wild is decided.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ColorChoice {
    /// The engine picks using its color policy.
    Automatic,
    /// Left unset until `set_current_color` is called.
    Pending,
    Fixed(Color),
}

/// What the acting player does once pending effects are resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Choice {
    /// Play the card at this position of the playable list.
    Play { playable_index: usize, color: ColorChoice },
    Draw,
}

/// Observable outcome of one completed turn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    Played {
        player: PlayerId,
        card: Card,
        color: Option<Color>,
    },
    Drew {
        player: PlayerId,
        requested: usize,
        drawn: usize,
    },
    /// The player lost the turn to a pending effect, drawing `drawn` cards.
    Skipped {
        player: PlayerId,
        drawn: usize,
    },
}

impl TurnEvent {
    pub fn player(&self) -> PlayerId {
        match self {
            TurnEvent::Played { player, .. }
            | TurnEvent::Drew { player, .. }
            | TurnEvent::Skipped { player, .. } => *player,
        }
    }
}
