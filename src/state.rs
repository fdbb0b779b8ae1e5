use serde::{Deserialize, Serialize};

use crate::action::{Direction, PlayerId, TurnEvent};
use crate::card::{Card, Color, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::catalog::DECK_SIZE;
use crate::error::GameError;

/// How the engine names a color for automated wild plays.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Uniform over the four colors.
    #[default]
    Uniform,
    /// Weighted by how many cards of each color remain in the player's hand.
    HandWeighted,
}

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub color_policy: ColorPolicy,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Self::with_hand_size(num_players, HAND_SIZE)
    }

    pub fn with_hand_size(num_players: usize, hand_size: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        if hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if num_players * hand_size + 1 > DECK_SIZE {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal hands",
            ));
        }
        Ok(Self {
            num_players,
            hand_size,
            color_policy: ColorPolicy::default(),
        })
    }
}

/// Forced draws and skips owed by the next player to act.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingEffects {
    pub draw_two: usize,
    pub draw_four: usize,
    pub skip: bool,
}

impl PendingEffects {
    pub fn is_empty(&self) -> bool {
        self.draw_two == 0 && self.draw_four == 0 && !self.skip
    }
}

/// Status of the round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
    /// Nobody could play or draw for a full table rotation.
    Draw,
}

/// Current phase of the round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    NotStarted,
    AwaitingAction,
    /// A wild is on top and its color has not been named yet.
    AwaitingColor,
    GameOver,
}

/// Read-only snapshot of the whole table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub current_color: Option<Color>,
    pub top_card: Option<Card>,
    pub discard_count: usize,
    pub deck_count: usize,
    pub hands: Vec<Vec<Card>>,
    pub pending: PendingEffects,
    pub turn: usize,
    pub consecutive_passes: usize,
    pub last_event: Option<TurnEvent>,
}

impl GameStateView {
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Cards across deck, discard pile and hands.
    pub fn card_count(&self) -> usize {
        self.deck_count + self.discard_count + self.hands.iter().map(Vec::len).sum::<usize>()
    }
}
