//! Uno rules engine: legal play, chained special-card effects, seeded decks and
//! round scoring, with pluggable strategies for bots and learning agents.

pub mod action;
pub mod bots;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod error;
pub mod game;
pub mod rules;
pub mod state;
pub mod strategy;
pub mod visualize;

pub use crate::action::{Choice, ColorChoice, Direction, PlayerId, TurnEvent};
pub use crate::bots::{
    FirstPlayableBot, HeuristicBot, RandomBot, create_bot_from_spec, label_for_spec,
};
pub use crate::card::{ActionKind, Card, Color, Face, WildKind};
pub use crate::catalog::{DECK_SIZE, decode, encode};
pub use crate::deck::Deck;
pub use crate::error::GameError;
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::rules::{is_playable, round_score, score_of};
pub use crate::state::{
    ColorPolicy, GameSettings, GameStateView, GameStatus, PendingEffects, TurnPhase,
};
pub use crate::strategy::Strategy;
pub use crate::visualize::{describe_event, render_state};
