use std::fmt::Write;

use crate::action::{Direction, TurnEvent};
use crate::card::Card;
use crate::state::{GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Print every hand face up instead of only the current player's.
    pub reveal_all_hands: bool,
    pub show_pending: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            reveal_all_hands: true,
            show_pending: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => {
            format!("Finished (winner: Player {winner})")
        }
        GameStatus::Draw => String::from("Finished (draw)"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(out, "Phase: {:?}  |  Turn: {}", state.phase, state.turn);
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(
        out,
        "Current player: {} ({direction})",
        state.current_player
    );
    let top = state
        .top_card
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("--"));
    let color = state
        .current_color
        .map(|color| color.to_string())
        .unwrap_or_else(|| String::from("pending"));
    let _ = writeln!(out, "Top card: {top}  |  Color: {color}");
    let _ = writeln!(
        out,
        "Deck: {}  |  Discard pile: {}",
        state.deck_count, state.discard_count
    );
    if options.show_pending && !state.pending.is_empty() {
        let _ = writeln!(
            out,
            "Pending: draw two x{}  draw four x{}  skip {}",
            state.pending.draw_two, state.pending.draw_four, state.pending.skip
        );
    }
    let _ = writeln!(out, "Players:");
    for (id, hand) in state.hands.iter().enumerate() {
        let current_tag = if id == state.current_player { " <- current" } else { "" };
        if options.reveal_all_hands || id == state.current_player {
            let _ = writeln!(out, "  Player {id}{current_tag}: {}", format_hand(hand));
        } else {
            let _ = writeln!(out, "  Player {id}{current_tag}: {} cards", hand.len());
        }
    }
    out
}

pub fn format_hand(hand: &[Card]) -> String {
    if hand.is_empty() {
        return String::from("(empty)");
    }
    hand.iter()
        .enumerate()
        .map(|(idx, card)| format!("{idx}:{card}"))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn describe_event(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Played {
            player,
            card,
            color,
        } => match (card.is_wild(), color) {
            (true, Some(color)) => format!("Player {player} plays {card} and names {color}"),
            (true, None) => format!("Player {player} plays {card}, color pending"),
            (false, _) => format!("Player {player} plays {card}"),
        },
        TurnEvent::Drew {
            player,
            requested,
            drawn,
        } => {
            if drawn == requested {
                format!("Player {player} draws {drawn}")
            } else {
                format!("Player {player} draws {drawn} of {requested} (deck exhausted)")
            }
        }
        TurnEvent::Skipped { player, drawn: 0 } => format!("Player {player} is skipped"),
        TurnEvent::Skipped { player, drawn } => {
            format!("Player {player} draws {drawn} and is skipped")
        }
    }
}
