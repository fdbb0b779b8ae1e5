use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::{Choice, ColorChoice, Direction, PlayerId, TurnEvent};
use crate::card::{ActionKind, Card, Color, Face, HAND_SIZE, WildKind};
use crate::catalog::DECK_SIZE;
use crate::deck::Deck;
use crate::error::GameError;
use crate::rules;
use crate::state::{ColorPolicy, GameSettings, GameStateView, GameStatus, PendingEffects, TurnPhase};
use crate::strategy::Strategy;

const COLOR_STREAM: u64 = 0xC010_12ED_5EED_F00D;
const DRAW_TWO_CARDS: usize = 2;
const DRAW_FOUR_CARDS: usize = 4;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub num_players: usize,
    pub seed: u64,
    pub hand_size: usize,
    pub color_policy: ColorPolicy,
}

impl GameConfig {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        GameSettings::new(num_players)?;
        Ok(Self {
            num_players,
            seed,
            hand_size: HAND_SIZE,
            color_policy: ColorPolicy::default(),
        })
    }
}

/// Builder that enables deterministic deck injection for testing and RL experiments.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(num_players, seed)?,
            deck: None,
        })
    }

    /// Replace the shuffled deck. Must be a permutation of the full catalog;
    /// the last element is dealt first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn with_color_policy(mut self, policy: ColorPolicy) -> Self {
        self.config.color_policy = policy;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Who decides the acting player's move.
enum Decider<'a> {
    Fixed(Choice),
    Strategy(&'a mut dyn Strategy),
}

/// Core game engine for one round.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    started: bool,
    current_player: PlayerId,
    direction: Direction,
    current_color: Option<Color>,
    hands: Vec<Vec<Card>>,
    deck: Deck,
    discard_pile: Vec<Card>,
    pending: PendingEffects,
    turn: usize,
    consecutive_passes: usize,
    stalled_turns: usize,
    last_event: Option<TurnEvent>,
    rng: StdRng,
}

impl Game {
    pub fn builder(num_players: usize, seed: u64) -> Result<GameBuilder, GameError> {
        GameBuilder::new(num_players, seed)
    }

    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        GameBuilder::new(num_players, seed)?.build()
    }

    pub fn from_config(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    pub fn pending(&self) -> PendingEffects {
        self.pending
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Turns in a row that ended with a draw and pass. Any play or skipped turn
    /// resets it.
    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    pub fn last_event(&self) -> Option<&TurnEvent> {
        self.last_event.as_ref()
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.hands
            .get(player)
            .map(Vec::as_slice)
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.status, GameStatus::Ongoing)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        if !self.started {
            TurnPhase::NotStarted
        } else if self.is_finished() {
            TurnPhase::GameOver
        } else if self.current_color.is_none() {
            TurnPhase::AwaitingColor
        } else {
            TurnPhase::AwaitingAction
        }
    }

    /// Whether `card` could be played on the current top card.
    pub fn can_play(&self, card: Card) -> bool {
        self.top_card()
            .is_some_and(|top| rules::is_playable(card, top, self.current_color))
    }

    /// Positions in the current player's hand that may be played.
    pub fn playable_indices(&self) -> Result<Vec<usize>, GameError> {
        let top = self.top_card().ok_or(GameError::NotStarted)?;
        Ok(rules::playable_indices(
            &self.hands[self.current_player],
            top,
            self.current_color,
        ))
    }

    pub fn state_view(&self) -> GameStateView {
        GameStateView {
            settings: self.settings,
            phase: self.phase(),
            status: self.status,
            current_player: self.current_player,
            direction: self.direction,
            current_color: self.current_color,
            top_card: self.top_card(),
            discard_count: self.discard_pile.len(),
            deck_count: self.deck.len(),
            hands: self.hands.clone(),
            pending: self.pending,
            turn: self.turn,
            consecutive_passes: self.consecutive_passes,
            last_event: self.last_event.clone(),
        }
    }

    /// Deals the hands and flips the first card.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        for player in 0..self.settings.num_players {
            for _ in 0..self.settings.hand_size {
                let card = self.deck.draw_one()?;
                self.hands[player].push(card);
            }
        }
        let first = self.deck.draw_one()?;
        self.discard_pile.push(first);
        match first.face() {
            Face::Wild { kind } => {
                let color = pick_color(
                    self.settings.color_policy,
                    &self.hands[self.current_player],
                    &mut self.rng,
                );
                self.current_color = Some(color);
                if kind == WildKind::DrawFour {
                    self.pending.draw_four = 1;
                }
            }
            Face::Numbered { color, .. } | Face::ColorAction { color, .. } => {
                self.current_color = Some(color);
            }
        }
        self.started = true;
        log::debug!(
            "dealt {} cards to {} players, first card {first}",
            self.settings.hand_size,
            self.settings.num_players
        );
        Ok(())
    }

    /// Plays one turn for the current player.
    ///
    /// `Some(index)` selects a position in the playable list on behalf of an
    /// external controller; a wild played this way leaves the color pending until
    /// [`Game::set_current_color`]. `None` plays the first playable card and names
    /// a color automatically. Returns the winner when the hand empties.
    pub fn play_turn(&mut self, chosen: Option<usize>) -> Result<Option<PlayerId>, GameError> {
        let choice = match chosen {
            Some(playable_index) => Choice::Play {
                playable_index,
                color: ColorChoice::Pending,
            },
            None => Choice::Play {
                playable_index: 0,
                color: ColorChoice::Automatic,
            },
        };
        self.take_turn(Decider::Fixed(choice))
    }

    /// Like [`Game::play_turn`] with an explicit index, naming the wild color up front.
    pub fn play_turn_with_color(
        &mut self,
        playable_index: usize,
        color: Color,
    ) -> Result<Option<PlayerId>, GameError> {
        self.take_turn(Decider::Fixed(Choice::Play {
            playable_index,
            color: ColorChoice::Fixed(color),
        }))
    }

    pub fn play_turn_with(
        &mut self,
        strategy: &mut dyn Strategy,
    ) -> Result<Option<PlayerId>, GameError> {
        self.take_turn(Decider::Strategy(strategy))
    }

    pub fn apply_choice(&mut self, choice: Choice) -> Result<Option<PlayerId>, GameError> {
        self.take_turn(Decider::Fixed(choice))
    }

    /// Resolves pending effects, otherwise draws one card and passes.
    pub fn draw_turn(&mut self) -> Result<Option<PlayerId>, GameError> {
        self.take_turn(Decider::Fixed(Choice::Draw))
    }

    /// Draws up to `count` cards into a hand, reshuffling the discard pile when the
    /// deck runs out. Returns how many cards were actually drawn.
    pub fn draw_cards(&mut self, player: PlayerId, count: usize) -> Result<usize, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player >= self.hands.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        Ok(self.draw_into(player, count))
    }

    /// Names the color in effect by name. `false` if the name is not a card color.
    pub fn set_current_color(&mut self, color: &str) -> bool {
        match color.parse::<Color>() {
            Ok(color) => {
                self.choose_color(color);
                true
            }
            Err(_) => false,
        }
    }

    pub fn choose_color(&mut self, color: Color) {
        self.current_color = Some(color);
    }

    /// Points left in each hand. Only meaningful once the round has a winner,
    /// whose entry is always 0.
    pub fn calculate_scores(&self) -> Result<Vec<u32>, GameError> {
        self.winner().ok_or(GameError::NoWinner)?;
        Ok(self.hands.iter().map(|hand| rules::hand_score(hand)).collect())
    }

    /// Points collected by the winner from every other hand.
    pub fn winner_points(&self) -> Result<u32, GameError> {
        let winner = self.winner().ok_or(GameError::NoWinner)?;
        Ok(rules::round_score(&self.hands, winner))
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let mut settings = GameSettings::with_hand_size(config.num_players, config.hand_size)?;
        settings.color_policy = config.color_policy;
        let deck = match deck {
            Some(cards) => {
                validate_deck(&cards)?;
                Deck::from_cards(cards, config.seed)
            }
            None => Deck::new(config.seed),
        };
        Ok(Game {
            settings,
            status: GameStatus::Ongoing,
            started: false,
            current_player: 0,
            direction: Direction::Clockwise,
            current_color: None,
            hands: vec![Vec::with_capacity(settings.hand_size); settings.num_players],
            deck,
            discard_pile: Vec::with_capacity(DECK_SIZE),
            pending: PendingEffects::default(),
            turn: 0,
            consecutive_passes: 0,
            stalled_turns: 0,
            last_event: None,
            rng: StdRng::seed_from_u64(config.seed ^ COLOR_STREAM),
        })
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn take_turn(&mut self, mut decider: Decider<'_>) -> Result<Option<PlayerId>, GameError> {
        self.ensure_active()?;
        let player = self.current_player;

        if let Some(drawn) = self.resolve_pending(player) {
            self.consecutive_passes = 0;
            self.finish_turn(TurnEvent::Skipped { player, drawn });
            return Ok(None);
        }

        let top = self.top_card().ok_or(GameError::NotStarted)?;
        let playable = rules::playable_indices(&self.hands[player], top, self.current_color);
        if playable.is_empty() {
            self.pass_with_draw(player, true);
            return Ok(None);
        }

        let choice = match &mut decider {
            Decider::Fixed(choice) => *choice,
            Decider::Strategy(strategy) => {
                match strategy.choose(&self.hands[player], top, self.current_color, &playable) {
                    Some(playable_index) => Choice::Play {
                        playable_index,
                        color: ColorChoice::Automatic,
                    },
                    None => Choice::Draw,
                }
            }
        };
        let (hand_index, color_choice) = match choice {
            Choice::Draw => {
                self.pass_with_draw(player, false);
                return Ok(None);
            }
            Choice::Play {
                playable_index,
                color,
            } => {
                let hand_index =
                    *playable
                        .get(playable_index)
                        .ok_or(GameError::InvalidChoice {
                            index: playable_index,
                            available: playable.len(),
                        })?;
                (hand_index, color)
            }
        };

        let card = self.hands[player].remove(hand_index);
        self.discard_pile.push(card);
        self.consecutive_passes = 0;
        self.stalled_turns = 0;
        self.apply_effect(player, card, color_choice, &mut decider);
        let event = TurnEvent::Played {
            player,
            card,
            color: self.current_color,
        };

        if self.hands[player].is_empty() {
            self.status = GameStatus::Finished { winner: player };
            log::trace!("{event:?}");
            log::debug!("player {player} won on turn {}", self.turn);
            self.last_event = Some(event);
            return Ok(Some(player));
        }
        self.finish_turn(event);
        Ok(None)
    }

    /// Applies owed draws or skips. Returns the cards drawn if the turn is lost.
    fn resolve_pending(&mut self, player: PlayerId) -> Option<usize> {
        if self.pending.draw_four > 0 {
            let owed = DRAW_FOUR_CARDS * self.pending.draw_four;
            self.pending.draw_four = 0;
            Some(self.draw_into(player, owed))
        } else if self.pending.draw_two > 0 {
            let owed = DRAW_TWO_CARDS * self.pending.draw_two;
            self.pending.draw_two = 0;
            Some(self.draw_into(player, owed))
        } else if self.pending.skip {
            self.pending.skip = false;
            Some(0)
        } else {
            None
        }
    }

    fn apply_effect(
        &mut self,
        player: PlayerId,
        card: Card,
        color_choice: ColorChoice,
        decider: &mut Decider<'_>,
    ) {
        match card.face() {
            Face::Numbered { color, .. } => self.current_color = Some(color),
            Face::ColorAction { color, kind } => {
                self.current_color = Some(color);
                match kind {
                    ActionKind::DrawTwo => self.pending.draw_two += 1,
                    ActionKind::Skip => self.pending.skip = true,
                    ActionKind::Reverse if self.settings.num_players == 2 => {
                        self.pending.skip = true
                    }
                    ActionKind::Reverse => self.direction = self.direction.reversed(),
                }
            }
            Face::Wild { kind } => {
                if kind == WildKind::DrawFour {
                    self.pending.draw_four += 1;
                }
                self.current_color = match color_choice {
                    ColorChoice::Fixed(color) => Some(color),
                    ColorChoice::Pending => None,
                    ColorChoice::Automatic => {
                        let named = match decider {
                            Decider::Strategy(strategy) => {
                                strategy.choose_color(&self.hands[player])
                            }
                            Decider::Fixed(_) => None,
                        };
                        Some(named.unwrap_or_else(|| {
                            pick_color(
                                self.settings.color_policy,
                                &self.hands[player],
                                &mut self.rng,
                            )
                        }))
                    }
                };
            }
        }
    }

    fn pass_with_draw(&mut self, player: PlayerId, forced: bool) {
        let drawn = self.draw_into(player, 1);
        let event = TurnEvent::Drew {
            player,
            requested: 1,
            drawn,
        };
        self.consecutive_passes += 1;
        if forced && drawn == 0 {
            self.stalled_turns += 1;
        } else {
            self.stalled_turns = 0;
        }
        if self.stalled_turns >= self.settings.num_players {
            self.status = GameStatus::Draw;
            log::debug!("no player can act, round drawn on turn {}", self.turn);
            self.last_event = Some(event);
            return;
        }
        self.finish_turn(event);
    }

    fn finish_turn(&mut self, event: TurnEvent) {
        log::trace!("{event:?}");
        self.last_event = Some(event);
        self.advance_turn();
    }

    fn advance_turn(&mut self) {
        self.current_player = self
            .direction
            .next(self.current_player, self.settings.num_players);
        self.turn += 1;
    }

    fn draw_into(&mut self, player: PlayerId, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.deck.is_empty() {
                self.deck.reshuffle_from(&mut self.discard_pile);
            }
            match self.deck.draw_one() {
                Ok(card) => {
                    self.hands[player].push(card);
                    drawn += 1;
                }
                Err(_) => break,
            }
        }
        drawn
    }
}

fn validate_deck(cards: &[Card]) -> Result<(), GameError> {
    if cards.len() != DECK_SIZE {
        return Err(GameError::InvalidConfiguration(
            "deck must contain every catalog card",
        ));
    }
    let mut seen = [false; DECK_SIZE];
    for card in cards {
        if std::mem::replace(&mut seen[card.index()], true) {
            return Err(GameError::InvalidConfiguration("deck contains a duplicate card"));
        }
    }
    Ok(())
}

fn pick_color(policy: ColorPolicy, hand: &[Card], rng: &mut StdRng) -> Color {
    if policy == ColorPolicy::HandWeighted {
        let mut counts = [0u32; Color::ALL.len()];
        for color in hand.iter().filter_map(|card| card.color()) {
            counts[color.index()] += 1;
        }
        if let Ok(weights) = WeightedIndex::new(counts) {
            return Color::ALL[weights.sample(rng)];
        }
    }
    Color::ALL[rng.gen_range(0..Color::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(face: Face) -> Card {
        Card::first(face).unwrap()
    }

    fn started(num_players: usize, seed: u64) -> Game {
        let mut game = Game::new(num_players, seed).unwrap();
        game.start().unwrap();
        game
    }

    fn total_cards(game: &Game) -> usize {
        game.deck_len() + game.discard_pile().len() + game.hands.iter().map(Vec::len).sum::<usize>()
    }

    #[test]
    fn advance_turn_follows_direction() {
        let mut game = started(4, 1);
        game.current_player = 3;
        game.advance_turn();
        assert_eq!(game.current_player(), 0);
        game.direction = Direction::CounterClockwise;
        game.advance_turn();
        assert_eq!(game.current_player(), 3);
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn stacked_draw_twos_resolve_in_one_step() {
        let mut game = started(3, 5);
        game.pending = PendingEffects::default();
        game.pending.draw_two = 2;
        let before = game.hands[0].len();
        assert_eq!(game.play_turn(None), Ok(None));
        assert_eq!(game.hands[0].len(), before + 4);
        assert_eq!(
            game.last_event(),
            Some(&TurnEvent::Skipped { player: 0, drawn: 4 })
        );
        assert!(game.pending().is_empty());
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn draw_four_takes_precedence_over_draw_two() {
        let mut game = started(3, 6);
        game.pending = PendingEffects { draw_two: 1, draw_four: 2, skip: false };
        let before = game.hands[0].len();
        game.play_turn(None).unwrap();
        assert_eq!(game.hands[0].len(), before + 8);
        assert_eq!(game.pending().draw_two, 1);
        assert_eq!(game.pending().draw_four, 0);
        let before = game.hands[1].len();
        game.play_turn(None).unwrap();
        assert_eq!(game.hands[1].len(), before + 2);
        assert_eq!(total_cards(&game), DECK_SIZE);
    }

    #[test]
    fn skipped_turn_ignores_the_choice() {
        let mut game = started(2, 9);
        game.pending = PendingEffects { skip: true, ..PendingEffects::default() };
        assert_eq!(game.play_turn(Some(50)), Ok(None));
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn stalled_table_ends_in_a_draw() {
        let mut game = started(2, 11);
        let top = card(Face::ColorAction { color: Color::Red, kind: ActionKind::Skip });
        game.deck = Deck::from_cards(Vec::new(), 0);
        game.discard_pile = vec![top];
        game.hands = vec![
            vec![card(Face::Numbered { color: Color::Green, rank: 4 })],
            vec![card(Face::Numbered { color: Color::Yellow, rank: 8 })],
        ];
        game.current_color = Some(Color::Red);
        game.pending = PendingEffects::default();
        game.current_player = 0;
        assert!(game.playable_indices().unwrap().is_empty());

        game.play_turn(None).unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.consecutive_passes(), 1);
        assert_eq!(
            game.last_event(),
            Some(&TurnEvent::Drew { player: 0, requested: 1, drawn: 0 })
        );
        game.play_turn(None).unwrap();
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.consecutive_passes(), 2);
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.winner(), None);
        assert_eq!(game.play_turn(None), Err(GameError::GameOver));
    }

    #[test]
    fn hand_weighted_color_follows_hand() {
        let mut rng = StdRng::seed_from_u64(3);
        let hand = vec![
            card(Face::Numbered { color: Color::Blue, rank: 2 }),
            card(Face::ColorAction { color: Color::Blue, kind: ActionKind::Skip }),
            card(Face::Wild { kind: WildKind::Plain }),
        ];
        for _ in 0..20 {
            assert_eq!(pick_color(ColorPolicy::HandWeighted, &hand, &mut rng), Color::Blue);
        }
        let wild_only = vec![card(Face::Wild { kind: WildKind::Plain })];
        let picked = pick_color(ColorPolicy::HandWeighted, &wild_only, &mut rng);
        assert!(Color::ALL.contains(&picked));
    }

    #[test]
    fn injected_deck_must_be_a_permutation() {
        let mut deck = crate::catalog::full_deck();
        deck.pop();
        assert!(GameBuilder::new(2, 0).unwrap().with_deck(deck.clone()).build().is_err());
        deck.push(deck[0]);
        assert_eq!(
            GameBuilder::new(2, 0).unwrap().with_deck(deck).build().err(),
            Some(GameError::InvalidConfiguration("deck contains a duplicate card"))
        );
    }
}
