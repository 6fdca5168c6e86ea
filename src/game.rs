use crate::agents::{PlayerAction, PlayerModel, PlayerModelKind};
use crate::deck::Deck;
use crate::hand::{Board, HoleCards};
use crate::stats::{Statistics, StatsError};
use core::fmt;
use log::trace;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Streets with community cards, the ones hands are evaluated on.
    pub const POSTFLOP: [Street; 3] = [Street::Flop, Street::Turn, Street::River];

    pub const fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    /// Community cards on the table once this street has been dealt.
    pub const fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Position in [`Street::POSTFLOP`], `None` for preflop.
    pub const fn postflop_index(self) -> Option<usize> {
        match self {
            Street::Preflop => None,
            Street::Flop => Some(0),
            Street::Turn => Some(1),
            Street::River => Some(2),
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error("deck exhausted while dealing the {0}")]
    DeckExhausted(Street),
    #[error("unimplemented action: {action} by seat {position} on the {street}")]
    UnimplementedAction { action: PlayerAction, position: usize, street: Street },
    #[error(transparent)]
    Stats(#[from] StatsError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub(crate) hole: Option<HoleCards>,
}

impl Player {
    /// Hole cards, once the preflop deal has happened.
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }
}

/// Seats, community cards and the dealer button.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) players: Vec<Player>,
    pub(crate) board: Board,
    pub(crate) button: usize,
}

impl Table {
    pub fn new(players: usize) -> Self {
        Self { players: vec![Player::default(); players], board: Board::new(), button: 0 }
    }

    /// Build a table from already dealt cards, e.g. to replay a known deal.
    pub fn with_cards(holes: &[HoleCards], board: Board) -> Self {
        let players = holes.iter().map(|&h| Player { hole: Some(h) }).collect();
        Self { players, board, button: 0 }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Seat `offset` places away from `position`, wrapping around the table.
    pub fn rotate(&self, position: usize, offset: isize) -> usize {
        let n = self.players.len() as isize;
        if n == 0 {
            return 0;
        }
        (position as isize + offset).rem_euclid(n) as usize
    }
}

/// Plays deals of Hold'em to showdown and feeds every street to [`Statistics`].
///
/// ```
/// use holdem_sim::agents::PlayerModelKind;
/// use holdem_sim::config::SimulationConfig;
/// use holdem_sim::game::Game;
/// use holdem_sim::stats::Statistics;
///
/// let config = SimulationConfig { players: 4, iterations: 10, stats_hole_cards: true, ..Default::default() };
/// let mut stats = Statistics::new(&config);
/// let mut game = Game::seeded(config.players, PlayerModelKind::Showdown, 7);
/// for _ in 0..config.iterations {
///     game.play(&mut stats).unwrap();
/// }
/// assert_eq!(stats.games(), 10);
/// ```
#[derive(Debug)]
pub struct Game<R: Rng> {
    table: Table,
    deck: Deck,
    models: Vec<Box<dyn PlayerModel>>,
    rng: R,
}

impl Game<rand_chacha::ChaCha8Rng> {
    /// Reproducible game driven by a seeded ChaCha8 stream.
    pub fn seeded(players: usize, model: PlayerModelKind, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(players, model, rand_chacha::ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn new(players: usize, model: PlayerModelKind, rng: R) -> Self {
        Self {
            table: Table::new(players),
            deck: Deck::standard(),
            models: (0..players).map(|_| model.create()).collect(),
            rng,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// One full deal: shuffle, then deal, bet and collect each street in order.
    pub fn play(&mut self, stats: &mut Statistics) -> Result<(), GameError> {
        self.new_game();
        stats.new_game(&self.table);
        for street in Street::ALL {
            self.deal(street)?;
            self.betting_round(street)?;
            stats.collect(street, &self.table)?;
        }
        trace!("button {} board {:?}", self.table.button, self.table.board.as_slice());
        Ok(())
    }

    fn new_game(&mut self) {
        for player in &mut self.table.players {
            player.hole = None;
        }
        self.table.board_mut().clear();
        self.deck.shuffle_with(&mut self.rng);
        self.table.button = self.table.rotate(self.table.button, -1);
    }

    fn deal(&mut self, street: Street) -> Result<(), GameError> {
        let deck = &mut self.deck;
        let mut next = || deck.deal().ok_or(GameError::DeckExhausted(street));
        match street {
            Street::Preflop => {
                for player in &mut self.table.players {
                    let (a, b) = (next()?, next()?);
                    // Cards from one deck are always distinct.
                    player.hole = HoleCards::try_new(a, b).ok();
                }
            }
            Street::Flop | Street::Turn | Street::River => {
                while self.table.board.len() < street.board_len() {
                    let card = next()?;
                    self.table.board.push(card);
                }
            }
        }
        Ok(())
    }

    fn betting_round(&mut self, street: Street) -> Result<(), GameError> {
        let start = if street == Street::Preflop { -3 } else { -1 };
        let mut position = self.table.rotate(self.table.button, start);
        for _ in 0..self.table.players.len() {
            let player = &self.table.players[position];
            match self.models[position].act(&self.table, street, position, player) {
                PlayerAction::Check => {}
                action => return Err(GameError::UnimplementedAction { action, position, street }),
            }
            position = self.table.rotate(position, -1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct Folder;

    impl PlayerModel for Folder {
        fn act(&mut self, _: &Table, _: Street, _: usize, _: &Player) -> PlayerAction {
            PlayerAction::Fold
        }
    }

    fn stats(players: usize) -> Statistics {
        let config = SimulationConfig { players, iterations: 1, ..Default::default() };
        Statistics::new(&config)
    }

    #[test]
    fn rotate_wraps_both_ways() {
        let table = Table::new(5);
        assert_eq!(table.rotate(0, -1), 4);
        assert_eq!(table.rotate(1, -3), 3);
        assert_eq!(table.rotate(4, 1), 0);
        assert_eq!(table.rotate(2, 0), 2);
    }

    #[test]
    fn play_deals_distinct_cards_to_everyone() {
        let mut game = Game::seeded(10, PlayerModelKind::Showdown, 3);
        let mut stats = stats(10);
        game.play(&mut stats).unwrap();
        let table = game.table();
        assert_eq!(table.board().len(), 5);
        let mut seen = HashSet::new();
        for p in table.players() {
            let hole = p.hole().expect("dealt");
            assert!(seen.insert(hole.first()));
            assert!(seen.insert(hole.second()));
        }
        for c in table.board().as_slice() {
            assert!(seen.insert(*c));
        }
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn button_moves_every_deal() {
        let mut game = Game::seeded(4, PlayerModelKind::Showdown, 1);
        let mut stats = stats(4);
        game.play(&mut stats).unwrap();
        assert_eq!(game.table().button(), 3);
        game.play(&mut stats).unwrap();
        assert_eq!(game.table().button(), 2);
    }

    #[test]
    fn non_check_actions_are_rejected() {
        let mut game = Game::seeded(3, PlayerModelKind::Showdown, 9);
        game.models[1] = Box::new(Folder);
        let mut stats = stats(3);
        let err = game.play(&mut stats).unwrap_err();
        assert!(matches!(
            err,
            GameError::UnimplementedAction { action: PlayerAction::Fold, position: 1, street: Street::Preflop }
        ));
    }

    #[test]
    fn twenty_three_players_fit_in_one_deck() {
        let mut game = Game::seeded(23, PlayerModelKind::MillerTight, 5);
        let mut stats = stats(23);
        game.play(&mut stats).unwrap();
        assert_eq!(game.deck.remaining(), 1);
    }
}
