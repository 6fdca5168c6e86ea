//! Run-wide showdown statistics.
//!
//! [`Statistics`] is fed once per street of every deal and only accumulates.
//! Everything derived from the counters (win rates, percentages, medians and
//! the CSV reports in [`report`]) is computed on demand after the run.

mod report;

pub use report::{HandTypeDistribution, REPORT_COLUMNS};

use crate::classifier::{HoleHandClass, HoleHandIndex, HOLE_HAND_COUNT};
use crate::config::SimulationConfig;
use crate::evaluator::{Hand, HandEvaluator, SortCode};
use crate::game::{Street, Table};
use crate::hand::HoleCards;
use log::trace;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StatsError {
    #[error("recorded {recorded} deals but the run was configured for {expected}")]
    IterationMismatch { expected: u64, recorded: u64 },
    #[error("{street} collected before any hole cards were dealt")]
    NotDealt { street: Street },
    #[error("seat {0} has no hole cards")]
    MissingHoleCards(usize),
    #[error("{street} expects {expected} board cards, found {found}")]
    BoardSize { street: Street, expected: usize, found: usize },
    #[error("cannot merge statistics for {theirs} players into {ours}")]
    PlayerCountMismatch { ours: usize, theirs: usize },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Class-by-class showdown wins: `get(i, j)` counts deals where class `i`
/// finished ahead of class `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatMatrix {
    cells: Vec<u32>,
}

impl BeatMatrix {
    fn new() -> Self {
        Self { cells: vec![0; HOLE_HAND_COUNT * HOLE_HAND_COUNT] }
    }

    pub fn get(&self, winner: usize, loser: usize) -> u32 {
        self.cells[winner * HOLE_HAND_COUNT + loser]
    }

    fn increment(&mut self, winner: usize, loser: usize) {
        debug_assert_ne!(winner, loser);
        self.cells[winner * HOLE_HAND_COUNT + loser] += 1;
    }

    fn merge(&mut self, other: &BeatMatrix) {
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            *a += b;
        }
    }
}

#[derive(Debug, Clone)]
struct StreetStats {
    beat: BeatMatrix,
    /// Deals won by each sort code. Sparse: only a few thousand distinct
    /// codes ever win.
    hand_wins: BTreeMap<SortCode, u64>,
}

impl StreetStats {
    fn new() -> Self {
        Self { beat: BeatMatrix::new(), hand_wins: BTreeMap::new() }
    }
}

/// One seat of the current deal.
#[derive(Debug, Clone, Copy)]
struct Contender {
    hole: HoleCards,
    class: usize,
    hands: [Option<Hand>; 3],
}

impl Contender {
    fn code(&self, k: usize) -> SortCode {
        self.hands[k].map(|h| h.sort_code()).unwrap_or_default()
    }
}

/// Accumulates beat matrices, hole-hand counters and winning-hand histograms
/// over a run.
#[derive(Debug, Clone)]
pub struct Statistics {
    players: usize,
    iterations: u64,
    winning_hand: bool,
    hole_cards: bool,
    index: HoleHandIndex,
    evaluator: HandEvaluator,
    games: u64,
    contenders: Vec<Contender>,
    order: Vec<usize>,
    /// Winner code, loser code, winner class, loser class.
    pairs: Vec<(SortCode, SortCode, usize, usize)>,
    streets: [StreetStats; 3],
    appearances: Vec<u64>,
    showdown_wins: Vec<u64>,
}

impl Statistics {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            players: config.players,
            iterations: config.iterations,
            winning_hand: config.stats_winning_hand,
            hole_cards: config.stats_hole_cards,
            index: HoleHandIndex::new(),
            evaluator: HandEvaluator::new(),
            games: 0,
            contenders: Vec::with_capacity(config.players),
            order: Vec::with_capacity(config.players),
            pairs: Vec::new(),
            streets: std::array::from_fn(|_| StreetStats::new()),
            appearances: vec![0; HOLE_HAND_COUNT],
            showdown_wins: vec![0; HOLE_HAND_COUNT],
        }
    }

    /// Start a deal. Hole cards are read at the preflop collect.
    pub fn new_game(&mut self, _table: &Table) {
        self.games += 1;
        self.contenders.clear();
    }

    /// Fold one street of the current deal into the counters. Streets must
    /// arrive in order, preflop first.
    pub fn collect(&mut self, street: Street, table: &Table) -> Result<(), StatsError> {
        match street.postflop_index() {
            None => self.collect_preflop(table),
            Some(k) => self.collect_postflop(street, k, table),
        }
    }

    fn collect_preflop(&mut self, table: &Table) -> Result<(), StatsError> {
        self.contenders.clear();
        for (seat, player) in table.players().iter().enumerate() {
            let hole = player.hole().ok_or(StatsError::MissingHoleCards(seat))?;
            let class = self.index.index_of(&HoleHandClass::of(&hole));
            self.contenders.push(Contender { hole, class, hands: [None; 3] });
        }
        if self.hole_cards {
            for c in &self.contenders {
                self.appearances[c.class] += 1;
            }
        }
        Ok(())
    }

    fn collect_postflop(&mut self, street: Street, k: usize, table: &Table) -> Result<(), StatsError> {
        if !(self.winning_hand || self.hole_cards) {
            return Ok(());
        }
        if self.contenders.is_empty() {
            return Err(StatsError::NotDealt { street });
        }
        let board = table.board().as_slice();
        if board.len() != street.board_len() {
            return Err(StatsError::BoardSize { street, expected: street.board_len(), found: board.len() });
        }

        self.evaluator.reset(board);
        for c in &mut self.contenders {
            c.hands[k] = Some(self.evaluator.evaluate(&c.hole));
        }

        // Stable, so equal hands keep seat order and the lowest seat counts
        // as the top player.
        let contenders = &self.contenders;
        self.order.clear();
        self.order.extend(0..contenders.len());
        self.order.sort_by(|&a, &b| contenders[b].code(k).cmp(&contenders[a].code(k)));
        let top = contenders[self.order[0]];
        trace!("{street} won by {:?}", top.hands[k]);

        if self.winning_hand {
            *self.streets[k].hand_wins.entry(top.code(k)).or_insert(0) += 1;
        }

        if self.hole_cards {
            self.pairs.clear();
            for (i, &wi) in self.order.iter().enumerate() {
                let winner = &contenders[wi];
                for &li in &self.order[i + 1..] {
                    let loser = &contenders[li];
                    if winner.code(k) != loser.code(k) && winner.class != loser.class {
                        self.pairs.push((winner.code(k), loser.code(k), winner.class, loser.class));
                    }
                }
            }
            // Seats sharing both class and final hand count once per opponent.
            self.pairs.sort_unstable();
            self.pairs.dedup();
            for &(_, _, w, l) in &self.pairs {
                self.streets[k].beat.increment(w, l);
            }
            if street == Street::River {
                self.showdown_wins[top.class] += 1;
            }
        }
        Ok(())
    }

    /// Add another run's counters, e.g. from a second worker. Per-deal state
    /// is left alone.
    pub fn merge(&mut self, other: &Statistics) -> Result<(), StatsError> {
        if self.players != other.players {
            return Err(StatsError::PlayerCountMismatch { ours: self.players, theirs: other.players });
        }
        self.games += other.games;
        for (ours, theirs) in self.streets.iter_mut().zip(&other.streets) {
            ours.beat.merge(&theirs.beat);
            for (code, n) in &theirs.hand_wins {
                *ours.hand_wins.entry(*code).or_insert(0) += n;
            }
        }
        for (a, b) in self.appearances.iter_mut().zip(&other.appearances) {
            *a += b;
        }
        for (a, b) in self.showdown_wins.iter_mut().zip(&other.showdown_wins) {
            *a += b;
        }
        Ok(())
    }

    /// Deals recorded so far.
    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn index(&self) -> &HoleHandIndex {
        &self.index
    }

    /// Beat matrix of a post-flop street; `None` for preflop.
    pub fn beat_matrix(&self, street: Street) -> Option<&BeatMatrix> {
        street.postflop_index().map(|k| &self.streets[k].beat)
    }

    /// Shorthand for `beat_matrix(street).get(winner, loser)`, 0 preflop.
    pub fn beat(&self, street: Street, winner: usize, loser: usize) -> u32 {
        self.beat_matrix(street).map_or(0, |m| m.get(winner, loser))
    }

    /// Deals won by each sort code on a post-flop street, weakest code first.
    pub fn hand_wins(&self, street: Street) -> Option<&BTreeMap<SortCode, u64>> {
        street.postflop_index().map(|k| &self.streets[k].hand_wins)
    }

    pub fn appearances(&self, class: usize) -> u64 {
        self.appearances.get(class).copied().unwrap_or(0)
    }

    pub fn showdown_wins(&self, class: usize) -> u64 {
        self.showdown_wins.get(class).copied().unwrap_or(0)
    }

    /// Hand seat `seat` made on `street` in the current deal.
    pub fn hand(&self, seat: usize, street: Street) -> Option<Hand> {
        let k = street.postflop_index()?;
        self.contenders.get(seat)?.hands[k]
    }

    pub(crate) fn check_iterations(&self) -> Result<(), StatsError> {
        if self.games != self.iterations {
            return Err(StatsError::IterationMismatch { expected: self.iterations, recorded: self.games });
        }
        Ok(())
    }

    pub(crate) fn collects_hole_cards(&self) -> bool {
        self.hole_cards
    }

    pub(crate) fn collects_winning_hand(&self) -> bool {
        self.winning_hand
    }
}
