mod rank_scan;
mod sort_code;
mod suit_scan;

pub use sort_code::{Hand, HandType, SortCode, SortCodeError};

use crate::cards::{Card, Rank, Suit};
use crate::hand::HoleCards;
use log::trace;
use rank_scan::RankScan;

/// Incremental 7-card evaluator shared by every player at one table.
///
/// The board is loaded once per street with [`reset`](Self::reset); each
/// [`evaluate`](Self::evaluate) pushes two hole cards on top of it, finds the
/// best hand and rolls the buckets back to the board. Buckets keep their
/// capacity, so after the first few deals nothing is allocated.
///
/// Input is trusted: duplicate cards or more than five board cards are not
/// detected here. See [`crate::hand::validate_holdem`].
///
/// ```
/// use holdem_sim::evaluator::{HandEvaluator, HandType};
/// use holdem_sim::hand::{Board, HoleCards};
///
/// let board: Board = "4d 5s Ac Kh Qd".parse().unwrap();
/// let hole: HoleCards = "2h 3c".parse().unwrap();
///
/// let mut eval = HandEvaluator::new();
/// eval.reset(board.as_slice());
/// let hand = eval.evaluate(&hole);
/// assert_eq!(hand.hand_type(), HandType::Straight);
/// assert_eq!(hand.rank_string(), "5432A");
/// ```
#[derive(Debug, Clone)]
pub struct HandEvaluator {
    /// Suits seen at each rank.
    rank_buckets: [Vec<Suit>; Rank::COUNT],
    /// Ranks seen in each suit.
    suit_buckets: [Vec<Rank>; Suit::COUNT],
    rank_reset_limit: [usize; Rank::COUNT],
    suit_reset_limit: [usize; Suit::COUNT],
}

impl HandEvaluator {
    pub fn new() -> Self {
        Self {
            rank_buckets: std::array::from_fn(|_| Vec::with_capacity(Suit::COUNT)),
            suit_buckets: std::array::from_fn(|_| Vec::with_capacity(7)),
            rank_reset_limit: [0; Rank::COUNT],
            suit_reset_limit: [0; Suit::COUNT],
        }
    }

    /// Load the community cards (0 to 5) as the baseline for the next
    /// evaluations.
    pub fn reset(&mut self, community: &[Card]) {
        self.rank_buckets.iter_mut().for_each(Vec::clear);
        self.suit_buckets.iter_mut().for_each(Vec::clear);
        for &card in community {
            self.push(card);
        }
        for (limit, bucket) in self.rank_reset_limit.iter_mut().zip(&self.rank_buckets) {
            *limit = bucket.len();
        }
        for (limit, bucket) in self.suit_reset_limit.iter_mut().zip(&self.suit_buckets) {
            *limit = bucket.len();
        }
    }

    /// Best hand made from the hole cards and the board loaded by the last
    /// `reset`. Leaves the evaluator exactly as `reset` left it.
    pub fn evaluate(&mut self, hole: &HoleCards) -> Hand {
        for card in hole.as_array() {
            self.push(card);
        }

        let mut counts = [0u8; Rank::COUNT];
        for (count, bucket) in counts.iter_mut().zip(&self.rank_buckets) {
            *count = bucket.len() as u8;
        }
        let scan = RankScan::run(counts);

        let flush = self
            .suit_buckets
            .iter()
            .find(|bucket| bucket.len() >= 5)
            .and_then(|bucket| suit_scan::flush_hand(bucket));

        let hand = match flush {
            Some(flush) if flush.hand_type() > scan.best().hand_type() => flush,
            _ => scan.into_hand(),
        };

        for card in hole.as_array() {
            self.rank_buckets[card.rank().index()].truncate(self.rank_reset_limit[card.rank().index()]);
            self.suit_buckets[card.suit().index()].truncate(self.suit_reset_limit[card.suit().index()]);
        }
        trace!("{} {} -> {}", hole.first(), hole.second(), hand);
        hand
    }

    fn push(&mut self, card: Card) {
        self.rank_buckets[card.rank().index()].push(card.suit());
        self.suit_buckets[card.suit().index()].push(card.rank());
    }
}

impl Default for HandEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
