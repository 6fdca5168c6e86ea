use super::sort_code::{Hand, HandType, RankSeq};
use crate::cards::Rank;

/// Scan position of a rank, where the ace can also sit at [`Rank::ACE_LOW`].
pub(crate) type Position = u8;

/// Rank at a scan position. The low-ace position maps back to the ace, which
/// is the only place the alias is resolved.
pub(crate) fn rank_at(pos: Position) -> Rank {
    Rank::from_value(pos).unwrap_or(Rank::Ace)
}

/// The five ranks of a straight topped at `top`, e.g. `5432A` for the wheel.
pub(crate) fn straight_ranks(top: Position) -> RankSeq {
    let mut seq = RankSeq::new();
    for pos in (top - 4..=top).rev() {
        seq.push(rank_at(pos));
    }
    seq
}

/// Tracks the longest run of occupied positions seen in descending order and
/// remembers the top of the first run that reaches five.
#[derive(Debug, Default)]
pub(crate) struct RunTracker {
    last: Position,
    top: Position,
    len: u8,
    found: Option<Position>,
}

impl RunTracker {
    /// Record an occupied position. Positions must arrive strictly descending.
    pub(crate) fn occupied(&mut self, pos: Position) {
        if self.found.is_some() {
            return;
        }
        if self.len > 0 && self.last == pos + 1 {
            self.len += 1;
        } else {
            self.top = pos;
            self.len = 1;
        }
        self.last = pos;
        if self.len == 5 {
            self.found = Some(self.top);
        }
    }

    pub(crate) fn straight_top(&self) -> Option<Position> {
        self.found
    }
}

/// Made hand found by the rank scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Made {
    HighCard,
    Pair(Rank),
    TwoPair(Rank, Rank),
    Trips(Rank),
    Straight(Position),
    FullHouse(Rank, Rank),
    Quads(Rank),
}

impl Made {
    pub(crate) fn hand_type(self) -> HandType {
        match self {
            Made::HighCard => HandType::HighCard,
            Made::Pair(_) => HandType::Pair,
            Made::TwoPair(..) => HandType::TwoPair,
            Made::Trips(_) => HandType::ThreeOfAKind,
            Made::Straight(_) => HandType::Straight,
            Made::FullHouse(..) => HandType::FullHouse,
            Made::Quads(_) => HandType::FourOfAKind,
        }
    }
}

/// Single descending pass over per-rank card counts.
///
/// Patterns are collected in the order they are met (highest rank first), so
/// the first trips and the first two pairs are always the best ones.
#[derive(Debug)]
pub(crate) struct RankScan {
    counts: [u8; Rank::COUNT],
    best: Made,
    run: RunTracker,
    quads: Option<Rank>,
    trips: Option<Rank>,
    pair_high: Option<Rank>,
    pair_low: Option<Rank>,
}

impl RankScan {
    pub(crate) fn run(counts: [u8; Rank::COUNT]) -> Self {
        let mut scan = Self {
            counts,
            best: Made::HighCard,
            run: RunTracker::default(),
            quads: None,
            trips: None,
            pair_high: None,
            pair_low: None,
        };
        for pos in (Rank::ACE_LOW..=Rank::Ace.value()).rev() {
            let rank = rank_at(pos);
            let count = counts[rank.index()];
            if count > 0 {
                scan.run.occupied(pos);
                if let Some(top) = scan.run.straight_top() {
                    scan.raise(Made::Straight(top));
                }
            }
            // The low-ace position only takes part in straights.
            if pos != Rank::ACE_LOW {
                scan.record(rank, count);
            }
        }
        scan
    }

    fn raise(&mut self, made: Made) {
        if made.hand_type() > self.best.hand_type() {
            self.best = made;
        }
    }

    fn record(&mut self, rank: Rank, count: u8) {
        match count {
            4 if self.quads.is_none() => {
                self.quads = Some(rank);
                self.raise(Made::Quads(rank));
            }
            3 => match (self.trips, self.pair_high) {
                (None, Some(pair)) => {
                    self.trips = Some(rank);
                    self.raise(Made::FullHouse(rank, pair));
                }
                (None, None) => {
                    self.trips = Some(rank);
                    self.raise(Made::Trips(rank));
                }
                // A second set plays as the pair of a full house.
                (Some(trips), None) => {
                    self.pair_high = Some(rank);
                    self.raise(Made::FullHouse(trips, rank));
                }
                (Some(_), Some(_)) => {
                    if self.pair_low.is_none() {
                        self.pair_low = Some(rank);
                    }
                }
            },
            2 => {
                match (self.pair_high, self.pair_low) {
                    (None, _) => {
                        self.pair_high = Some(rank);
                        self.raise(Made::Pair(rank));
                    }
                    (Some(high), None) => {
                        self.pair_low = Some(rank);
                        self.raise(Made::TwoPair(high, rank));
                    }
                    (Some(_), Some(_)) => {}
                }
                if let (Some(trips), Some(pair)) = (self.trips, self.pair_high) {
                    self.raise(Made::FullHouse(trips, pair));
                }
            }
            _ => {}
        }
    }

    pub(crate) fn best(&self) -> Made {
        self.best
    }

    /// Pattern ranks in slot order followed by descending kickers from the
    /// cards the pattern did not use.
    pub(crate) fn into_hand(self) -> Hand {
        let mut seq = RankSeq::new();
        let mut remaining = self.counts;
        let mut take = |seq: &mut RankSeq, rank: Rank, n: u8| {
            for _ in 0..n {
                seq.push(rank);
            }
            remaining[rank.index()] -= n;
        };
        match self.best {
            Made::Straight(top) => return Hand::from_seq(HandType::Straight, straight_ranks(top)),
            Made::FullHouse(trips, pair) => {
                take(&mut seq, trips, 3);
                take(&mut seq, pair, 2);
            }
            Made::Quads(rank) => take(&mut seq, rank, 4),
            Made::Trips(rank) => take(&mut seq, rank, 3),
            Made::TwoPair(high, low) => {
                take(&mut seq, high, 2);
                take(&mut seq, low, 2);
            }
            Made::Pair(rank) => take(&mut seq, rank, 2),
            Made::HighCard => {}
        }
        for rank in Rank::ALL.iter().rev() {
            while remaining[rank.index()] > 0 && !seq.is_full() {
                seq.push(*rank);
                remaining[rank.index()] -= 1;
            }
        }
        Hand::from_seq(self.best.hand_type(), seq)
    }
}
