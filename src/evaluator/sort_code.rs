use crate::cards::Rank;
use core::cmp::Ordering;
use core::fmt;
use std::hash::{Hash, Hasher};

/// Poker hand type from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandType {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandType {
    pub const COUNT: usize = 9;

    pub const ALL: [HandType; HandType::COUNT] = [
        HandType::HighCard,
        HandType::Pair,
        HandType::TwoPair,
        HandType::ThreeOfAKind,
        HandType::Straight,
        HandType::Flush,
        HandType::FullHouse,
        HandType::FourOfAKind,
        HandType::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<HandType> {
        if (ordinal as usize) < HandType::COUNT {
            Some(HandType::ALL[ordinal as usize])
        } else {
            None
        }
    }

    /// Short lowercase name, e.g. `three-of-a-kind`.
    pub const fn name(self) -> &'static str {
        match self {
            HandType::HighCard => "high-card",
            HandType::Pair => "one-pair",
            HandType::TwoPair => "two-pair",
            HandType::ThreeOfAKind => "three-of-a-kind",
            HandType::Straight => "straight",
            HandType::Flush => "flush",
            HandType::FullHouse => "full-house",
            HandType::FourOfAKind => "four-of-a-kind",
            HandType::StraightFlush => "straight-flush",
        }
    }

    /// Title-case label used as a report column header.
    pub const fn label(self) -> &'static str {
        match self {
            HandType::HighCard => "High Card",
            HandType::Pair => "One Pair",
            HandType::TwoPair => "Two Pair",
            HandType::ThreeOfAKind => "Three Of A Kind",
            HandType::Straight => "Straight",
            HandType::Flush => "Flush",
            HandType::FullHouse => "Full House",
            HandType::FourOfAKind => "Four Of A Kind",
            HandType::StraightFlush => "Straight Flush",
        }
    }

    /// Flush and straight flush are the only types that depend on suits.
    pub const fn is_suited(self) -> bool {
        matches!(self, HandType::Flush | HandType::StraightFlush)
    }
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// At most five ranks, best to worst. Fewer only when fewer than five cards
/// were evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RankSeq {
    ranks: [Rank; RankSeq::CAPACITY],
    len: u8,
}

impl RankSeq {
    pub(crate) const CAPACITY: usize = 5;

    pub(crate) const fn new() -> Self {
        Self { ranks: [Rank::Two; RankSeq::CAPACITY], len: 0 }
    }

    pub(crate) fn from_slice(ranks: &[Rank]) -> Self {
        let mut seq = Self::new();
        for &r in ranks.iter().take(Self::CAPACITY) {
            seq.push(r);
        }
        seq
    }

    pub(crate) fn push(&mut self, rank: Rank) {
        debug_assert!(!self.is_full());
        if !self.is_full() {
            self.ranks[self.len as usize] = rank;
            self.len += 1;
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len as usize == Self::CAPACITY
    }

    pub(crate) fn as_slice(&self) -> &[Rank] {
        &self.ranks[..self.len as usize]
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SortCodeError {
    #[error("sort code {0:#x} does not fit in 24 bits")]
    OutOfRange(u32),
    #[error("sort code {0:#x} has an unknown hand type")]
    HandType(u32),
    #[error("sort code {0:#x} has an invalid rank nibble")]
    Rank(u32),
}

/// 24-bit total-order key for a hand.
///
/// Layout, most significant first: hand type ordinal (4 bits), then five rank
/// values (4 bits each, 2..=14, 0 for an absent rank). Comparing two codes as
/// integers reproduces showdown order.
///
/// ```
/// use holdem_sim::cards::Rank::*;
/// use holdem_sim::evaluator::{HandType, SortCode};
///
/// let wheel = SortCode::encode(HandType::Straight, &[Five, Four, Three, Two, Ace]);
/// let six_high = SortCode::encode(HandType::Straight, &[Six, Five, Four, Three, Two]);
/// assert!(six_high > wheel);
/// assert_eq!(wheel.hand_type(), HandType::Straight);
/// assert_eq!(wheel.decode().ranks(), &[Five, Four, Three, Two, Ace]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SortCode(u32);

impl SortCode {
    pub const BITS: u32 = 24;
    const TYPE_SHIFT: u32 = 20;
    const RANK_BITS: u32 = 4;
    const NIBBLE: u32 = 0xF;

    /// One past the largest code (a straight flush of five aces).
    pub const LIMIT: u32 = ((HandType::StraightFlush as u32) << Self::TYPE_SHIFT | 0xE_EEEE) + 1;

    /// Pack a hand type and up to five ranks; extra ranks are ignored.
    pub fn encode(hand_type: HandType, ranks: &[Rank]) -> SortCode {
        debug_assert!(ranks.len() <= RankSeq::CAPACITY);
        let mut code = (hand_type.ordinal() as u32) << Self::TYPE_SHIFT;
        for (i, r) in ranks.iter().take(RankSeq::CAPACITY).enumerate() {
            let shift = Self::TYPE_SHIFT - Self::RANK_BITS * (i as u32 + 1);
            code |= (r.value() as u32) << shift;
        }
        debug_assert!(code < Self::LIMIT);
        SortCode(code)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn hand_type(self) -> HandType {
        // Valid by construction: encode and try_from are the only constructors.
        HandType::from_ordinal((self.0 >> Self::TYPE_SHIFT) as u8).unwrap_or(HandType::HighCard)
    }

    fn rank_nibbles(raw: u32) -> impl Iterator<Item = u8> {
        (1..=RankSeq::CAPACITY as u32).map(move |i| {
            ((raw >> (Self::TYPE_SHIFT - Self::RANK_BITS * i)) & Self::NIBBLE) as u8
        })
    }

    /// Rebuild the hand this code was encoded from.
    pub fn decode(self) -> Hand {
        let mut ranks = RankSeq::new();
        for r in Self::rank_nibbles(self.0).map_while(Rank::from_value) {
            ranks.push(r);
        }
        Hand { hand_type: self.hand_type(), ranks, sort_code: self }
    }
}

impl TryFrom<u32> for SortCode {
    type Error = SortCodeError;

    /// Accepts exactly the values [`SortCode::encode`] can produce.
    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        if raw >= 1 << Self::BITS {
            return Err(SortCodeError::OutOfRange(raw));
        }
        if HandType::from_ordinal((raw >> Self::TYPE_SHIFT) as u8).is_none() {
            return Err(SortCodeError::HandType(raw));
        }
        let mut ended = false;
        for nibble in Self::rank_nibbles(raw) {
            match (nibble, ended) {
                (0, _) => ended = true,
                (n, false) if Rank::from_value(n).is_some() => {}
                _ => return Err(SortCodeError::Rank(raw)),
            }
        }
        Ok(SortCode(raw))
    }
}

impl From<SortCode> for u32 {
    fn from(code: SortCode) -> u32 {
        code.0
    }
}

/// An evaluated hand: type, ranks best to worst (kickers included) and the
/// sort code derived from them. Equality, ordering and hashing use only the
/// sort code, so suits never matter once a hand is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Hand {
    hand_type: HandType,
    ranks: RankSeq,
    sort_code: SortCode,
}

impl Hand {
    /// ```
    /// use holdem_sim::cards::Rank::*;
    /// use holdem_sim::evaluator::{Hand, HandType};
    ///
    /// let hand = Hand::new(HandType::FullHouse, &[Ten, Ten, Ten, Two, Two]);
    /// assert_eq!(hand.to_string(), "full-house TTT22");
    /// ```
    pub fn new(hand_type: HandType, ranks: &[Rank]) -> Self {
        Self::from_seq(hand_type, RankSeq::from_slice(ranks))
    }

    pub(crate) fn from_seq(hand_type: HandType, ranks: RankSeq) -> Self {
        let sort_code = SortCode::encode(hand_type, ranks.as_slice());
        Self { hand_type, ranks, sort_code }
    }

    pub fn hand_type(&self) -> HandType {
        self.hand_type
    }

    pub fn ranks(&self) -> &[Rank] {
        self.ranks.as_slice()
    }

    pub fn sort_code(&self) -> SortCode {
        self.sort_code
    }

    /// The ranks alone, e.g. `5432A`.
    pub fn rank_string(&self) -> String {
        self.ranks().iter().map(|r| r.to_char()).collect()
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.sort_code == other.sort_code
    }
}

impl Eq for Hand {}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_code.cmp(&other.sort_code)
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_code.hash(state);
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hand_type, self.rank_string())
    }
}
