//! Canonical starting-hand classes.
//!
//! Two hole cards reduce to one of 169 classes: 13 pairs, 78 suited and 78
//! offsuit rank combinations. Suits matter only as "same" or "different".

use crate::cards::{Card, Rank};
use crate::hand::HoleCards;
use core::fmt;
use std::collections::HashMap;
use std::str::FromStr;

/// Number of distinct hole-hand classes.
pub const HOLE_HAND_COUNT: usize = 169;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HoleHandKind {
    Pair,
    Suited,
    Offsuit,
}

/// Canonical shape of two hole cards: high rank, low rank and kind.
///
/// ```
/// use holdem_sim::classifier::HoleHandClass;
///
/// let a = HoleHandClass::classify("As".parse().unwrap(), "Ks".parse().unwrap());
/// let b = HoleHandClass::classify("Kh".parse().unwrap(), "Ah".parse().unwrap());
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "AKs");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleHandClass {
    high: Rank,
    low: Rank,
    kind: HoleHandKind,
}

impl HoleHandClass {
    /// Build a class from its parts. Ranks may come in either order; a pair
    /// ignores `suited`.
    pub fn new(a: Rank, b: Rank, suited: bool) -> Self {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let kind = if high == low {
            HoleHandKind::Pair
        } else if suited {
            HoleHandKind::Suited
        } else {
            HoleHandKind::Offsuit
        };
        Self { high, low, kind }
    }

    pub fn classify(c1: Card, c2: Card) -> Self {
        Self::new(c1.rank(), c2.rank(), c1.suit() == c2.suit())
    }

    pub fn of(hole: &HoleCards) -> Self {
        Self::classify(hole.first(), hole.second())
    }

    pub fn high(&self) -> Rank {
        self.high
    }

    pub fn low(&self) -> Rank {
        self.low
    }

    pub fn kind(&self) -> HoleHandKind {
        self.kind
    }
}

impl fmt::Display for HoleHandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high.to_char(), self.low.to_char())?;
        match self.kind {
            HoleHandKind::Pair => Ok(()),
            HoleHandKind::Suited => f.write_str("s"),
            HoleHandKind::Offsuit => f.write_str("o"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClassifyError {
    #[error("invalid hole hand class: {0}")]
    Invalid(String),
    #[error("pair cannot be suited or offsuit: {0}")]
    PairWithSuffix(String),
    #[error("missing s/o suffix for non-pair: {0}")]
    MissingSuffix(String),
}

impl FromStr for HoleHandClass {
    type Err = ClassifyError;

    /// Parses `AA`, `AKs` or `T9o`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClassifyError::Invalid(s.to_string());
        let mut chars = s.trim().chars();
        let a = chars.next().ok_or_else(invalid).and_then(|c| Rank::try_from(c).map_err(|_| invalid()))?;
        let b = chars.next().ok_or_else(invalid).and_then(|c| Rank::try_from(c).map_err(|_| invalid()))?;
        let suffix = chars.next();
        if chars.next().is_some() {
            return Err(invalid());
        }
        match (a == b, suffix) {
            (true, None) => Ok(Self::new(a, b, false)),
            (true, Some(_)) => Err(ClassifyError::PairWithSuffix(s.to_string())),
            (false, Some('s' | 'S')) => Ok(Self::new(a, b, true)),
            (false, Some('o' | 'O')) => Ok(Self::new(a, b, false)),
            (false, Some(_)) => Err(invalid()),
            (false, None) => Err(ClassifyError::MissingSuffix(s.to_string())),
        }
    }
}

/// Dense index 0..169 over [`HoleHandClass`], built once per run.
///
/// Order: high rank from ace down; for each, the pair, then every lower rank
/// descending with suited before offsuit. `AA` is 0, `AKs` 1, `AKo` 2 and
/// `22` is 168.
#[derive(Debug, Clone)]
pub struct HoleHandIndex {
    classes: Vec<HoleHandClass>,
    index: HashMap<HoleHandClass, usize>,
}

impl HoleHandIndex {
    pub fn new() -> Self {
        let mut classes = Vec::with_capacity(HOLE_HAND_COUNT);
        for (i, &high) in Rank::ALL.iter().enumerate().rev() {
            classes.push(HoleHandClass::new(high, high, false));
            for &low in Rank::ALL[..i].iter().rev() {
                classes.push(HoleHandClass::new(high, low, true));
                classes.push(HoleHandClass::new(high, low, false));
            }
        }
        debug_assert_eq!(classes.len(), HOLE_HAND_COUNT);
        let index = classes.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        Self { classes, index }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Every class is present, so the lookup cannot miss.
    pub fn index_of(&self, class: &HoleHandClass) -> usize {
        self.index[class]
    }

    pub fn class_at(&self, index: usize) -> Option<HoleHandClass> {
        self.classes.get(index).copied()
    }

    /// Classes in index order.
    pub fn classes(&self) -> &[HoleHandClass] {
        &self.classes
    }

    pub fn index_of_hole(&self, hole: &HoleCards) -> usize {
        self.index_of(&HoleHandClass::of(hole))
    }
}

impl Default for HoleHandIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hole(s: &str) -> HoleCards {
        s.parse().expect("hole cards")
    }

    #[test]
    fn suits_collapse_to_suited_or_offsuit() {
        let idx = HoleHandIndex::new();
        assert_eq!(idx.index_of_hole(&hole("As Ks")), idx.index_of_hole(&hole("Ah Kh")));
        assert_eq!(idx.index_of_hole(&hole("As Kd")), idx.index_of_hole(&hole("Kc Ah")));
        assert_ne!(idx.index_of_hole(&hole("As Ks")), idx.index_of_hole(&hole("As Kd")));
    }

    #[test]
    fn enumeration_order() {
        let idx = HoleHandIndex::new();
        let names: Vec<String> = idx.classes().iter().take(5).map(|c| c.to_string()).collect();
        assert_eq!(names, ["AA", "AKs", "AKo", "AQs", "AQo"]);
        assert_eq!(idx.class_at(25).map(|c| c.to_string()).as_deref(), Some("KK"));
        assert_eq!(idx.class_at(168).map(|c| c.to_string()).as_deref(), Some("22"));
        assert_eq!(idx.class_at(169), None);
    }

    #[test]
    fn exactly_169_classes() {
        let idx = HoleHandIndex::new();
        assert_eq!(idx.len(), HOLE_HAND_COUNT);
        let unique: HashSet<_> = idx.classes().iter().collect();
        assert_eq!(unique.len(), HOLE_HAND_COUNT);
        for (i, c) in idx.classes().iter().enumerate() {
            assert_eq!(idx.index_of(c), i);
        }
    }

    #[test]
    fn parse_and_display() {
        for s in ["AA", "AKs", "T9o", "72o", "22"] {
            let c: HoleHandClass = s.parse().unwrap();
            assert_eq!(c.to_string(), s);
        }
        let c: HoleHandClass = "9Ts".parse().unwrap();
        assert_eq!(c.to_string(), "T9s");
        assert!(matches!("AAs".parse::<HoleHandClass>(), Err(ClassifyError::PairWithSuffix(_))));
        assert!(matches!("AK".parse::<HoleHandClass>(), Err(ClassifyError::MissingSuffix(_))));
        assert!(matches!("AKx".parse::<HoleHandClass>(), Err(ClassifyError::Invalid(_))));
        assert!(matches!("A".parse::<HoleHandClass>(), Err(ClassifyError::Invalid(_))));
    }
}
