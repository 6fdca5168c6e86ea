//! Brute-force reference evaluator: classify every 5-card subset on its own
//! and keep the best. Slow, but independent of the incremental evaluator.
#![allow(dead_code)]

use holdem_sim::cards::{Card, Rank};
use holdem_sim::deck::Deck;
use holdem_sim::evaluator::{HandType, SortCode};
use holdem_sim::hand::HoleCards;

pub fn five_card_code(cards: &[Card; 5]) -> SortCode {
    let mut counts = [0u8; Rank::COUNT];
    for c in cards {
        counts[c.rank().index()] += 1;
    }
    // (count, rank) groups, biggest group first, then highest rank.
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .filter(|r| counts[r.index()] > 0)
        .map(|&r| (counts[r.index()], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let mut desc: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
    desc.sort_by(|a, b| b.cmp(a));
    let distinct = groups.len() == 5;
    let wheel = distinct && desc == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    let straight = distinct && (desc[0].value() - desc[4].value() == 4 || wheel);
    let straight_ranks = if wheel {
        vec![Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]
    } else {
        desc.clone()
    };

    let expanded: Vec<Rank> =
        groups.iter().flat_map(|&(n, r)| std::iter::repeat(r).take(n as usize)).collect();
    let shape: Vec<u8> = groups.iter().map(|g| g.0).collect();

    let (hand_type, ranks) = match (straight, flush, shape.as_slice()) {
        (true, true, _) => (HandType::StraightFlush, straight_ranks),
        (_, _, [4, 1]) => (HandType::FourOfAKind, expanded),
        (_, _, [3, 2]) => (HandType::FullHouse, expanded),
        (_, true, _) => (HandType::Flush, desc),
        (true, _, _) => (HandType::Straight, straight_ranks),
        (_, _, [3, 1, 1]) => (HandType::ThreeOfAKind, expanded),
        (_, _, [2, 2, 1]) => (HandType::TwoPair, expanded),
        (_, _, [2, 1, 1, 1]) => (HandType::Pair, expanded),
        _ => (HandType::HighCard, desc),
    };
    SortCode::encode(hand_type, &ranks)
}

/// Best code over every 5-card subset of 5 to 7 cards.
pub fn best_code(cards: &[Card]) -> SortCode {
    let n = cards.len();
    assert!((5..=7).contains(&n));
    let mut best = SortCode::default();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(five_card_code(&five));
                    }
                }
            }
        }
    }
    best
}

pub fn card_at(index: usize) -> Card {
    Deck::standard().cards()[index]
}

pub fn hole(s: &str) -> HoleCards {
    s.parse().expect("hole cards")
}
