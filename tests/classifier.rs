mod common;

use common::hole;
use holdem_sim::cards::Rank;
use holdem_sim::classifier::{HoleHandClass, HoleHandIndex, HoleHandKind, HOLE_HAND_COUNT};
use holdem_sim::deck::Deck;
use std::collections::HashSet;

#[test]
fn suited_ace_king_shares_an_index() {
    let idx = HoleHandIndex::new();
    assert_eq!(idx.index_of_hole(&hole("As Ks")), idx.index_of_hole(&hole("Ah Kh")));
    assert_eq!(idx.index_of_hole(&hole("As Ks")), 1);
}

#[test]
fn every_two_card_combination_hits_all_169_classes() {
    let deck = Deck::standard();
    let cards = deck.cards();
    let idx = HoleHandIndex::new();
    let mut per_class = vec![0u32; HOLE_HAND_COUNT];
    for (i, &a) in cards.iter().enumerate() {
        for &b in &cards[i + 1..] {
            per_class[idx.index_of(&HoleHandClass::classify(a, b))] += 1;
        }
    }
    let classes: HashSet<usize> = (0..HOLE_HAND_COUNT).filter(|&i| per_class[i] > 0).collect();
    assert_eq!(classes.len(), HOLE_HAND_COUNT);
    for (i, n) in per_class.iter().enumerate() {
        let class = idx.class_at(i).unwrap();
        let expected = match class.kind() {
            HoleHandKind::Pair => 6,
            HoleHandKind::Suited => 4,
            HoleHandKind::Offsuit => 12,
        };
        assert_eq!(*n, expected, "{class}");
    }
    assert_eq!(per_class.iter().sum::<u32>(), 1326);
}

#[test]
fn classes_keep_high_rank_first() {
    let c = HoleHandClass::classify("2d".parse().unwrap(), "Jc".parse().unwrap());
    assert_eq!(c.high(), Rank::Jack);
    assert_eq!(c.low(), Rank::Two);
    assert_eq!(c.kind(), HoleHandKind::Offsuit);
    assert_eq!(c.to_string(), "J2o");
}
