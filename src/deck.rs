use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DECK_SIZE: usize = 52;

/// A standard 52-card deck with a sequential deal cursor.
///
/// Shuffling rewinds the cursor, so one `Deck` is reused for every deal of
/// a run. Dealing never removes cards; it only advances the cursor.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// ```
    /// use holdem_sim::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards, next: 0 }
    }

    /// Cards not dealt yet.
    pub fn remaining(&self) -> usize {
        DECK_SIZE - self.next
    }

    /// Cards dealt since the last shuffle.
    pub fn dealt(&self) -> usize {
        self.next
    }

    /// Full deck in its current order, dealt cards included.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Fisher-Yates shuffle with the provided RNG; rewinds the cursor.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    /// Deal the next card, or `None` once all 52 have been dealt.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
