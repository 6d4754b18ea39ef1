use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    /// More cards were requested than remain. With at most ten players a single deck always
    /// suffices, so hitting this means the caller dealt too many cards.
    #[error("deck exhausted: wanted {wanted}, {remaining} left")]
    Exhausted { wanted: usize, remaining: usize },
}

/// A standard 52-card deck. Cards are dealt from the top (the end of the vector).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A freshly shuffled deck from an entropy-seeded generator.
    ///
    /// ```
    /// use holdem_table::deck::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn new() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }

    /// A shuffled deck whose order is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled_with(&mut rng)
    }

    /// A deck shuffled with the caller's generator (Fisher-Yates via `SliceRandom`).
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.cards.shuffle(rng);
        deck
    }

    /// All 52 cards in a fixed, unshuffled order.
    pub fn ordered() -> Self {
        let cards = Rank::ALL
            .iter()
            .flat_map(|&r| Suit::ALL.iter().map(move |&s| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted { wanted: 1, remaining: 0 })
    }

    /// Deal `n` cards, or none at all if fewer than `n` remain.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(DeckError::Exhausted { wanted: n, remaining });
        }
        let mut out = self.cards.split_off(remaining - n);
        // top card first, matching repeated `deal` calls
        out.reverse();
        Ok(out)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
