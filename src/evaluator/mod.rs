//! Hand evaluation: five-card ranking, best-five selection and showdown winners.
//!
//! Everything here is pure and deterministic.

pub(crate) mod analysis;
pub(crate) mod combinations;
pub(crate) mod detector;

use crate::cards::{Card, Rank};
use crate::hand::{validate_cards, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::fmt;

/// Poker hand category from weakest to strongest.
///
/// There is no separate royal flush category: an ace-high straight flush is the highest
/// `StraightFlush` by tiebreak. [`HandRank::is_royal`] and [`HandRank::label`] name it for
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
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

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable hand strength: category first, then the tiebreak ranks lexicographically.
///
/// Tiebreaks are built highest-significance first (e.g. two pair is high pair, low pair,
/// kicker), so the derived ordering is the poker ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    category: Category,
    tiebreak: Vec<Rank>,
}

impl HandRank {
    pub(crate) fn new(category: Category, tiebreak: Vec<Rank>) -> Self {
        Self { category, tiebreak }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tiebreak(&self) -> &[Rank] {
        &self.tiebreak
    }

    /// Ace-high straight flush.
    pub fn is_royal(&self) -> bool {
        self.category == Category::StraightFlush && self.tiebreak.first() == Some(&Rank::Ace)
    }

    /// Display name, with "Royal Flush" for the top straight flush.
    pub fn label(&self) -> &'static str {
        if self.is_royal() {
            "Royal Flush"
        } else {
            self.category.name()
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The best five cards out of hole + board, with their rank. Ordered by rank only.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub rank: HandRank,
    pub best_five: [Card; 5],
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Evaluation {}

/// Result of comparing every contender at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Showdown {
    /// Seats holding the best hand, in the order they were given. More than one on a tie.
    pub winners: Vec<usize>,
    pub rank: HandRank,
    /// Winning five cards, parallel to `winners`.
    pub hands: Vec<[Card; 5]>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: {0} on the board, need at least 3")]
    NotEnoughCards(usize),
    #[error("showdown with no contenders")]
    EmptyShowdown,
}

/// Rank exactly five cards.
///
/// ```
/// use holdem_table::cards::parse_cards;
/// use holdem_table::evaluator::{rank, Category};
///
/// let v = parse_cards("AS 2H 3D 4C 5S").unwrap();
/// let r = rank(&[v[0], v[1], v[2], v[3], v[4]]);
/// assert_eq!(r.category(), Category::Straight);
/// ```
pub fn rank(cards: &[Card; 5]) -> HandRank {
    use analysis::HandAnalysis;
    use detector::DETECTORS;

    let a = HandAnalysis::new(cards);
    DETECTORS
        .iter()
        .find_map(|d| d.rank(&a))
        .unwrap_or_else(|| HandRank::new(Category::HighCard, a.ranks.to_vec()))
}

/// Best five-card hand from the hole cards plus a flop, turn or river board.
///
/// ```
/// use holdem_table::evaluator::evaluate;
/// use holdem_table::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "AS AH".parse().unwrap();
/// let board: Board = "QC JD 9H 3S 2C".parse().unwrap();
/// let eval = evaluate(&hole, &board).unwrap();
/// assert_eq!(eval.rank.label(), "Pair");
/// ```
pub fn evaluate(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    use combinations::ChooseFive;

    validate_cards(hole, board)?;
    if board.len() < 3 {
        return Err(EvalError::NotEnoughCards(board.len()));
    }
    let mut cards = Vec::with_capacity(7);
    cards.extend(hole.as_array());
    cards.extend_from_slice(board.as_slice());

    let mut best: Option<Evaluation> = None;
    for idx in ChooseFive::new(cards.len()) {
        let five = idx.map(|i| cards[i]);
        let eval = Evaluation { rank: rank(&five), best_five: five };
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::NotEnoughCards(board.len()))
}

/// The five cards `evaluate` picks.
pub fn best_hand(hole: &HoleCards, board: &Board) -> Result<[Card; 5], EvalError> {
    evaluate(hole, board).map(|e| e.best_five)
}

/// Compare two hands on a shared board.
///
/// ```
/// use holdem_table::evaluator::compare;
/// use holdem_table::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "QC JD 9H 3S 2C".parse().unwrap();
/// let aces: HoleCards = "AS AH".parse().unwrap();
/// let kings: HoleCards = "KS KH".parse().unwrap();
/// assert_eq!(compare(&aces, &kings, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    Ok(evaluate(a, board)?.cmp(&evaluate(b, board)?))
}

/// Evaluate each `(seat, hole)` contender and return every seat sharing the best rank.
pub fn winners<'a, I>(contenders: I, board: &Board) -> Result<Showdown, EvalError>
where
    I: IntoIterator<Item = (usize, &'a HoleCards)>,
{
    let mut best: Option<Showdown> = None;
    for (seat, hole) in contenders {
        let eval = evaluate(hole, board)?;
        match best.as_ref().map(|s| eval.rank.cmp(&s.rank)) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) => {
                if let Some(s) = best.as_mut() {
                    s.winners.push(seat);
                    s.hands.push(eval.best_five);
                }
            }
            _ => {
                best = Some(Showdown {
                    winners: vec![seat],
                    rank: eval.rank,
                    hands: vec![eval.best_five],
                });
            }
        }
    }
    best.ok_or(EvalError::EmptyShowdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn ordinal_follows_category_order() {
        assert_eq!(Category::HighCard.ordinal(), 0);
        assert_eq!(Category::StraightFlush.ordinal(), 8);
        assert!(Category::Flush.ordinal() > Category::Straight.ordinal());
        assert_eq!(
            Category::FullHouse.cmp(&Category::Flush),
            Category::FullHouse.ordinal().cmp(&Category::Flush.ordinal())
        );
    }

    #[test]
    fn short_board_errors() {
        let hole: HoleCards = "AS KS".parse().unwrap();
        let board: Board = "2C 3C".parse().unwrap();
        assert_eq!(evaluate(&hole, &board).unwrap_err(), EvalError::NotEnoughCards(2));
    }

    #[test]
    fn overlapping_cards_error() {
        let hole: HoleCards = "AS KS".parse().unwrap();
        let board: Board = "AS 3C 4D".parse().unwrap();
        assert_eq!(
            evaluate(&hole, &board).unwrap_err(),
            EvalError::InvalidHand(HandError::Overlap)
        );
    }

    #[test]
    fn flop_board_uses_all_five_cards() {
        let hole: HoleCards = "AS KS".parse().unwrap();
        let board: Board = "QS JS TS".parse().unwrap();
        let e = evaluate(&hole, &board).unwrap();
        assert!(e.rank.is_royal());
        assert_eq!(e.rank.label(), "Royal Flush");
    }

    #[test]
    fn royal_is_top_of_straight_flush() {
        let royal = rank(&five("AS KS QS JS TS"));
        let king_high = rank(&five("KS QS JS TS 9S"));
        assert_eq!(royal.category(), Category::StraightFlush);
        assert!(royal > king_high);
        assert!(!king_high.is_royal());
        assert_eq!(king_high.to_string(), "Straight Flush");
    }

    #[test]
    fn wheel_straight_flush_is_lowest_straight_flush() {
        let wheel = rank(&five("AH 2H 3H 4H 5H"));
        let six = rank(&five("2H 3H 4H 5H 6H"));
        assert_eq!(wheel.category(), Category::StraightFlush);
        assert_eq!(wheel.tiebreak(), &[Rank::Five]);
        assert!(!wheel.is_royal());
        assert!(six > wheel);
    }

    #[test]
    fn tiebreak_tuples_per_category() {
        assert_eq!(rank(&five("9S 9H 9D 9C 2H")).tiebreak(), &[Rank::Nine, Rank::Two]);
        assert_eq!(rank(&five("9S 9H 9D 5C 5H")).tiebreak(), &[Rank::Nine, Rank::Five]);
        assert_eq!(
            rank(&five("QC QD 8H 5S 2C")).tiebreak(),
            &[Rank::Queen, Rank::Eight, Rank::Five, Rank::Two]
        );
        assert_eq!(rank(&five("TC 9D 8H 7S 6C")).tiebreak(), &[Rank::Ten]);
    }

    #[test]
    fn winners_keeps_ties_in_input_order() {
        let board: Board = "AC KD QH JS 2C".parse().unwrap();
        let a: HoleCards = "TC 3D".parse().unwrap();
        let b: HoleCards = "9C 9D".parse().unwrap();
        let c: HoleCards = "TH 4S".parse().unwrap();
        let s = winners([(0, &a), (1, &b), (2, &c)], &board).unwrap();
        assert_eq!(s.winners, vec![0, 2]);
        assert_eq!(s.rank.category(), Category::Straight);
        assert_eq!(s.hands.len(), 2);
    }

    #[test]
    fn winners_of_nobody_is_an_error() {
        let board: Board = "AC KD QH JS 2C".parse().unwrap();
        let none: [(usize, &HoleCards); 0] = [];
        assert_eq!(winners(none, &board).unwrap_err(), EvalError::EmptyShowdown);
    }
}
