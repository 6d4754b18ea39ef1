use super::analysis::HandAnalysis;
use crate::evaluator::{Category, HandRank};

/// One hand category: recognises it and builds its tiebreak tuple.
pub trait CategoryDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank>;
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let top = a.straight_top.filter(|_| a.is_flush)?;
        Some(HandRank::new(Category::StraightFlush, vec![top]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let quad = a.quad()?;
        let mut tiebreak = vec![quad];
        tiebreak.extend(a.kickers());
        Some(HandRank::new(Category::FourOfAKind, tiebreak))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let trips = a.trips()?;
        let pair = a.pairs().first().copied()?;
        Some(HandRank::new(Category::FullHouse, vec![trips, pair]))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        a.is_flush.then(|| HandRank::new(Category::Flush, a.ranks.to_vec()))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let top = a.straight_top?;
        Some(HandRank::new(Category::Straight, vec![top]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let trips = a.trips()?;
        let mut tiebreak = vec![trips];
        tiebreak.extend(a.kickers());
        Some(HandRank::new(Category::ThreeOfAKind, tiebreak))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let mut tiebreak = a.pairs();
        if tiebreak.len() != 2 {
            return None;
        }
        tiebreak.extend(a.kickers());
        Some(HandRank::new(Category::TwoPair, tiebreak))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        let mut tiebreak = a.pairs();
        if tiebreak.len() != 1 {
            return None;
        }
        tiebreak.extend(a.kickers());
        Some(HandRank::new(Category::Pair, tiebreak))
    }
}

pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn rank(&self, a: &HandAnalysis) -> Option<HandRank> {
        Some(HandRank::new(Category::HighCard, a.ranks.to_vec()))
    }
}

/// Highest category first; the first detector that matches decides the hand.
pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
