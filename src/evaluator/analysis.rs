use crate::cards::{Card, Rank};

/// Everything the category detectors need to know about five cards, computed once.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Ranks in descending order.
    pub ranks: [Rank; 5],
    /// (rank, count) sorted by count desc, then rank desc. AAAKQ -> [(A,3), (K,1), (Q,1)].
    pub groups: Vec<(Rank, u8)>,
    pub is_flush: bool,
    /// Top card of a straight; `Five` for the wheel.
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut ranks = cards.map(Card::rank);
        ranks.sort_unstable_by(|a, b| b.cmp(a));

        let mut counts = [0u8; 15];
        for r in ranks {
            counts[r.value() as usize] += 1;
        }
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .filter(|r| counts[r.value() as usize] > 0)
            .map(|&r| (r, counts[r.value() as usize]))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight_top = straight_top(&ranks);

        Self { ranks, groups, is_flush, straight_top }
    }

    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).next()
    }

    pub fn trips(&self) -> Option<Rank> {
        self.with_count(3).next()
    }

    /// Pair ranks, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2).collect()
    }

    /// Unpaired ranks, highest first.
    pub fn kickers(&self) -> Vec<Rank> {
        self.with_count(1).collect()
    }

    fn with_count(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |(_, c)| *c == n).map(|(r, _)| *r)
    }
}

/// Straight detection over descending ranks: five consecutive values, or A-5-4-3-2.
fn straight_top(desc: &[Rank; 5]) -> Option<Rank> {
    let consecutive = desc.windows(2).all(|w| w[0].value() == w[1].value() + 1);
    if consecutive {
        return Some(desc[0]);
    }
    if *desc == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
        return Some(Rank::Five);
    }
    None
}
