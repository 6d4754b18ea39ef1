use crate::hand::HoleCards;
use std::fmt;

/// Stable identity of a seat's occupant; survives other players being eliminated.
/// Id 0 is the primary (interactive) player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub const PRIMARY: PlayerId = PlayerId(0);
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) cash: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) active: bool,
    pub(crate) committed: u64,
}

impl Player {
    pub fn new(id: PlayerId, cash: u64) -> Self {
        Self { id, cash, hole: None, active: true, committed: 0 }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Chips behind, not counting what is already in the pot.
    pub fn cash(&self) -> u64 {
        self.cash
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Still in the current round (has not folded).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Chips put into the pot this round, blinds included.
    pub fn committed(&self) -> u64 {
        self.committed
    }

    /// What it costs to match `current_bet`, before capping at cash.
    pub fn to_call(&self, current_bet: u64) -> u64 {
        current_bet.saturating_sub(self.committed)
    }

    pub fn is_busted(&self) -> bool {
        self.cash == 0
    }

    /// Move up to `amount` chips from cash into this round's commitment; returns what moved.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let paid = amount.min(self.cash);
        self.cash -= paid;
        self.committed += paid;
        paid
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.hole = None;
        self.active = true;
        self.committed = 0;
    }
}
