//! Flat-pot betting: typed actions, their validation, and pot splitting.

use crate::player::Player;
use std::fmt;
use std::str::{FromStr, SplitWhitespace};

/// What a seat does on its turn. Amounts are the chips added now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Bet(u64),
    Call,
    Raise(u64),
    Fold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Bet(n) => write!(f, "Bet {n}"),
            Action::Call => f.write_str("Call"),
            Action::Raise(n) => write!(f, "Raise {n}"),
            Action::Fold => f.write_str("Fold"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown action: '{0}' (expected bet, call, raise or fold)")]
    Unknown(String),
    #[error("{0} needs an amount")]
    MissingAmount(&'static str),
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("unexpected input after action: '{0}'")]
    Trailing(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Accepts `bet 50`, `call`, `raise 100`, `fold` and the one-letter forms `b`, `c`, `r`,
    /// `f`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ActionParseError::Empty)?.to_ascii_lowercase();
        let action = match verb.as_str() {
            "bet" | "b" => Action::Bet(amount(&mut words, "bet")?),
            "raise" | "r" => Action::Raise(amount(&mut words, "raise")?),
            "call" | "c" => Action::Call,
            "fold" | "f" => Action::Fold,
            _ => return Err(ActionParseError::Unknown(verb)),
        };
        match words.next() {
            Some(extra) => Err(ActionParseError::Trailing(extra.to_string())),
            None => Ok(action),
        }
    }
}

fn amount(words: &mut SplitWhitespace<'_>, verb: &'static str) -> Result<u64, ActionParseError> {
    let raw = words.next().ok_or(ActionParseError::MissingAmount(verb))?;
    raw.parse::<u64>().map_err(|_| ActionParseError::InvalidAmount(raw.to_string()))
}

/// Why an action was refused. The actor is asked again; nothing changes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("player has already folded")]
    PlayerFolded,
    #[error("bet must be positive")]
    NonPositiveBet,
    #[error("amount {amount} exceeds cash {cash}")]
    ExceedsCash { amount: u64, cash: u64 },
    #[error("raise of {amount} must exceed the current bet of {current_bet}")]
    RaiseTooSmall { current_bet: u64, amount: u64 },
}

/// Round-scoped betting: the bet to match, the pot, and the blinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingState {
    current_bet: u64,
    pot: u64,
    small_blind: u64,
    big_blind: u64,
}

impl BettingState {
    pub fn new(small_blind: u64, big_blind: u64) -> Self {
        Self { current_bet: 0, pot: 0, small_blind, big_blind }
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn small_blind(&self) -> u64 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u64 {
        self.big_blind
    }

    /// Back to an empty pot and no bet; blinds are kept.
    pub fn reset(&mut self) {
        self.current_bet = 0;
        self.pot = 0;
    }

    /// Post a forced blind. Short stacks post what they have. Returns the chips posted.
    pub fn post_blind(&mut self, player: &mut Player, amount: u64) -> u64 {
        let paid = player.commit(amount);
        self.pot += paid;
        self.current_bet = self.current_bet.max(player.committed());
        paid
    }

    /// Check `action` against the player's stack and the current bet without applying it.
    ///
    /// A bet needs `0 < amount <= cash`; a raise needs `current_bet < amount <= cash`.
    pub fn validate(&self, player: &Player, action: Action) -> Result<(), ActionError> {
        if !player.is_active() {
            return Err(ActionError::PlayerFolded);
        }
        let cash = player.cash();
        match action {
            Action::Bet(0) => Err(ActionError::NonPositiveBet),
            Action::Bet(amount) | Action::Raise(amount) if amount > cash => {
                Err(ActionError::ExceedsCash { amount, cash })
            }
            Action::Raise(amount) if amount <= self.current_bet => {
                Err(ActionError::RaiseTooSmall { current_bet: self.current_bet, amount })
            }
            Action::Bet(_) | Action::Raise(_) | Action::Call | Action::Fold => Ok(()),
        }
    }

    /// Apply a validated action. Returns the chips the player put in.
    ///
    /// The current bet only ever rises to the highest commitment. A call owing more than the
    /// player's cash puts in everything they have; a call owing nothing is a check.
    pub fn apply(&mut self, player: &mut Player, action: Action) -> Result<u64, ActionError> {
        self.validate(player, action)?;
        let paid = match action {
            Action::Bet(amount) | Action::Raise(amount) => player.commit(amount),
            Action::Call => player.commit(player.to_call(self.current_bet)),
            Action::Fold => {
                player.active = false;
                0
            }
        };
        self.pot += paid;
        self.current_bet = self.current_bet.max(player.committed());
        Ok(paid)
    }

    /// Empty the pot for settlement.
    pub fn take_pot(&mut self) -> u64 {
        std::mem::take(&mut self.pot)
    }
}

/// How a pot divides among tied winners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Paid to each winner.
    pub share: u64,
    /// Left over after floor division; these chips are not paid to anyone.
    pub dropped: u64,
}

/// Floor-divide `pot` among `winners`. The remainder is dropped rather than awarded.
///
/// ```
/// use holdem_table::betting::split_pot;
///
/// let s = split_pot(101, 2);
/// assert_eq!((s.share, s.dropped), (50, 1));
/// ```
pub fn split_pot(pot: u64, winners: usize) -> Split {
    if winners == 0 {
        return Split { share: 0, dropped: pot };
    }
    let n = winners as u64;
    Split { share: pot / n, dropped: pot % n }
}
