//! Agents: who decides each seat's action.
//!
//! The primary player is driven by an [`ActionSource`] (a prompt, a script, a UI). Every other
//! seat asks an [`OpponentPolicy`]. Both see the same [`SeatView`] and return an [`Action`];
//! the table validates it.

use crate::betting::{Action, ActionError};
use crate::player::PlayerId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// What an agent may see when deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatView {
    pub player: PlayerId,
    pub cash: u64,
    pub committed: u64,
    pub current_bet: u64,
    pub pot: u64,
    pub big_blind: u64,
}

impl SeatView {
    pub fn to_call(&self) -> u64 {
        self.current_bet.saturating_sub(self.committed)
    }
}

/// Supplies the primary player's decisions. Polled until it yields a valid action.
pub trait ActionSource {
    /// Next decision, or `None` once the source has nothing more to give (treated as a fold).
    fn next_action(&mut self, view: &SeatView) -> Option<Action>;

    /// Told when the previous action was refused, before being polled again.
    fn rejected(&mut self, _action: Action, _error: &ActionError) {}
}

/// Decides for every non-primary seat.
pub trait OpponentPolicy {
    fn decide(&mut self, view: &SeatView) -> Action;
}

impl<F> OpponentPolicy for F
where
    F: FnMut(&SeatView) -> Action,
{
    fn decide(&mut self, view: &SeatView) -> Action {
        self(view)
    }
}

/// Commits a uniformly random amount between the big blind and the whole stack.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl OpponentPolicy for RandomPolicy {
    fn decide(&mut self, view: &SeatView) -> Action {
        if view.cash == 0 {
            return Action::Call;
        }
        let low = view.big_blind.clamp(1, view.cash);
        let amount = self.rng.random_range(low..=view.cash);
        if view.to_call() == 0 {
            Action::Bet(amount)
        } else if amount > view.current_bet {
            Action::Raise(amount)
        } else {
            Action::Call
        }
    }
}

/// Replays a fixed list of actions and remembers what was refused.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<Action>,
    rejections: Vec<(Action, ActionError)>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        Self { queue: actions.into_iter().collect(), rejections: Vec::new() }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn rejections(&self) -> &[(Action, ActionError)] {
        &self.rejections
    }
}

impl ActionSource for ScriptedSource {
    fn next_action(&mut self, _view: &SeatView) -> Option<Action> {
        self.queue.pop_front()
    }

    fn rejected(&mut self, action: Action, error: &ActionError) {
        self.rejections.push((action, error.clone()));
    }
}
