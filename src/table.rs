//! The round state machine.
//!
//! A [`Table`] owns the deck, the board, the betting state and the seated players, and moves
//! through [`Phase`]s one transition at a time:
//!
//! ```text
//! BlindsAndBetting -> DealHole -> Flop -> Turn -> River -> Showdown -> Settle -> Eliminate
//!        |                                                              ^          |
//!        +------------------- one player left (uncontested) -----------+          |
//!        ^---------------------------- more than one player left -----------------+
//!                                                           one player left -> GameOver
//! ```
//!
//! Betting happens once per round, before any card is dealt. Only players still active after
//! it receive hole cards and reach the showdown.

use crate::agents::{ActionSource, OpponentPolicy, RandomPolicy, SeatView};
use crate::betting::{split_pot, Action, BettingState};
use crate::cards::Card;
use crate::config::{ConfigError, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{winners, EvalError, HandRank};
use crate::hand::{Board, HandError, HoleCards};
use crate::player::{Player, PlayerId};
use crate::render::{RenderSink, ShowdownHand, TableEvent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    BlindsAndBetting,
    DealHole,
    Flop,
    Turn,
    River,
    Showdown,
    Settle,
    Eliminate,
    GameOver,
}

/// A community-card street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    Flop,
    Turn,
    River,
}

impl Street {
    /// Cards this street adds to the board.
    pub const fn cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        })
    }
}

/// Aborts the current round.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("deck: {0}")]
    Deck(#[from] DeckError),
    #[error("evaluation: {0}")]
    Eval(#[from] EvalError),
    #[error("cards: {0}")]
    Hand(#[from] HandError),
    #[error("showdown reached with no active player")]
    EmptyShowdown,
    #[error("the game is over")]
    GameOver,
}

/// What happened in one finished round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u64,
    pub pot: u64,
    /// Every player paid from the pot. One entry when uncontested.
    pub winners: Vec<PlayerId>,
    /// Winning hand; `None` when everyone else folded.
    pub rank: Option<HandRank>,
    /// Paid to each winner.
    pub share: u64,
    /// Remainder of an uneven split, paid to nobody.
    pub dropped: u64,
    pub board: Vec<Card>,
    pub eliminated: Vec<PlayerId>,
}

impl RoundSummary {
    pub fn is_uncontested(&self) -> bool {
        self.rank.is_none()
    }
}

/// Where a game stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    /// The last player standing; `None` if the round cap stopped the game first.
    pub winner: Option<PlayerId>,
    pub rounds: u64,
    pub standings: Vec<(PlayerId, u64)>,
}

/// A Hold'em table.
pub struct Table {
    config: TableConfig,
    players: Vec<Player>,
    deck: Deck,
    board: Board,
    betting: BettingState,
    button: usize,
    round: u64,
    phase: Phase,
    rng: ChaCha8Rng,
    policy: Box<dyn OpponentPolicy>,
    /// Seat indices taking the pot, set by the betting segment or the showdown.
    pending: Vec<usize>,
    summary: RoundSummary,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("button", &self.button)
            .field("players", &self.players)
            .field("board", &self.board)
            .field("betting", &self.betting)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// A table whose opponents use [`RandomPolicy`], seeded from the table seed.
    ///
    /// ```
    /// use holdem_table::agents::ScriptedSource;
    /// use holdem_table::config::TableConfig;
    /// use holdem_table::render::TableEvent;
    /// use holdem_table::table::Table;
    ///
    /// let cfg = TableConfig::default().with_players(3).with_seed(42).with_interactive(false);
    /// let mut table = Table::new(cfg).unwrap();
    /// let mut events: Vec<TableEvent> = Vec::new();
    /// let summary = table.play_round(&mut ScriptedSource::default(), &mut events).unwrap();
    /// assert_eq!(summary.round, 1);
    /// assert!(!summary.winners.is_empty());
    /// ```
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let policy = RandomPolicy::seeded(rng.random());
        Ok(Self::build(config, rng, Box::new(policy)))
    }

    /// A table whose opponents use `policy`.
    pub fn with_policy<P>(config: TableConfig, policy: P) -> Result<Self, ConfigError>
    where
        P: OpponentPolicy + 'static,
    {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_else(|| rand::rng().random()));
        Ok(Self::build(config, rng, Box::new(policy)))
    }

    fn build(config: TableConfig, rng: ChaCha8Rng, policy: Box<dyn OpponentPolicy>) -> Self {
        let players =
            (0..config.players).map(|i| Player::new(PlayerId(i), config.starting_cash)).collect();
        Self {
            betting: BettingState::new(config.small_blind, config.big_blind),
            config,
            players,
            deck: Deck::ordered(),
            board: Board::new(),
            button: 0,
            round: 0,
            phase: Phase::BlindsAndBetting,
            rng,
            policy,
            pending: Vec::new(),
            summary: RoundSummary::default(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Seated players in seat order. Eliminated players are gone.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rounds started so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn button(&self) -> Option<PlayerId> {
        self.players.get(self.button).map(Player::id)
    }

    /// Players still in the current round.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Perform exactly one phase transition and return the new phase.
    pub fn advance(
        &mut self,
        source: &mut dyn ActionSource,
        sink: &mut dyn RenderSink,
    ) -> Result<Phase, RoundError> {
        let next = match self.phase {
            Phase::BlindsAndBetting => self.open_round(source, sink),
            Phase::DealHole => self.deal_hole(sink)?,
            Phase::Flop => self.deal_street(Street::Flop, sink)?,
            Phase::Turn => self.deal_street(Street::Turn, sink)?,
            Phase::River => self.deal_street(Street::River, sink)?,
            Phase::Showdown => self.showdown(sink)?,
            Phase::Settle => self.settle(sink),
            Phase::Eliminate => self.eliminate(sink),
            Phase::GameOver => return Err(RoundError::GameOver),
        };
        log::debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(next)
    }

    /// Run to the end of the current round (or the start of the first one).
    pub fn play_round(
        &mut self,
        source: &mut dyn ActionSource,
        sink: &mut dyn RenderSink,
    ) -> Result<RoundSummary, RoundError> {
        if self.phase == Phase::GameOver {
            return Err(RoundError::GameOver);
        }
        loop {
            if let Phase::BlindsAndBetting | Phase::GameOver = self.advance(source, sink)? {
                return Ok(self.summary.clone());
            }
        }
    }

    /// Play rounds until one player is left or the configured round cap is hit.
    pub fn play_game(
        &mut self,
        source: &mut dyn ActionSource,
        sink: &mut dyn RenderSink,
    ) -> Result<GameOutcome, RoundError> {
        while self.phase != Phase::GameOver {
            let capped = self.config.max_rounds.is_some_and(|max| self.round >= max);
            if capped && self.phase == Phase::BlindsAndBetting {
                log::info!("stopping after {} round(s)", self.round);
                break;
            }
            self.play_round(source, sink)?;
        }
        Ok(self.outcome())
    }

    pub fn outcome(&self) -> GameOutcome {
        let winner = match self.players.as_slice() {
            [last] => Some(last.id()),
            _ => None,
        };
        GameOutcome {
            winner,
            rounds: self.round,
            standings: self.players.iter().map(|p| (p.id(), p.cash())).collect(),
        }
    }

    fn open_round(&mut self, source: &mut dyn ActionSource, sink: &mut dyn RenderSink) -> Phase {
        if self.round > 0 {
            self.button = (self.button + 1) % self.players.len();
        }
        self.round += 1;
        self.deck = Deck::shuffled_with(&mut self.rng);
        self.board.clear();
        self.betting.reset();
        self.pending.clear();
        self.summary = RoundSummary { round: self.round, ..RoundSummary::default() };
        for p in &mut self.players {
            p.reset_for_round();
        }
        let button = self.players[self.button].id();
        log::info!("round {} starts, button {}", self.round, button);
        sink.emit(&TableEvent::RoundStarted { round: self.round, button });

        self.post_blinds(sink);
        self.betting_segment(source, sink);
        sink.emit(&TableEvent::Pot {
            pot: self.betting.pot(),
            current_bet: self.betting.current_bet(),
        });

        let active: Vec<usize> =
            (0..self.players.len()).filter(|&i| self.players[i].is_active()).collect();
        if let [sole] = active.as_slice() {
            self.pending.push(*sole);
            Phase::Settle
        } else {
            Phase::DealHole
        }
    }

    /// Heads-up the button posts the small blind; otherwise the next two seats post.
    fn post_blinds(&mut self, sink: &mut dyn RenderSink) {
        let n = self.players.len();
        let (sb, bb) = if n == 2 {
            (self.button, (self.button + 1) % n)
        } else {
            ((self.button + 1) % n, (self.button + 2) % n)
        };
        for (seat, amount, big) in
            [(sb, self.betting.small_blind(), false), (bb, self.betting.big_blind(), true)]
        {
            let player = &mut self.players[seat];
            let paid = self.betting.post_blind(player, amount);
            log::debug!("{} posts blind {paid}", player.id());
            sink.emit(&TableEvent::BlindPosted { player: player.id(), amount: paid, big });
        }
    }

    /// One pass over the seats in order. Stops early once a single player is left.
    fn betting_segment(&mut self, source: &mut dyn ActionSource, sink: &mut dyn RenderSink) {
        for seat in 0..self.players.len() {
            if self.active_count() <= 1 {
                break;
            }
            let player = &self.players[seat];
            if !player.is_active() || player.cash() == 0 {
                continue;
            }
            let view = SeatView {
                player: player.id(),
                cash: player.cash(),
                committed: player.committed(),
                current_bet: self.betting.current_bet(),
                pot: self.betting.pot(),
                big_blind: self.betting.big_blind(),
            };
            let (action, paid) = if self.config.interactive && view.player == PlayerId::PRIMARY {
                self.primary_turn(seat, &view, source)
            } else {
                self.policy_turn(seat, &view)
            };
            log::debug!("{} {action} ({paid} in)", view.player);
            sink.emit(&TableEvent::Acted { player: view.player, action, paid });
        }
    }

    fn primary_turn(
        &mut self,
        seat: usize,
        view: &SeatView,
        source: &mut dyn ActionSource,
    ) -> (Action, u64) {
        loop {
            let Some(action) = source.next_action(view) else {
                log::warn!("{} has no more input; folding", view.player);
                return (Action::Fold, self.fold(seat));
            };
            match self.betting.apply(&mut self.players[seat], action) {
                Ok(paid) => return (action, paid),
                Err(e) => {
                    log::debug!("{} tried {action}: {e}", view.player);
                    source.rejected(action, &e);
                }
            }
        }
    }

    fn policy_turn(&mut self, seat: usize, view: &SeatView) -> (Action, u64) {
        let action = self.policy.decide(view);
        match self.betting.apply(&mut self.players[seat], action) {
            Ok(paid) => (action, paid),
            Err(e) => {
                log::warn!("{} policy chose {action} ({e}); folding", view.player);
                (Action::Fold, self.fold(seat))
            }
        }
    }

    fn fold(&mut self, seat: usize) -> u64 {
        self.players[seat].active = false;
        0
    }

    fn deal_hole(&mut self, sink: &mut dyn RenderSink) -> Result<Phase, RoundError> {
        for p in self.players.iter_mut().filter(|p| p.is_active()) {
            let hole = HoleCards::from_slice(&self.deck.deal_n(2)?)?;
            p.hole = Some(hole);
            sink.emit(&TableEvent::HoleCards { player: p.id(), hole });
        }
        Ok(Phase::Flop)
    }

    fn deal_street(
        &mut self,
        street: Street,
        sink: &mut dyn RenderSink,
    ) -> Result<Phase, RoundError> {
        let cards = self.deck.deal_n(street.cards())?;
        self.board.extend(cards)?;
        sink.emit(&TableEvent::Community { street, cards: self.board.as_slice().to_vec() });
        Ok(match street {
            Street::Flop => Phase::Turn,
            Street::Turn => Phase::River,
            Street::River => Phase::Showdown,
        })
    }

    fn showdown(&mut self, sink: &mut dyn RenderSink) -> Result<Phase, RoundError> {
        let contenders: Vec<(usize, HoleCards)> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .filter_map(|(i, p)| p.hole().map(|h| (i, h)))
            .collect();
        if contenders.is_empty() {
            return Err(RoundError::EmptyShowdown);
        }
        let result = winners(contenders.iter().map(|(i, h)| (*i, h)), &self.board)?;

        let hands = result
            .winners
            .iter()
            .zip(&result.hands)
            .filter_map(|(&seat, &best_five)| {
                let p = &self.players[seat];
                p.hole().map(|hole| ShowdownHand { player: p.id(), hole, best_five })
            })
            .collect();
        log::info!("showdown won with {} by {} player(s)", result.rank, result.winners.len());
        sink.emit(&TableEvent::Showdown { rank: result.rank.clone(), winners: hands });

        self.pending = result.winners;
        self.summary.rank = Some(result.rank);
        Ok(Phase::Settle)
    }

    fn settle(&mut self, sink: &mut dyn RenderSink) -> Phase {
        let pot = self.betting.take_pot();
        let split = split_pot(pot, self.pending.len());
        let uncontested = self.summary.rank.is_none();
        for &seat in &self.pending {
            let p = &mut self.players[seat];
            p.cash += split.share;
            self.summary.winners.push(p.id());
            if uncontested {
                log::info!("{} wins {pot} uncontested", p.id());
                sink.emit(&TableEvent::Uncontested { player: p.id(), pot });
            } else {
                log::info!("{} collects {}", p.id(), split.share);
                sink.emit(&TableEvent::Payout { player: p.id(), amount: split.share });
            }
        }
        if split.dropped > 0 {
            log::warn!("{} chip(s) of a {pot} pot left unawarded", split.dropped);
            sink.emit(&TableEvent::Dropped { chips: split.dropped });
        }
        self.summary.pot = pot;
        self.summary.share = split.share;
        self.summary.dropped = split.dropped;
        self.summary.board = self.board.as_slice().to_vec();
        Phase::Eliminate
    }

    fn eliminate(&mut self, sink: &mut dyn RenderSink) -> Phase {
        let busted_before_button =
            self.players[..self.button].iter().filter(|p| p.is_busted()).count();
        let button_busted = self.players[self.button].is_busted();
        for p in self.players.iter().filter(|p| p.is_busted()) {
            log::info!("{} is eliminated", p.id());
            sink.emit(&TableEvent::Eliminated { player: p.id() });
            self.summary.eliminated.push(p.id());
        }
        self.players.retain(|p| !p.is_busted());

        let n = self.players.len();
        if n <= 1 {
            self.button = 0;
            if let Some(last) = self.players.first() {
                log::info!("{} wins the game after {} round(s)", last.id(), self.round);
                sink.emit(&TableEvent::GameOver { winner: last.id(), rounds: self.round });
            }
            return Phase::GameOver;
        }
        // Step back one seat when the button left so the next rotation lands on its successor.
        self.button -= busted_before_button;
        self.button = if button_busted { (self.button + n - 1) % n } else { self.button % n };
        Phase::BlindsAndBetting
    }
}
