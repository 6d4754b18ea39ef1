//! One-way table notifications and a plain-text printer for them.

use crate::betting::Action;
use crate::cards::{format_cards, Card};
use crate::evaluator::HandRank;
use crate::hand::HoleCards;
use crate::player::PlayerId;
use crate::table::Street;
use std::fmt;
use std::io::Write;

/// Something that happened at the table, emitted as it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableEvent {
    RoundStarted { round: u64, button: PlayerId },
    BlindPosted { player: PlayerId, amount: u64, big: bool },
    Acted { player: PlayerId, action: Action, paid: u64 },
    Pot { pot: u64, current_bet: u64 },
    HoleCards { player: PlayerId, hole: HoleCards },
    Community { street: Street, cards: Vec<Card> },
    Showdown { rank: HandRank, winners: Vec<ShowdownHand> },
    Uncontested { player: PlayerId, pot: u64 },
    Payout { player: PlayerId, amount: u64 },
    Dropped { chips: u64 },
    Eliminated { player: PlayerId },
    GameOver { winner: PlayerId, rounds: u64 },
}

/// A winner's cards as shown at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownHand {
    pub player: PlayerId,
    pub hole: HoleCards,
    pub best_five: [Card; 5],
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::RoundStarted { round, button } => {
                write!(f, "--- Round {round} (button: {button}) ---")
            }
            TableEvent::BlindPosted { player, amount, big } => {
                let which = if *big { "big" } else { "small" };
                write!(f, "{player} posts the {which} blind of {amount}")
            }
            TableEvent::Acted { player, action: Action::Fold, .. } => write!(f, "{player} folds"),
            TableEvent::Acted { player, action, paid } => {
                write!(f, "{player}: {action} ({paid} in)")
            }
            TableEvent::Pot { pot, current_bet } => {
                write!(f, "Pot: {pot} (current bet {current_bet})")
            }
            TableEvent::HoleCards { player, hole } => write!(f, "{player}: {hole}"),
            TableEvent::Community { street, cards } => {
                write!(f, "{street}. Community cards: {}", format_cards(cards))
            }
            TableEvent::Showdown { rank, winners } => {
                match winners.as_slice() {
                    [only] => write!(f, "{} wins with a {rank}!", only.player)?,
                    _ => {
                        let seats: Vec<String> =
                            winners.iter().map(|w| (w.player.0 + 1).to_string()).collect();
                        write!(f, "It's a tie between players {} with a {rank}!", seats.join(", "))?
                    }
                }
                for w in winners {
                    write!(f, "\n{}'s hand: {}", w.player, w.hole)?;
                    write!(f, "\n{}'s winning hand: {}", w.player, format_cards(&w.best_five))?;
                }
                Ok(())
            }
            TableEvent::Uncontested { player, pot } => {
                write!(f, "{player} wins {pot} uncontested")
            }
            TableEvent::Payout { player, amount } => write!(f, "{player} collects {amount}"),
            TableEvent::Dropped { chips } => write!(f, "{chips} odd chip(s) left unawarded"),
            TableEvent::Eliminated { player } => write!(f, "{player} is out of chips"),
            TableEvent::GameOver { winner, rounds } => {
                write!(f, "{winner} wins the game after {rounds} round(s)!")
            }
        }
    }
}

/// Receives table events. Implementations must not fail the round.
pub trait RenderSink {
    fn emit(&mut self, event: &TableEvent);
}

/// Records events; handy for tests and replays.
impl RenderSink for Vec<TableEvent> {
    fn emit(&mut self, event: &TableEvent) {
        self.push(event.clone());
    }
}

/// Prints every event as text lines.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn emit(&mut self, event: &TableEvent) {
        if let Err(e) = writeln!(self.out, "{event}") {
            log::warn!("render sink write failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::rank;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn single_winner_lines() {
        let best = five("AS AH QC JD 9H");
        let ev = TableEvent::Showdown {
            rank: rank(&best),
            winners: vec![ShowdownHand {
                player: PlayerId(0),
                hole: "AS AH".parse().unwrap(),
                best_five: best,
            }],
        };
        let text = ev.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Player 1 wins with a Pair!");
        assert_eq!(lines[1], "Player 1's hand: AS AH");
        assert_eq!(lines[2], "Player 1's winning hand: AS AH QC JD 9H");
    }

    #[test]
    fn tie_lists_every_winner() {
        let best = five("AC KD QH JS TC");
        let hand = |id, hole: &str| ShowdownHand {
            player: PlayerId(id),
            hole: hole.parse().unwrap(),
            best_five: best,
        };
        let ev = TableEvent::Showdown {
            rank: rank(&best),
            winners: vec![hand(0, "TC 3D"), hand(2, "TH 4S")],
        };
        assert!(ev.to_string().starts_with("It's a tie between players 1, 3 with a Straight!"));
    }

    #[test]
    fn text_sink_writes_one_line_per_event() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&TableEvent::Pot { pot: 30, current_bet: 10 });
        sink.emit(&TableEvent::Acted { player: PlayerId(1), action: Action::Fold, paid: 0 });
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "Pot: 30 (current bet 10)\nPlayer 2 folds\n");
    }

    #[test]
    fn community_line_names_the_street() {
        let cards = parse_cards("2C 3D 4H").unwrap();
        let ev = TableEvent::Community { street: Street::Flop, cards };
        assert_eq!(ev.to_string(), "Flop. Community cards: 2C 3D 4H");
    }
}
