//! holdem-table: a Texas Hold'em dealer
//!
//! Goals:
//! - Deterministic hand evaluation: any five cards map to a totally ordered `HandRank`
//! - A flat-pot betting round driven by an explicit phase state machine
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_table::cards::{Card, Rank, Suit};
//! use holdem_table::evaluator::{evaluate, Category};
//! use holdem_table::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate(&hole, &board).unwrap();
//! assert_eq!(eval.rank.category(), Category::Pair);
//! ```
//!
//! ## Quick start: simulate a game
//! ```
//! use holdem_table::agents::ScriptedSource;
//! use holdem_table::config::TableConfig;
//! use holdem_table::render::TableEvent;
//! use holdem_table::table::Table;
//!
//! let cfg = TableConfig::default().with_seed(1).with_interactive(false).with_max_rounds(20);
//! let mut table = Table::new(cfg).unwrap();
//! let mut events: Vec<TableEvent> = Vec::new();
//! let outcome = table.play_game(&mut ScriptedSource::default(), &mut events).unwrap();
//! assert!(outcome.rounds <= 20);
//! ```
//!
//! ## Play
//! ```sh
//! cargo run --bin holdem -- --players 3
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod player;
pub mod render;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
