use clap::Parser;
use holdem_table::agents::{ActionSource, SeatView};
use holdem_table::betting::{Action, ActionError};
use holdem_table::config::TableConfig;
use holdem_table::render::TextSink;
use holdem_table::table::Table;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deal Texas Hold'em against random opponents",
    long_about = None
)]
struct Args {
    #[arg(short, long, default_value_t = 4, help = "Players at the table, 2 to 10")]
    players: usize,
    #[arg(long, default_value_t = 1000, help = "Starting cash per player")]
    cash: u64,
    #[arg(long, default_value_t = 5)]
    small_blind: u64,
    #[arg(long, default_value_t = 10)]
    big_blind: u64,
    #[arg(long, help = "Seed for shuffles and opponents")]
    seed: Option<u64>,
    #[arg(long, help = "Let the random policy play every seat")]
    auto: bool,
    #[arg(long, help = "Stop after this many rounds")]
    max_rounds: Option<u64>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "More log output (-v, -vv)")]
    verbose: u8,
}

impl Args {
    fn config(&self) -> TableConfig {
        let mut cfg = TableConfig::default()
            .with_players(self.players)
            .with_starting_cash(self.cash)
            .with_blinds(self.small_blind, self.big_blind)
            .with_interactive(!self.auto);
        if let Some(seed) = self.seed {
            cfg = cfg.with_seed(seed);
        }
        if let Some(rounds) = self.max_rounds {
            cfg = cfg.with_max_rounds(rounds);
        }
        cfg
    }
}

/// Prompts on stdout and reads one action per line from stdin.
struct StdinSource<R> {
    input: R,
}

impl<R: BufRead> ActionSource for StdinSource<R> {
    fn next_action(&mut self, view: &SeatView) -> Option<Action> {
        loop {
            print!(
                "{} (cash {}, to call {}, pot {}) [bet N | call | raise N | fold]: ",
                view.player,
                view.cash,
                view.to_call(),
                view.pot
            );
            if let Err(e) = io::stdout().flush() {
                log::warn!("could not flush prompt: {e}");
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("stdin read failed: {e}");
                    return None;
                }
            }
            match line.parse::<Action>() {
                Ok(action) => return Some(action),
                Err(e) => println!("{e}"),
            }
        }
    }

    fn rejected(&mut self, action: Action, error: &ActionError) {
        println!("{action} not allowed: {error}");
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut table = Table::new(args.config())?;
    let stdin = io::stdin();
    let mut source = StdinSource { input: stdin.lock() };
    let mut sink = TextSink::new(io::stdout());

    let outcome = table.play_game(&mut source, &mut sink)?;
    if outcome.winner.is_none() {
        println!("Stopped after {} round(s). Standings:", outcome.rounds);
        for (player, cash) in &outcome.standings {
            println!("  {player}: {cash}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::debug!("{args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
