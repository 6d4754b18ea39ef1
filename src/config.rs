//! Table setup.

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {0}")]
    PlayerCount(usize),
    #[error("starting cash must be positive")]
    NoStartingCash,
    #[error("big blind must be positive")]
    NoBigBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    BlindsOutOfOrder { small: u64, big: u64 },
}

/// How a table is set up. Build with [`Default`] and the `with_*` methods.
///
/// ```
/// use holdem_table::config::TableConfig;
///
/// let cfg = TableConfig::default().with_players(3).with_seed(7).with_interactive(false);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub players: usize,
    pub starting_cash: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Seeds deck shuffles and the default opponent policy. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Player 1 is driven by the action source; otherwise every seat uses the policy.
    pub interactive: bool,
    /// Stop after this many rounds even if several players remain.
    pub max_rounds: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: 4,
            starting_cash: 1000,
            small_blind: 5,
            big_blind: 10,
            seed: None,
            interactive: true,
            max_rounds: None,
        }
    }
}

impl TableConfig {
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    pub fn with_starting_cash(mut self, cash: u64) -> Self {
        self.starting_cash = cash;
        self
    }

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_max_rounds(mut self, rounds: u64) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::PlayerCount(self.players));
        }
        if self.starting_cash == 0 {
            return Err(ConfigError::NoStartingCash);
        }
        if self.big_blind == 0 {
            return Err(ConfigError::NoBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::BlindsOutOfOrder {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!((cfg.players, cfg.starting_cash), (4, 1000));
        assert!(cfg.interactive);
    }

    #[test]
    fn rejects_bad_setups() {
        let base = TableConfig::default();
        assert_eq!(base.clone().with_players(1).validate(), Err(ConfigError::PlayerCount(1)));
        assert_eq!(base.clone().with_players(11).validate(), Err(ConfigError::PlayerCount(11)));
        assert_eq!(base.clone().with_starting_cash(0).validate(), Err(ConfigError::NoStartingCash));
        assert_eq!(base.clone().with_blinds(0, 0).validate(), Err(ConfigError::NoBigBlind));
        assert_eq!(
            base.with_blinds(20, 10).validate(),
            Err(ConfigError::BlindsOutOfOrder { small: 20, big: 10 })
        );
    }

    #[test]
    fn builders_chain() {
        let cfg = TableConfig::default().with_seed(3).with_max_rounds(9).with_blinds(1, 2);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.max_rounds, Some(9));
        assert_eq!((cfg.small_blind, cfg.big_blind), (1, 2));
    }
}
