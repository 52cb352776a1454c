//! Environment configuration.
//!
//! An [`EnvConfig`] fixes the table size, hand limit, deal sizes, and game
//! length before any episode starts. Configuration faults are reported by
//! [`EnvConfig::validate`] and are never recoverable mid-episode.

use serde::{Deserialize, Serialize};

use crate::cards::Expansion;
use crate::core::resource::Resource;
use crate::error::ConfigError;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 5;
/// A hand limit below this cannot encode every discard/resource action.
pub const MIN_HAND_LIMIT: u8 = 5;

/// Complete environment configuration.
///
/// ## Example
///
/// ```
/// use wingspan_env::core::EnvConfig;
///
/// let config = EnvConfig::new(3).with_hand_limit(12).with_rounds(2);
/// assert!(config.validate().is_ok());
///
/// assert!(EnvConfig::new(6).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Number of players (2-5).
    pub player_count: usize,

    /// Maximum bird cards in hand once setup is over.
    pub hand_limit: u8,

    /// Bird cards dealt to each player at reset.
    pub starting_bird_cards: u8,

    /// Bonus cards dealt to each player at reset.
    pub starting_bonus_cards: u8,

    /// Bird cards or resources each player discards during setup.
    pub setup_discards: u8,

    /// Bonus cards each player discards during setup.
    pub setup_bonus_discards: u8,

    /// Rounds before the default termination policy ends the episode.
    pub rounds: u8,

    /// Turns per player in round 0; each later round has one fewer.
    pub first_round_turns: u8,

    /// Face-up bird cards in the display.
    pub display_size: u8,

    /// Card sets the decks are built from.
    pub expansions: Vec<Expansion>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            hand_limit: 20,
            starting_bird_cards: 5,
            starting_bonus_cards: 2,
            setup_discards: 5,
            setup_bonus_discards: 1,
            rounds: 4,
            first_round_turns: 8,
            display_size: 3,
            expansions: vec![Expansion::Core],
        }
    }
}

impl EnvConfig {
    /// Create a default configuration for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, hand_limit: u8) -> Self {
        self.hand_limit = hand_limit;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u8) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the number of turns in the first round.
    #[must_use]
    pub fn with_first_round_turns(mut self, turns: u8) -> Self {
        self.first_round_turns = turns;
        self
    }

    /// Set the card sets used to build the decks.
    #[must_use]
    pub fn with_expansions(mut self, expansions: Vec<Expansion>) -> Self {
        self.expansions = expansions;
        self
    }

    /// Turns each player gets in `round` (0-based).
    #[must_use]
    pub fn turns_in_round(&self, round: u8) -> u8 {
        self.first_round_turns.saturating_sub(round)
    }

    /// Bird cards needed to deal every hand and fill the display.
    #[must_use]
    pub fn bird_cards_required(&self) -> usize {
        self.player_count * usize::from(self.starting_bird_cards) + usize::from(self.display_size)
    }

    /// Bonus cards needed to deal every player.
    #[must_use]
    pub fn bonus_cards_required(&self) -> usize {
        self.player_count * usize::from(self.starting_bonus_cards)
    }

    /// Check the configuration for faults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.hand_limit < MIN_HAND_LIMIT {
            return Err(ConfigError::HandLimitTooLow {
                hand_limit: self.hand_limit,
                minimum: MIN_HAND_LIMIT,
            });
        }
        if self.hand_limit < self.starting_bird_cards {
            return Err(ConfigError::HandLimitTooLow {
                hand_limit: self.hand_limit,
                minimum: self.starting_bird_cards,
            });
        }
        // Every player must keep at least one bird card or resource.
        let setup_pool = u16::from(self.starting_bird_cards) + Resource::REGULAR.len() as u16;
        if self.setup_discards == 0 || u16::from(self.setup_discards) >= setup_pool {
            return Err(ConfigError::SetupDiscards {
                discards: self.setup_discards,
                available: setup_pool,
            });
        }
        if self.setup_bonus_discards == 0 || self.setup_bonus_discards >= self.starting_bonus_cards {
            return Err(ConfigError::BonusDiscards {
                discards: self.setup_bonus_discards,
                dealt: self.starting_bonus_cards,
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.first_round_turns < self.rounds {
            return Err(ConfigError::TooFewTurns {
                turns: self.first_round_turns,
                rounds: self.rounds,
            });
        }
        if self.expansions.is_empty() {
            return Err(ConfigError::NoExpansions);
        }
        Ok(())
    }
}
