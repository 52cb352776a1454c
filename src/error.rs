//! Fault types.
//!
//! An illegal action index is *not* a fault: `step` reports it through
//! [`StepStatus::Illegal`](crate::env::StepStatus::Illegal) and leaves the
//! game untouched. The enums here cover faults only: bad configuration, bad
//! catalog data, and misuse of a finished episode.

use thiserror::Error;

use crate::cards::BirdCardId;

/// Configuration rejected before an episode starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count must be between 2 and 5, got {0}")]
    PlayerCount(usize),

    #[error("hand limit {hand_limit} is below the minimum of {minimum}")]
    HandLimitTooLow { hand_limit: u8, minimum: u8 },

    #[error("setup asks for {discards} discards from a pool of {available} cards and resources")]
    SetupDiscards { discards: u8, available: u16 },

    #[error("setup asks for {discards} bonus discards but {dealt} bonus cards are dealt")]
    BonusDiscards { discards: u8, dealt: u8 },

    #[error("the game needs at least one round")]
    NoRounds,

    #[error("{turns} turns in the first round cannot cover {rounds} rounds")]
    TooFewTurns { turns: u8, rounds: u8 },

    #[error("no card sets selected")]
    NoExpansions,

    #[error("the selected card sets hold {available} bird cards, {required} are needed")]
    NotEnoughBirdCards { available: usize, required: usize },

    #[error("the selected card sets hold {available} bonus cards, {required} are needed")]
    NotEnoughBonusCards { available: usize, required: usize },
}

/// Malformed or inconsistent reference data. Fatal at load time.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog bytes are malformed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("card ids must be dense: expected id {expected}, found {found}")]
    NonDenseId { expected: u16, found: u16 },

    #[error("{0} has an alternative cost without any listed resource")]
    EmptyAlternativeCost(BirdCardId),

    #[error("{0} lists a cost above its total")]
    CostAboveTotal(BirdCardId),

    #[error("{0} lists requirements summing to {1}, above the largest cost of 255")]
    CostOverflow(BirdCardId, u16),

    #[error("{count} {kind} cards exceed the id space of 65536")]
    TooManyCards { kind: &'static str, count: usize },

    #[error("{0} cannot live in any habitat")]
    NoHabitat(BirdCardId),

    #[error("bird name {0:?} appears more than once")]
    DuplicateName(String),
}

/// Misuse of an environment.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("the episode has terminated; call reset")]
    Terminated,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("snapshot holds {found} players, the environment is configured for {expected}")]
    PlayerCountMismatch { expected: usize, found: usize },

    #[error("state snapshot failed: {0}")]
    Snapshot(#[from] bincode::Error),
}
