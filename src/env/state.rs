//! Episode state.
//!
//! Everything that changes during an episode lives in [`GameState`]. It is
//! built at reset, mutated only by `step`, and replaced wholesale by the next
//! reset. The RNG is kept by the environment, so a state snapshot plus
//! [`GameRngState`](crate::core::GameRngState) fully describes an episode.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{BirdDeck, BirdFeeder};
use crate::cards::BonusCardId;
use crate::core::{ActionRecord, NextAction, PlayerId, PlayerMap};
use crate::error::EnvError;
use crate::player::PlayerState;
use crate::stack::ActionQueue;

/// Round index while players are still discarding their starting hands.
pub const SETUP_ROUND: i8 = -1;

/// Complete mutable state of one episode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// `-1` during setup, then the 0-based round.
    pub(crate) round: i8,
    pub(crate) active_player: PlayerId,
    pub(crate) queue: ActionQueue,
    /// Setup discards still owed by the active player in the current sub-phase.
    pub(crate) setup_counter: u8,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) bird_deck: BirdDeck,
    /// Top of the pile is the end of the vector.
    pub(crate) bonus_deck: Vec<BonusCardId>,
    pub(crate) feeder: BirdFeeder,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    #[must_use]
    pub fn round(&self) -> i8 {
        self.round
    }

    #[must_use]
    pub fn is_setup(&self) -> bool {
        self.round == SETUP_ROUND
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// The decision owed next. An empty queue means `ChooseAction`.
    #[must_use]
    pub fn next_action(&self) -> NextAction {
        self.queue.peek().unwrap_or(NextAction::ChooseAction)
    }

    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    #[must_use]
    pub fn setup_counter(&self) -> u8 {
        self.setup_counter
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn active(&self) -> &PlayerState {
        &self.players[self.active_player]
    }

    #[must_use]
    pub fn bird_deck(&self) -> &BirdDeck {
        &self.bird_deck
    }

    #[must_use]
    pub fn bonus_deck(&self) -> &[BonusCardId] {
        &self.bonus_deck
    }

    #[must_use]
    pub fn feeder(&self) -> &BirdFeeder {
        &self.feeder
    }

    /// Every legal step taken since reset.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Encode the state with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state written by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
