//! When an episode ends.
//!
//! Termination is a hook rather than a state: the controller asks its policy
//! after every step. Any `Fn(&GameState) -> bool` works as a policy.

use super::state::GameState;

/// Decides whether an episode has ended.
pub trait TerminationPolicy: Send + Sync {
    fn is_terminal(&self, state: &GameState) -> bool;
}

/// End the episode once a fixed number of rounds has been played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundLimit {
    rounds: u8,
}

impl RoundLimit {
    #[must_use]
    pub const fn new(rounds: u8) -> Self {
        Self { rounds }
    }

    #[must_use]
    pub const fn rounds(&self) -> u8 {
        self.rounds
    }
}

impl Default for RoundLimit {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TerminationPolicy for RoundLimit {
    fn is_terminal(&self, state: &GameState) -> bool {
        i16::from(state.round()) >= i16::from(self.rounds)
    }
}

impl<F> TerminationPolicy for F
where
    F: Fn(&GameState) -> bool + Send + Sync,
{
    fn is_terminal(&self, state: &GameState) -> bool {
        self(state)
    }
}
