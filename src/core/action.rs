//! Action kinds: what the environment expects next, and what was taken.
//!
//! The environment never asks for a structured action. Instead it exposes a
//! [`NextAction`] tag describing the decision currently owed, and the agent
//! answers with a plain index whose meaning depends on that tag. For example:
//! - `ChooseAction` + 2 = take the Grassland action
//! - `DiscardResource` + 3 = discard one Fruit
//! - `GetBirdCard` + 0 = take the first face-up bird

use serde::{Deserialize, Serialize};

use super::habitat::Habitat;
use super::player::PlayerId;

/// A unit of work the environment expects from the active player.
///
/// Pending actions live on the LIFO [`ActionQueue`](crate::stack::ActionQueue);
/// an empty queue means `ChooseAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NextAction {
    /// Pick one of the four base actions (see [`BaseAction`]).
    ChooseAction,

    // Discards
    /// Setup: discard a resource (`0..5`) or a bird card (`5 + hand index`).
    DiscardBirdCardOrResource,
    DiscardBonusCard,
    DiscardBirdCard,
    DiscardResource,
    /// Discard an egg from the n-th slot that holds eggs.
    DiscardEgg,

    /// Commit one of the cached play options.
    PlayACard,

    // Gains
    GetBirdCard,
    GetBonusCard,
    GetResource,
    GetEgg,

    /// Accept (1) or decline (0) the board trade of a habitat row.
    OptionalAction(Habitat),

    /// Placeholder for mechanics without an implementation yet.
    NotImplemented,
}

impl NextAction {
    /// Stable numeric code for observations.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            NextAction::ChooseAction => 0,
            NextAction::DiscardBirdCardOrResource => 1,
            NextAction::DiscardBonusCard => 2,
            NextAction::DiscardBirdCard => 3,
            NextAction::DiscardResource => 4,
            NextAction::PlayACard => 5,
            NextAction::GetBirdCard => 6,
            NextAction::GetBonusCard => 7,
            NextAction::GetResource => 8,
            NextAction::GetEgg => 9,
            NextAction::DiscardEgg => 10,
            NextAction::OptionalAction(_) => 100,
            NextAction::NotImplemented => 999,
        }
    }

    /// Whether this is one of the discard decisions.
    #[must_use]
    pub const fn is_discard(self) -> bool {
        matches!(
            self,
            NextAction::DiscardBirdCardOrResource
                | NextAction::DiscardBonusCard
                | NextAction::DiscardBirdCard
                | NextAction::DiscardResource
                | NextAction::DiscardEgg
        )
    }
}

impl std::fmt::Display for NextAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextAction::OptionalAction(habitat) => write!(f, "OptionalAction({habitat})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// The four base actions offered by `ChooseAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseAction {
    PlayABird = 0,
    Forest = 1,
    Grassland = 2,
    Wetland = 3,
}

impl BaseAction {
    /// Number of base actions (the `ChooseAction` action space).
    pub const COUNT: usize = 4;

    /// Map an action index to a base action.
    #[must_use]
    pub fn try_new(index: usize) -> Option<Self> {
        match index {
            0 => Some(BaseAction::PlayABird),
            1 => Some(BaseAction::Forest),
            2 => Some(BaseAction::Grassland),
            3 => Some(BaseAction::Wetland),
            _ => None,
        }
    }

    /// The habitat activated by this base action, if any.
    #[must_use]
    pub const fn habitat(self) -> Option<Habitat> {
        match self {
            BaseAction::PlayABird => None,
            BaseAction::Forest => Some(Habitat::Forest),
            BaseAction::Grassland => Some(Habitat::Grassland),
            BaseAction::Wetland => Some(Habitat::Wetland),
        }
    }
}

/// A recorded legal step, kept for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// The decision that was answered.
    pub action: NextAction,

    /// The index the player chose.
    pub index: usize,

    /// Round index when the step was taken (`-1` during setup).
    pub round: i8,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: NextAction, index: usize, round: i8) -> Self {
        Self {
            player,
            action,
            index,
            round,
        }
    }
}
