//! What a step reports back.

use serde::{Deserialize, Serialize};

use crate::core::NextAction;

/// How a step was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepStatus {
    /// The action was legal and the game moved on.
    Applied,
    /// The index was not a legal answer. Nothing changed.
    Illegal,
    /// The episode is over: this step ended it, or it had already ended.
    Terminated,
}

/// Result of [`WingspanEnv::step`](super::WingspanEnv::step).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepResult {
    /// The decision owed next.
    pub next_action: NextAction,
    pub status: StepStatus,
}

impl StepResult {
    #[must_use]
    pub const fn new(next_action: NextAction, status: StepStatus) -> Self {
        Self { next_action, status }
    }

    #[must_use]
    pub const fn is_legal(&self) -> bool {
        !matches!(self.status, StepStatus::Illegal)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.status, StepStatus::Terminated)
    }
}
