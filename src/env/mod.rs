//! The episode API.
//!
//! ## Key Types
//!
//! - `WingspanEnv`: reset / step / action space, owns RNG and state
//! - `GameState`: everything that changes during an episode
//! - `StepResult` / `StepStatus`: what a step reports back
//! - `TerminationPolicy`: pluggable end-of-episode hook, `RoundLimit` by default

mod controller;
mod result;
mod state;
mod termination;

pub use controller::WingspanEnv;
pub use result::{StepResult, StepStatus};
pub use state::{GameState, SETUP_ROUND};
pub use termination::{RoundLimit, TerminationPolicy};
