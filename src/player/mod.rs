//! Player state: hands, resources, mat, and the mutators acting on them.

pub mod state;

pub use state::{trade, Consumed, FollowUps, Outcome, PlayOption, PlayerState};
