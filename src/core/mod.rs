//! Core engine types: players, resources, habitats, actions, RNG, configuration.

pub mod action;
pub mod config;
pub mod habitat;
pub mod player;
pub mod resource;
pub mod rng;

pub use action::{ActionRecord, BaseAction, NextAction};
pub use config::{EnvConfig, MAX_PLAYERS, MIN_HAND_LIMIT, MIN_PLAYERS};
pub use habitat::Habitat;
pub use player::{PlayerId, PlayerMap};
pub use resource::{Resource, ResourceVector, REGULAR_RESOURCE_COUNT};
pub use rng::{GameRng, GameRngState};
