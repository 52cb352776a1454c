//! # wingspan-env
//!
//! A turn-based rules engine for the board game Wingspan, exposed as a
//! step-based environment for reinforcement-learning agents.
//!
//! ## Design Principles
//!
//! 1. **Index Actions**: The engine never asks for a structured action. It
//!    reports the decision owed (`NextAction`) and accepts a plain index.
//!
//! 2. **Explicit Stack**: Chained sub-actions sit on a LIFO `ActionQueue`
//!    instead of the call stack, so the state is inspectable and
//!    serializable between any two steps.
//!
//! 3. **Illegal Is Normal**: An illegal index is reported, not raised, and
//!    changes nothing. Only configuration and catalog faults are errors.
//!
//! 4. **Shared Catalog**: Card data is validated once and shared read-only
//!    behind an `Arc` by any number of environments.
//!
//! ## Modules
//!
//! - `core`: Players, resources, habitats, action tags, RNG, configuration
//! - `cards`: Card definitions, catalog, playability evaluator
//! - `board`: Player mat, bird feeder, bird deck
//! - `player`: Per-player state and mutators
//! - `stack`: The pending-action queue
//! - `env`: The turn controller and episode API

pub mod board;
pub mod cards;
pub mod core;
pub mod env;
pub mod error;
pub mod player;
pub mod stack;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, BaseAction, EnvConfig, GameRng, GameRngState, Habitat, NextAction, PlayerId,
    PlayerMap, Resource, ResourceVector,
};

pub use crate::cards::{
    BirdCard, BirdCardId, BonusCard, BonusCardId, Catalog, CatalogBuilder, CostRecord, Expansion,
    Payment,
};

pub use crate::board::{BirdDeck, BirdFeeder, PlayerMat};

pub use crate::player::{Outcome, PlayOption, PlayerState};

pub use crate::stack::ActionQueue;

pub use crate::env::{GameState, RoundLimit, StepResult, StepStatus, TerminationPolicy, WingspanEnv};

pub use crate::error::{CatalogError, ConfigError, EnvError};
