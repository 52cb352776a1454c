//! Board components: player mats and the shared supply.
//!
//! ## Key Types
//!
//! - `PlayerMat`: three habitat rows, action strength, egg slots
//! - `BirdFeeder`: resource dice paying out `GetResource`
//! - `BirdDeck`: draw pile, face-up display, discard pile

pub mod deck;
pub mod feeder;
pub mod mat;

pub use deck::BirdDeck;
pub use feeder::{BirdFeeder, DieFace, FEEDER_DICE, REROLL_INDEX};
pub use mat::{HabitatActivation, HabitatRow, MatSlot, PlayerMat, SLOTS_PER_HABITAT};
