//! The bird feeder: five resource dice shared by the table.
//!
//! Each die has six faces. Faces 0-4 show one regular resource; the sixth
//! face shows invertebrate *or* seed and pays either. Taking resources
//! removes dice; once the last die is taken all five are rolled again.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, Resource};

/// Dice in a full feeder.
pub const FEEDER_DICE: usize = 5;

/// Action index that asks for a reroll instead of taking a die.
pub const REROLL_INDEX: usize = 5;

/// A rolled die face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieFace {
    Single(Resource),
    InvertebrateOrSeed,
}

impl DieFace {
    fn roll(rng: &mut GameRng) -> Self {
        let face = rng.roll_die(6);
        match Resource::from_index(usize::from(face)) {
            Some(resource) => DieFace::Single(resource),
            None => DieFace::InvertebrateOrSeed,
        }
    }

    /// Whether this face can pay out `resource`.
    #[must_use]
    pub fn pays(self, resource: Resource) -> bool {
        match self {
            DieFace::Single(face) => face == resource,
            DieFace::InvertebrateOrSeed => {
                matches!(resource, Resource::Invertebrate | Resource::Seed)
            }
        }
    }
}

/// Dice currently in the feeder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirdFeeder {
    dice: SmallVec<[DieFace; FEEDER_DICE]>,
}

impl BirdFeeder {
    /// An empty feeder. Call [`BirdFeeder::roll`] before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll all five dice back into the feeder.
    pub fn roll(&mut self, rng: &mut GameRng) {
        self.dice.clear();
        self.dice.extend((0..FEEDER_DICE).map(|_| DieFace::roll(rng)));
    }

    #[must_use]
    pub fn dice(&self) -> &[DieFace] {
        &self.dice
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Whether some die can pay out `resource`.
    #[must_use]
    pub fn can_take(&self, resource: Resource) -> bool {
        self.dice.iter().any(|d| d.pays(resource))
    }

    /// Dice that could pay out `resource`.
    #[must_use]
    pub fn count(&self, resource: Resource) -> usize {
        self.dice.iter().filter(|d| d.pays(resource)).count()
    }

    /// Rerolling is allowed when every die shows the same face.
    #[must_use]
    pub fn can_reroll(&self) -> bool {
        match self.dice.first() {
            Some(first) => self.dice.iter().all(|d| d == first),
            None => true,
        }
    }

    /// Take a die paying out `resource`, preferring an exact face.
    ///
    /// Returns `false` if no die matches. An emptied feeder is rolled again.
    pub fn take(&mut self, resource: Resource, rng: &mut GameRng) -> bool {
        let position = self
            .dice
            .iter()
            .position(|&d| d == DieFace::Single(resource))
            .or_else(|| self.dice.iter().position(|d| d.pays(resource)));
        let Some(position) = position else {
            return false;
        };
        self.dice.remove(position);
        if self.dice.is_empty() {
            self.roll(rng);
        }
        true
    }

    /// Reroll every die if allowed.
    pub fn reroll(&mut self, rng: &mut GameRng) -> bool {
        if !self.can_reroll() {
            return false;
        }
        self.roll(rng);
        true
    }
}
