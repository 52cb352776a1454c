//! Player mat: three habitat rows of bird slots.
//!
//! ## Action strength
//!
//! Activating a habitat yields a number of sub-actions that grows with the
//! birds already placed in that row. The counts come from fixed lookup tables
//! indexed by bird count (0-5):
//!
//! | Birds      | 0 | 1 | 2 | 3 | 4 | 5 |
//! |------------|---|---|---|---|---|---|
//! | Forest     | 1 | 1 | 2 | 2 | 3 | 3 |
//! | Grassland  | 2 | 2 | 3 | 3 | 4 | 4 |
//! | Wetland    | 1 | 1 | 2 | 2 | 3 | 3 |
//! | Board trade| - | x | - | x | - | x |
//!
//! ## Egg slots
//!
//! `GetEgg` and `DiscardEgg` pick a slot by position among the eligible slots,
//! walking Forest, Grassland, Wetland in slot order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::BirdCardId;
use crate::core::{Habitat, NextAction};

/// Bird slots in each habitat row.
pub const SLOTS_PER_HABITAT: usize = 5;

const FOREST_WETLAND_ACTIONS: [usize; SLOTS_PER_HABITAT + 1] = [1, 1, 2, 2, 3, 3];
const GRASSLAND_ACTIONS: [usize; SLOTS_PER_HABITAT + 1] = [2, 2, 3, 3, 4, 4];
const BONUS_ACTION: [bool; SLOTS_PER_HABITAT + 1] = [false, true, false, true, false, true];

/// A placed bird and the eggs on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatSlot {
    pub bird: BirdCardId,
    pub eggs: u8,
    pub capacity: u8,
}

impl MatSlot {
    #[must_use]
    pub fn has_space(&self) -> bool {
        self.eggs < self.capacity
    }
}

/// One habitat row, filled left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitatRow {
    slots: SmallVec<[MatSlot; SLOTS_PER_HABITAT]>,
}

impl HabitatRow {
    /// Number of birds placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= SLOTS_PER_HABITAT
    }

    /// Placed birds, leftmost first.
    pub fn birds(&self) -> impl Iterator<Item = BirdCardId> + '_ {
        self.slots.iter().map(|s| s.bird)
    }

    #[must_use]
    pub fn slots(&self) -> &[MatSlot] {
        &self.slots
    }

    /// Eggs across the row.
    #[must_use]
    pub fn egg_count(&self) -> u32 {
        self.slots.iter().map(|s| u32::from(s.eggs)).sum()
    }
}

/// What activating a habitat produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HabitatActivation {
    /// The gain repeated `count` times.
    pub gain: NextAction,
    pub count: usize,
    /// Whether the row's board trade is on offer.
    pub bonus: bool,
}

/// A player's mat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMat {
    rows: [HabitatRow; 3],
}

impl PlayerMat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn row(&self, habitat: Habitat) -> &HabitatRow {
        &self.rows[habitat.index()]
    }

    /// Birds placed in `habitat`.
    #[must_use]
    pub fn bird_count(&self, habitat: Habitat) -> usize {
        self.row(habitat).len()
    }

    /// Birds placed across the whole mat.
    #[must_use]
    pub fn total_birds(&self) -> usize {
        self.rows.iter().map(HabitatRow::len).sum()
    }

    /// Sub-actions granted by activating `habitat`.
    #[must_use]
    pub fn action_strength(&self, habitat: Habitat) -> usize {
        let column = self.bird_count(habitat).min(SLOTS_PER_HABITAT);
        match habitat {
            Habitat::Forest | Habitat::Wetland => FOREST_WETLAND_ACTIONS[column],
            Habitat::Grassland => GRASSLAND_ACTIONS[column],
        }
    }

    /// Whether activating `habitat` offers the board trade.
    #[must_use]
    pub fn has_bonus_action(&self, habitat: Habitat) -> bool {
        BONUS_ACTION[self.bird_count(habitat).min(SLOTS_PER_HABITAT)]
    }

    /// Activate `habitat`.
    #[must_use]
    pub fn habitat_action(&self, habitat: Habitat) -> HabitatActivation {
        let gain = match habitat {
            Habitat::Forest => NextAction::GetResource,
            Habitat::Grassland => NextAction::GetEgg,
            Habitat::Wetland => NextAction::GetBirdCard,
        };
        HabitatActivation {
            gain,
            count: self.action_strength(habitat),
            bonus: self.has_bonus_action(habitat),
        }
    }

    fn slots(&self) -> impl Iterator<Item = &MatSlot> {
        self.rows.iter().flat_map(|row| row.slots.iter())
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut MatSlot> {
        self.rows.iter_mut().flat_map(|row| row.slots.iter_mut())
    }

    /// Whether any slot has spare egg capacity.
    #[must_use]
    pub fn can_place_egg(&self) -> bool {
        self.slots().any(MatSlot::has_space)
    }

    /// Slots with spare egg capacity (the `GetEgg` action space).
    #[must_use]
    pub fn slots_with_space(&self) -> usize {
        self.slots().filter(|s| s.has_space()).count()
    }

    /// Slots holding at least one egg (the `DiscardEgg` action space).
    #[must_use]
    pub fn slots_with_eggs(&self) -> usize {
        self.slots().filter(|s| s.eggs > 0).count()
    }

    /// Eggs across the mat.
    #[must_use]
    pub fn egg_count(&self) -> u32 {
        self.rows.iter().map(HabitatRow::egg_count).sum()
    }

    /// Lay an egg in the `n`-th slot with spare capacity.
    ///
    /// Returns `false` if there is no such slot.
    pub fn place_egg(&mut self, n: usize) -> bool {
        match self.slots_mut().filter(|s| s.has_space()).nth(n) {
            Some(slot) => {
                slot.eggs += 1;
                true
            }
            None => false,
        }
    }

    /// Remove an egg from the `n`-th slot holding eggs.
    ///
    /// Returns `false` if there is no such slot.
    pub fn discard_egg(&mut self, n: usize) -> bool {
        match self.slots_mut().filter(|s| s.eggs > 0).nth(n) {
            Some(slot) => {
                slot.eggs -= 1;
                true
            }
            None => false,
        }
    }

    /// Eggs owed to place the next bird in `habitat`.
    ///
    /// Slot `c` (0-based) costs `(c + 1) / 2`: 0, 1, 1, 2, 2.
    #[must_use]
    pub fn egg_cost(&self, habitat: Habitat) -> u8 {
        ((self.bird_count(habitat) + 1) / 2) as u8
    }

    /// Whether a bird could be placed in `habitat` right now.
    #[must_use]
    pub fn can_place_bird(&self, habitat: Habitat) -> bool {
        !self.row(habitat).is_full() && self.egg_count() >= u32::from(self.egg_cost(habitat))
    }

    /// Put a bird in the next free slot of `habitat`.
    ///
    /// Egg costs are not charged here. Returns `false` if the row is full.
    pub fn put_bird(&mut self, habitat: Habitat, bird: BirdCardId, capacity: u8) -> bool {
        let row = &mut self.rows[habitat.index()];
        if row.is_full() {
            return false;
        }
        row.slots.push(MatSlot {
            bird,
            eggs: 0,
            capacity,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat_with(habitat: Habitat, birds: usize, capacity: u8) -> PlayerMat {
        let mut mat = PlayerMat::new();
        for i in 0..birds {
            assert!(mat.put_bird(habitat, BirdCardId::new(i as u16), capacity));
        }
        mat
    }

    #[test]
    fn test_empty_mat_strength() {
        let mat = PlayerMat::new();

        assert_eq!(mat.action_strength(Habitat::Forest), 1);
        assert_eq!(mat.action_strength(Habitat::Grassland), 2);
        assert_eq!(mat.action_strength(Habitat::Wetland), 1);
        for habitat in Habitat::ALL {
            assert!(!mat.has_bonus_action(habitat));
        }
    }

    #[test]
    fn test_strength_tables() {
        let expected_forest = [1, 1, 2, 2, 3, 3];
        let expected_grassland = [2, 2, 3, 3, 4, 4];
        for birds in 0..=SLOTS_PER_HABITAT {
            assert_eq!(mat_with(Habitat::Forest, birds, 0).action_strength(Habitat::Forest), expected_forest[birds]);
            assert_eq!(mat_with(Habitat::Wetland, birds, 0).action_strength(Habitat::Wetland), expected_forest[birds]);
            assert_eq!(
                mat_with(Habitat::Grassland, birds, 0).action_strength(Habitat::Grassland),
                expected_grassland[birds]
            );
            assert_eq!(mat_with(Habitat::Forest, birds, 0).has_bonus_action(Habitat::Forest), birds % 2 == 1);
        }
    }

    #[test]
    fn test_row_capacity() {
        let mut mat = mat_with(Habitat::Wetland, SLOTS_PER_HABITAT, 2);

        assert!(mat.row(Habitat::Wetland).is_full());
        assert!(!mat.put_bird(Habitat::Wetland, BirdCardId::new(99), 2));
        assert!(!mat.can_place_bird(Habitat::Wetland));
    }

    #[test]
    fn test_habitat_action() {
        let mat = mat_with(Habitat::Grassland, 1, 0);
        let activation = mat.habitat_action(Habitat::Grassland);

        assert_eq!(activation.gain, NextAction::GetEgg);
        assert_eq!(activation.count, 2);
        assert!(activation.bonus);
    }

    #[test]
    fn test_can_place_egg() {
        assert!(!PlayerMat::new().can_place_egg());
        assert!(!mat_with(Habitat::Forest, 2, 0).can_place_egg());
        assert!(mat_with(Habitat::Forest, 1, 1).can_place_egg());
    }

    #[test]
    fn test_egg_indexing_walks_habitats_in_order() {
        let mut mat = PlayerMat::new();
        mat.put_bird(Habitat::Wetland, BirdCardId::new(0), 2);
        mat.put_bird(Habitat::Forest, BirdCardId::new(1), 1);

        // Forest slot comes first.
        assert!(mat.place_egg(0));
        assert_eq!(mat.row(Habitat::Forest).slots()[0].eggs, 1);

        // Forest slot is now full, so index 0 is the wetland slot.
        assert_eq!(mat.slots_with_space(), 1);
        assert!(mat.place_egg(0));
        assert!(!mat.place_egg(1));
        assert_eq!(mat.egg_count(), 2);

        assert_eq!(mat.slots_with_eggs(), 2);
        assert!(mat.discard_egg(1));
        assert_eq!(mat.row(Habitat::Wetland).egg_count(), 0);
        assert!(!mat.discard_egg(1));
    }

    #[test]
    fn test_egg_cost_and_placement() {
        let costs: Vec<_> = (0..SLOTS_PER_HABITAT)
            .map(|birds| mat_with(Habitat::Forest, birds, 0).egg_cost(Habitat::Forest))
            .collect();
        assert_eq!(costs, vec![0, 1, 1, 2, 2]);

        let mut mat = mat_with(Habitat::Forest, 1, 3);
        assert!(!mat.can_place_bird(Habitat::Forest));
        assert!(mat.can_place_bird(Habitat::Grassland));

        mat.place_egg(0);
        assert!(mat.can_place_bird(Habitat::Forest));
    }
}
