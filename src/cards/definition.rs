//! Card definitions - static catalog data.
//!
//! A [`BirdCard`] holds everything printed on a bird: its cost, points,
//! habitats, and egg capacity. None of it changes during a game; where a
//! card sits (hand, mat, deck) is tracked by the game state instead.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Habitat, Resource, REGULAR_RESOURCE_COUNT};

/// Dense catalog index of a bird card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BirdCardId(pub u16);

impl BirdCardId {
    /// Create a new bird card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position in the catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BirdCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bird({})", self.0)
    }
}

/// Dense catalog index of a bonus card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BonusCardId(pub u16);

impl BonusCardId {
    /// Create a new bonus card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position in the catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BonusCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bonus({})", self.0)
    }
}

/// Card set a card belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Expansion {
    #[default]
    Core,
    European,
    Oceania,
    Asia,
}

/// Nest printed on a bird card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NestType {
    Platform,
    Cavity,
    Bowl,
    Ground,
    Wild,
    #[default]
    None,
}

/// Food cost of a bird card.
///
/// `requirements[i]` is `None` when the card places no requirement on
/// resource `i`. `Some(0)` never appears in catalog data but would mean
/// "requires zero", which is always satisfied.
///
/// `total` is the whole cost including wild (any-resource) units. With
/// `alternative` set the listed requirements are alternatives: paying any
/// single one of them is enough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostRecord {
    pub requirements: [Option<u8>; REGULAR_RESOURCE_COUNT],
    pub total: u8,
    pub alternative: bool,
}

impl CostRecord {
    /// A card that costs nothing.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            requirements: [None; REGULAR_RESOURCE_COUNT],
            total: 0,
            alternative: false,
        }
    }

    /// Requires every listed resource plus `wild` units of anything.
    ///
    /// The total saturates at `u8::MAX`; a catalog rejects listed amounts
    /// that do not fit.
    ///
    /// ```
    /// use wingspan_env::cards::CostRecord;
    /// use wingspan_env::core::Resource;
    ///
    /// let cost = CostRecord::all_of(&[(Resource::Seed, 1)], 1);
    /// assert_eq!(cost.total, 2);
    /// assert_eq!(cost.wild(), 1);
    /// ```
    #[must_use]
    pub fn all_of(requirements: &[(Resource, u8)], wild: u8) -> Self {
        let mut record = Self::free();
        for &(resource, amount) in requirements {
            record.requirements[resource.index()] = Some(amount);
        }
        let total = record.specified_total() + u16::from(wild);
        record.total = u8::try_from(total).unwrap_or(u8::MAX);
        record
    }

    /// Requires any one of the listed resources.
    #[must_use]
    pub fn one_of(requirements: &[(Resource, u8)]) -> Self {
        let mut record = Self::free();
        for &(resource, amount) in requirements {
            record.requirements[resource.index()] = Some(amount);
        }
        record.alternative = true;
        record.total = requirements.iter().map(|&(_, a)| a).max().unwrap_or(0);
        record
    }

    /// Requires `amount` units of anything.
    #[must_use]
    pub fn wild_only(amount: u8) -> Self {
        Self {
            total: amount,
            ..Self::free()
        }
    }

    /// Requirement on `resource`, if any.
    #[must_use]
    pub fn requirement(&self, resource: Resource) -> Option<u8> {
        if resource.is_regular() {
            self.requirements[resource.index()]
        } else {
            None
        }
    }

    /// Listed (resource, amount) requirements in resource order.
    pub fn listed(&self) -> impl Iterator<Item = (Resource, u8)> + '_ {
        Resource::REGULAR
            .iter()
            .filter_map(move |&r| self.requirements[r.index()].map(|a| (r, a)))
    }

    /// Sum of the listed requirements. Wider than `total` so malformed data
    /// can be detected instead of overflowing.
    #[must_use]
    pub fn specified_total(&self) -> u16 {
        self.requirements.iter().flatten().map(|&a| u16::from(a)).sum()
    }

    /// Units of the total that any resource can pay.
    ///
    /// Always 0 for alternative costs.
    #[must_use]
    pub fn wild(&self) -> u8 {
        if self.alternative {
            0
        } else {
            let wild = u16::from(self.total).saturating_sub(self.specified_total());
            // Never more than `total`, so it fits.
            wild as u8
        }
    }
}

/// Static data for one bird card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdCard {
    /// Dense catalog index.
    pub id: BirdCardId,

    /// Common name.
    pub name: String,

    pub cost: CostRecord,

    /// Victory points.
    #[serde(default)]
    pub points: u8,

    /// Habitats the bird may be placed in.
    pub habitats: SmallVec<[Habitat; 3]>,

    /// Eggs the bird can hold.
    #[serde(default)]
    pub egg_capacity: u8,

    /// Wingspan in centimetres. `None` for flightless birds.
    #[serde(default)]
    pub wingspan_cm: Option<u16>,

    #[serde(default)]
    pub is_predator: bool,

    #[serde(default)]
    pub nest: NestType,

    #[serde(default)]
    pub expansion: Expansion,
}

impl BirdCard {
    /// Create a free core-set bird that lives in every habitat.
    ///
    /// Use the `with_*` methods to fill in the printed data.
    #[must_use]
    pub fn new(id: BirdCardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cost: CostRecord::free(),
            points: 0,
            habitats: SmallVec::from_slice(&Habitat::ALL),
            egg_capacity: 0,
            wingspan_cm: None,
            is_predator: false,
            nest: NestType::None,
            expansion: Expansion::Core,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: CostRecord) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: u8) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_habitats(mut self, habitats: &[Habitat]) -> Self {
        self.habitats = SmallVec::from_slice(habitats);
        self
    }

    #[must_use]
    pub fn with_egg_capacity(mut self, egg_capacity: u8) -> Self {
        self.egg_capacity = egg_capacity;
        self
    }

    #[must_use]
    pub fn with_wingspan(mut self, wingspan_cm: u16) -> Self {
        self.wingspan_cm = Some(wingspan_cm);
        self
    }

    #[must_use]
    pub fn predator(mut self) -> Self {
        self.is_predator = true;
        self
    }

    #[must_use]
    pub fn with_nest(mut self, nest: NestType) -> Self {
        self.nest = nest;
        self
    }

    #[must_use]
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Whether the bird may be placed in `habitat`.
    #[must_use]
    pub fn lives_in(&self, habitat: Habitat) -> bool {
        self.habitats.contains(&habitat)
    }
}

/// Static data for one bonus card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusCard {
    pub id: BonusCardId,
    pub name: String,
    #[serde(default)]
    pub expansion: Expansion,
}

impl BonusCard {
    /// Create a core-set bonus card.
    #[must_use]
    pub fn new(id: BonusCardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            expansion: Expansion::Core,
        }
    }
}
