//! The card catalog: read-only reference data for birds and bonus cards.
//!
//! Ids are dense (`BirdCardId(i)` is the i-th bird), so lookups are plain
//! vector indexing. A catalog is validated once when it is built and is then
//! shared behind an `Arc` by every environment that uses it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{BirdCard, BirdCardId, BonusCard, BonusCardId, CostRecord, Expansion};
use crate::error::CatalogError;

/// Serialized form of a catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogData {
    pub birds: Vec<BirdCard>,
    #[serde(default)]
    pub bonus_cards: Vec<BonusCard>,
}

/// Validated, immutable card catalog.
///
/// ## Example
///
/// ```
/// use wingspan_env::cards::{BirdCard, BonusCard, CatalogBuilder, CostRecord};
/// use wingspan_env::core::Resource;
///
/// let catalog = CatalogBuilder::new()
///     .bird(|id| BirdCard::new(id, "American Robin")
///         .with_cost(CostRecord::one_of(&[(Resource::Invertebrate, 1), (Resource::Fruit, 1)])))
///     .bonus(|id| BonusCard::new(id, "Anatomist"))
///     .build()
///     .unwrap();
///
/// let robin = catalog.bird_by_name("American Robin").unwrap();
/// assert!(catalog.cost(robin.id).unwrap().alternative);
/// ```
#[derive(Debug)]
pub struct Catalog {
    birds: Vec<BirdCard>,
    bonus_cards: Vec<BonusCard>,
    by_name: FxHashMap<String, BirdCardId>,
}

impl Catalog {
    /// Validate raw data into a catalog.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        check_id_space("bird", data.birds.len())?;
        check_id_space("bonus", data.bonus_cards.len())?;
        let mut by_name = FxHashMap::default();

        for (expected, bird) in (0..=u16::MAX).zip(&data.birds) {
            if bird.id.0 != expected {
                return Err(CatalogError::NonDenseId {
                    expected,
                    found: bird.id.0,
                });
            }
            validate_cost(bird.id, &bird.cost)?;
            if bird.habitats.is_empty() {
                return Err(CatalogError::NoHabitat(bird.id));
            }
            if by_name.insert(bird.name.clone(), bird.id).is_some() {
                return Err(CatalogError::DuplicateName(bird.name.clone()));
            }
        }

        for (expected, bonus) in (0..=u16::MAX).zip(&data.bonus_cards) {
            if bonus.id.0 != expected {
                return Err(CatalogError::NonDenseId {
                    expected,
                    found: bonus.id.0,
                });
            }
        }

        Ok(Self {
            birds: data.birds,
            bonus_cards: data.bonus_cards,
            by_name,
        })
    }

    /// Load a catalog from JSON produced by the data import step.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Load a catalog from a bincode blob written by [`Catalog::to_bincode`].
    pub fn from_bincode(bytes: &[u8]) -> Result<Self, CatalogError> {
        let data: CatalogData = bincode::deserialize(bytes)?;
        Self::from_data(data)
    }

    /// Encode the catalog as a compact bincode blob.
    pub fn to_bincode(&self) -> Result<Vec<u8>, CatalogError> {
        let data = CatalogData {
            birds: self.birds.clone(),
            bonus_cards: self.bonus_cards.clone(),
        };
        Ok(bincode::serialize(&data)?)
    }

    /// Get a bird card by ID.
    #[must_use]
    pub fn bird(&self, id: BirdCardId) -> Option<&BirdCard> {
        self.birds.get(id.index())
    }

    /// Get a bird card's cost record.
    #[must_use]
    pub fn cost(&self, id: BirdCardId) -> Option<&CostRecord> {
        self.bird(id).map(|b| &b.cost)
    }

    /// Find a bird by its common name.
    #[must_use]
    pub fn bird_by_name(&self, name: &str) -> Option<&BirdCard> {
        self.by_name.get(name).and_then(|&id| self.bird(id))
    }

    /// Get a bonus card by ID.
    #[must_use]
    pub fn bonus(&self, id: BonusCardId) -> Option<&BonusCard> {
        self.bonus_cards.get(id.index())
    }

    /// Number of bird cards.
    #[must_use]
    pub fn bird_count(&self) -> usize {
        self.birds.len()
    }

    /// Number of bonus cards.
    #[must_use]
    pub fn bonus_count(&self) -> usize {
        self.bonus_cards.len()
    }

    /// Iterate over all bird cards in id order.
    pub fn birds(&self) -> impl Iterator<Item = &BirdCard> {
        self.birds.iter()
    }

    /// Bird ids belonging to any of `expansions`, in id order.
    #[must_use]
    pub fn bird_ids_in(&self, expansions: &[Expansion]) -> Vec<BirdCardId> {
        self.birds
            .iter()
            .filter(|b| expansions.contains(&b.expansion))
            .map(|b| b.id)
            .collect()
    }

    /// Bonus card ids belonging to any of `expansions`, in id order.
    #[must_use]
    pub fn bonus_ids_in(&self, expansions: &[Expansion]) -> Vec<BonusCardId> {
        self.bonus_cards
            .iter()
            .filter(|b| expansions.contains(&b.expansion))
            .map(|b| b.id)
            .collect()
    }
}

fn validate_cost(id: BirdCardId, cost: &CostRecord) -> Result<(), CatalogError> {
    if cost.alternative {
        if cost.listed().next().is_none() {
            return Err(CatalogError::EmptyAlternativeCost(id));
        }
        return Ok(());
    }
    let sum = cost.specified_total();
    if sum > u16::from(u8::MAX) {
        return Err(CatalogError::CostOverflow(id, sum));
    }
    if sum > u16::from(cost.total) {
        return Err(CatalogError::CostAboveTotal(id));
    }
    Ok(())
}

/// Ids are `u16`, so a card set holds at most 65536 cards.
fn check_id_space(kind: &'static str, count: usize) -> Result<(), CatalogError> {
    if count > usize::from(u16::MAX) + 1 {
        return Err(CatalogError::TooManyCards { kind, count });
    }
    Ok(())
}

/// Incremental catalog construction with auto-assigned dense ids.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    data: CatalogData,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bird. The closure receives the id the bird will get.
    ///
    /// Past the id space the id saturates and [`CatalogBuilder::build`]
    /// fails with [`CatalogError::TooManyCards`].
    #[must_use]
    pub fn bird(mut self, make: impl FnOnce(BirdCardId) -> BirdCard) -> Self {
        let id = BirdCardId::new(u16::try_from(self.data.birds.len()).unwrap_or(u16::MAX));
        self.data.birds.push(make(id));
        self
    }

    /// Add a bonus card. The closure receives the id the card will get.
    #[must_use]
    pub fn bonus(mut self, make: impl FnOnce(BonusCardId) -> BonusCard) -> Self {
        let id = BonusCardId::new(u16::try_from(self.data.bonus_cards.len()).unwrap_or(u16::MAX));
        self.data.bonus_cards.push(make(id));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        Catalog::from_data(self.data)
    }
}
