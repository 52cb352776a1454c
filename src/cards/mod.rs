//! Card system: definitions, catalog, and playability.
//!
//! ## Key Types
//!
//! - `BirdCardId` / `BonusCardId`: dense catalog indices
//! - `CostRecord`: per-resource requirements, total, alternative flag
//! - `BirdCard` / `BonusCard`: static printed data
//! - `Catalog`: validated, read-only lookup shared across environments
//! - `cost`: the pure playability evaluator

pub mod cost;
pub mod definition;
pub mod registry;

pub use cost::{is_affordable, playable_cards, Payment};
pub use definition::{BirdCard, BirdCardId, BonusCard, BonusCardId, CostRecord, Expansion, NestType};
pub use registry::{Catalog, CatalogBuilder, CatalogData};
