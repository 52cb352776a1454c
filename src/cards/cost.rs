//! Card playability: matching a cost record against resource holdings.
//!
//! Two cost shapes exist in the catalog:
//!
//! - **All-of** (`alternative == false`): every listed requirement must be met
//!   by the same resource, and the holdings summed over all resources must
//!   cover the aggregate total (which includes wild units).
//! - **One-of** (`alternative == true`): meeting any single listed requirement
//!   is enough. Resources of an unlisted type never help.
//!
//! No catalog card combines a one-of cost with wild units, so the total is
//! not consulted for one-of costs.
//!
//! The evaluators are pure. Only [`pay`] touches holdings.

use smallvec::SmallVec;

use super::definition::{BirdCardId, CostRecord};
use super::registry::Catalog;
use crate::core::{Resource, ResourceVector};

/// Whether `resources` can pay `cost`.
#[must_use]
pub fn is_affordable(cost: &CostRecord, resources: &ResourceVector) -> bool {
    if cost.alternative {
        cost.listed().any(|(resource, amount)| resources.has(resource, amount))
    } else {
        cost.listed().all(|(resource, amount)| resources.has(resource, amount))
            && resources.total() >= u32::from(cost.total)
    }
}

/// Filter `candidates` down to the cards `resources` can pay for.
///
/// The result is in ascending catalog order. Ids unknown to the catalog are
/// never playable.
#[must_use]
pub fn playable_cards(
    catalog: &Catalog,
    candidates: &[BirdCardId],
    resources: &ResourceVector,
) -> Vec<BirdCardId> {
    let mut playable: Vec<BirdCardId> = candidates
        .iter()
        .copied()
        .filter(|&id| {
            catalog
                .cost(id)
                .is_some_and(|cost| is_affordable(cost, resources))
        })
        .collect();
    playable.sort_unstable();
    playable.dedup();
    playable
}

/// How a one-of cost is settled, or that an all-of cost is settled as printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Payment {
    /// Pay every listed requirement; wild units follow as discards.
    AsPrinted,
    /// Pay the listed requirement for this one resource.
    Alternative(Resource),
}

/// Every way `resources` can pay `cost`.
///
/// All-of costs have a single way. One-of costs have one way per listed
/// resource the player holds enough of. Empty when the card is unaffordable.
#[must_use]
pub fn payment_options(cost: &CostRecord, resources: &ResourceVector) -> SmallVec<[Payment; 5]> {
    if cost.alternative {
        cost.listed()
            .filter(|&(resource, amount)| resources.has(resource, amount))
            .map(|(resource, _)| Payment::Alternative(resource))
            .collect()
    } else if is_affordable(cost, resources) {
        smallvec::smallvec![Payment::AsPrinted]
    } else {
        SmallVec::new()
    }
}

/// Deduct the fixed part of `payment` from `resources`.
///
/// Returns the number of wild units still owed (paid later through resource
/// discards), or `None` if the holdings cannot cover the payment. Nothing is
/// deducted on `None`.
#[must_use]
pub fn pay(cost: &CostRecord, payment: Payment, resources: &mut ResourceVector) -> Option<u8> {
    match payment {
        Payment::Alternative(resource) => {
            let amount = cost.requirement(resource)?;
            if !cost.alternative || !resources.spend(resource, amount) {
                return None;
            }
            Some(0)
        }
        Payment::AsPrinted => {
            if cost.alternative || !is_affordable(cost, resources) {
                return None;
            }
            for (resource, amount) in cost.listed() {
                // Affordability was checked for every listed requirement.
                let spent = resources.spend(resource, amount);
                debug_assert!(spent);
            }
            Some(cost.wild())
        }
    }
}
