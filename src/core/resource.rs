//! Resource (food) types and per-player holdings.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of regular resource types tracked in a [`ResourceVector`].
pub const REGULAR_RESOURCE_COUNT: usize = 5;

/// A resource type.
///
/// The discriminant is the resource's index in a [`ResourceVector`] and in a
/// card's cost requirements. `Nectar` is reserved for expansion content and is
/// never held or spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Invertebrate = 0,
    Seed = 1,
    Fish = 2,
    Fruit = 3,
    Rodent = 4,
    Nectar = 5,
}

impl Resource {
    /// The five resources a player can hold, in index order.
    pub const REGULAR: [Resource; REGULAR_RESOURCE_COUNT] = [
        Resource::Invertebrate,
        Resource::Seed,
        Resource::Fish,
        Resource::Fruit,
        Resource::Rodent,
    ];

    /// Map an index to a regular resource. Returns `None` for 5 and above.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::REGULAR.get(index).copied()
    }

    /// Index of this resource.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this resource can be held and spent.
    #[must_use]
    pub const fn is_regular(self) -> bool {
        !matches!(self, Resource::Nectar)
    }

    /// Short label used in debug output.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Resource::Invertebrate => "I",
            Resource::Seed => "S",
            Resource::Fish => "Fi",
            Resource::Fruit => "Fr",
            Resource::Rodent => "R",
            Resource::Nectar => "N",
        }
    }
}

/// Counts of each regular resource held by a player.
///
/// Counts never go negative: the only decrement is [`ResourceVector::spend`],
/// which refuses when the holding is insufficient. Each count is capped at
/// `u8::MAX`; [`ResourceVector::gain`] saturates there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceVector([u8; REGULAR_RESOURCE_COUNT]);

impl ResourceVector {
    /// Create from raw counts in [`Resource::REGULAR`] order.
    #[must_use]
    pub const fn new(counts: [u8; REGULAR_RESOURCE_COUNT]) -> Self {
        Self(counts)
    }

    /// One of each regular resource (the starting supply).
    #[must_use]
    pub const fn one_of_each() -> Self {
        Self([1; REGULAR_RESOURCE_COUNT])
    }

    /// Held amount of `resource`. Nectar is always 0.
    #[must_use]
    pub fn get(&self, resource: Resource) -> u8 {
        if resource.is_regular() {
            self.0[resource.index()]
        } else {
            0
        }
    }

    /// Sum across all regular resources.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&c| u32::from(c)).sum()
    }

    /// True when nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Whether at least `amount` of `resource` is held.
    #[must_use]
    pub fn has(&self, resource: Resource, amount: u8) -> bool {
        self.get(resource) >= amount
    }

    /// Add `amount` of `resource`, saturating at `u8::MAX`. Nectar is ignored.
    ///
    /// Returns the amount actually added.
    pub fn gain(&mut self, resource: Resource, amount: u8) -> u8 {
        if !resource.is_regular() {
            return 0;
        }
        let slot = &mut self.0[resource.index()];
        let before = *slot;
        *slot = before.saturating_add(amount);
        *slot - before
    }

    /// Remove `amount` of `resource` if enough is held.
    ///
    /// Returns `false` and leaves the vector untouched otherwise.
    #[must_use]
    pub fn spend(&mut self, resource: Resource, amount: u8) -> bool {
        if !resource.is_regular() || !self.has(resource, amount) {
            return false;
        }
        self.0[resource.index()] -= amount;
        true
    }

    /// Raw counts in index order.
    #[must_use]
    pub const fn as_array(&self) -> &[u8; REGULAR_RESOURCE_COUNT] {
        &self.0
    }

    /// Iterate over (resource, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u8)> + '_ {
        Resource::REGULAR.iter().map(move |&r| (r, self.0[r.index()]))
    }
}

impl Index<Resource> for ResourceVector {
    type Output = u8;

    fn index(&self, resource: Resource) -> &Self::Output {
        &self.0[resource.index()]
    }
}

impl From<[u8; REGULAR_RESOURCE_COUNT]> for ResourceVector {
    fn from(counts: [u8; REGULAR_RESOURCE_COUNT]) -> Self {
        Self(counts)
    }
}

impl std::fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(r, c)| format!("{}:{}", r.short_name(), c))
            .collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Resource::from_index(0), Some(Resource::Invertebrate));
        assert_eq!(Resource::from_index(4), Some(Resource::Rodent));
        assert_eq!(Resource::from_index(5), None);
    }

    #[test]
    fn test_spend_checks_sufficiency() {
        let mut res = ResourceVector::new([1, 0, 0, 2, 0]);

        assert!(!res.spend(Resource::Seed, 1));
        assert!(!res.spend(Resource::Fruit, 3));
        assert_eq!(res, ResourceVector::new([1, 0, 0, 2, 0]));

        assert!(res.spend(Resource::Fruit, 2));
        assert_eq!(res[Resource::Fruit], 0);
        assert_eq!(res.total(), 1);
    }

    #[test]
    fn test_gain_caps_at_u8_max() {
        let mut held = ResourceVector::new([0, 250, 0, 0, 0]);

        assert_eq!(held.gain(Resource::Seed, 3), 3);
        assert_eq!(held.gain(Resource::Seed, 10), 2);
        assert_eq!(held.get(Resource::Seed), u8::MAX);
        assert_eq!(held.gain(Resource::Seed, 1), 0);
    }

    #[test]
    fn test_nectar_is_inert() {
        let mut res = ResourceVector::one_of_each();
        res.gain(Resource::Nectar, 3);

        assert_eq!(res.get(Resource::Nectar), 0);
        assert_eq!(res.total(), 5);
        assert!(!res.spend(Resource::Nectar, 0));
    }

    #[test]
    fn test_display() {
        let res = ResourceVector::new([1, 0, 2, 0, 0]);
        assert_eq!(res.to_string(), "[I:1 S:0 Fi:2 Fr:0 R:0]");
    }
}
