//! Habitats: the three rows of a player mat.

use serde::{Deserialize, Serialize};

/// A habitat row on the player mat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Habitat {
    Forest = 0,
    Grassland = 1,
    Wetland = 2,
}

impl Habitat {
    /// All habitats in mat order.
    pub const ALL: [Habitat; 3] = [Habitat::Forest, Habitat::Grassland, Habitat::Wetland];

    /// Map a row index to a habitat.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row index of this habitat.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Habitat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Habitat::Forest => "Forest",
            Habitat::Grassland => "Grassland",
            Habitat::Wetland => "Wetland",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for habitat in Habitat::ALL {
            assert_eq!(Habitat::from_index(habitat.index()), Some(habitat));
        }
        assert_eq!(Habitat::from_index(3), None);
    }
}
