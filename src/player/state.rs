//! Per-player state and the mutators the controller delegates to.
//!
//! Every mutator answers with an [`Outcome`]. An illegal index is an ordinary
//! outcome, never an error, and leaves the player untouched.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::board::PlayerMat;
use crate::cards::cost::{self, Payment};
use crate::cards::{BirdCardId, BonusCardId, Catalog};
use crate::core::{Habitat, NextAction, Resource, ResourceVector, REGULAR_RESOURCE_COUNT};

/// Follow-up actions, in push order: the last entry ends up on top.
pub type FollowUps = SmallVec<[NextAction; 8]>;

/// Something a discard removed from the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consumed {
    BirdCard(BirdCardId),
    BonusCard(BonusCardId),
    Resource(Resource),
    Egg,
}

/// Result of a mutator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The index does not name a legal choice. Nothing changed.
    Illegal,
    /// A discard removed this item.
    Consumed(Consumed),
    /// Applied, with nothing further owed.
    Resolved,
    /// Applied, and these actions are now owed.
    FollowUp(FollowUps),
}

impl Outcome {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        !matches!(self, Outcome::Illegal)
    }

    fn follow_ups(actions: FollowUps) -> Self {
        if actions.is_empty() {
            Outcome::Resolved
        } else {
            Outcome::FollowUp(actions)
        }
    }
}

/// One way to play a bird: which card, where, and how to pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayOption {
    pub card: BirdCardId,
    pub habitat: Habitat,
    pub payment: Payment,
}

/// Everything a single player owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    bird_hand: Vec<BirdCardId>,
    bonus_hand: Vec<BonusCardId>,
    resources: ResourceVector,
    mat: PlayerMat,
    play_options: Vec<PlayOption>,
    turns_left: u8,
}

impl PlayerState {
    /// Create a player holding a dealt hand.
    #[must_use]
    pub fn new(bird_hand: Vec<BirdCardId>, bonus_hand: Vec<BonusCardId>, resources: ResourceVector) -> Self {
        Self {
            bird_hand,
            bonus_hand,
            resources,
            ..Self::default()
        }
    }

    /// Bird cards in hand, in draw order.
    #[must_use]
    pub fn bird_hand(&self) -> &[BirdCardId] {
        &self.bird_hand
    }

    #[must_use]
    pub fn bonus_hand(&self) -> &[BonusCardId] {
        &self.bonus_hand
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceVector {
        &self.resources
    }

    #[must_use]
    pub fn mat(&self) -> &PlayerMat {
        &self.mat
    }

    /// Options cached by the last [`PlayerState::attempt_play_a_bird`].
    #[must_use]
    pub fn play_options(&self) -> &[PlayOption] {
        &self.play_options
    }

    #[must_use]
    pub fn turns_left(&self) -> u8 {
        self.turns_left
    }

    pub(crate) fn set_turns_left(&mut self, turns: u8) {
        self.turns_left = turns;
    }

    pub(crate) fn use_turn(&mut self) {
        self.turns_left = self.turns_left.saturating_sub(1);
    }

    // === Discards ===

    /// Discard the bird card at `index` in hand.
    pub fn discard_bird_card(&mut self, index: usize) -> Outcome {
        if index >= self.bird_hand.len() {
            return Outcome::Illegal;
        }
        Outcome::Consumed(Consumed::BirdCard(self.bird_hand.remove(index)))
    }

    /// Discard the bonus card at `index` in hand.
    pub fn discard_bonus_card(&mut self, index: usize) -> Outcome {
        if index >= self.bonus_hand.len() {
            return Outcome::Illegal;
        }
        Outcome::Consumed(Consumed::BonusCard(self.bonus_hand.remove(index)))
    }

    /// Discard one unit of resource `index`.
    pub fn discard_resource(&mut self, index: usize) -> Outcome {
        match Resource::from_index(index) {
            Some(resource) if self.resources.spend(resource, 1) => {
                Outcome::Consumed(Consumed::Resource(resource))
            }
            _ => Outcome::Illegal,
        }
    }

    /// Setup discard: indices `0..5` name a resource, `5 + i` the i-th bird card.
    pub fn discard_resource_or_bird_card(&mut self, index: usize) -> Outcome {
        if index < REGULAR_RESOURCE_COUNT {
            self.discard_resource(index)
        } else {
            self.discard_bird_card(index - REGULAR_RESOURCE_COUNT)
        }
    }

    /// Remove an egg from the `index`-th slot holding eggs.
    pub fn discard_egg(&mut self, index: usize) -> Outcome {
        if self.mat.discard_egg(index) {
            Outcome::Consumed(Consumed::Egg)
        } else {
            Outcome::Illegal
        }
    }

    // === Playing birds ===

    /// Work out every way to play a bird and cache them.
    ///
    /// Illegal when the hand is empty or nothing in it can be played. On
    /// success the player owes a `PlayACard` choice.
    pub fn attempt_play_a_bird(&mut self, catalog: &Catalog) -> Outcome {
        if self.bird_hand.is_empty() {
            return Outcome::Illegal;
        }
        let options = self.compute_play_options(catalog);
        if options.is_empty() {
            return Outcome::Illegal;
        }
        self.play_options = options;
        Outcome::FollowUp(smallvec![NextAction::PlayACard])
    }

    /// Whether [`PlayerState::attempt_play_a_bird`] would succeed.
    #[must_use]
    pub fn can_play_a_bird(&self, catalog: &Catalog) -> bool {
        !self.bird_hand.is_empty() && !self.compute_play_options(catalog).is_empty()
    }

    fn compute_play_options(&self, catalog: &Catalog) -> Vec<PlayOption> {
        let mut options = Vec::new();
        for card in cost::playable_cards(catalog, &self.bird_hand, &self.resources) {
            let Some(bird) = catalog.bird(card) else {
                continue;
            };
            for habitat in Habitat::ALL {
                if !bird.lives_in(habitat) || !self.mat.can_place_bird(habitat) {
                    continue;
                }
                for payment in cost::payment_options(&bird.cost, &self.resources) {
                    options.push(PlayOption {
                        card,
                        habitat,
                        payment,
                    });
                }
            }
        }
        options
    }

    /// Commit the cached play option at `index`.
    ///
    /// The fixed part of the food cost is paid at once. Wild food and the egg
    /// cost of the slot come back as `DiscardResource` and `DiscardEgg`
    /// follow-ups, eggs on top.
    pub fn play_a_bird(&mut self, catalog: &Catalog, index: usize) -> Outcome {
        let Some(&option) = self.play_options.get(index) else {
            return Outcome::Illegal;
        };
        let Some(bird) = catalog.bird(option.card) else {
            return Outcome::Illegal;
        };
        let Some(hand_index) = self.bird_hand.iter().position(|&c| c == option.card) else {
            return Outcome::Illegal;
        };
        if !self.mat.can_place_bird(option.habitat) {
            return Outcome::Illegal;
        }

        let mut resources = self.resources;
        let Some(wild) = cost::pay(&bird.cost, option.payment, &mut resources) else {
            return Outcome::Illegal;
        };
        let egg_cost = self.mat.egg_cost(option.habitat);
        if !self.mat.put_bird(option.habitat, option.card, bird.egg_capacity) {
            return Outcome::Illegal;
        }
        self.resources = resources;
        self.bird_hand.remove(hand_index);
        self.play_options.clear();

        let mut follow_ups = FollowUps::new();
        follow_ups.extend((0..wild).map(|_| NextAction::DiscardResource));
        follow_ups.extend((0..egg_cost).map(|_| NextAction::DiscardEgg));
        Outcome::follow_ups(follow_ups)
    }

    // === Gains ===

    /// Add a bird card unless the hand is at `hand_limit`.
    pub fn add_bird_card(&mut self, card: BirdCardId, hand_limit: u8) -> bool {
        if self.bird_hand.len() >= usize::from(hand_limit) {
            return false;
        }
        self.bird_hand.push(card);
        true
    }

    pub fn add_bonus_card(&mut self, card: BonusCardId) {
        self.bonus_hand.push(card);
    }

    pub fn gain_resource(&mut self, resource: Resource) {
        self.resources.gain(resource, 1);
    }

    /// Lay an egg in the `index`-th slot with spare capacity.
    pub fn lay_egg(&mut self, index: usize) -> Outcome {
        if self.mat.place_egg(index) {
            Outcome::Resolved
        } else {
            Outcome::Illegal
        }
    }

    // === Board trades ===

    /// Whether the board trade of `habitat` can be paid.
    #[must_use]
    pub fn can_pay_trade(&self, habitat: Habitat) -> bool {
        match habitat {
            Habitat::Forest => !self.bird_hand.is_empty(),
            Habitat::Grassland => !self.resources.is_empty(),
            Habitat::Wetland => self.mat.egg_count() > 0,
        }
    }
}

/// The board trade printed on a habitat row: `(cost, reward)`.
#[must_use]
pub const fn trade(habitat: Habitat) -> (NextAction, NextAction) {
    match habitat {
        Habitat::Forest => (NextAction::DiscardBirdCard, NextAction::GetResource),
        Habitat::Grassland => (NextAction::DiscardResource, NextAction::GetEgg),
        Habitat::Wetland => (NextAction::DiscardEgg, NextAction::GetBirdCard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BirdCard, CatalogBuilder, CostRecord};
    use crate::core::Resource::*;

    fn catalog() -> Catalog {
        CatalogBuilder::new()
            .bird(|id| {
                BirdCard::new(id, "Robin")
                    .with_cost(CostRecord::one_of(&[(Invertebrate, 1), (Fruit, 1)]))
                    .with_habitats(&[Habitat::Forest, Habitat::Grassland])
                    .with_egg_capacity(4)
            })
            .bird(|id| {
                BirdCard::new(id, "Coot")
                    .with_cost(CostRecord::all_of(&[(Seed, 1)], 1))
                    .with_habitats(&[Habitat::Wetland])
                    .with_egg_capacity(2)
            })
            .bird(|id| {
                BirdCard::new(id, "Eagle")
                    .with_cost(CostRecord::all_of(&[(Fish, 1), (Rodent, 2)], 0))
                    .with_habitats(&[Habitat::Forest])
            })
            .build()
            .unwrap()
    }

    fn player(hand: &[u16], resources: [u8; 5]) -> PlayerState {
        PlayerState::new(
            hand.iter().copied().map(BirdCardId::new).collect(),
            vec![BonusCardId::new(0), BonusCardId::new(1)],
            ResourceVector::new(resources),
        )
    }

    #[test]
    fn test_discard_bird_card() {
        let mut p = player(&[4, 5, 6], [0; 5]);

        assert_eq!(p.discard_bird_card(3), Outcome::Illegal);
        assert_eq!(p.discard_bird_card(1), Outcome::Consumed(Consumed::BirdCard(BirdCardId::new(5))));
        assert_eq!(p.bird_hand(), &[BirdCardId::new(4), BirdCardId::new(6)]);
    }

    #[test]
    fn test_discard_resource_requires_holding() {
        let mut p = player(&[], [1, 0, 0, 0, 0]);

        assert_eq!(p.discard_resource(1), Outcome::Illegal);
        assert_eq!(p.discard_resource(5), Outcome::Illegal);
        assert!(p.discard_resource(0).is_legal());
        assert_eq!(p.discard_resource(0), Outcome::Illegal);
    }

    #[test]
    fn test_setup_discard_index_split() {
        let mut p = player(&[10, 11], [1, 1, 1, 1, 1]);

        assert_eq!(p.discard_resource_or_bird_card(4), Outcome::Consumed(Consumed::Resource(Rodent)));
        assert_eq!(
            p.discard_resource_or_bird_card(6),
            Outcome::Consumed(Consumed::BirdCard(BirdCardId::new(11)))
        );
        assert_eq!(p.discard_resource_or_bird_card(6), Outcome::Illegal);
        assert_eq!(p.resources().total(), 4);
    }

    #[test]
    fn test_discard_bonus_card() {
        let mut p = player(&[], [0; 5]);

        assert!(p.discard_bonus_card(1).is_legal());
        assert_eq!(p.discard_bonus_card(1), Outcome::Illegal);
        assert_eq!(p.bonus_hand(), &[BonusCardId::new(0)]);
    }

    #[test]
    fn test_attempt_play_with_empty_hand_is_illegal() {
        let catalog = catalog();
        let mut p = player(&[], [5; 5]);

        assert_eq!(p.attempt_play_a_bird(&catalog), Outcome::Illegal);
    }

    #[test]
    fn test_attempt_play_caches_options() {
        let catalog = catalog();
        let mut p = player(&[2, 0], [1, 0, 0, 1, 0]);

        assert_eq!(p.attempt_play_a_bird(&catalog), Outcome::FollowUp(smallvec![NextAction::PlayACard]));
        // Robin: two habitats times two payments. Eagle is unaffordable.
        assert_eq!(p.play_options().len(), 4);
        assert!(p.play_options().iter().all(|o| o.card == BirdCardId::new(0)));
        assert_eq!(
            p.play_options()[0],
            PlayOption {
                card: BirdCardId::new(0),
                habitat: Habitat::Forest,
                payment: Payment::Alternative(Invertebrate),
            }
        );
    }

    #[test]
    fn test_attempt_play_nothing_affordable() {
        let catalog = catalog();
        let mut p = player(&[2], [1, 1, 1, 1, 1]);

        assert_eq!(p.attempt_play_a_bird(&catalog), Outcome::Illegal);
        assert!(p.play_options().is_empty());
    }

    #[test]
    fn test_play_a_bird_alternative_payment() {
        let catalog = catalog();
        let mut p = player(&[0], [1, 0, 0, 1, 0]);
        p.attempt_play_a_bird(&catalog);

        // Option 1: Forest, paid with fruit.
        assert_eq!(p.play_a_bird(&catalog, 9), Outcome::Illegal);
        assert_eq!(p.play_a_bird(&catalog, 1), Outcome::Resolved);
        assert_eq!(*p.resources(), ResourceVector::new([1, 0, 0, 0, 0]));
        assert_eq!(p.mat().bird_count(Habitat::Forest), 1);
        assert!(p.bird_hand().is_empty());
        assert!(p.play_options().is_empty());
    }

    #[test]
    fn test_play_a_bird_wild_and_egg_costs() {
        let catalog = catalog();
        let mut p = player(&[1, 1], [0, 3, 0, 0, 0]);
        p.attempt_play_a_bird(&catalog);
        assert_eq!(p.play_a_bird(&catalog, 0), Outcome::FollowUp(smallvec![NextAction::DiscardResource]));
        assert_eq!(p.resources()[Seed], 2);

        // Second wetland slot costs an egg; with no eggs the wetland is closed.
        assert_eq!(p.attempt_play_a_bird(&catalog), Outcome::Illegal);

        assert_eq!(p.lay_egg(0), Outcome::Resolved);
        assert!(p.attempt_play_a_bird(&catalog).is_legal());
        assert_eq!(
            p.play_a_bird(&catalog, 0),
            Outcome::FollowUp(smallvec![NextAction::DiscardResource, NextAction::DiscardEgg])
        );
        assert_eq!(p.mat().bird_count(Habitat::Wetland), 2);
    }

    #[test]
    fn test_add_bird_card_respects_limit() {
        let mut p = player(&[0, 1, 2, 3, 4], [0; 5]);

        assert!(!p.add_bird_card(BirdCardId::new(9), 5));
        assert!(p.add_bird_card(BirdCardId::new(9), 6));
        assert_eq!(p.bird_hand().len(), 6);
    }

    #[test]
    fn test_can_pay_trade() {
        let p = player(&[], [0; 5]);
        assert!(!p.can_pay_trade(Habitat::Forest));
        assert!(!p.can_pay_trade(Habitat::Grassland));
        assert!(!p.can_pay_trade(Habitat::Wetland));

        let p = player(&[3], [0, 0, 1, 0, 0]);
        assert!(p.can_pay_trade(Habitat::Forest));
        assert!(p.can_pay_trade(Habitat::Grassland));
    }
}
