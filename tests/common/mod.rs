//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use wingspan_env::cards::{BirdCard, BirdCardId, BonusCard, Catalog, CatalogBuilder, CostRecord};
use wingspan_env::core::{EnvConfig, GameRng, Habitat, Resource};
use wingspan_env::env::WingspanEnv;

pub const FIXTURE_BIRDS: usize = 40;
pub const FIXTURE_BONUS_CARDS: usize = 12;

/// Seed 1 + one wild unit (total 2).
pub const WILD_COST_BIRD: BirdCardId = BirdCardId::new(4);
/// Fish 1 + Fruit 1 + Rodent 1.
pub const THREE_FOOD_BIRD: BirdCardId = BirdCardId::new(6);
/// Invertebrate 1 AND Fruit 1.
pub const AND_COST_BIRD: BirdCardId = BirdCardId::new(9);
/// Invertebrate 1 OR Fruit 1.
pub const OR_COST_BIRD: BirdCardId = BirdCardId::new(10);
/// Costs nothing and lives anywhere.
pub const FREE_BIRD: BirdCardId = BirdCardId::new(11);

fn fixture_bird(id: BirdCardId) -> BirdCard {
    use Resource::*;

    let i = id.index();
    let base = BirdCard::new(id, format!("Fixture Bird {i}"));
    match id {
        WILD_COST_BIRD => base
            .with_cost(CostRecord::all_of(&[(Seed, 1)], 1))
            .with_habitats(&[Habitat::Wetland])
            .with_egg_capacity(3),
        THREE_FOOD_BIRD => base
            .with_cost(CostRecord::all_of(&[(Fish, 1), (Fruit, 1), (Rodent, 1)], 0))
            .with_habitats(&[Habitat::Forest])
            .with_points(7)
            .predator(),
        AND_COST_BIRD => base
            .with_cost(CostRecord::all_of(&[(Invertebrate, 1), (Fruit, 1)], 0))
            .with_habitats(&[Habitat::Forest, Habitat::Grassland])
            .with_egg_capacity(2),
        OR_COST_BIRD => base
            .with_cost(CostRecord::one_of(&[(Invertebrate, 1), (Fruit, 1)]))
            .with_habitats(&[Habitat::Forest, Habitat::Grassland])
            .with_egg_capacity(4),
        FREE_BIRD => base.with_egg_capacity(2),
        _ => {
            let food = Resource::REGULAR[i % 5];
            let habitat = Habitat::ALL[i % 3];
            let cost = if i % 4 == 0 {
                CostRecord::one_of(&[(food, 1), (Resource::REGULAR[(i + 2) % 5], 1)])
            } else {
                CostRecord::all_of(&[(food, 1)], (i % 3) as u8)
            };
            base.with_cost(cost)
                .with_habitats(&[habitat])
                .with_egg_capacity((i % 5) as u8 + 1)
                .with_points((i % 9) as u8)
                .with_wingspan(20 + i as u16 * 3)
        }
    }
}

/// A 40-bird, 12-bonus-card catalog.
pub fn catalog() -> Arc<Catalog> {
    let mut builder = CatalogBuilder::new();
    for _ in 0..FIXTURE_BIRDS {
        builder = builder.bird(fixture_bird);
    }
    for i in 0..FIXTURE_BONUS_CARDS {
        builder = builder.bonus(|id| BonusCard::new(id, format!("Fixture Bonus {i}")));
    }
    Arc::new(builder.build().expect("fixture catalog is valid"))
}

/// A seeded environment for `players` players.
pub fn env(players: usize, seed: u64) -> WingspanEnv {
    let mut env = WingspanEnv::new(EnvConfig::new(players), catalog()).expect("valid config");
    env.reset(Some(seed));
    env
}

/// Answer every setup decision with the first legal index.
pub fn finish_setup(env: &mut WingspanEnv) {
    while env.current_round_index() < 0 {
        let legal = env.legal_actions().expect("setup is never terminal");
        assert!(env.step(legal[0]).is_legal());
    }
}

/// Play random legal indices until the episode ends. Returns the step count.
pub fn play_out(env: &mut WingspanEnv, seed: u64) -> usize {
    let mut rng = GameRng::new(seed);
    let mut steps = 0;
    while !env.is_terminal() {
        let legal = env.legal_actions().expect("not terminal");
        assert!(!legal.is_empty(), "no legal action for {}", env.next_action());
        let index = legal[rng.gen_range_usize(0..legal.len())];
        let result = env.step(index);
        assert!(result.is_legal(), "masked index {index} was illegal for {}", env.next_action());
        steps += 1;
        assert!(steps < 100_000, "episode did not terminate");
    }
    steps
}
