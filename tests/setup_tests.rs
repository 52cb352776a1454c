//! Environment construction, reset, and the setup phase.

mod common;

use std::sync::Arc;

use common::{catalog, env, finish_setup};
use wingspan_env::cards::{BirdCard, CatalogBuilder};
use wingspan_env::core::{EnvConfig, NextAction, PlayerId};
use wingspan_env::env::{StepStatus, WingspanEnv};
use wingspan_env::error::ConfigError;

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_player_count_range() {
    for players in 2..=5 {
        assert!(WingspanEnv::new(EnvConfig::new(players), catalog()).is_ok());
    }
    for players in [0, 1, 6] {
        let err = WingspanEnv::new(EnvConfig::new(players), catalog()).unwrap_err();
        assert_eq!(err, ConfigError::PlayerCount(players));
    }
}

#[test]
fn test_hand_limit_below_minimum() {
    let config = EnvConfig::new(2).with_hand_limit(4);
    let err = WingspanEnv::new(config, catalog()).unwrap_err();
    assert!(matches!(err, ConfigError::HandLimitTooLow { .. }));
}

#[test]
fn test_catalog_without_bonus_cards() {
    let mut builder = CatalogBuilder::new();
    for i in 0..20 {
        builder = builder.bird(|id| BirdCard::new(id, format!("Bird {i}")));
    }
    let catalog = Arc::new(builder.build().unwrap());

    let err = WingspanEnv::new(EnvConfig::new(2), catalog).unwrap_err();
    assert_eq!(
        err,
        ConfigError::NotEnoughBonusCards {
            available: 0,
            required: 4
        }
    );
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_reset_initial_state() {
    let mut env = env(3, 42);

    assert_eq!(env.reset(Some(42)), NextAction::DiscardBirdCardOrResource);
    assert_eq!(env.current_round_index(), -1);
    assert_eq!(env.current_player_index(), 0);
    assert_eq!(env.action_space_size().unwrap(), 10);
    assert!(!env.is_terminal());
}

#[test]
fn test_same_seed_same_deal() {
    let a = env(4, 1234);
    let b = env(4, 1234);

    assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
    assert_eq!(a.rng_state(), b.rng_state());
}

#[test]
fn test_same_seed_same_feeder_and_display() {
    let mut a = env(2, 99);
    let mut b = env(2, 99);
    finish_setup(&mut a);
    finish_setup(&mut b);

    assert_eq!(a.state().feeder(), b.state().feeder());
    assert_eq!(a.state().bird_deck().display(), b.state().bird_deck().display());
}

#[test]
fn test_different_seeds_differ() {
    let a = env(2, 1);
    let b = env(2, 2);

    assert_ne!(
        a.state().player(PlayerId::new(0)).bird_hand(),
        b.state().player(PlayerId::new(0)).bird_hand()
    );
}

#[test]
fn test_reset_without_seed_continues_stream() {
    let mut env = env(2, 5);
    let first = env.snapshot().unwrap();

    env.reset(None);
    assert_ne!(env.snapshot().unwrap(), first);

    env.reset(Some(5));
    assert_eq!(env.snapshot().unwrap(), first);
}

#[test]
fn test_reset_discards_progress() {
    let mut env = env(2, 8);
    finish_setup(&mut env);
    env.step(1);

    env.reset(Some(8));
    assert_eq!(env.current_round_index(), -1);
    assert!(env.state().history().is_empty());
    assert_eq!(env.next_action(), NextAction::DiscardBirdCardOrResource);
}

// =============================================================================
// Setup Phase
// =============================================================================

#[test]
fn test_setup_counter() {
    let mut env = env(2, 3);

    // Four resource discards.
    for (done, index) in [0, 1, 2, 3].into_iter().enumerate() {
        assert_eq!(env.step(index).status, StepStatus::Applied);
        assert_eq!(env.state().setup_counter() as usize, 4 - done);
    }
    assert_eq!(env.next_action(), NextAction::DiscardBirdCardOrResource);

    // Fifth discard is a bird card; the bonus sub-phase starts at 1.
    let result = env.step(5);
    assert_eq!(result.next_action, NextAction::DiscardBonusCard);
    assert_eq!(env.state().setup_counter(), 1);
    assert_eq!(env.action_space_size().unwrap(), 2);

    let result = env.step(1);
    assert_eq!(result.next_action, NextAction::DiscardBirdCardOrResource);
    assert_eq!(env.current_player_index(), 1);
    assert_eq!(env.state().setup_counter(), 5);

    let player = env.state().player(PlayerId::new(0));
    assert_eq!(player.bird_hand().len(), 4);
    assert_eq!(player.bonus_hand().len(), 1);
    assert_eq!(player.resources().total(), 1);
}

#[test]
fn test_setup_completes_into_round_zero() {
    for players in 2..=5 {
        let mut env = env(players, 77);
        finish_setup(&mut env);

        assert_eq!(env.current_round_index(), 0);
        assert_eq!(env.current_player_index(), 0);
        assert_eq!(env.next_action(), NextAction::ChooseAction);
        assert_eq!(env.state().history().len(), players * 6);
        for (_, player) in env.state().players().iter() {
            assert_eq!(player.turns_left(), 8);
            assert_eq!(player.bird_hand().len() + player.resources().total() as usize, 5);
            assert_eq!(player.bonus_hand().len(), 1);
        }
    }
}

#[test]
fn test_setup_discarded_birds_reach_discard_pile() {
    let mut env = env(2, 21);
    let hand = env.state().active().bird_hand().to_vec();

    for _ in 0..5 {
        env.step(5);
    }

    assert_eq!(env.state().bird_deck().discard_pile(), hand.as_slice());
}

#[test]
fn test_setup_illegal_indices() {
    let mut env = env(2, 4);
    let before = env.snapshot().unwrap();

    // Out of range for five resources plus five cards.
    assert_eq!(env.step(10).status, StepStatus::Illegal);
    env.step(0);
    // Invertebrate is gone.
    assert_eq!(env.step(0).status, StepStatus::Illegal);
    assert_ne!(env.snapshot().unwrap(), before);
}
