//! The turn controller.
//!
//! `step` reads the decision owed (top of the action queue, or `ChooseAction`
//! when the queue is empty), hands the index to the matching mutator, and
//! then does the bookkeeping:
//!
//! - **Setup** (`round == -1`): each player discards five bird cards or
//!   resources, then one bonus card. The queue holds a single entry that is
//!   swapped as the sub-phase changes.
//! - **Main phase**: the answered action is popped and its follow-ups are
//!   pushed. Pending actions the player cannot perform are dropped from the
//!   top. A drained queue ends the turn; when every player has used their
//!   turns the round ends.
//!
//! An illegal index changes nothing and is reported as
//! [`StepStatus::Illegal`].

use std::sync::Arc;

use log::{debug, info, trace};

use super::result::{StepResult, StepStatus};
use super::state::{GameState, SETUP_ROUND};
use super::termination::{RoundLimit, TerminationPolicy};
use crate::board::{BirdDeck, BirdFeeder, REROLL_INDEX};
use crate::cards::{BirdCardId, BonusCardId, Catalog};
use crate::core::{
    ActionRecord, BaseAction, EnvConfig, GameRng, GameRngState, Habitat, NextAction, PlayerId,
    PlayerMap, Resource, ResourceVector, REGULAR_RESOURCE_COUNT,
};
use crate::error::{ConfigError, EnvError};
use crate::player::{trade, Consumed, FollowUps, Outcome, PlayerState};
use crate::stack::ActionQueue;

/// A Wingspan episode driven one index at a time.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use wingspan_env::cards::{BirdCard, BonusCard, CatalogBuilder};
/// use wingspan_env::core::{EnvConfig, NextAction};
/// use wingspan_env::env::{StepStatus, WingspanEnv};
///
/// let mut builder = CatalogBuilder::new();
/// for i in 0..20 {
///     builder = builder.bird(|id| BirdCard::new(id, format!("Bird {i}")));
/// }
/// for i in 0..6 {
///     builder = builder.bonus(|id| BonusCard::new(id, format!("Bonus {i}")));
/// }
/// let catalog = Arc::new(builder.build().unwrap());
///
/// let mut env = WingspanEnv::new(EnvConfig::new(2), catalog).unwrap();
/// assert_eq!(env.reset(Some(7)), NextAction::DiscardBirdCardOrResource);
///
/// // Discard a seed.
/// let result = env.step(1);
/// assert_eq!(result.status, StepStatus::Applied);
/// assert_eq!(env.state().setup_counter(), 4);
/// ```
pub struct WingspanEnv {
    config: EnvConfig,
    catalog: Arc<Catalog>,
    bird_pool: Vec<BirdCardId>,
    bonus_pool: Vec<BonusCardId>,
    termination: Box<dyn TerminationPolicy>,
    rng: GameRng,
    state: GameState,
}

impl WingspanEnv {
    /// Validate `config` against `catalog` and deal a first episode.
    ///
    /// The RNG is seeded from entropy; call `reset(Some(seed))` for a
    /// reproducible episode.
    pub fn new(config: EnvConfig, catalog: Arc<Catalog>) -> Result<Self, ConfigError> {
        config.validate()?;

        let bird_pool = catalog.bird_ids_in(&config.expansions);
        if bird_pool.len() < config.bird_cards_required() {
            return Err(ConfigError::NotEnoughBirdCards {
                available: bird_pool.len(),
                required: config.bird_cards_required(),
            });
        }
        let bonus_pool = catalog.bonus_ids_in(&config.expansions);
        if bonus_pool.len() < config.bonus_cards_required() {
            return Err(ConfigError::NotEnoughBonusCards {
                available: bonus_pool.len(),
                required: config.bonus_cards_required(),
            });
        }

        let mut rng = GameRng::from_entropy();
        let state = deal(&config, &bird_pool, &bonus_pool, &mut rng);
        Ok(Self {
            termination: Box::new(RoundLimit::new(config.rounds)),
            config,
            catalog,
            bird_pool,
            bonus_pool,
            rng,
            state,
        })
    }

    /// Replace the default round limit.
    #[must_use]
    pub fn with_termination(mut self, policy: impl TerminationPolicy + 'static) -> Self {
        self.termination = Box::new(policy);
        self
    }

    /// Start a new episode.
    ///
    /// `Some(seed)` reseeds the RNG; `None` continues the current stream.
    pub fn reset(&mut self, seed: Option<u64>) -> NextAction {
        if let Some(seed) = seed {
            self.rng = GameRng::new(seed);
        }
        self.state = deal(&self.config, &self.bird_pool, &self.bonus_pool, &mut self.rng);
        info!(
            "reset: {} players, seed {}",
            self.config.player_count,
            self.rng.seed()
        );
        self.state.next_action()
    }

    /// Answer the pending decision with `index`.
    pub fn step(&mut self, index: usize) -> StepResult {
        if self.is_terminal() {
            return StepResult::new(self.next_action(), StepStatus::Terminated);
        }

        let action = self.state.next_action();
        let player = self.state.active_player;
        trace!("{player} answers {action} with {index}");

        let outcome = self.dispatch(action, index);
        if !outcome.is_legal() {
            debug!("{player}: index {index} is illegal for {action}");
            return StepResult::new(action, StepStatus::Illegal);
        }

        self.state
            .history
            .push_back(ActionRecord::new(player, action, index, self.state.round));

        if self.state.is_setup() {
            self.advance_setup(action);
        } else {
            self.advance_main(outcome);
        }

        let status = if self.is_terminal() {
            info!("episode terminated after {} steps", self.state.history.len());
            StepStatus::Terminated
        } else {
            StepStatus::Applied
        };
        StepResult::new(self.next_action(), status)
    }

    // === Dispatch ===

    fn dispatch(&mut self, action: NextAction, index: usize) -> Outcome {
        let player = self.state.active_player;
        match action {
            NextAction::ChooseAction => self.choose_action(index),
            NextAction::DiscardBirdCardOrResource => {
                let outcome = self.state.players[player].discard_resource_or_bird_card(index);
                self.recycle(&outcome);
                outcome
            }
            NextAction::DiscardBirdCard => {
                let outcome = self.state.players[player].discard_bird_card(index);
                self.recycle(&outcome);
                outcome
            }
            NextAction::DiscardBonusCard => self.state.players[player].discard_bonus_card(index),
            NextAction::DiscardResource => self.state.players[player].discard_resource(index),
            NextAction::DiscardEgg => self.state.players[player].discard_egg(index),
            NextAction::PlayACard => self.state.players[player].play_a_bird(&self.catalog, index),
            NextAction::GetBirdCard => self.gain_bird_card(index),
            NextAction::GetBonusCard => self.gain_bonus_card(index),
            NextAction::GetResource => self.gain_resource(index),
            NextAction::GetEgg => self.state.players[player].lay_egg(index),
            NextAction::OptionalAction(habitat) => self.board_trade(habitat, index),
            NextAction::NotImplemented => {
                if index == 0 {
                    Outcome::Resolved
                } else {
                    Outcome::Illegal
                }
            }
        }
    }

    fn choose_action(&mut self, index: usize) -> Outcome {
        let Some(base) = BaseAction::try_new(index) else {
            return Outcome::Illegal;
        };
        let player = &mut self.state.players[self.state.active_player];
        match base.habitat() {
            None => player.attempt_play_a_bird(&self.catalog),
            Some(habitat) => {
                let activation = player.mat().habitat_action(habitat);
                let mut follow_ups: FollowUps =
                    std::iter::repeat(activation.gain).take(activation.count).collect();
                // The trade goes on top of the gains and is offered first.
                if activation.bonus {
                    follow_ups.push(NextAction::OptionalAction(habitat));
                }
                Outcome::FollowUp(follow_ups)
            }
        }
    }

    /// Discarded bird cards go to the supply's discard pile.
    fn recycle(&mut self, outcome: &Outcome) {
        if let Outcome::Consumed(Consumed::BirdCard(card)) = *outcome {
            self.state.bird_deck.discard(card);
        }
    }

    fn gain_bird_card(&mut self, index: usize) -> Outcome {
        let player = self.state.active_player;
        if self.state.players[player].bird_hand().len() >= usize::from(self.config.hand_limit) {
            return Outcome::Illegal;
        }
        let deck = &mut self.state.bird_deck;
        let display_len = deck.display().len();
        let card = match index.cmp(&display_len) {
            std::cmp::Ordering::Less => deck.take_from_display(index),
            std::cmp::Ordering::Equal => deck.draw(&mut self.rng),
            std::cmp::Ordering::Greater => None,
        };
        let Some(card) = card else {
            return Outcome::Illegal;
        };
        // The hand limit was checked above, so the card always fits.
        self.state.players[player].add_bird_card(card, self.config.hand_limit);
        Outcome::Resolved
    }

    fn gain_bonus_card(&mut self, index: usize) -> Outcome {
        if index != 0 {
            return Outcome::Illegal;
        }
        match self.state.bonus_deck.pop() {
            Some(card) => {
                self.state.players[self.state.active_player].add_bonus_card(card);
                Outcome::Resolved
            }
            None => Outcome::Illegal,
        }
    }

    fn gain_resource(&mut self, index: usize) -> Outcome {
        if index == REROLL_INDEX {
            return if self.state.feeder.reroll(&mut self.rng) {
                Outcome::FollowUp(FollowUps::from_slice(&[NextAction::GetResource]))
            } else {
                Outcome::Illegal
            };
        }
        match Resource::from_index(index) {
            Some(resource) if self.state.feeder.take(resource, &mut self.rng) => {
                self.state.players[self.state.active_player].gain_resource(resource);
                Outcome::Resolved
            }
            _ => Outcome::Illegal,
        }
    }

    fn board_trade(&self, habitat: Habitat, index: usize) -> Outcome {
        match index {
            0 => Outcome::Resolved,
            1 if self.can_accept_trade(habitat) => {
                let (cost, reward) = trade(habitat);
                // The cost goes on top so it is paid first.
                Outcome::FollowUp(FollowUps::from_slice(&[reward, cost]))
            }
            _ => Outcome::Illegal,
        }
    }

    fn can_accept_trade(&self, habitat: Habitat) -> bool {
        let (_, reward) = trade(habitat);
        self.state.active().can_pay_trade(habitat) && self.is_performable(reward)
    }

    // === Bookkeeping ===

    fn advance_setup(&mut self, completed: NextAction) {
        let state = &mut self.state;
        state.setup_counter = state.setup_counter.saturating_sub(1);
        if state.setup_counter > 0 {
            return;
        }

        if completed == NextAction::DiscardBirdCardOrResource {
            state.setup_counter = self.config.setup_bonus_discards;
            state.queue.replace_top(NextAction::DiscardBonusCard);
            return;
        }

        let next = state.active_player.next(self.config.player_count);
        if next.index() == 0 {
            self.start_first_round();
        } else {
            state.setup_counter = self.config.setup_discards;
            state.queue.replace_top(NextAction::DiscardBirdCardOrResource);
            state.active_player = next;
            debug!("setup passes to {next}");
        }
    }

    fn start_first_round(&mut self) {
        let turns = self.config.turns_in_round(0);
        let state = &mut self.state;
        state.round = 0;
        state.active_player = PlayerId::new(0);
        state.setup_counter = 0;
        state.queue.clear();
        for player in state.players.values_mut() {
            player.set_turns_left(turns);
        }
        state.feeder.roll(&mut self.rng);
        state.bird_deck.reset_display(&mut self.rng);
        info!("setup complete, round 0 begins with {turns} turns each");
    }

    fn advance_main(&mut self, outcome: Outcome) {
        self.state.queue.pop();
        if let Outcome::FollowUp(actions) = outcome {
            self.state.queue.push_all(actions);
        }
        self.drop_unperformable();
        if self.state.queue.is_empty() {
            self.end_turn();
        }
    }

    fn drop_unperformable(&mut self) {
        while let Some(top) = self.state.queue.peek() {
            if self.is_performable(top) {
                break;
            }
            debug!("{}: dropping {top}, it cannot be performed", self.state.active_player);
            self.state.queue.pop();
        }
    }

    fn end_turn(&mut self) {
        let current = self.state.active_player;
        self.state.players[current].use_turn();

        if self.state.players.iter().all(|(_, p)| p.turns_left() == 0) {
            self.end_round();
        } else {
            self.state.active_player = current.next(self.config.player_count);
            self.state.bird_deck.refill_display(&mut self.rng);
        }
    }

    fn end_round(&mut self) {
        self.state.round += 1;
        info!("round {} ends", self.state.round - 1);
        if self.is_terminal() {
            return;
        }

        let round = self.state.round as u8;
        let turns = self.config.turns_in_round(round);
        for player in self.state.players.values_mut() {
            player.set_turns_left(turns);
        }
        self.state.active_player = PlayerId::round_starter(round, self.config.player_count);
        self.state.bird_deck.reset_display(&mut self.rng);
        info!(
            "round {round} begins with {}, {turns} turns each",
            self.state.active_player
        );
    }

    /// Whether the active player can currently perform `action` at all.
    fn is_performable(&self, action: NextAction) -> bool {
        let player = self.state.active();
        match action {
            NextAction::ChooseAction
            | NextAction::DiscardBirdCardOrResource
            | NextAction::GetResource
            | NextAction::NotImplemented => true,
            NextAction::DiscardBonusCard => !player.bonus_hand().is_empty(),
            NextAction::DiscardBirdCard => !player.bird_hand().is_empty(),
            NextAction::DiscardResource => !player.resources().is_empty(),
            NextAction::DiscardEgg => player.mat().egg_count() > 0,
            NextAction::PlayACard => !player.play_options().is_empty(),
            NextAction::GetBirdCard => {
                player.bird_hand().len() < usize::from(self.config.hand_limit)
                    && self.state.bird_deck.has_cards()
            }
            NextAction::GetBonusCard => !self.state.bonus_deck.is_empty(),
            NextAction::GetEgg => player.mat().can_place_egg(),
            NextAction::OptionalAction(habitat) => self.can_accept_trade(habitat),
        }
    }

    // === Queries ===

    /// Number of indices the pending decision accepts.
    ///
    /// Not every index in range is legal; see [`WingspanEnv::action_mask`].
    pub fn action_space_size(&self) -> Result<usize, EnvError> {
        if self.is_terminal() {
            return Err(EnvError::Terminated);
        }
        let player = self.state.active();
        let size = match self.state.next_action() {
            NextAction::ChooseAction => BaseAction::COUNT,
            NextAction::DiscardBirdCardOrResource => REGULAR_RESOURCE_COUNT + player.bird_hand().len(),
            NextAction::DiscardBonusCard => player.bonus_hand().len(),
            NextAction::DiscardBirdCard => player.bird_hand().len(),
            NextAction::DiscardResource => REGULAR_RESOURCE_COUNT,
            NextAction::DiscardEgg => player.mat().slots_with_eggs(),
            NextAction::PlayACard => player.play_options().len(),
            NextAction::GetBirdCard => self.state.bird_deck.display().len() + 1,
            NextAction::GetBonusCard => 1,
            NextAction::GetResource => REGULAR_RESOURCE_COUNT + 1,
            NextAction::GetEgg => player.mat().slots_with_space(),
            NextAction::OptionalAction(_) => 2,
            NextAction::NotImplemented => 1,
        };
        Ok(size)
    }

    /// Legality of every index in the action space.
    pub fn action_mask(&self) -> Result<Vec<bool>, EnvError> {
        let size = self.action_space_size()?;
        let player = self.state.active();
        let resources = player.resources();
        let holds = |i: usize| Resource::from_index(i).is_some_and(|r| resources.has(r, 1));

        let mask = match self.state.next_action() {
            NextAction::ChooseAction => (0..size)
                .map(|i| i != 0 || player.can_play_a_bird(&self.catalog))
                .collect(),
            NextAction::DiscardBirdCardOrResource => (0..size)
                .map(|i| i >= REGULAR_RESOURCE_COUNT || holds(i))
                .collect(),
            NextAction::DiscardResource => (0..size).map(holds).collect(),
            NextAction::GetBirdCard => {
                let display_len = self.state.bird_deck.display().len();
                (0..size)
                    .map(|i| i < display_len || self.state.bird_deck.can_draw())
                    .collect()
            }
            NextAction::GetResource => (0..size)
                .map(|i| match Resource::from_index(i) {
                    Some(resource) => self.state.feeder.can_take(resource),
                    None => self.state.feeder.can_reroll(),
                })
                .collect(),
            _ => vec![true; size],
        };
        Ok(mask)
    }

    /// Indices that are currently legal.
    pub fn legal_actions(&self) -> Result<Vec<usize>, EnvError> {
        Ok(self
            .action_mask()?
            .into_iter()
            .enumerate()
            .filter_map(|(i, legal)| legal.then_some(i))
            .collect())
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.termination.is_terminal(&self.state)
    }

    /// The decision owed next.
    #[must_use]
    pub fn next_action(&self) -> NextAction {
        self.state.next_action()
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.state.active_player.index()
    }

    /// `-1` during setup, then the 0-based round.
    #[must_use]
    pub fn current_round_index(&self) -> i8 {
        self.state.round
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Encode the current state with bincode.
    pub fn snapshot(&self) -> Result<Vec<u8>, EnvError> {
        self.state.to_bytes()
    }

    /// Resume from a snapshot and the RNG state captured with it.
    pub fn restore(&mut self, bytes: &[u8], rng: &GameRngState) -> Result<(), EnvError> {
        let state = GameState::from_bytes(bytes)?;
        if state.player_count() != self.config.player_count {
            return Err(EnvError::PlayerCountMismatch {
                expected: self.config.player_count,
                found: state.player_count(),
            });
        }
        self.state = state;
        self.rng = GameRng::from_state(rng);
        Ok(())
    }
}

impl std::fmt::Debug for WingspanEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WingspanEnv")
            .field("config", &self.config)
            .field("round", &self.state.round)
            .field("active_player", &self.state.active_player)
            .field("next_action", &self.state.next_action())
            .finish_non_exhaustive()
    }
}

/// Shuffle the supply and deal every player their starting hand.
fn deal(
    config: &EnvConfig,
    bird_pool: &[BirdCardId],
    bonus_pool: &[BonusCardId],
    rng: &mut GameRng,
) -> GameState {
    let mut birds = bird_pool.to_vec();
    rng.shuffle(&mut birds);
    let mut bird_deck = BirdDeck::new(birds, usize::from(config.display_size));

    let mut bonus_deck = bonus_pool.to_vec();
    rng.shuffle(&mut bonus_deck);

    let players = PlayerMap::new(config.player_count, |_| {
        let hand = bird_deck.draw_many(usize::from(config.starting_bird_cards), rng);
        let keep = bonus_deck
            .len()
            .saturating_sub(usize::from(config.starting_bonus_cards));
        let bonus_hand = bonus_deck.split_off(keep);
        PlayerState::new(hand, bonus_hand, ResourceVector::one_of_each())
    });

    let mut queue = ActionQueue::new();
    queue.push(NextAction::DiscardBirdCardOrResource);

    GameState {
        round: SETUP_ROUND,
        active_player: PlayerId::new(0),
        queue,
        setup_counter: config.setup_discards,
        players,
        bird_deck,
        bonus_deck,
        feeder: BirdFeeder::new(),
        history: im::Vector::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BirdCard, BonusCard, CatalogBuilder, CostRecord};

    fn catalog(birds: usize) -> Arc<Catalog> {
        let mut builder = CatalogBuilder::new();
        for i in 0..birds {
            builder = builder.bird(|id| {
                BirdCard::new(id, format!("Bird {i}"))
                    .with_cost(CostRecord::all_of(&[(Resource::Seed, 1)], 0))
                    .with_egg_capacity(2)
            });
        }
        for i in 0..6 {
            builder = builder.bonus(|id| BonusCard::new(id, format!("Bonus {i}")));
        }
        Arc::new(builder.build().unwrap())
    }

    fn env() -> WingspanEnv {
        let mut env = WingspanEnv::new(EnvConfig::new(2), catalog(30)).unwrap();
        env.reset(Some(11));
        env
    }

    /// Discard four resources and a bonus card for every player.
    fn finish_setup(env: &mut WingspanEnv) {
        for _ in 0..2 {
            for index in [0, 1, 2, 3, 5] {
                assert!(env.step(index).is_legal());
            }
            assert!(env.step(0).is_legal());
        }
    }

    #[test]
    fn test_new_rejects_small_catalog() {
        let err = WingspanEnv::new(EnvConfig::new(2), catalog(12)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotEnoughBirdCards {
                available: 12,
                required: 13
            }
        );
    }

    #[test]
    fn test_reset_deals_hands() {
        let env = env();
        let state = env.state();

        assert_eq!(state.round(), -1);
        assert_eq!(state.setup_counter(), 5);
        for (_, player) in state.players().iter() {
            assert_eq!(player.bird_hand().len(), 5);
            assert_eq!(player.bonus_hand().len(), 2);
            assert_eq!(*player.resources(), ResourceVector::one_of_each());
        }
        assert_eq!(state.bird_deck().draw_pile_len(), 20);
        assert_eq!(state.bonus_deck().len(), 2);
    }

    #[test]
    fn test_setup_then_first_round() {
        let mut env = env();
        finish_setup(&mut env);

        assert_eq!(env.current_round_index(), 0);
        assert_eq!(env.current_player_index(), 0);
        assert_eq!(env.next_action(), NextAction::ChooseAction);
        assert_eq!(env.state().feeder().len(), 5);
        assert_eq!(env.state().bird_deck().display().len(), 3);
        assert_eq!(env.state().active().turns_left(), 8);
    }

    #[test]
    fn test_forest_action_gains_resource_and_ends_turn() {
        let mut env = env();
        finish_setup(&mut env);

        let result = env.step(1);
        assert_eq!(result.next_action, NextAction::GetResource);

        let legal = env.legal_actions().unwrap();
        let take = legal.iter().copied().find(|&i| i < REGULAR_RESOURCE_COUNT).unwrap();
        let before = env.state().active().resources().total();
        env.step(take);

        assert_eq!(env.state().player(PlayerId::new(0)).resources().total(), before + 1);
        assert_eq!(env.state().player(PlayerId::new(0)).turns_left(), 7);
        assert_eq!(env.current_player_index(), 1);
        assert_eq!(env.next_action(), NextAction::ChooseAction);
    }

    #[test]
    fn test_grassland_without_birds_is_dropped() {
        let mut env = env();
        finish_setup(&mut env);

        // No slots to lay eggs in: both GetEgg actions are dropped.
        let result = env.step(2);
        assert_eq!(result.status, StepStatus::Applied);
        assert_eq!(env.current_player_index(), 1);
    }

    #[test]
    fn test_illegal_step_changes_nothing() {
        let mut env = env();
        let before = env.snapshot().unwrap();
        let rng = env.rng_state();

        // Player 0 holds no sixth bird card.
        let result = env.step(10);
        assert_eq!(result.status, StepStatus::Illegal);
        assert_eq!(env.snapshot().unwrap(), before);
        assert_eq!(env.rng_state(), rng);
    }

    #[test]
    fn test_custom_termination() {
        let mut env = env().with_termination(|state: &GameState| state.history().len() >= 3);
        env.reset(Some(1));

        assert_eq!(env.step(0).status, StepStatus::Applied);
        assert_eq!(env.step(0).status, StepStatus::Illegal);
        assert_eq!(env.step(1).status, StepStatus::Applied);
        assert_eq!(env.step(2).status, StepStatus::Terminated);
        assert!(matches!(env.action_space_size(), Err(EnvError::Terminated)));
        assert_eq!(env.step(3).status, StepStatus::Terminated);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut env = env();
        finish_setup(&mut env);
        let bytes = env.snapshot().unwrap();
        let rng = env.rng_state();

        env.step(1);
        env.restore(&bytes, &rng).unwrap();

        assert_eq!(env.snapshot().unwrap(), bytes);
        assert_eq!(env.next_action(), NextAction::ChooseAction);
    }
}
