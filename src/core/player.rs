//! Seats at the table and per-seat storage.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::MAX_PLAYERS;

/// A seat, 0-based. Seat 0 takes the first setup discard and the first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player seated after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// The seat that opens round `round`: rounds rotate the first turn.
    #[must_use]
    pub fn round_starter(round: u8, player_count: usize) -> Self {
        Self((usize::from(round) % player_count) as u8)
    }

    /// Every seat in turn order.
    ///
    /// ```
    /// use wingspan_env::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// ```
/// use wingspan_env::core::{PlayerId, PlayerMap};
///
/// let mut turns: PlayerMap<u8> = PlayerMap::with_value(4, 8);
/// turns[PlayerId::new(1)] -= 1;
/// assert_eq!(turns[PlayerId::new(0)], 8);
/// assert_eq!(turns[PlayerId::new(1)], 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build each seat's value in turn order.
    ///
    /// `player_count` must already be validated; see [`EnvConfig::validate`].
    ///
    /// [`EnvConfig::validate`]: crate::core::EnvConfig::validate
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(
            (1..=MAX_PLAYERS).contains(&player_count),
            "a table seats 1 to {MAX_PLAYERS} players, got {player_count}"
        );
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Seats and values in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
