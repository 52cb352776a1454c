//! Environment bindings for Python.

use std::sync::Arc;

use numpy::PyArray1;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::cards::Catalog;
use crate::core::{EnvConfig, PlayerId};
use crate::env::WingspanEnv;
use crate::error::EnvError;

fn runtime_error(err: EnvError) -> PyErr {
    PyRuntimeError::new_err(err.to_string())
}

/// Python wrapper for WingspanEnv.
///
/// Actions are plain integers whose meaning depends on `next_action`, the
/// numeric code of the decision currently owed.
#[pyclass(name = "WingspanEnv")]
pub struct PyWingspanEnv {
    inner: WingspanEnv,
}

#[pymethods]
impl PyWingspanEnv {
    /// Create an environment from a catalog JSON file.
    ///
    /// # Arguments
    /// - catalog_path: Path to the catalog JSON
    /// - num_players: Number of players (2-5)
    /// - hand_limit: Maximum bird cards in hand
    /// - seed: RNG seed; entropy when omitted
    #[new]
    #[pyo3(signature = (catalog_path, num_players = 2, hand_limit = 20, seed = None))]
    fn new(catalog_path: &str, num_players: usize, hand_limit: u8, seed: Option<u64>) -> PyResult<Self> {
        let json = std::fs::read_to_string(catalog_path)
            .map_err(|err| PyIOError::new_err(format!("cannot read {catalog_path}: {err}")))?;
        let catalog = Catalog::from_json(&json).map_err(|err| PyValueError::new_err(err.to_string()))?;
        let config = EnvConfig::new(num_players).with_hand_limit(hand_limit);
        let mut inner = WingspanEnv::new(config, Arc::new(catalog))
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        inner.reset(seed);
        Ok(Self { inner })
    }

    /// Start a new episode and return the first decision code.
    #[pyo3(signature = (seed = None))]
    fn reset(&mut self, seed: Option<u64>) -> u16 {
        self.inner.reset(seed).code()
    }

    /// Apply an action.
    ///
    /// Returns `(next_action, legal, terminated)`.
    fn step(&mut self, action_idx: usize) -> (u16, bool, bool) {
        let result = self.inner.step(action_idx);
        (result.next_action.code(), result.is_legal(), result.is_terminal())
    }

    /// Number of indices the pending decision accepts.
    fn action_space_size(&self) -> PyResult<usize> {
        self.inner.action_space_size().map_err(runtime_error)
    }

    /// Legality of every index as a boolean numpy array.
    fn action_mask<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<bool>>> {
        let mask = self.inner.action_mask().map_err(runtime_error)?;
        Ok(PyArray1::from_slice_bound(py, &mask))
    }

    /// Resource counts of a player (the active player by default).
    #[pyo3(signature = (player = None))]
    fn resources<'py>(&self, py: Python<'py>, player: Option<u8>) -> PyResult<Bound<'py, PyArray1<u8>>> {
        let state = self.inner.state();
        let player = player.map_or(state.active_player(), PlayerId::new);
        if player.index() >= state.player_count() {
            return Err(PyValueError::new_err(format!("no {player} at this table")));
        }
        Ok(PyArray1::from_slice_bound(py, state.player(player).resources().as_array()))
    }

    /// Bird card ids in the active player's hand.
    fn bird_hand(&self) -> Vec<u16> {
        self.inner.state().active().bird_hand().iter().map(|c| c.0).collect()
    }

    /// Encode the current state as bytes.
    fn snapshot(&self) -> PyResult<Vec<u8>> {
        self.inner.snapshot().map_err(runtime_error)
    }

    #[getter]
    fn player_idx(&self) -> usize {
        self.inner.current_player_index()
    }

    #[getter]
    fn round_idx(&self) -> i8 {
        self.inner.current_round_index()
    }

    #[getter]
    fn next_action(&self) -> u16 {
        self.inner.next_action().code()
    }

    #[getter]
    fn terminated(&self) -> bool {
        self.inner.is_terminal()
    }

    fn __repr__(&self) -> String {
        format!(
            "WingspanEnv(round={}, player={}, next_action={})",
            self.inner.current_round_index(),
            self.inner.current_player_index(),
            self.inner.next_action()
        )
    }
}
