//! Python bindings for the Wingspan environment.
//!
//! # Quick Start
//!
//! ```python
//! import wingspan_env
//!
//! env = wingspan_env.WingspanEnv("catalog.json", num_players=2, seed=42)
//!
//! while not env.terminated:
//!     mask = env.action_mask()
//!     action = pick(mask)
//!     next_action, legal, terminated = env.step(action)
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// wingspan_env: a step-based Wingspan engine for RL training.
#[pymodule]
fn wingspan_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyWingspanEnv>()?;
    Ok(())
}
