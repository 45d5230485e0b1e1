//! Python bindings for rust-turnsim.
//!
//! # Quick Start
//!
//! ```python
//! import rust_turnsim as ts
//!
//! game = ts.Hex(board_size=5, seed=1)
//! while not game.is_terminal():
//!     x, y = game.legal_actions()[0]
//!     game.state_transition(x, y)
//! print(game.rewards())
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// rust-turnsim: turn-based game simulators for agent training.
#[pymodule]
fn rust_turnsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;

    m.add_class::<PyBackgammon>()?;
    m.add_class::<PyHex>()?;

    Ok(())
}
