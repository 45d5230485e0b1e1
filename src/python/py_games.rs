//! Game bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::games::backgammon::{Backgammon, BackgammonAction, BackgammonMove, BackgammonSimulator};
use crate::games::hex::{HexAction, HexBuilder, HexSimulator};
use crate::simulator::single_action;

use super::py_core::PyPlayerId;

/// Python wrapper for a Backgammon simulator.
///
/// Actions are lists of `(from, die)` tuples.
#[pyclass(name = "Backgammon")]
pub struct PyBackgammon {
    sim: BackgammonSimulator,
}

#[pymethods]
impl PyBackgammon {
    #[new]
    #[pyo3(signature = (seed = 42))]
    fn new(seed: u64) -> Self {
        Self {
            sim: Backgammon::simulator(seed),
        }
    }

    /// Legal actions for the agent to move.
    fn legal_actions(&self) -> Vec<Vec<(u8, u8)>> {
        let player = self.sim.state().agent_turn();
        self.sim
            .legal_actions_for(player)
            .iter()
            .map(|action| action.moves().iter().map(|m| (m.from, m.die)).collect())
            .collect()
    }

    /// Play an action for the agent to move.
    fn state_transition(&mut self, moves: Vec<(u8, u8)>) -> PyResult<()> {
        let player = self.sim.state().agent_turn();
        let action = BackgammonAction::new(moves.into_iter().map(|(from, die)| BackgammonMove::new(from, die)));
        self.sim.state_transition(&single_action(player, action))?;
        Ok(())
    }

    fn rewards(&self) -> Vec<i32> {
        self.sim.rewards().as_slice().to_vec()
    }

    fn is_terminal(&self) -> bool {
        self.sim.is_terminal_state()
    }

    #[getter]
    fn agent_turn(&self) -> PyPlayerId {
        PyPlayerId(self.sim.state().agent_turn())
    }

    #[getter]
    fn dice(&self) -> (u8, u8) {
        let [first, second] = self.sim.state().dice();
        (first, second)
    }

    /// Signed checker counts, index 0 and 25 are the bars.
    fn locations<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i8>> {
        PyArray1::from_slice_bound(py, self.sim.state().locations().as_slice())
    }

    /// Independent copy with its own dice stream.
    fn copy(&mut self) -> Self {
        Self {
            sim: self.sim.fork(),
        }
    }

    fn __repr__(&self) -> String {
        format!("Backgammon({})", self.sim.state())
    }
}

/// Python wrapper for a Hex simulator.
#[pyclass(name = "Hex")]
pub struct PyHex {
    sim: HexSimulator,
}

#[pymethods]
impl PyHex {
    #[new]
    #[pyo3(signature = (board_size = 11, swap_rule = false, seed = 42))]
    fn new(board_size: usize, swap_rule: bool, seed: u64) -> PyResult<Self> {
        let sim = HexBuilder::new()
            .board_size(board_size)
            .swap_rule(swap_rule)
            .build(seed)?;
        Ok(Self { sim })
    }

    /// Legal `(x, y)` placements for the agent to move.
    fn legal_actions(&self) -> Vec<(u8, u8)> {
        let player = self.sim.state().agent_turn();
        self.sim
            .legal_actions_for(player)
            .iter()
            .map(|a| (a.x, a.y))
            .collect()
    }

    fn state_transition(&mut self, x: u8, y: u8) -> PyResult<()> {
        let player = self.sim.state().agent_turn();
        self.sim
            .state_transition(&single_action(player, HexAction::new(x, y)))?;
        Ok(())
    }

    fn rewards(&self) -> Vec<i32> {
        self.sim.rewards().as_slice().to_vec()
    }

    fn is_terminal(&self) -> bool {
        self.sim.is_terminal_state()
    }

    #[getter]
    fn agent_turn(&self) -> PyPlayerId {
        PyPlayerId(self.sim.state().agent_turn())
    }

    #[getter]
    fn board_size(&self) -> usize {
        self.sim.state().board_size()
    }

    /// Row-major owners: 0 empty, 1 agent 0, 2 agent 1.
    fn locations<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<u8>> {
        PyArray1::from_slice_bound(py, &self.sim.state().locations())
    }

    fn copy(&mut self) -> Self {
        Self {
            sim: self.sim.fork(),
        }
    }

    fn __repr__(&self) -> String {
        format!("Hex({})", self.sim.state())
    }
}
