//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{PlayerId, SimulatorError};

/// Python wrapper for PlayerId.
#[pyclass(name = "PlayerId")]
#[derive(Clone, Debug)]
pub struct PyPlayerId(pub PlayerId);

#[pymethods]
impl PyPlayerId {
    #[new]
    fn new(id: u8) -> Self {
        Self(PlayerId::new(id))
    }

    /// Get the player index (0-based).
    fn index(&self) -> usize {
        self.0.index()
    }

    #[getter]
    fn id(&self) -> u8 {
        self.0 .0
    }

    fn __repr__(&self) -> String {
        format!("PlayerId({})", self.0 .0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0 .0)
    }
}

/// Usage errors surface as `ValueError` carrying the error message.
impl From<SimulatorError> for PyErr {
    fn from(err: SimulatorError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}
