//! Error taxonomy shared by every simulator.
//!
//! All failures are usage errors surfaced synchronously. Nothing is retried
//! internally and a failed call never leaves a simulator half-updated.

use thiserror::Error;

use super::player::PlayerId;
use super::turn::TurnType;

/// Errors returned by simulators, states and board accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    /// Submitted action is not in the agent's current legal set.
    #[error("illegal action {action} from {player} in state {state}")]
    IllegalAction {
        player: PlayerId,
        action: String,
        state: String,
    },

    /// An agent required to act this step submitted nothing.
    #[error("{player} must act this step but submitted no action")]
    MissingAction { player: PlayerId },

    /// No agent can act: the episode is over.
    #[error("state is terminal, no transition is possible")]
    TerminalState,

    /// Board coordinate outside the board.
    #[error("location (x={x}, y={y}) out of bounds for board size {size}")]
    OutOfBounds { x: usize, y: usize, size: usize },

    /// Construction from buffers that do not describe a valid position.
    #[error("malformed state: {0}")]
    MalformedState(String),

    /// The domain cannot run under the requested turn type.
    #[error("turn type {0:?} is not supported by this game")]
    UnsupportedTurnType(TurnType),
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimulatorError>;
