//! Core types: agents, value contracts, turn model, RNG, errors, configuration.
//!
//! Everything here is game-agnostic. Domains build on these types through
//! the `Rules` trait in `simulator`.

pub mod player;
pub mod rng;
pub mod value;
pub mod turn;
pub mod error;
pub mod config;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, DIE_FACES};
pub use value::{Action, State};
pub use turn::{ActingAgents, TurnTracker, TurnType};
pub use error::{SimResult, SimulatorError};
pub use config::SimulatorConfig;
