//! # rust-turnsim
//!
//! Multi-agent, turn-based games as explicit, queryable state machines.
//! Agents (search, learning, scripted) drive a simulator by asking for legal
//! actions and rewards, submitting one action per acting agent, and copying
//! the simulator to look ahead.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Core**: the simulator knows nothing about boards or
//!    dice. Domains plug in through the `Rules` trait.
//!
//! 2. **Validated Transitions**: an illegal or missing action is rejected
//!    with a `SimulatorError` and the simulator is left as it was.
//!
//! 3. **Deterministic Per Seed**: every random draw comes from a seeded
//!    `GameRng`, so an episode replays exactly from its seed.
//!
//! ## Architecture
//!
//! - **Lazy caches**: rewards and legal actions are computed on first read
//!   and dropped on every state write.
//!
//! - **Value-type states**: cloning a state or simulator is a deep copy;
//!   look-ahead never disturbs the original.
//!
//! - **Persistent history**: `History` is backed by `im-rs`, so branching
//!   an episode log is O(1).
//!
//! ## Modules
//!
//! - `core`: agents, value contracts, turn model, RNG, errors, configuration
//! - `simulator`: `Rules` trait, `GameSimulator`, adversarial outcomes
//! - `history`: episode trajectory
//! - `agents`: `Agent` trait, reference agents, episode driver
//! - `games`: Backgammon and Hex

pub mod core;
pub mod simulator;
pub mod history;
pub mod agents;
pub mod games;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    Action, State,
    ActingAgents, TurnTracker, TurnType,
    SimResult, SimulatorError, SimulatorConfig,
};

pub use crate::simulator::{
    AdversarialRules, GameSimulator, JointAction, Outcome, Rules, single_action,
};

pub use crate::history::{History, HistoryNode};

pub use crate::agents::{Agent, Episode, EpisodeResult, FirstLegalAgent, RandomAgent, RolloutAgent, UctAgent};

pub use crate::games::backgammon::{Backgammon, BackgammonAction, BackgammonMove, BackgammonState};
pub use crate::games::hex::{Hex, HexAction, HexBuilder, HexState};
