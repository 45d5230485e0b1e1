//! Agents and the episode driver.
//!
//! An agent picks one action for its seat given the current state and a
//! read-only view of the simulator. Agents that search do so on their own
//! copies; they never advance the simulator they are handed.
//!
//! ## Provided agents
//!
//! - `RandomAgent`: uniform over the legal set
//! - `FirstLegalAgent`: first legal action, fully deterministic
//! - `RolloutAgent`: flat Monte-Carlo, random playouts per candidate action
//! - `UctAgent`: UCT tree search with sparse sampling of chance outcomes

mod basic;
mod episode;
mod rollout;
mod uct;

pub use basic::{FirstLegalAgent, RandomAgent};
pub use episode::{Episode, EpisodeResult};
pub use rollout::RolloutAgent;
pub use uct::UctAgent;

use crate::core::PlayerId;
use crate::simulator::{GameSimulator, Rules};

/// Decision maker for one seat.
pub trait Agent<R: Rules> {
    /// Choose an action for `player`.
    ///
    /// Returns `None` when `player` has no legal action in `state`.
    fn select_action(
        &mut self,
        player: PlayerId,
        state: &R::State,
        simulator: &GameSimulator<R>,
    ) -> Option<R::Action>;
}
