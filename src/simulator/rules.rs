//! Rules trait for game domains.
//!
//! Domains implement `Rules` to define:
//! - The initial position
//! - Rewards for a position
//! - Legal actions per agent
//! - How a validated joint action changes the position
//!
//! `GameSimulator` calls into `Rules` for all of these and owns caching,
//! validation and state installation, so domains never see an illegal
//! action.

use std::fmt::Debug;

use rustc_hash::FxHashMap;

use crate::core::{Action, GameRng, PlayerId, PlayerMap, State, TurnType};

/// Actions submitted for one step, keyed by agent.
///
/// Entries for agents that are not acting this step are ignored.
pub type JointAction<A> = FxHashMap<PlayerId, A>;

/// Build a joint action in which only `player` acts.
///
/// ```
/// use rust_turnsim::core::PlayerId;
/// use rust_turnsim::simulator::single_action;
///
/// let actions = single_action(PlayerId::new(1), "pass");
/// assert_eq!(actions.get(&PlayerId::new(1)), Some(&"pass"));
/// assert_eq!(actions.len(), 1);
/// ```
pub fn single_action<A>(player: PlayerId, action: A) -> JointAction<A> {
    let mut actions = JointAction::default();
    actions.insert(player, action);
    actions
}

/// Game rules driven by a [`GameSimulator`](super::GameSimulator).
///
/// ## Implementation Notes
///
/// - `rewards`: 0 for every agent while the position is not terminal
/// - `legal_actions`: an empty list means the agent cannot act this step;
///   every list empty means the position is terminal
/// - `apply`: only ever receives actions taken from `legal_actions`, one per
///   agent with a non-empty list. Stochastic effects draw from `rng`.
pub trait Rules: Clone + Debug {
    type State: State;
    type Action: Action;

    /// Number of agents, fixed for the lifetime of the rules.
    fn n_agents(&self) -> usize;

    /// How acting agents are chosen.
    fn turn_type(&self) -> TurnType {
        TurnType::Sequential
    }

    /// Fresh start-of-episode position.
    fn initial_state(&self, rng: &mut GameRng) -> Self::State;

    /// Reward vector for a position.
    fn rewards(&self, state: &Self::State) -> PlayerMap<i32>;

    /// Legal actions for every agent in a position.
    ///
    /// `rewards` is the already-computed reward vector for `state`.
    fn legal_actions(
        &self,
        state: &Self::State,
        rewards: &PlayerMap<i32>,
    ) -> PlayerMap<Vec<Self::Action>>;

    /// Apply a validated joint action in place.
    fn apply(
        &self,
        state: &mut Self::State,
        actions: &JointAction<Self::Action>,
        rng: &mut GameRng,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_action_ignores_others() {
        let actions = single_action(PlayerId::new(0), 3u8);
        assert_eq!(actions.get(&PlayerId::new(0)), Some(&3));
        assert!(actions.get(&PlayerId::new(1)).is_none());
    }
}
