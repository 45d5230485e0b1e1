//! Generic simulator: current state, lazy caches, validated transitions.

use std::cell::OnceCell;

use tracing::debug;

use crate::core::{ActingAgents, GameRng, PlayerId, PlayerMap, SimResult, SimulatorError};

use super::rules::{JointAction, Rules};

/// Mutable holder of the current position of one episode.
///
/// Rewards and legal actions are derived from the state on first read and
/// cached until the next state write. Cloning copies the state, the RNG
/// stream and any cache already computed; nothing is shared with the
/// original.
///
/// Not meant for concurrent use: run independent episodes on independent
/// simulators (see [`GameSimulator::fork`]).
#[derive(Clone, Debug)]
pub struct GameSimulator<R: Rules> {
    rules: R,
    state: R::State,
    rng: GameRng,
    rewards: OnceCell<PlayerMap<i32>>,
    legal_actions: OnceCell<PlayerMap<Vec<R::Action>>>,
}

impl<R: Rules> GameSimulator<R> {
    /// Start a new episode from the rules' initial position.
    pub fn new(rules: R, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let state = rules.initial_state(&mut rng);
        Self::with_rng(rules, state, rng)
    }

    /// Start from an explicit position, for deterministic setups.
    pub fn with_state(rules: R, state: R::State, seed: u64) -> Self {
        Self::with_rng(rules, state, GameRng::new(seed))
    }

    /// Start from an explicit position with an existing RNG stream.
    pub fn with_rng(rules: R, state: R::State, rng: GameRng) -> Self {
        Self {
            rules,
            state,
            rng,
            rewards: OnceCell::new(),
            legal_actions: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn n_agents(&self) -> usize {
        self.rules.n_agents()
    }

    /// Current position.
    #[must_use]
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Replace the current position, invalidating both caches.
    pub fn set_state(&mut self, state: R::State) {
        self.state = state;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.rewards.take();
        self.legal_actions.take();
    }

    /// Reward vector for the current position.
    pub fn rewards(&self) -> &PlayerMap<i32> {
        self.rewards.get_or_init(|| self.rules.rewards(&self.state))
    }

    #[must_use]
    pub fn reward(&self, player: PlayerId) -> i32 {
        self.rewards()[player]
    }

    /// Legal actions for every agent in the current position.
    pub fn legal_actions(&self) -> &PlayerMap<Vec<R::Action>> {
        self.legal_actions
            .get_or_init(|| self.rules.legal_actions(&self.state, self.rewards()))
    }

    /// Legal actions for one agent; empty when it cannot act this step.
    #[must_use]
    pub fn legal_actions_for(&self, player: PlayerId) -> &[R::Action] {
        &self.legal_actions()[player]
    }

    #[must_use]
    pub fn has_legal_actions(&self, player: PlayerId) -> bool {
        !self.legal_actions_for(player).is_empty()
    }

    /// Agents that must submit an action this step.
    #[must_use]
    pub fn acting_agents(&self) -> ActingAgents {
        self.legal_actions()
            .iter()
            .filter(|(_, actions)| !actions.is_empty())
            .map(|(player, _)| player)
            .collect()
    }

    /// True iff no agent has a legal action.
    #[must_use]
    pub fn is_terminal_state(&self) -> bool {
        self.legal_actions().iter().all(|(_, actions)| actions.is_empty())
    }

    /// Validate and apply one step.
    ///
    /// Every agent with a non-empty legal set must supply one of its legal
    /// actions; entries for other agents are ignored. On error the state is
    /// left unchanged.
    pub fn state_transition(&mut self, actions: &JointAction<R::Action>) -> SimResult<()> {
        if self.is_terminal_state() {
            return Err(SimulatorError::TerminalState);
        }

        let mut accepted = JointAction::default();
        for (player, legal) in self.legal_actions().iter() {
            if legal.is_empty() {
                continue;
            }
            let Some(action) = actions.get(&player) else {
                debug!(player = %player, "transition rejected: missing action");
                return Err(SimulatorError::MissingAction { player });
            };
            if !legal.contains(action) {
                debug!(player = %player, ?action, "transition rejected: illegal action");
                return Err(SimulatorError::IllegalAction {
                    player,
                    action: format!("{action:?}"),
                    state: format!("{:?}", self.state),
                });
            }
            accepted.insert(player, action.clone());
        }

        self.rules.apply(&mut self.state, &accepted, &mut self.rng);
        self.invalidate();
        debug!(agents = accepted.len(), "state transition applied");
        Ok(())
    }

    /// Copy with an independent RNG stream.
    ///
    /// Unlike `clone`, the fork will not replay this simulator's future
    /// random draws.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let rng = self.rng.fork();
        Self {
            rules: self.rules.clone(),
            state: self.state.clone(),
            rng,
            rewards: self.rewards.clone(),
            legal_actions: self.legal_actions.clone(),
        }
    }

    /// Whether rewards and legal actions are currently cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.rewards.get().is_some() && self.legal_actions.get().is_some()
    }
}
