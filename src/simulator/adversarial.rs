//! Two-agent zero-sum specialisation.
//!
//! Adversarial games resolve every position to one of three canonical
//! reward vectors. Only the neutral vector may appear before the game ends.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

use super::game::GameSimulator;
use super::rules::Rules;

/// Number of agents in an adversarial game.
pub const ADVERSARIAL_AGENTS: usize = 2;

/// Result of an adversarial position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Agent 0 has won: rewards `[1, -1]`.
    FirstAgentWins,
    /// Agent 1 has won: rewards `[-1, 1]`.
    SecondAgentWins,
    /// Undecided: rewards `[0, 0]`.
    Neutral,
}

impl Outcome {
    /// Outcome in which `player` has won.
    #[must_use]
    pub fn win_for(player: PlayerId) -> Self {
        match player.index() {
            0 => Outcome::FirstAgentWins,
            _ => Outcome::SecondAgentWins,
        }
    }

    /// Canonical reward vector.
    #[must_use]
    pub fn rewards(self) -> PlayerMap<i32> {
        let rewards = match self {
            Outcome::FirstAgentWins => vec![1, -1],
            Outcome::SecondAgentWins => vec![-1, 1],
            Outcome::Neutral => vec![0, 0],
        };
        PlayerMap::from_vec(rewards)
    }

    /// Inverse of [`Outcome::rewards`]; `None` for a non-canonical vector.
    #[must_use]
    pub fn from_rewards(rewards: &PlayerMap<i32>) -> Option<Self> {
        match rewards.as_slice() {
            [1, -1] => Some(Outcome::FirstAgentWins),
            [-1, 1] => Some(Outcome::SecondAgentWins),
            [0, 0] => Some(Outcome::Neutral),
            _ => None,
        }
    }

    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::FirstAgentWins => Some(PlayerId::new(0)),
            Outcome::SecondAgentWins => Some(PlayerId::new(1)),
            Outcome::Neutral => None,
        }
    }

    #[must_use]
    pub fn is_neutral(self) -> bool {
        self == Outcome::Neutral
    }
}

/// Rules of a two-agent zero-sum game.
///
/// Implementors should derive `Rules::rewards` from `outcome`.
pub trait AdversarialRules: Rules {
    fn outcome(&self, state: &Self::State) -> Outcome;
}

impl<R: AdversarialRules> GameSimulator<R> {
    /// Outcome of the current position.
    pub fn outcome(&self) -> Outcome {
        let outcome = self.rules().outcome(self.state());
        debug_assert_eq!(outcome.rewards(), *self.rewards());
        debug_assert!(
            outcome.is_neutral() || self.is_terminal_state(),
            "decided outcome {outcome:?} in a non-terminal state"
        );
        outcome
    }
}
