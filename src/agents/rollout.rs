//! Flat Monte-Carlo agent.
//!
//! Each candidate action is scored by the mean reward of random playouts
//! started right after it. Playouts run on private simulators with their
//! own RNG streams, so the simulator being queried is never touched.

use tracing::trace;

use crate::core::{GameRng, PlayerId};
use crate::simulator::{GameSimulator, Rules};

use super::basic::random_joint_action;
use super::Agent;

/// Flat Monte-Carlo rollouts per candidate action.
#[derive(Clone, Debug)]
pub struct RolloutAgent {
    rng: GameRng,
    playouts: u32,
    max_depth: usize,
}

impl RolloutAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            playouts: 16,
            max_depth: 1_000,
        }
    }

    /// Playouts per candidate action (at least 1).
    pub fn with_playouts(mut self, playouts: u32) -> Self {
        self.playouts = playouts.max(1);
        self
    }

    /// Steps after which a playout is scored as it stands.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Total reward for `player` over all playouts after `action`.
    fn score<R: Rules>(
        &mut self,
        player: PlayerId,
        action: &R::Action,
        state: &R::State,
        simulator: &GameSimulator<R>,
    ) -> i64 {
        let mut total = 0;
        for _ in 0..self.playouts {
            let mut sim = GameSimulator::with_rng(
                simulator.rules().clone(),
                state.clone(),
                self.rng.fork(),
            );

            let mut actions = random_joint_action(&sim, &mut self.rng);
            actions.insert(player, action.clone());
            if sim.state_transition(&actions).is_err() {
                continue;
            }

            let mut depth = 0;
            while !sim.is_terminal_state() && depth < self.max_depth {
                let actions = random_joint_action(&sim, &mut self.rng);
                if sim.state_transition(&actions).is_err() {
                    break;
                }
                depth += 1;
            }
            total += i64::from(sim.reward(player));
        }
        total
    }
}

impl<R: Rules> Agent<R> for RolloutAgent {
    fn select_action(
        &mut self,
        player: PlayerId,
        state: &R::State,
        simulator: &GameSimulator<R>,
    ) -> Option<R::Action> {
        let legal = simulator.legal_actions_for(player);
        match legal {
            [] => return None,
            [only] => return Some(only.clone()),
            _ => {}
        }

        let mut best: Option<(i64, &R::Action)> = None;
        for action in legal {
            let score = self.score(player, action, state, simulator);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, action));
            }
        }

        trace!(
            player = %player,
            candidates = legal.len(),
            best = best.map(|(score, _)| score),
            "rollout selection"
        );
        best.map(|(_, action)| action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hex::{HexAction, HexBuilder};
    use crate::simulator::single_action;

    #[test]
    fn test_takes_immediate_win() {
        // 2x2 board: (1, 1) wins for agent 0, (0, 0) hands agent 1 the win.
        let mut sim = HexBuilder::new().board_size(2).build(0).unwrap();
        let first = PlayerId::new(0);
        let second = PlayerId::new(1);
        for (player, x, y) in [(first, 0, 1), (second, 1, 0)] {
            sim.state_transition(&single_action(player, HexAction::new(x, y)))
                .unwrap();
        }

        let mut agent = RolloutAgent::new(3).with_playouts(4);
        let state = sim.state().clone();
        let action = agent.select_action(first, &state, &sim);

        assert_eq!(action, Some(HexAction::new(1, 1)));
        // Searching never advances the queried simulator.
        assert_eq!(sim.state(), &state);
    }

    #[test]
    fn test_no_action_when_not_acting() {
        let sim = HexBuilder::new().board_size(3).build(0).unwrap();
        let mut agent = RolloutAgent::new(0);
        let state = sim.state().clone();
        assert_eq!(agent.select_action(PlayerId::new(1), &state, &sim), None);
    }
}
