//! Episode driver: agents -> simulator -> history.

use tracing::{debug, trace};

use crate::core::{Action, PlayerMap, SimResult, SimulatorConfig, SimulatorError, State};
use crate::history::History;
use crate::simulator::{GameSimulator, JointAction, Rules};

use super::Agent;

/// Everything one finished (or truncated) episode produced.
#[derive(Clone, Debug)]
pub struct EpisodeResult<S: State, A: Action> {
    pub history: History<S, A>,
    /// Rewards of the last state reached.
    pub rewards: PlayerMap<i32>,
    pub steps: usize,
    /// True when the step cap ended the episode before a terminal state.
    pub truncated: bool,
}

/// Runs agents against a simulator until the episode ends.
pub struct Episode;

impl Episode {
    /// Play from the simulator's current state.
    ///
    /// `agents[i]` plays seat `i`. A `max_steps` of 0 means no cap. An agent that returns no action while it
    /// has legal actions ends the run with `MissingAction`.
    pub fn run<R: Rules>(
        simulator: &mut GameSimulator<R>,
        agents: &mut [Box<dyn Agent<R>>],
        max_steps: usize,
    ) -> SimResult<EpisodeResult<R::State, R::Action>> {
        if agents.len() != simulator.n_agents() {
            return Err(SimulatorError::MalformedState(format!(
                "{} agents seated at a {}-agent game",
                agents.len(),
                simulator.n_agents()
            )));
        }

        let mut history = History::create(simulator.state().clone());
        let mut steps = 0;
        let mut truncated = false;

        while !simulator.is_terminal_state() {
            if max_steps != 0 && steps >= max_steps {
                truncated = true;
                break;
            }

            let mut actions = JointAction::default();
            for player in simulator.acting_agents() {
                let agent = &mut agents[player.index()];
                if let Some(action) = agent.select_action(player, simulator.state(), simulator) {
                    actions.insert(player, action);
                }
            }

            simulator.state_transition(&actions)?;
            history.add(simulator.state().clone(), actions);
            steps += 1;
            trace!(step = steps, "episode step");
        }

        let rewards = simulator.rewards().clone();
        debug!(steps, truncated, rewards = ?rewards.as_slice(), "episode finished");
        Ok(EpisodeResult {
            history,
            rewards,
            steps,
            truncated,
        })
    }

    /// Fresh simulator from `config`, then [`Episode::run`].
    pub fn run_with_config<R: Rules>(
        rules: R,
        agents: &mut [Box<dyn Agent<R>>],
        config: &SimulatorConfig,
    ) -> SimResult<EpisodeResult<R::State, R::Action>> {
        if rules.turn_type() != config.turn_type {
            return Err(SimulatorError::UnsupportedTurnType(config.turn_type));
        }
        let mut simulator = GameSimulator::new(rules, config.seed);
        Self::run(&mut simulator, agents, config.max_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{FirstLegalAgent, RandomAgent};
    use crate::games::hex::{Hex, HexBuilder};

    fn agents(seed: u64) -> Vec<Box<dyn Agent<Hex>>> {
        vec![Box::new(RandomAgent::new(seed)), Box::new(FirstLegalAgent)]
    }

    #[test]
    fn test_runs_to_terminal() {
        let mut sim = HexBuilder::new().board_size(4).build(1).unwrap();
        let result = Episode::run(&mut sim, &mut agents(2), 100).unwrap();

        assert!(!result.truncated);
        assert!(sim.is_terminal_state());
        assert_eq!(result.history.steps(), result.steps);
        assert_eq!(&result.history.last().state, sim.state());
        assert_ne!(result.rewards.as_slice(), &[0, 0]);
    }

    #[test]
    fn test_step_cap_truncates() {
        let mut sim = HexBuilder::new().board_size(5).build(1).unwrap();
        let result = Episode::run(&mut sim, &mut agents(2), 3).unwrap();

        assert!(result.truncated);
        assert_eq!(result.steps, 3);
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn test_zero_step_cap_is_unlimited() {
        let rules = HexBuilder::new().board_size(3).rules().unwrap();
        let config = SimulatorConfig::new().with_max_steps(0);
        let result = Episode::run_with_config(rules, &mut agents(4), &config).unwrap();

        assert!(!result.truncated);
        assert!(result.steps > 0);
        assert_ne!(result.rewards.as_slice(), &[0, 0]);
    }

    #[test]
    fn test_rejects_wrong_agent_count() {
        let mut sim = HexBuilder::new().board_size(3).build(1).unwrap();
        let mut one: Vec<Box<dyn Agent<Hex>>> = vec![Box::new(FirstLegalAgent)];
        assert!(matches!(
            Episode::run(&mut sim, &mut one, 10),
            Err(SimulatorError::MalformedState(_))
        ));
    }

    #[test]
    fn test_run_with_config_is_reproducible() {
        let rules = HexBuilder::new().board_size(4).rules().unwrap();
        let config = SimulatorConfig::new().with_seed(5).with_max_steps(50);

        let a = Episode::run_with_config(rules.clone(), &mut agents(8), &config).unwrap();
        let b = Episode::run_with_config(rules, &mut agents(8), &config).unwrap();
        assert_eq!(a.history, b.history);
    }
}
