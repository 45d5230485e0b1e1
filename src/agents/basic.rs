use crate::core::{GameRng, PlayerId};
use crate::simulator::{GameSimulator, JointAction, Rules};

use super::Agent;

/// Picks uniformly among the legal actions.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl<R: Rules> Agent<R> for RandomAgent {
    fn select_action(
        &mut self,
        player: PlayerId,
        _state: &R::State,
        simulator: &GameSimulator<R>,
    ) -> Option<R::Action> {
        self.rng
            .choose(simulator.legal_actions_for(player))
            .cloned()
    }
}

/// Always plays the first legal action.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalAgent;

impl<R: Rules> Agent<R> for FirstLegalAgent {
    fn select_action(
        &mut self,
        player: PlayerId,
        _state: &R::State,
        simulator: &GameSimulator<R>,
    ) -> Option<R::Action> {
        simulator.legal_actions_for(player).first().cloned()
    }
}

/// One uniformly random legal action per acting agent.
pub(crate) fn random_joint_action<R: Rules>(
    simulator: &GameSimulator<R>,
    rng: &mut GameRng,
) -> JointAction<R::Action> {
    simulator
        .legal_actions()
        .iter()
        .filter_map(|(player, legal)| rng.choose(legal).map(|a| (player, a.clone())))
        .collect()
}
