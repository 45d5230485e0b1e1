//! Backgammon rules and simulator construction.

use tracing::debug;

use crate::core::{GameRng, PlayerId, PlayerMap, SimResult, SimulatorConfig, SimulatorError, TurnType};
use crate::simulator::{AdversarialRules, GameSimulator, JointAction, Outcome, Rules, ADVERSARIAL_AGENTS};

use super::action::BackgammonAction;
use super::movegen::legal_moves;
use super::state::{piece, BackgammonState, FIRST_BAR, SECOND_BAR};

/// Two-agent Backgammon, sequential turns, dice from the simulator's RNG.
#[derive(Clone, Debug, Default)]
pub struct Backgammon;

/// Simulator over Backgammon rules.
pub type BackgammonSimulator = GameSimulator<Backgammon>;

impl Backgammon {
    /// New game from the opening roll.
    pub fn simulator(seed: u64) -> BackgammonSimulator {
        GameSimulator::new(Backgammon, seed)
    }

    /// Game continuing from an explicit position.
    pub fn simulator_with_state(state: BackgammonState, seed: u64) -> BackgammonSimulator {
        GameSimulator::with_state(Backgammon, state, seed)
    }

    /// New game from shared simulator settings.
    pub fn from_config(config: &SimulatorConfig) -> SimResult<BackgammonSimulator> {
        BackgammonBuilder::new()
            .turn_type(config.turn_type)
            .build(config.seed)
    }

    /// Opening roll: reroll ties, the higher die moves first and keeps its
    /// value, the other die is rolled again.
    fn opening_roll(rng: &mut GameRng) -> ([u8; 2], PlayerId) {
        let (mut first, mut second) = rng.roll_dice();
        while first == second {
            (first, second) = rng.roll_dice();
        }
        if first > second {
            ([first, rng.roll_die()], PlayerId::new(0))
        } else {
            ([rng.roll_die(), second], PlayerId::new(1))
        }
    }
}

impl Rules for Backgammon {
    type State = BackgammonState;
    type Action = BackgammonAction;

    fn n_agents(&self) -> usize {
        ADVERSARIAL_AGENTS
    }

    fn initial_state(&self, rng: &mut GameRng) -> BackgammonState {
        let (dice, agent_turn) = Self::opening_roll(rng);
        BackgammonState::opening(dice, agent_turn)
    }

    fn rewards(&self, state: &BackgammonState) -> PlayerMap<i32> {
        self.outcome(state).rewards()
    }

    fn legal_actions(
        &self,
        state: &BackgammonState,
        rewards: &PlayerMap<i32>,
    ) -> PlayerMap<Vec<BackgammonAction>> {
        let finished = rewards.as_slice().iter().any(|&r| r != 0);
        let mover = state.agent_turn();
        PlayerMap::new(ADVERSARIAL_AGENTS, |player| {
            if player == mover && !finished {
                legal_moves(state)
            } else {
                Vec::new()
            }
        })
    }

    fn apply(
        &self,
        state: &mut BackgammonState,
        actions: &JointAction<BackgammonAction>,
        rng: &mut GameRng,
    ) {
        let mover = state.agent_turn();
        let sign = piece(mover);

        if let Some(action) = actions.get(&mover) {
            let locations = state.locations_mut();
            // Canonical order is ascending; agent 1 travels downward.
            let ordered: Vec<_> = if sign > 0 {
                action.moves().to_vec()
            } else {
                action.moves().iter().rev().copied().collect()
            };
            for mv in ordered {
                let from = usize::from(mv.from);
                let to = mv.destination(sign);
                if (1..=24).contains(&to) {
                    let to = to as usize;
                    if locations[to] * sign < 0 {
                        locations[to] = sign;
                        if sign > 0 {
                            locations[SECOND_BAR] -= 1;
                        } else {
                            locations[FIRST_BAR] += 1;
                        }
                    } else {
                        locations[to] += sign;
                    }
                }
                locations[from] -= sign;
            }
            debug!(player = %mover, action = %action, "backgammon moves applied");
        }

        let (first, second) = rng.roll_dice();
        state.set_dice([first, second]);
        state.set_agent_turn(mover.next(ADVERSARIAL_AGENTS));
    }
}

impl AdversarialRules for Backgammon {
    fn outcome(&self, state: &BackgammonState) -> Outcome {
        if state.checkers_in_play(PlayerId::new(0)) == 0 {
            Outcome::FirstAgentWins
        } else if state.checkers_in_play(PlayerId::new(1)) == 0 {
            Outcome::SecondAgentWins
        } else {
            Outcome::Neutral
        }
    }
}

/// Builder for Backgammon simulators.
///
/// ```
/// use rust_turnsim::games::backgammon::BackgammonBuilder;
///
/// let sim = BackgammonBuilder::new().build(7).unwrap();
/// assert!(!sim.is_terminal_state());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BackgammonBuilder {
    turn_type: TurnType,
    state: Option<BackgammonState>,
}

impl BackgammonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backgammon only supports sequential turns; anything else fails in
    /// `build`.
    pub fn turn_type(mut self, turn_type: TurnType) -> Self {
        self.turn_type = turn_type;
        self
    }

    /// Start from this position instead of an opening roll.
    pub fn state(mut self, state: BackgammonState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn build(self, seed: u64) -> SimResult<BackgammonSimulator> {
        if self.turn_type != TurnType::Sequential {
            return Err(SimulatorError::UnsupportedTurnType(self.turn_type));
        }
        Ok(match self.state {
            Some(state) => Backgammon::simulator_with_state(state, seed),
            None => Backgammon::simulator(seed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::backgammon::action::BackgammonMove;
    use crate::games::backgammon::state::{N_LOCATIONS, STARTING_LOCATIONS};
    use crate::simulator::single_action;

    #[test]
    fn test_initial_state_is_deterministic() {
        for seed in 0..20 {
            let sim = Backgammon::simulator(seed);
            assert_eq!(sim.state().locations(), &STARTING_LOCATIONS);
            assert_eq!(sim.state(), Backgammon::simulator(seed).state());
            assert!(sim.has_legal_actions(sim.state().agent_turn()));
        }
    }

    #[test]
    fn test_opening_roll_winner_moves_first() {
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let mut replay = GameRng::new(seed);
            let (dice, first) = Backgammon::opening_roll(&mut rng);

            let (mut a, mut b) = replay.roll_dice();
            while a == b {
                (a, b) = replay.roll_dice();
            }
            if a > b {
                assert_eq!(first, PlayerId::new(0));
                assert_eq!(dice[0], a);
            } else {
                assert_eq!(first, PlayerId::new(1));
                assert_eq!(dice[1], b);
            }
        }
    }

    #[test]
    fn test_transition_passes_turn_and_rolls() {
        let state = BackgammonState::starting([6, 5], PlayerId::new(0)).unwrap();
        let mut sim = Backgammon::simulator_with_state(state, 1);
        let action = sim.legal_actions_for(PlayerId::new(0))[0].clone();

        sim.state_transition(&single_action(PlayerId::new(0), action))
            .unwrap();

        assert_eq!(sim.state().agent_turn(), PlayerId::new(1));
        assert!(sim.has_legal_actions(PlayerId::new(1)));
        assert!(!sim.has_legal_actions(PlayerId::new(0)));
        for player in PlayerId::all(2) {
            assert_eq!(sim.state().checkers_in_play(player), 15);
        }
    }

    #[test]
    fn test_hit_sends_checker_to_bar() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[5] = 1;
        locations[8] = -1;
        locations[20] = -3;
        let state = BackgammonState::new(locations, [3, 4], PlayerId::new(0)).unwrap();
        let mut sim = Backgammon::simulator_with_state(state, 3);
        let hit = BackgammonAction::new([BackgammonMove::new(5, 3), BackgammonMove::new(8, 4)]);

        sim.state_transition(&single_action(PlayerId::new(0), hit))
            .unwrap();

        let board = sim.state().locations();
        assert_eq!(board[5], 0);
        assert_eq!(board[8], 0);
        assert_eq!(board[12], 1);
        assert_eq!(board[SECOND_BAR], -1);
        assert_eq!(sim.state().checkers_in_play(PlayerId::new(1)), 4);
    }

    #[test]
    fn test_agent_one_moves_in_travel_order() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[SECOND_BAR] = -1;
        locations[10] = 2;
        let state = BackgammonState::new(locations, [6, 4], PlayerId::new(1)).unwrap();
        let mut sim = Backgammon::simulator_with_state(state, 0);
        // Enter on 19 then continue to 15.
        let action = BackgammonAction::new([BackgammonMove::new(25, 6), BackgammonMove::new(19, 4)]);
        assert!(sim.legal_actions_for(PlayerId::new(1)).contains(&action));

        sim.state_transition(&single_action(PlayerId::new(1), action))
            .unwrap();

        let board = sim.state().locations();
        assert_eq!(board[SECOND_BAR], 0);
        assert_eq!(board[19], 0);
        assert_eq!(board[15], -1);
    }

    #[test]
    fn test_bearing_off_last_checker_wins() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[23] = 1;
        locations[3] = -2;
        let state = BackgammonState::new(locations, [2, 2], PlayerId::new(0)).unwrap();
        let mut sim = Backgammon::simulator_with_state(state, 0);
        let off = BackgammonAction::new([BackgammonMove::new(23, 2)]);
        assert!(sim.legal_actions_for(PlayerId::new(0)).contains(&off));

        sim.state_transition(&single_action(PlayerId::new(0), off))
            .unwrap();

        assert!(sim.is_terminal_state());
        assert_eq!(sim.outcome(), Outcome::FirstAgentWins);
        assert_eq!(sim.rewards().as_slice(), &[1, -1]);
        assert_eq!(
            sim.state_transition(&JointAction::default()),
            Err(SimulatorError::TerminalState)
        );
    }

    #[test]
    fn test_builder_rejects_other_turn_types() {
        let err = BackgammonBuilder::new()
            .turn_type(TurnType::Simultaneous)
            .build(0)
            .unwrap_err();
        assert_eq!(err, SimulatorError::UnsupportedTurnType(TurnType::Simultaneous));

        let config = SimulatorConfig::new().with_turn_type(TurnType::Random);
        assert!(Backgammon::from_config(&config).is_err());
        assert!(Backgammon::from_config(&SimulatorConfig::default()).is_ok());
    }
}
