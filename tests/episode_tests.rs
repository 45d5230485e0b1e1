//! Episode driver tests across both domains.

use rust_turnsim::agents::{Agent, Episode, FirstLegalAgent, RandomAgent, RolloutAgent, UctAgent};
use rust_turnsim::core::{PlayerId, SimulatorConfig, SimulatorError, TurnType};
use rust_turnsim::games::backgammon::{Backgammon, BackgammonAction, N_CHECKERS};
use rust_turnsim::games::hex::{Hex, HexAction, HexBuilder};
use rust_turnsim::simulator::{GameSimulator, Outcome, Rules};

#[test]
fn test_backgammon_episode_history_is_consistent() {
    let mut sim = Backgammon::simulator(21);
    let initial = sim.state().clone();
    let mut agents: Vec<Box<dyn Agent<Backgammon>>> =
        vec![Box::new(RandomAgent::new(1)), Box::new(FirstLegalAgent)];

    let result = Episode::run(&mut sim, &mut agents, 5_000).unwrap();

    assert_eq!(result.history.initial_state(), &initial);
    assert_eq!(result.history.steps(), result.steps);
    assert_eq!(&result.history.last().state, sim.state());

    // Exactly one agent acts per backgammon step.
    for node in result.history.iter().skip(1) {
        assert_eq!(node.actions.len(), 1);
    }
    for node in result.history.nodes().iter() {
        for player in PlayerId::all(2) {
            assert_eq!(
                node.state.checkers_in_play(player) + node.state.borne_off(player),
                N_CHECKERS
            );
        }
    }

    if !result.truncated {
        let outcome = Outcome::from_rewards(&result.rewards).unwrap();
        assert!(!outcome.is_neutral());
    }
}

#[test]
fn test_actions_alternate_between_agents() {
    let mut sim = Backgammon::simulator(2);
    let mut agents: Vec<Box<dyn Agent<Backgammon>>> =
        vec![Box::new(FirstLegalAgent), Box::new(FirstLegalAgent)];
    let result = Episode::run(&mut sim, &mut agents, 40).unwrap();

    let movers: Vec<PlayerId> = result
        .history
        .iter()
        .skip(1)
        .map(|node| *node.actions.keys().next().unwrap())
        .collect();
    for pair in movers.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    let first_actions: Vec<&BackgammonAction> =
        result.history.actions_of(movers[0]).collect();
    assert_eq!(first_actions.len(), movers.iter().filter(|&&p| p == movers[0]).count());
}

#[test]
fn test_rollout_beats_random_at_hex() {
    let rules = HexBuilder::new().board_size(3).rules().unwrap();
    let mut wins = 0;
    for seed in 0..6 {
        let mut agents: Vec<Box<dyn Agent<Hex>>> = vec![
            Box::new(RolloutAgent::new(seed).with_playouts(24)),
            Box::new(RandomAgent::new(seed + 50)),
        ];
        let mut sim = GameSimulator::new(rules.clone(), seed);
        let result = Episode::run(&mut sim, &mut agents, 100).unwrap();
        if result.rewards.as_slice() == [1, -1] {
            wins += 1;
        }
    }
    // Agent 0 moves first on 3x3 and should win most games.
    assert!(wins >= 4, "rollout agent won only {wins} of 6");
}

#[test]
fn test_uct_beats_random_at_hex() {
    let rules = HexBuilder::new().board_size(3).rules().unwrap();
    let mut wins = 0;
    for seed in 0..6 {
        let mut agents: Vec<Box<dyn Agent<Hex>>> = vec![
            Box::new(UctAgent::new(seed).with_iterations(300)),
            Box::new(RandomAgent::new(seed + 50)),
        ];
        let mut sim = GameSimulator::new(rules.clone(), seed);
        let result = Episode::run(&mut sim, &mut agents, 100).unwrap();
        if result.rewards.as_slice() == [1, -1] {
            wins += 1;
        }
    }
    assert!(wins >= 5, "uct agent won only {wins} of 6");
}

#[test]
fn test_uct_plays_backgammon_legally() {
    let mut sim = Backgammon::simulator(8);
    let mut agents: Vec<Box<dyn Agent<Backgammon>>> = vec![
        Box::new(UctAgent::new(1).with_iterations(40).with_max_depth(8)),
        Box::new(RandomAgent::new(2)),
    ];
    let result = Episode::run(&mut sim, &mut agents, 20).unwrap();
    assert_eq!(result.steps, result.history.steps());
}

#[test]
fn test_run_with_config_checks_turn_type() {
    let rules = HexBuilder::new().board_size(3).rules().unwrap();
    assert_eq!(rules.turn_type(), TurnType::Sequential);
    let mut agents: Vec<Box<dyn Agent<Hex>>> =
        vec![Box::new(FirstLegalAgent), Box::new(FirstLegalAgent)];

    let config = SimulatorConfig::new().with_turn_type(TurnType::Random);
    assert_eq!(
        Episode::run_with_config(rules.clone(), &mut agents, &config).unwrap_err(),
        SimulatorError::UnsupportedTurnType(TurnType::Random)
    );

    let result = Episode::run_with_config(rules, &mut agents, &SimulatorConfig::new()).unwrap();
    assert!(!result.truncated);
    assert!(result.steps <= 9);
}

/// Agent that never answers.
struct Silent;

impl Agent<Hex> for Silent {
    fn select_action(
        &mut self,
        _player: PlayerId,
        _state: &<Hex as Rules>::State,
        _simulator: &GameSimulator<Hex>,
    ) -> Option<HexAction> {
        None
    }
}

#[test]
fn test_silent_agent_ends_with_missing_action() {
    let mut sim = HexBuilder::new().board_size(3).build(0).unwrap();
    let mut agents: Vec<Box<dyn Agent<Hex>>> = vec![Box::new(FirstLegalAgent), Box::new(Silent)];

    let err = Episode::run(&mut sim, &mut agents, 10).unwrap_err();
    assert_eq!(
        err,
        SimulatorError::MissingAction {
            player: PlayerId::new(1)
        }
    );
    // The first move stands; the failed one left no trace.
    assert_eq!(sim.state().n_pieces(), 1);
}
