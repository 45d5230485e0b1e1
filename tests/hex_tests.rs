//! Hex integration tests: placement legality, turn types, connection.

use rust_turnsim::core::{GameRng, PlayerId, SimulatorError, TurnTracker, TurnType};
use rust_turnsim::games::hex::{HexAction, HexBuilder, HexSimulator, HexState};
use rust_turnsim::simulator::{single_action, Outcome};

fn first() -> PlayerId {
    PlayerId::new(0)
}

fn second() -> PlayerId {
    PlayerId::new(1)
}

fn play_out(sim: &mut HexSimulator, rng: &mut GameRng) -> usize {
    let mut steps = 0;
    while !sim.is_terminal_state() {
        let mover = sim.state().agent_turn();
        let action = *rng.choose(sim.legal_actions_for(mover)).unwrap();
        sim.state_transition(&single_action(mover, action)).unwrap();
        steps += 1;
    }
    steps
}

#[test]
fn test_occupied_cell_is_illegal() {
    let mut sim = HexBuilder::new().board_size(5).build(0).unwrap();
    sim.state_transition(&single_action(first(), HexAction::new(0, 0)))
        .unwrap();

    let err = sim
        .state_transition(&single_action(second(), HexAction::new(0, 0)))
        .unwrap_err();
    assert!(matches!(err, SimulatorError::IllegalAction { player, .. } if player == second()));

    sim.state_transition(&single_action(second(), HexAction::new(0, 1)))
        .unwrap();
    let state = sim.state();
    assert_eq!(state.location(0, 0), Ok(Some(first())));
    assert_eq!(state.location(0, 1), Ok(Some(second())));
    assert_eq!(state.agent_turn(), first());
    assert_eq!(state.n_pieces(), 2);
}

#[test]
fn test_out_of_bounds_queries() {
    let sim = HexBuilder::new().board_size(5).build(0).unwrap();
    assert_eq!(
        sim.state().location(0, 5),
        Err(SimulatorError::OutOfBounds { x: 0, y: 5, size: 5 })
    );
    assert!(sim.state().is_location_empty(7, 7).is_err());
}

#[test]
fn test_off_board_action_is_illegal() {
    let mut sim = HexBuilder::new().board_size(3).build(0).unwrap();
    assert!(matches!(
        sim.state_transition(&single_action(first(), HexAction::new(3, 0))),
        Err(SimulatorError::IllegalAction { .. })
    ));
}

#[test]
fn test_full_board_always_has_a_winner() {
    for seed in 0..20 {
        let mut sim = HexBuilder::new().board_size(5).build(seed).unwrap();
        let mut rng = GameRng::new(seed);
        let steps = play_out(&mut sim, &mut rng);

        assert!(steps <= 25);
        let outcome = sim.outcome();
        assert!(!outcome.is_neutral());
        assert!(sim.acting_agents().is_empty());
    }
}

#[test]
fn test_random_turn_type_runs() {
    for seed in 0..10 {
        let mut sim = HexBuilder::new()
            .board_size(4)
            .turn_type(TurnType::Random)
            .build(seed)
            .unwrap();
        let mut rng = GameRng::new(seed + 1);
        play_out(&mut sim, &mut rng);
        assert!(!sim.outcome().is_neutral());
    }
}

#[test]
fn test_swap_then_play_on() {
    let mut sim = HexBuilder::new()
        .board_size(5)
        .swap_rule(true)
        .build(0)
        .unwrap();
    sim.state_transition(&single_action(first(), HexAction::new(2, 0)))
        .unwrap();
    sim.state_transition(&single_action(second(), HexAction::new(2, 0)))
        .unwrap();

    assert_eq!(sim.state().location(0, 2), Ok(Some(second())));
    assert_eq!(sim.state().location(2, 0), Ok(None));
    assert_eq!(sim.state().agent_turn(), first());
    assert_eq!(sim.state().moves_played(), 2);

    // The occupied cell is no longer up for grabs.
    assert!(sim
        .state_transition(&single_action(first(), HexAction::new(0, 2)))
        .is_err());
}

#[test]
fn test_set_state_recomputes_outcome() {
    let mut sim = HexBuilder::new().board_size(3).build(0).unwrap();
    let mut state = HexState::new(3, TurnTracker::sequential_from(2, second())).unwrap();
    for y in 0..3 {
        state.set_location(1, y, Some(second())).unwrap();
    }
    sim.set_state(state);

    assert_eq!(sim.outcome(), Outcome::SecondAgentWins);
    assert!(sim.is_terminal_state());
}

#[test]
fn test_copy_does_not_share_board() {
    let mut sim = HexBuilder::new().board_size(4).build(0).unwrap();
    let copy = sim.clone();
    sim.state_transition(&single_action(first(), HexAction::new(1, 1)))
        .unwrap();

    assert_eq!(copy.state().n_pieces(), 0);
    assert_eq!(copy.legal_actions_for(first()).len(), 16);
    assert_eq!(sim.legal_actions_for(second()).len(), 15);
}
