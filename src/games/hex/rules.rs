//! Hex rules: placement, optional swap, side-to-side connection.

use tracing::debug;

use crate::core::{GameRng, PlayerId, PlayerMap, SimResult, SimulatorConfig, SimulatorError, TurnTracker, TurnType};
use crate::simulator::{AdversarialRules, GameSimulator, JointAction, Outcome, Rules, ADVERSARIAL_AGENTS};

use super::action::HexAction;
use super::state::{HexState, MAX_BOARD_SIZE};

/// Standard tournament board.
pub const DEFAULT_BOARD_SIZE: usize = 11;

// Side masks accumulated by the connection search.
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Hex on an `n x n` rhombus.
///
/// Agent 0 connects column 0 to column n-1; agent 1 connects row 0 to row
/// n-1. With the swap rule the second placement may instead take over the
/// first stone, mirrored across the diagonal.
#[derive(Clone, Debug)]
pub struct Hex {
    board_size: usize,
    swap_rule: bool,
    turn_type: TurnType,
}

pub type HexSimulator = GameSimulator<Hex>;

impl Hex {
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[must_use]
    pub fn swap_rule(&self) -> bool {
        self.swap_rule
    }

    /// New game from shared simulator settings on the default board.
    pub fn from_config(config: &SimulatorConfig) -> SimResult<HexSimulator> {
        HexBuilder::new()
            .turn_type(config.turn_type)
            .build(config.seed)
    }

    /// Sides of the board touched by the group containing `(x0, y0)`.
    fn connected_sides(state: &HexState, x0: usize, y0: usize, visited: &mut [bool]) -> u8 {
        let n = state.board_size();
        let owner = state.location(x0, y0).ok().flatten();
        let mut sides = 0;
        let mut stack = vec![(x0, y0)];
        visited[y0 * n + x0] = true;

        while let Some((x, y)) = stack.pop() {
            sides |= side_mask(x, y, n);
            for (dx, dy) in NEIGHBOURS {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if !state.is_location_on_board(nx, ny) || visited[ny * n + nx] {
                    continue;
                }
                if state.location(nx, ny).ok().flatten() == owner {
                    visited[ny * n + nx] = true;
                    stack.push((nx, ny));
                }
            }
        }
        sides
    }
}

/// Six neighbours of a cell on the rhombus.
const NEIGHBOURS: [(isize, isize); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

fn side_mask(x: usize, y: usize, n: usize) -> u8 {
    let mut side = 0;
    if x == 0 {
        side |= LEFT;
    }
    if x == n - 1 {
        side |= RIGHT;
    }
    if y == 0 {
        side |= TOP;
    }
    if y == n - 1 {
        side |= BOTTOM;
    }
    side
}

impl Rules for Hex {
    type State = HexState;
    type Action = HexAction;

    fn n_agents(&self) -> usize {
        ADVERSARIAL_AGENTS
    }

    fn turn_type(&self) -> TurnType {
        self.turn_type
    }

    fn initial_state(&self, rng: &mut GameRng) -> HexState {
        let turn = TurnTracker::new(self.turn_type, ADVERSARIAL_AGENTS, rng);
        HexState::empty(self.board_size, turn)
    }

    fn rewards(&self, state: &HexState) -> PlayerMap<i32> {
        self.outcome(state).rewards()
    }

    fn legal_actions(&self, state: &HexState, rewards: &PlayerMap<i32>) -> PlayerMap<Vec<HexAction>> {
        let mut legal = PlayerMap::with_default(ADVERSARIAL_AGENTS);
        if rewards.as_slice().iter().any(|&r| r != 0) {
            return legal;
        }

        let mover = state.agent_turn();
        let may_swap = self.swap_rule && state.moves_played() == 1;
        let n = state.board_size();
        let actions = &mut legal[mover];
        for x in 0..n {
            for y in 0..n {
                let open = match state.location(x, y).ok().flatten() {
                    None => true,
                    Some(owner) => may_swap && owner != mover,
                };
                if open {
                    actions.push(HexAction::new(x as u8, y as u8));
                }
            }
        }
        legal
    }

    fn apply(&self, state: &mut HexState, actions: &JointAction<HexAction>, rng: &mut GameRng) {
        let mover = state.agent_turn();
        let Some(&action) = actions.get(&mover) else {
            return;
        };
        let (x, y) = (usize::from(action.x), usize::from(action.y));

        // Cells come from the legal set, so both writes are on the board.
        let placed = if state.is_location_empty(x, y).unwrap_or(false) {
            state.set_location(x, y, Some(mover))
        } else {
            let swapped = action.mirrored();
            debug!(player = %mover, from = %action, to = %swapped, "swap");
            state
                .set_location(x, y, None)
                .and_then(|()| state.set_location(usize::from(swapped.x), usize::from(swapped.y), Some(mover)))
        };
        debug_assert!(placed.is_ok());

        state.record_move();
        state.turn_mut().advance(rng);
    }
}

impl AdversarialRules for Hex {
    fn outcome(&self, state: &HexState) -> Outcome {
        let n = state.board_size();
        let mut visited = vec![false; n * n];
        let first = PlayerId::new(0);
        let second = PlayerId::new(1);

        for i in 0..n {
            if !visited[i * n] && state.location(0, i).ok().flatten() == Some(first) {
                let sides = Self::connected_sides(state, 0, i, &mut visited);
                if sides & (LEFT | RIGHT) == LEFT | RIGHT {
                    return Outcome::FirstAgentWins;
                }
            }
            if !visited[i] && state.location(i, 0).ok().flatten() == Some(second) {
                let sides = Self::connected_sides(state, i, 0, &mut visited);
                if sides & (TOP | BOTTOM) == TOP | BOTTOM {
                    return Outcome::SecondAgentWins;
                }
            }
        }
        Outcome::Neutral
    }
}

/// Builder for Hex simulators.
///
/// ```
/// use rust_turnsim::core::PlayerId;
/// use rust_turnsim::games::hex::HexBuilder;
///
/// let sim = HexBuilder::new().board_size(5).build(0).unwrap();
/// assert_eq!(sim.legal_actions_for(PlayerId::new(0)).len(), 25);
/// ```
#[derive(Clone, Debug)]
pub struct HexBuilder {
    board_size: usize,
    swap_rule: bool,
    turn_type: TurnType,
}

impl Default for HexBuilder {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            swap_rule: false,
            turn_type: TurnType::Sequential,
        }
    }
}

impl HexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn swap_rule(mut self, enabled: bool) -> Self {
        self.swap_rule = enabled;
        self
    }

    pub fn turn_type(mut self, turn_type: TurnType) -> Self {
        self.turn_type = turn_type;
        self
    }

    /// Rules only, for callers that install their own positions.
    pub fn rules(&self) -> SimResult<Hex> {
        if !(1..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(SimulatorError::MalformedState(format!(
                "board size {} outside 1..={MAX_BOARD_SIZE}",
                self.board_size
            )));
        }
        if self.turn_type == TurnType::Simultaneous {
            return Err(SimulatorError::UnsupportedTurnType(self.turn_type));
        }
        Ok(Hex {
            board_size: self.board_size,
            swap_rule: self.swap_rule,
            turn_type: self.turn_type,
        })
    }

    pub fn build(self, seed: u64) -> SimResult<HexSimulator> {
        Ok(GameSimulator::new(self.rules()?, seed))
    }
}
