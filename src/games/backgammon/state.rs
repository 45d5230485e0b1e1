//! Backgammon position.
//!
//! ## Board encoding
//!
//! `locations[i]` holds a signed checker count: positive for agent 0,
//! negative for agent 1, magnitude = stack height.
//!
//! - index 0: agent 0's bar
//! - indices 1..=24: points
//! - index 25: agent 1's bar
//!
//! Agent 0 moves towards higher indices and bears off past point 24 (home
//! board 19..=24). Agent 1 moves towards lower indices and bears off past
//! point 1 (home board 1..=6). Borne-off checkers are implicit: each side
//! owns 15 checkers in total.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, SimResult, SimulatorError, DIE_FACES};

/// Board length including both bars.
pub const N_LOCATIONS: usize = 26;
/// Dice rolled per turn.
pub const N_DICE: usize = 2;
/// Checkers per side.
pub const N_CHECKERS: u32 = 15;
/// Agent 0's bar.
pub const FIRST_BAR: usize = 0;
/// Agent 1's bar.
pub const SECOND_BAR: usize = N_LOCATIONS - 1;

/// Standard starting position.
pub const STARTING_LOCATIONS: [i8; N_LOCATIONS] = [
    0, //
    2, 0, 0, 0, 0, -5, //
    0, -3, 0, 0, 0, 5, //
    -5, 0, 0, 0, 3, 0, //
    5, 0, 0, 0, 0, -2, //
    0,
];

/// Checker sign for an agent: +1 for agent 0, -1 for agent 1.
#[must_use]
pub fn piece(player: PlayerId) -> i8 {
    if player.index() == 0 {
        1
    } else {
        -1
    }
}

/// Immutable-by-contract Backgammon position with the dice already rolled.
///
/// Deserialization goes through [`BackgammonState::new`], so a decoded
/// position is validated like a constructed one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBackgammonState")]
pub struct BackgammonState {
    locations: [i8; N_LOCATIONS],
    dice: [u8; N_DICE],
    agent_turn: PlayerId,
}

impl BackgammonState {
    /// Build a position, rejecting buffers no game could reach.
    pub fn new(
        locations: [i8; N_LOCATIONS],
        dice: [u8; N_DICE],
        agent_turn: PlayerId,
    ) -> SimResult<Self> {
        if agent_turn.index() > 1 {
            return Err(SimulatorError::MalformedState(format!(
                "{agent_turn} is not seated in a two-agent game"
            )));
        }
        if let Some(die) = dice.iter().find(|d| !(1..=DIE_FACES).contains(*d)) {
            return Err(SimulatorError::MalformedState(format!(
                "die value {die} outside 1..={DIE_FACES}"
            )));
        }
        if let Some(count) = locations
            .iter()
            .find(|count| u32::from(count.unsigned_abs()) > N_CHECKERS)
        {
            return Err(SimulatorError::MalformedState(format!(
                "stack of {count} exceeds {N_CHECKERS} checkers"
            )));
        }
        if locations[FIRST_BAR] < 0 || locations[SECOND_BAR] > 0 {
            return Err(SimulatorError::MalformedState(
                "bar holds the wrong side's checkers".to_string(),
            ));
        }

        let state = Self {
            locations,
            dice,
            agent_turn,
        };
        for player in PlayerId::all(2) {
            let count = state.checkers_in_play(player);
            if count > N_CHECKERS {
                return Err(SimulatorError::MalformedState(format!(
                    "{player} has {count} checkers, at most {N_CHECKERS} allowed"
                )));
            }
        }
        Ok(state)
    }

    /// Standard starting position with the given opening dice.
    pub fn starting(dice: [u8; N_DICE], agent_turn: PlayerId) -> SimResult<Self> {
        Self::new(STARTING_LOCATIONS, dice, agent_turn)
    }

    /// Starting position without validation, for rolls drawn by the rules.
    pub(crate) fn opening(dice: [u8; N_DICE], agent_turn: PlayerId) -> Self {
        Self {
            locations: STARTING_LOCATIONS,
            dice,
            agent_turn,
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[i8; N_LOCATIONS] {
        &self.locations
    }

    /// Signed checker count at a board index.
    pub fn location(&self, index: usize) -> SimResult<i8> {
        self.locations
            .get(index)
            .copied()
            .ok_or(SimulatorError::OutOfBounds {
                x: index,
                y: 0,
                size: N_LOCATIONS,
            })
    }

    #[must_use]
    pub fn dice(&self) -> [u8; N_DICE] {
        self.dice
    }

    #[must_use]
    pub fn is_double(&self) -> bool {
        self.dice[0] == self.dice[1]
    }

    /// Agent whose turn it is.
    #[must_use]
    pub fn agent_turn(&self) -> PlayerId {
        self.agent_turn
    }

    /// Checkers waiting on `player`'s bar.
    #[must_use]
    pub fn bar(&self, player: PlayerId) -> u32 {
        let index = if player.index() == 0 { FIRST_BAR } else { SECOND_BAR };
        u32::from(self.locations[index].unsigned_abs())
    }

    /// Checkers of `player` on the points or the bar.
    #[must_use]
    pub fn checkers_in_play(&self, player: PlayerId) -> u32 {
        let sign = piece(player);
        self.locations
            .iter()
            .filter(|&&count| count.signum() == sign)
            .map(|&count| u32::from(count.unsigned_abs()))
            .sum()
    }

    /// Checkers `player` has borne off.
    #[must_use]
    pub fn borne_off(&self, player: PlayerId) -> u32 {
        N_CHECKERS.saturating_sub(self.checkers_in_play(player))
    }

    pub(crate) fn locations_mut(&mut self) -> &mut [i8; N_LOCATIONS] {
        &mut self.locations
    }

    pub(crate) fn set_dice(&mut self, dice: [u8; N_DICE]) {
        self.dice = dice;
    }

    pub(crate) fn set_agent_turn(&mut self, player: PlayerId) {
        self.agent_turn = player;
    }
}

/// Wire shape of [`BackgammonState`] before validation.
#[derive(Deserialize)]
struct RawBackgammonState {
    locations: [i8; N_LOCATIONS],
    dice: [u8; N_DICE],
    agent_turn: PlayerId,
}

impl TryFrom<RawBackgammonState> for BackgammonState {
    type Error = SimulatorError;

    fn try_from(raw: RawBackgammonState) -> SimResult<Self> {
        Self::new(raw.locations, raw.dice, raw.agent_turn)
    }
}

impl std::fmt::Display for BackgammonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to move, dice {}-{} |",
            self.agent_turn, self.dice[0], self.dice[1]
        )?;
        for (index, count) in self.locations.iter().enumerate() {
            if *count != 0 {
                write!(f, " {index}:{count}")?;
            }
        }
        Ok(())
    }
}
