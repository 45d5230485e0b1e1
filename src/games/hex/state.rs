//! Hex position stored as one bit plane per agent.
//!
//! ## Layout
//!
//! Each plane holds `ceil(n² / 8)` bytes. Cell `(x, y)` is bit `y * n + x`,
//! least significant bit first within a byte. A cell is owned by at most one
//! agent; both bits clear means empty.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, SimResult, SimulatorError, TurnTracker};
use crate::simulator::ADVERSARIAL_AGENTS;

/// Largest supported side length: one column letter per column.
pub const MAX_BOARD_SIZE: usize = 26;

/// Bytes needed for one plane of an `n x n` board.
#[must_use]
pub fn plane_len(board_size: usize) -> usize {
    (board_size * board_size).div_ceil(8)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexState {
    board_size: usize,
    bit_boards: PlayerMap<Vec<u8>>,
    turn: TurnTracker,
    moves_played: u32,
}

impl HexState {
    /// Empty board.
    pub fn new(board_size: usize, turn: TurnTracker) -> SimResult<Self> {
        check_board_size(board_size)?;
        check_turn(&turn)?;
        Ok(Self::empty(board_size, turn))
    }

    pub(crate) fn empty(board_size: usize, turn: TurnTracker) -> Self {
        Self {
            board_size,
            bit_boards: PlayerMap::with_value(ADVERSARIAL_AGENTS, vec![0; plane_len(board_size)]),
            turn,
            moves_played: 0,
        }
    }

    /// Rebuild a position from raw planes, one per agent.
    pub fn from_bit_boards(
        board_size: usize,
        bit_boards: Vec<Vec<u8>>,
        turn: TurnTracker,
    ) -> SimResult<Self> {
        check_board_size(board_size)?;
        check_turn(&turn)?;
        if bit_boards.len() != ADVERSARIAL_AGENTS {
            return Err(SimulatorError::MalformedState(format!(
                "expected {ADVERSARIAL_AGENTS} bit boards, got {}",
                bit_boards.len()
            )));
        }
        let expected = plane_len(board_size);
        if let Some(plane) = bit_boards.iter().find(|p| p.len() != expected) {
            return Err(SimulatorError::MalformedState(format!(
                "bit board of {} bytes, expected {expected} for size {board_size}",
                plane.len()
            )));
        }
        if bit_boards[0].iter().zip(&bit_boards[1]).any(|(a, b)| a & b != 0) {
            return Err(SimulatorError::MalformedState(
                "a cell is owned by both agents".to_string(),
            ));
        }
        let padding = expected * 8 - board_size * board_size;
        if padding > 0 {
            let mask = !(0xffu8 >> padding);
            if bit_boards.iter().any(|p| p[expected - 1] & mask != 0) {
                return Err(SimulatorError::MalformedState(
                    "bits set past the last cell".to_string(),
                ));
            }
        }

        let mut state = Self {
            board_size,
            bit_boards: PlayerMap::from_vec(bit_boards),
            turn,
            moves_played: 0,
        };
        state.moves_played = state.n_pieces();
        Ok(state)
    }

    #[must_use]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    #[must_use]
    pub fn bit_board(&self, player: PlayerId) -> &[u8] {
        &self.bit_boards[player]
    }

    #[must_use]
    pub fn turn(&self) -> &TurnTracker {
        &self.turn
    }

    /// Agent to move.
    #[must_use]
    pub fn agent_turn(&self) -> PlayerId {
        self.turn.current()
    }

    /// Placements made so far, swaps included.
    #[must_use]
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    #[must_use]
    pub fn is_location_on_board(&self, x: usize, y: usize) -> bool {
        x < self.board_size && y < self.board_size
    }

    fn bit(&self, x: usize, y: usize) -> SimResult<(usize, u8)> {
        if !self.is_location_on_board(x, y) {
            return Err(SimulatorError::OutOfBounds {
                x,
                y,
                size: self.board_size,
            });
        }
        let bit = y * self.board_size + x;
        Ok((bit / 8, 1 << (bit % 8)))
    }

    /// Owner of a cell, `None` when empty.
    pub fn location(&self, x: usize, y: usize) -> SimResult<Option<PlayerId>> {
        let (byte, mask) = self.bit(x, y)?;
        Ok(self
            .bit_boards
            .iter()
            .find(|(_, plane)| plane[byte] & mask != 0)
            .map(|(player, _)| player))
    }

    pub fn is_location_empty(&self, x: usize, y: usize) -> SimResult<bool> {
        Ok(self.location(x, y)?.is_none())
    }

    /// Set or clear a cell. Clears the other agent's bit.
    pub fn set_location(&mut self, x: usize, y: usize, owner: Option<PlayerId>) -> SimResult<()> {
        let (byte, mask) = self.bit(x, y)?;
        for player in PlayerId::all(ADVERSARIAL_AGENTS) {
            let plane = &mut self.bit_boards[player];
            if Some(player) == owner {
                plane[byte] |= mask;
            } else {
                plane[byte] &= !mask;
            }
        }
        Ok(())
    }

    /// Stones on the board.
    #[must_use]
    pub fn n_pieces(&self) -> u32 {
        self.bit_boards
            .iter()
            .flat_map(|(_, plane)| plane.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    /// Row-major cell owners: 0 empty, 1 agent 0, 2 agent 1.
    #[must_use]
    pub fn locations(&self) -> Vec<u8> {
        let n = self.board_size;
        let mut cells = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let owner = self.location(x, y).ok().flatten();
                cells.push(owner.map_or(0, |p| p.0 + 1));
            }
        }
        cells
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnTracker {
        &mut self.turn
    }

    pub(crate) fn record_move(&mut self) {
        self.moves_played += 1;
    }
}

fn check_board_size(board_size: usize) -> SimResult<()> {
    if (1..=MAX_BOARD_SIZE).contains(&board_size) {
        Ok(())
    } else {
        Err(SimulatorError::MalformedState(format!(
            "board size {board_size} outside 1..={MAX_BOARD_SIZE}"
        )))
    }
}

fn check_turn(turn: &TurnTracker) -> SimResult<()> {
    if turn.player_count() != ADVERSARIAL_AGENTS {
        return Err(SimulatorError::MalformedState(format!(
            "turn tracker seats {} agents, Hex needs {ADVERSARIAL_AGENTS}",
            turn.player_count()
        )));
    }
    Ok(())
}

impl std::fmt::Display for HexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to move |", self.agent_turn())?;
        for (i, cell) in self.locations().iter().enumerate() {
            if i % self.board_size == 0 {
                write!(f, " ")?;
            }
            let c = match cell {
                1 => 'X',
                2 => 'O',
                _ => '-',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
