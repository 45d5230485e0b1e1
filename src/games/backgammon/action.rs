//! Backgammon moves and actions.
//!
//! An action is the unordered collection of single-checker moves played in
//! one turn. Playing two different dice in either order reaches the same
//! position, so actions compare as multisets: the moves are kept sorted and
//! equality is slice equality. A double can repeat a move (two checkers
//! leaving the same point with the same die).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One checker moved from `from` by `die` pips in its owner's direction.
///
/// Ordering is by origin, then die value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BackgammonMove {
    pub from: u8,
    pub die: u8,
}

impl BackgammonMove {
    #[must_use]
    pub const fn new(from: u8, die: u8) -> Self {
        Self { from, die }
    }

    /// Landing index for a checker of sign `piece`.
    ///
    /// Values outside 1..=24 mean the checker bears off.
    #[must_use]
    pub fn destination(self, piece: i8) -> i32 {
        i32::from(self.from) + i32::from(self.die) * i32::from(piece)
    }
}

impl std::fmt::Display for BackgammonMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.from, self.die)
    }
}

/// Moves for one turn, at most four.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgammonAction {
    moves: SmallVec<[BackgammonMove; 4]>,
}

impl BackgammonAction {
    /// Build an action from moves in any order.
    #[must_use]
    pub fn new(moves: impl IntoIterator<Item = BackgammonMove>) -> Self {
        let mut moves: SmallVec<[BackgammonMove; 4]> = moves.into_iter().collect();
        moves.sort_unstable();
        Self { moves }
    }

    /// The empty action: no move is possible.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    /// Moves in canonical (ascending) order.
    #[must_use]
    pub fn moves(&self) -> &[BackgammonMove] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.moves.is_empty()
    }
}

impl std::fmt::Display for BackgammonAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pass() {
            return write!(f, "[pass]");
        }
        write!(f, "[")?;
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{mv}")?;
        }
        write!(f, "]")
    }
}
