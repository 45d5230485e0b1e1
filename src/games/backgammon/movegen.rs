//! Legal move generation.
//!
//! Depth-first search over a private working copy of the board. Each level
//! tries every checker of the side to move against every unused die value,
//! applies the move in place, recurses, then replays the move's `Undo`
//! token so the buffer is back to its pre-call contents on every path.
//!
//! Rules enforced during the search:
//! - checkers on the bar must all re-enter before any other checker moves
//! - a point holding two or more opposing checkers is blocked
//! - bearing off is allowed only once every checker of the side is home
//! - a double gives four uses of its value, otherwise each die is used once
//!   and both orders are tried
//!
//! Moves within a sequence must be non-decreasing in `(from, die)` along the
//! mover's direction of travel. This removes permutations of the same move
//! set without losing positions: a checker's later moves always start
//! further along its path, and checkers that must move first (bar entries,
//! stragglers that enable bearing off) always sit earlier on it.
//!
//! Finally only the candidates using the most dice survive.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use super::action::{BackgammonAction, BackgammonMove};
use super::state::{piece, BackgammonState, FIRST_BAR, N_LOCATIONS, SECOND_BAR};

const FIRST_POINT: usize = 1;
const LAST_POINT: usize = N_LOCATIONS - 2;

/// Restores one move applied to the working board.
#[must_use]
struct Undo {
    from: usize,
    to: Option<usize>,
}

/// Search state for one call of [`legal_moves`].
///
/// Board counts stay within `±N_CHECKERS`, which `BackgammonState::new`
/// enforces, so products with `piece` cannot overflow.
struct Search {
    /// Working board owned by this search.
    board: [i8; N_LOCATIONS],
    piece: i8,
    moves: SmallVec<[BackgammonMove; 4]>,
    found: Vec<BackgammonAction>,
    seen: FxHashSet<BackgammonAction>,
}

impl Search {
    fn new(locations: &[i8; N_LOCATIONS], piece: i8) -> Self {
        let mut board = *locations;
        // Lone opposing checkers never block and are hit on arrival; the
        // mover's legality is the same with them removed.
        for count in board.iter_mut() {
            if *count * piece == -1 {
                *count = 0;
            }
        }
        Self {
            board,
            piece,
            moves: SmallVec::new(),
            found: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Board indices that may supply a checker at this level.
    fn sources(&self) -> std::ops::RangeInclusive<usize> {
        if self.piece > 0 && self.board[FIRST_BAR] > 0 {
            FIRST_BAR..=FIRST_BAR
        } else if self.piece < 0 && self.board[SECOND_BAR] < 0 {
            SECOND_BAR..=SECOND_BAR
        } else {
            FIRST_BAR..=SECOND_BAR
        }
    }

    /// True once no checker of the side is outside its home board.
    fn can_bear_off(&self) -> bool {
        if self.piece > 0 {
            self.board[FIRST_BAR..19].iter().all(|&count| count <= 0)
        } else {
            self.board[7..N_LOCATIONS].iter().all(|&count| count >= 0)
        }
    }

    fn can_move(&self, mv: BackgammonMove, bear_off: bool) -> bool {
        match landing_point(mv, self.piece) {
            Some(to) => self.board[to] * self.piece >= -1,
            None => bear_off,
        }
    }

    /// Sequence ordering along the direction of travel.
    fn in_order(&self, mv: BackgammonMove) -> bool {
        match self.moves.last() {
            None => true,
            Some(&last) if self.piece > 0 => mv >= last,
            Some(&last) => mv <= last,
        }
    }

    fn apply(&mut self, mv: BackgammonMove) -> Undo {
        let from = usize::from(mv.from);
        let to = landing_point(mv, self.piece);
        self.board[from] -= self.piece;
        if let Some(to) = to {
            self.board[to] += self.piece;
        }
        Undo { from, to }
    }

    fn undo(&mut self, undo: Undo) {
        if let Some(to) = undo.to {
            self.board[to] -= self.piece;
        }
        self.board[undo.from] += self.piece;
    }

    fn record(&mut self) {
        let action = BackgammonAction::new(self.moves.iter().copied());
        if self.seen.insert(action.clone()) {
            self.found.push(action);
        }
    }

    /// Returns the number of candidates recorded below this level.
    fn dfs(&mut self, dice: &[u8], depth: usize) -> usize {
        let mut produced = 0;
        let bear_off = self.can_bear_off();

        for from in self.sources() {
            if self.board[from] * self.piece < 1 {
                continue;
            }
            for (j, &die) in dice.iter().enumerate() {
                let mv = BackgammonMove::new(from as u8, die);
                if !self.can_move(mv, bear_off) || !self.in_order(mv) {
                    continue;
                }

                self.moves.push(mv);
                if depth > 1 {
                    let rest = [remaining_die(dice, j)];
                    let undo = self.apply(mv);
                    produced += self.dfs(&rest, depth - 1);
                    self.undo(undo);
                } else {
                    self.record();
                    produced += 1;
                }
                self.moves.pop();
            }
        }

        if produced == 0 {
            self.record();
            produced = 1;
        }
        produced
    }
}

/// Point index a move lands on, `None` when it bears off.
fn landing_point(mv: BackgammonMove, piece: i8) -> Option<usize> {
    let to = mv.destination(piece);
    if (FIRST_POINT as i32..=LAST_POINT as i32).contains(&to) {
        Some(to as usize)
    } else {
        None
    }
}

/// Die left for the next level after using `dice[used]`.
fn remaining_die(dice: &[u8], used: usize) -> u8 {
    if dice.len() == 2 {
        dice[1 - used]
    } else {
        dice[0]
    }
}

/// All maximal legal actions for the side to move.
///
/// Never empty: when nothing can move the result is the single pass action.
/// The caller must not invoke this on a finished game.
pub fn legal_moves(state: &BackgammonState) -> Vec<BackgammonAction> {
    let piece = piece(state.agent_turn());
    let [first, second] = state.dice();
    let (dice, depth): (SmallVec<[u8; 2]>, usize) = if state.is_double() {
        (smallvec::smallvec![first], 4)
    } else {
        (smallvec::smallvec![first, second], 2)
    };

    let mut search = Search::new(state.locations(), piece);
    let before = search.board;
    search.dfs(&dice, depth);
    debug_assert_eq!(search.board, before, "working board not restored");

    let candidates = search.found.len();
    let longest = search.found.iter().map(BackgammonAction::len).max().unwrap_or(0);
    let mut actions = search.found;
    actions.retain(|action| action.len() == longest);

    trace!(
        player = %state.agent_turn(),
        dice = ?state.dice(),
        candidates,
        kept = actions.len(),
        longest,
        "generated backgammon moves"
    );
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::backgammon::state::STARTING_LOCATIONS;

    fn state(locations: [i8; N_LOCATIONS], dice: [u8; 2], turn: u8) -> BackgammonState {
        BackgammonState::new(locations, dice, PlayerId::new(turn)).unwrap()
    }

    #[test]
    fn test_opening_roll_uses_both_dice() {
        let actions = legal_moves(&state(STARTING_LOCATIONS, [6, 5], 0));

        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| a.len() == 2));
        // Running a back checker 1 -> 12
        assert!(actions.contains(&BackgammonAction::new([
            BackgammonMove::new(1, 6),
            BackgammonMove::new(7, 5),
        ])));
    }

    #[test]
    fn test_no_duplicate_actions() {
        let actions = legal_moves(&state(STARTING_LOCATIONS, [3, 1], 0));
        let unique: FxHashSet<_> = actions.iter().cloned().collect();
        assert_eq!(unique.len(), actions.len());
    }

    #[test]
    fn test_double_uses_four_moves() {
        let actions = legal_moves(&state(STARTING_LOCATIONS, [2, 2], 1));
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| a.len() == 4));
    }

    #[test]
    fn test_blocked_entry_passes() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[FIRST_BAR] = 1;
        // Agent 1 holds every entry point for agent 0.
        for point in 1..=6 {
            locations[point] = -2;
        }
        locations[20] = 2;
        let actions = legal_moves(&state(locations, [6, 6], 0));
        assert_eq!(actions, vec![BackgammonAction::pass()]);
    }

    #[test]
    fn test_bar_must_clear_first() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[FIRST_BAR] = 1;
        locations[10] = 5;
        locations[22] = -5;
        let actions = legal_moves(&state(locations, [3, 4], 0));

        for action in &actions {
            assert!(action.moves().iter().any(|m| m.from == FIRST_BAR as u8));
        }
    }

    #[test]
    fn test_two_on_bar_with_one_entry() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[SECOND_BAR] = -2;
        locations[1] = 3;
        // Entry with 5 (point 20) is blocked, entry with 3 (point 22) is open.
        locations[20] = 2;
        let actions = legal_moves(&state(locations, [5, 3], 1));

        assert_eq!(
            actions,
            vec![BackgammonAction::new([BackgammonMove::new(25, 3)])]
        );
    }

    #[test]
    fn test_bear_off_requires_all_home() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[24] = 2;
        locations[10] = 1;
        locations[3] = -2;
        let actions = legal_moves(&state(locations, [1, 2], 0));
        // Straggler on 10 cannot reach home, so nothing may bear off.
        for action in &actions {
            for mv in action.moves() {
                assert!(landing_point(*mv, 1).is_some());
            }
        }
    }

    #[test]
    fn test_bear_off_after_coming_home() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[24] = 1;
        locations[18] = 1;
        locations[3] = -2;
        let actions = legal_moves(&state(locations, [1, 6], 0));
        // 18 -> 19 brings the last checker home, then 24 bears off with the 6.
        assert!(actions.contains(&BackgammonAction::new([
            BackgammonMove::new(18, 1),
            BackgammonMove::new(24, 6),
        ])));
        assert!(actions.iter().all(|a| a.len() == 2));
    }

    #[test]
    fn test_hit_lands_on_blot() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[5] = 1;
        locations[8] = -1;
        locations[9] = -2;
        let actions = legal_moves(&state(locations, [3, 4], 0));
        // 5 -> 8 hits; 5 -> 9 is blocked, so the 4 must be played after the hit.
        assert_eq!(
            actions,
            vec![BackgammonAction::new([
                BackgammonMove::new(5, 3),
                BackgammonMove::new(8, 4),
            ])]
        );
    }

    #[test]
    fn test_partial_when_second_die_blocked() {
        let mut locations = [0i8; N_LOCATIONS];
        locations[1] = 1;
        locations[7] = -2;
        locations[8] = -2;
        let actions = legal_moves(&state(locations, [6, 1], 0));
        // Only 1 -> 2 is possible; 2 + 6 = 8 is blocked and 1 + 6 = 7 is blocked.
        assert_eq!(
            actions,
            vec![BackgammonAction::new([BackgammonMove::new(1, 1)])]
        );
    }
}
