//! Hex: two agents alternately claim cells until one connects its sides.
//!
//! Supports every turn type except simultaneous moves.

pub mod action;
pub mod rules;
pub mod state;

pub use action::HexAction;
pub use rules::{Hex, HexBuilder, HexSimulator, DEFAULT_BOARD_SIZE};
pub use state::{plane_len, HexState, MAX_BOARD_SIZE};
