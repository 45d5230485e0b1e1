//! Backgammon: two agents, dice, bar re-entry, bearing off.
//!
//! The interesting part is [`movegen`], which enumerates every maximal
//! sequence of checker moves the rolled dice allow.

pub mod action;
pub mod movegen;
pub mod rules;
pub mod state;

pub use action::{BackgammonAction, BackgammonMove};
pub use movegen::legal_moves;
pub use rules::{Backgammon, BackgammonBuilder, BackgammonSimulator};
pub use state::{
    piece, BackgammonState, FIRST_BAR, N_CHECKERS, N_DICE, N_LOCATIONS, SECOND_BAR,
    STARTING_LOCATIONS,
};
