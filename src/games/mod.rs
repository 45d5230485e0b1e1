//! Game implementations.

pub mod backgammon;
pub mod hex;
