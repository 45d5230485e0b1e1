//! Capability traits for the values exchanged between simulators and agents.
//!
//! A state or action only has to copy itself and compare equal to its own
//! kind. `Clone` is the copy: implementors must own all their buffers so a
//! clone never aliases the original. Equality is structural.

use std::fmt::Debug;
use std::hash::Hash;

/// A snapshot of a game position.
pub trait State: Clone + Eq + Hash + Debug {}

impl<T> State for T where T: Clone + Eq + Hash + Debug {}

/// One agent's move for one step.
pub trait Action: Clone + Eq + Hash + Debug {}

impl<T> Action for T where T: Clone + Eq + Hash + Debug {}
