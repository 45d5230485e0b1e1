//! Turn model: which agents may act on a given step.
//!
//! The turn type is fixed when a simulator is built. `TurnTracker` is the
//! piece of state that carries it through an episode; domains that support
//! more than one turn type embed it in their state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::rng::GameRng;

/// Indicates how agent turns are decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnType {
    /// Agents move in seat order, `(previous + 1) mod n`.
    #[default]
    Sequential,
    /// One agent drawn uniformly at random each step.
    Random,
    /// Seat order shuffled once per episode, then followed in rotation.
    RandomOrder,
    /// Every agent moves in the same step.
    Simultaneous,
}

/// Agents acting on one step. Inline for up to four agents.
pub type ActingAgents = SmallVec<[PlayerId; 4]>;

/// Turn bookkeeping for one episode.
///
/// ```
/// use rust_turnsim::core::{GameRng, PlayerId, TurnTracker, TurnType};
///
/// let mut rng = GameRng::new(0);
/// let mut turns = TurnTracker::new(TurnType::Sequential, 3, &mut rng);
/// assert_eq!(turns.current(), PlayerId::new(0));
/// turns.advance(&mut rng);
/// turns.advance(&mut rng);
/// turns.advance(&mut rng);
/// assert_eq!(turns.current(), PlayerId::new(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnTracker {
    turn_type: TurnType,
    order: ActingAgents,
    position: usize,
}

impl TurnTracker {
    /// Start an episode's turn sequence.
    ///
    /// `RandomOrder` fixes its permutation here; `Random` draws the first
    /// agent here.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is 0. Rules fix their agent count up front,
    /// so this is a programming error rather than a runtime condition.
    pub fn new(turn_type: TurnType, player_count: usize, rng: &mut GameRng) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");

        let mut order: ActingAgents = PlayerId::all(player_count).collect();
        let mut position = 0;
        match turn_type {
            TurnType::RandomOrder => rng.shuffle(&mut order),
            TurnType::Random => position = rng.gen_range_usize(0..player_count),
            TurnType::Sequential | TurnType::Simultaneous => {}
        }

        Self {
            turn_type,
            order,
            position,
        }
    }

    /// Sequential turns starting from a chosen agent.
    ///
    /// # Panics
    ///
    /// Panics if `first` is not one of the `player_count` seated agents.
    #[must_use]
    pub fn sequential_from(player_count: usize, first: PlayerId) -> Self {
        assert!(first.index() < player_count, "{first} is not seated");
        Self {
            turn_type: TurnType::Sequential,
            order: PlayerId::all(player_count).collect(),
            position: first.index(),
        }
    }

    #[must_use]
    pub fn turn_type(&self) -> TurnType {
        self.turn_type
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.order.len()
    }

    /// Rotation the tracker walks through.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Agent at the current rotation position.
    ///
    /// For simultaneous turns every agent acts; this returns the first seat.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.order[self.position]
    }

    /// Agents eligible to act this step.
    #[must_use]
    pub fn acting_agents(&self) -> ActingAgents {
        match self.turn_type {
            TurnType::Simultaneous => {
                let mut all = self.order.clone();
                all.sort_unstable();
                all
            }
            _ => smallvec::smallvec![self.current()],
        }
    }

    #[must_use]
    pub fn is_acting(&self, player: PlayerId) -> bool {
        match self.turn_type {
            TurnType::Simultaneous => player.index() < self.order.len(),
            _ => self.current() == player,
        }
    }

    /// Move to the next step's acting agent(s).
    pub fn advance(&mut self, rng: &mut GameRng) {
        let n = self.order.len();
        match self.turn_type {
            TurnType::Sequential | TurnType::RandomOrder => {
                self.position = (self.position + 1) % n;
            }
            TurnType::Random => self.position = rng.gen_range_usize(0..n),
            TurnType::Simultaneous => {}
        }
    }
}
