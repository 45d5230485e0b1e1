//! Episode history: the trajectory of (state, joint action) pairs.
//!
//! The first node holds the initial state with no actions. Every later node
//! holds the state reached and the actions each agent took to reach it.
//! Nodes are never modified or removed once added.
//!
//! History trusts its caller: it does no legality checking. Feed it the
//! states a `GameSimulator` actually produced.
//!
//! Backed by `im::Vector`, so cloning a history to branch a search is O(1).

use im::Vector;

use crate::core::{Action, PlayerId, State};
use crate::simulator::JointAction;

/// One recorded step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryNode<S, A> {
    /// Position after the step.
    pub state: S,
    /// Actions taken by each agent to reach `state`. Empty for the first node.
    pub actions: JointAction<A>,
}

impl<S, A> HistoryNode<S, A> {
    /// Action `player` took to reach this node, if any.
    pub fn action(&self, player: PlayerId) -> Option<&A> {
        self.actions.get(&player)
    }
}

/// Append-only log of one episode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History<S: State, A: Action> {
    nodes: Vector<HistoryNode<S, A>>,
}

impl<S: State, A: Action> History<S, A> {
    /// Start a history at `initial_state`.
    pub fn create(initial_state: S) -> Self {
        let mut nodes = Vector::new();
        nodes.push_back(HistoryNode {
            state: initial_state,
            actions: JointAction::default(),
        });
        Self { nodes }
    }

    /// Record the next state and the actions taken to reach it.
    pub fn add(&mut self, state: S, actions: JointAction<A>) {
        self.nodes.push_back(HistoryNode { state, actions });
    }

    /// All nodes, oldest first.
    pub fn nodes(&self) -> &Vector<HistoryNode<S, A>> {
        &self.nodes
    }

    /// Number of nodes, including the initial one.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a history has at least its initial node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of recorded transitions.
    pub fn steps(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn initial_state(&self) -> &S {
        &self.nodes[0].state
    }

    /// Most recent node.
    pub fn last(&self) -> &HistoryNode<S, A> {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&HistoryNode<S, A>> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryNode<S, A>> {
        self.nodes.iter()
    }

    /// Actions one agent took, in order, skipping steps it sat out.
    pub fn actions_of(&self, player: PlayerId) -> impl Iterator<Item = &A> {
        self.nodes.iter().filter_map(move |node| node.action(player))
    }
}
