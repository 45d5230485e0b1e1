//! UCT tree search agent.
//!
//! ## Algorithm
//!
//! Each iteration replays the tree from the root on a private simulator:
//!
//! 1. **Select**: every acting agent picks its own edge (decoupled UCB1),
//!    untried edges first.
//! 2. **Sample**: the joint action is applied; stochastic successors are
//!    kept per joint choice, at most `sparse_sample_size` of them. Once the
//!    limit is hit a stored successor is reused instead of widening.
//! 3. **Expand**: a successor never seen before becomes a new leaf.
//! 4. **Simulate**: uniform random play to a terminal state or `max_depth`.
//! 5. **Backpropagate**: each agent's edge collects that agent's reward.
//!
//! The chosen action is the root edge with the most visits.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::simulator::{GameSimulator, JointAction, Rules};

use super::basic::random_joint_action;
use super::Agent;

// ============================================================================
// Tree
// ============================================================================

/// Index into the search arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeId(u32);

const ROOT: NodeId = NodeId(0);

/// Edge indices chosen by each acting agent, in seat order.
type JointKey = SmallVec<[u32; 4]>;

/// One action of one acting agent.
#[derive(Clone, Debug)]
struct Edge<A> {
    action: A,
    visits: u32,
    total_reward: f64,
}

impl<A> Edge<A> {
    fn new(action: A) -> Self {
        Self {
            action,
            visits: 0,
            total_reward: 0.0,
        }
    }

    fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.visits)
        }
    }
}

#[derive(Clone, Debug)]
struct Node<R: Rules> {
    state: R::State,
    depth: usize,
    visits: u32,
    /// Edges per acting agent; empty at terminal states.
    choices: Vec<(PlayerId, Vec<Edge<R::Action>>)>,
    /// Sampled successors per joint choice.
    children: FxHashMap<JointKey, SmallVec<[NodeId; 4]>>,
}

impl<R: Rules> Node<R> {
    fn new(simulator: &GameSimulator<R>, depth: usize) -> Self {
        let choices = simulator
            .legal_actions()
            .iter()
            .filter(|(_, legal)| !legal.is_empty())
            .map(|(player, legal)| (player, legal.iter().cloned().map(Edge::new).collect()))
            .collect();
        Self {
            state: simulator.state().clone(),
            depth,
            visits: 0,
            choices,
            children: FxHashMap::default(),
        }
    }

    fn edges_of(&self, player: PlayerId) -> Option<&[Edge<R::Action>]> {
        self.choices
            .iter()
            .find(|(p, _)| *p == player)
            .map(|(_, edges)| edges.as_slice())
    }
}

/// Arena of nodes referenced by `NodeId`.
struct Tree<R: Rules> {
    nodes: Vec<Node<R>>,
}

impl<R: Rules> Tree<R> {
    fn new(root: Node<R>) -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(root);
        Self { nodes }
    }

    fn get(&self, id: NodeId) -> &Node<R> {
        &self.nodes[id.0 as usize]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node<R> {
        &mut self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, node: Node<R>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn backpropagate(&mut self, path: &[(NodeId, JointKey)], rewards: &PlayerMap<i32>) {
        for (id, key) in path.iter().rev() {
            let node = self.get_mut(*id);
            node.visits += 1;
            for ((player, edges), &index) in node.choices.iter_mut().zip(key) {
                let edge = &mut edges[index as usize];
                edge.visits += 1;
                edge.total_reward += f64::from(rewards[*player]);
            }
        }
    }
}

/// UCB1 over one agent's edges: `Q(a) + c * sqrt(ln(N) / n(a))`.
fn ucb1<A>(edges: &[Edge<A>], ln_parent: f64, exploration: f64) -> usize {
    edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            let bonus = exploration * (ln_parent / f64::from(edge.visits.max(1))).sqrt();
            (i, edge.mean_reward() + bonus)
        })
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(0, |(i, _)| i)
}

// ============================================================================
// Agent
// ============================================================================

/// Upper-confidence tree search over simulator copies.
#[derive(Clone, Debug)]
pub struct UctAgent {
    rng: GameRng,
    iterations: u32,
    exploration: f64,
    sparse_sample_size: usize,
    max_depth: usize,
}

impl UctAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            iterations: 1_000,
            exploration: 1.0,
            sparse_sample_size: 8,
            max_depth: 1_000,
        }
    }

    /// Search iterations per decision.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// UCB1 exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Successor states kept per joint choice (at least 1).
    pub fn with_sparse_sample_size(mut self, sparse_sample_size: usize) -> Self {
        self.sparse_sample_size = sparse_sample_size.max(1);
        self
    }

    /// Steps from the root after which a line is scored as it stands.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn search<R: Rules>(&mut self, state: &R::State, simulator: &GameSimulator<R>) -> Tree<R> {
        let rules = simulator.rules();
        let root = GameSimulator::with_rng(rules.clone(), state.clone(), self.rng.fork());
        let mut tree = Tree::new(Node::new(&root, 0));
        for _ in 0..self.iterations {
            self.iterate(&mut tree, rules);
        }
        tree
    }

    fn iterate<R: Rules>(&mut self, tree: &mut Tree<R>, rules: &R) {
        let mut sim =
            GameSimulator::with_rng(rules.clone(), tree.get(ROOT).state.clone(), self.rng.fork());
        let mut path: Vec<(NodeId, JointKey)> = Vec::new();
        let mut current = ROOT;

        loop {
            let node = tree.get(current);
            if node.choices.is_empty() || node.depth >= self.max_depth {
                break;
            }

            let key = self.select(node);
            let actions: JointAction<R::Action> = node
                .choices
                .iter()
                .zip(&key)
                .map(|((player, edges), &index)| (*player, edges[index as usize].action.clone()))
                .collect();
            if sim.state_transition(&actions).is_err() {
                break;
            }

            path.push((current, key.clone()));
            let (child, fresh) = self.descend(tree, current, key, &mut sim);
            current = child;
            if fresh {
                break;
            }
        }

        let rewards = self.rollout(&mut sim, tree.get(current).depth);
        tree.backpropagate(&path, &rewards);
    }

    /// Decoupled choice: one edge per acting agent.
    fn select<R: Rules>(&mut self, node: &Node<R>) -> JointKey {
        let ln_parent = f64::from(node.visits.max(1)).ln();
        node.choices
            .iter()
            .map(|(_, edges)| {
                let untried: SmallVec<[usize; 16]> = edges
                    .iter()
                    .enumerate()
                    .filter(|(_, edge)| edge.visits == 0)
                    .map(|(i, _)| i)
                    .collect();
                let index = match self.rng.choose(&untried) {
                    Some(&i) => i,
                    None => ucb1(edges, ln_parent, self.exploration),
                };
                index as u32
            })
            .collect()
    }

    /// Child reached by `key`; true when it was just created.
    fn descend<R: Rules>(
        &mut self,
        tree: &mut Tree<R>,
        parent: NodeId,
        key: JointKey,
        sim: &mut GameSimulator<R>,
    ) -> (NodeId, bool) {
        let sampled = tree
            .get(parent)
            .children
            .get(&key)
            .cloned()
            .unwrap_or_default();

        if let Some(&id) = sampled.iter().find(|&&id| tree.get(id).state == *sim.state()) {
            return (id, false);
        }
        if sampled.len() >= self.sparse_sample_size {
            if let Some(&id) = self.rng.choose(&sampled) {
                sim.set_state(tree.get(id).state.clone());
                return (id, false);
            }
        }

        let depth = tree.get(parent).depth + 1;
        let id = tree.alloc(Node::new(sim, depth));
        tree.get_mut(parent).children.entry(key).or_default().push(id);
        (id, true)
    }

    fn rollout<R: Rules>(&mut self, sim: &mut GameSimulator<R>, mut depth: usize) -> PlayerMap<i32> {
        while depth < self.max_depth && !sim.is_terminal_state() {
            let actions = random_joint_action(sim, &mut self.rng);
            if sim.state_transition(&actions).is_err() {
                break;
            }
            depth += 1;
        }
        sim.rewards().clone()
    }
}

impl<R: Rules> Agent<R> for UctAgent {
    fn select_action(
        &mut self,
        player: PlayerId,
        state: &R::State,
        simulator: &GameSimulator<R>,
    ) -> Option<R::Action> {
        match simulator.legal_actions_for(player) {
            [] => return None,
            [only] => return Some(only.clone()),
            _ => {}
        }

        let tree = self.search(state, simulator);
        let best = tree.get(ROOT).edges_of(player)?.iter().max_by(|a, b| {
            a.visits
                .cmp(&b.visits)
                .then(a.mean_reward().total_cmp(&b.mean_reward()))
        })?;

        debug!(
            player = %player,
            iterations = self.iterations,
            nodes = tree.len(),
            visits = best.visits,
            "uct search finished"
        );
        Some(best.action.clone())
    }
}
