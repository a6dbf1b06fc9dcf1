//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices: a node owns its children only through
//! the tree's arena, and refers to its parent by `NodeId` for
//! backpropagation.

use duel_core::{Game, Outcome, Player};

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead and
/// reference cycles through the parent link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Statistics for a single MCTS node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of cycles that passed through this node.
    pub visits: u32,

    /// Sum of rewards, seen by the player who moved into this node.
    pub reward_sum: f64,
}

impl NodeStats {
    /// Mean reward (win rate) for this node.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }

    /// UCB1 score of this node as a child of a node with `parent_visits`.
    ///
    /// UCB1 = w / n + c * sqrt(ln(N) / n)
    ///
    /// Unvisited nodes score `f64::INFINITY` so they are always tried before
    /// any visited sibling.
    pub fn ucb1(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let parent_visits = (parent_visits.max(1)) as f64;
        self.reward_sum / visits + exploration_constant * (parent_visits.ln() / visits).sqrt()
    }
}

/// A node in the MCTS tree.
///
/// Each node wraps one game state and the statistics gathered for it.
#[derive(Clone, Debug)]
pub struct Node<G: Game> {
    pub(crate) state: G::State,

    /// Action that led to this node (None for root).
    pub(crate) action: Option<G::Action>,

    /// Non-owning link used only for backpropagation.
    pub(crate) parent: Option<NodeId>,

    /// Children in the order they were expanded.
    pub(crate) children: Vec<(G::Action, NodeId)>,

    /// Legal actions without a child yet, stored reversed so that `pop`
    /// yields them in move-generation order.
    pub(crate) untried: Vec<G::Action>,

    /// Player whose move produced this state; rewards are credited to them.
    pub(crate) mover: Player,

    /// Cached result if the state is terminal.
    pub(crate) outcome: Option<Outcome>,

    pub(crate) stats: NodeStats,
}

impl<G: Game> Node<G> {
    /// Create a new unexpanded node for `state`.
    pub fn new(
        game: &G,
        state: G::State,
        action: Option<G::Action>,
        parent: Option<NodeId>,
        mover: Player,
    ) -> Self {
        let mut untried = game.legal_actions(&state);
        untried.reverse();
        let outcome = game.outcome(&state);

        Self {
            state,
            action,
            parent,
            children: Vec::new(),
            untried,
            mover,
            outcome,
            stats: NodeStats::default(),
        }
    }

    /// Create the root node.
    ///
    /// Nobody moved into the root; its statistics are credited to the
    /// opponent of the player to move, matching strict alternation.
    pub fn root(game: &G, state: G::State) -> Self {
        let mover = game.current_player(&state).opponent();
        Self::new(game, state, None, None, mover)
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn action(&self) -> Option<G::Action> {
        self.action
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[(G::Action, NodeId)] {
        &self.children
    }

    pub fn stats(&self) -> NodeStats {
        self.stats
    }

    pub fn mover(&self) -> Player {
        self.mover
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True if no child has been created yet.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when every legal action has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record one cycle's result.
    pub fn update(&mut self, outcome: Outcome, draw_reward: f64) {
        self.stats.visits += 1;
        self.stats.reward_sum += outcome.reward_for(self.mover, draw_reward);
    }

    /// Take the next action that has no child yet.
    pub(crate) fn next_untried(&mut self) -> Option<G::Action> {
        self.untried.pop()
    }
}
