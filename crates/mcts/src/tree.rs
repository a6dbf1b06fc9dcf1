//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>: the arena owns every
//! node, children are referenced downward by index and the parent link is a
//! plain index that never keeps anything alive.

use crate::node::{Node, NodeId};
use duel_core::{Game, Outcome, Result};
use std::collections::VecDeque;

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// The root is always `NodeId::ROOT`.
#[derive(Clone, Debug)]
pub struct Tree<G: Game> {
    nodes: Vec<Node<G>>,
}

impl<G: Game> Tree<G> {
    /// Create a new tree whose root wraps `state`.
    pub fn new(game: &G, state: G::State) -> Self {
        Self {
            nodes: vec![Node::root(game, state)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<G> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<G> {
        &mut self.nodes[id.0]
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<G> {
        self.get(NodeId::ROOT)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a new node to the tree, returning its ID.
    fn add(&mut self, node: Node<G>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Find the child reached by `action`, if it has been expanded.
    pub fn child(&self, id: NodeId, action: G::Action) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, child)| *child)
    }

    /// Create one child for the next untried action of `id`.
    ///
    /// Returns `None` once every legal action already has a child (this
    /// includes terminal nodes, which have no legal actions).
    pub fn expand(&mut self, game: &G, id: NodeId) -> Result<Option<NodeId>> {
        let Some(action) = self.get_mut(id).next_untried() else {
            return Ok(None);
        };

        let parent = self.get(id);
        let mover = game.current_player(&parent.state);
        let state = game.apply(&parent.state, action)?;

        let child = Node::new(game, state, Some(action), Some(id), mover);
        let child_id = self.add(child);
        self.get_mut(id).children.push((action, child_id));

        Ok(Some(child_id))
    }

    /// All children of `id` sharing the highest UCB1 score, in expansion
    /// order.
    pub fn best_children(&self, id: NodeId, exploration_constant: f64) -> Vec<NodeId> {
        let node = self.get(id);
        let parent_visits = node.stats.visits;

        let scored: Vec<(NodeId, f64)> = node
            .children
            .iter()
            .map(|(_, child)| {
                let score = self.get(*child).stats.ucb1(parent_visits, exploration_constant);
                (*child, score)
            })
            .collect();

        let best = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);

        scored
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(child, _)| child)
            .collect()
    }

    /// Select the child of `id` with the highest UCB1 score.
    ///
    /// Unvisited children win outright; ties go to the child expanded
    /// first. Returns `None` for a node without children.
    pub fn best_child(&self, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        self.best_children(id, exploration_constant).first().copied()
    }

    /// The child of `id` with the most visits, ties broken by expansion
    /// order (which is move-generation order).
    pub fn most_visited_child(&self, id: NodeId) -> Option<(G::Action, NodeId)> {
        let mut best: Option<(G::Action, NodeId, u32)> = None;
        for (action, child) in &self.get(id).children {
            let visits = self.get(*child).stats.visits;
            if best.map_or(true, |(_, _, most)| visits > most) {
                best = Some((*action, *child, visits));
            }
        }
        best.map(|(action, child, _)| (action, child))
    }

    /// Credit `outcome` to `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Outcome, draw_reward: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.update(outcome, draw_reward);
            current = node.parent;
        }
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    pub fn subtree_size(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend(self.get(current).children.iter().map(|(_, child)| *child));
        }
        count
    }

    /// Depth of the deepest node below the root.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(NodeId::ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(self.get(id).children.iter().map(|(_, child)| (*child, depth + 1)));
        }
        deepest
    }

    /// Re-root the tree at `new_root`, discarding every node outside its
    /// subtree.
    ///
    /// Statistics inside the subtree are kept unchanged; the arena is
    /// compacted so the new root sits at `NodeId::ROOT`.
    pub fn promote(self, new_root: NodeId) -> Self {
        // Breadth-first order doubles as the new arena layout.
        let mut order = Vec::with_capacity(self.subtree_size(new_root));
        let mut queue = VecDeque::from([new_root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.get(id).children.iter().map(|(_, child)| *child));
        }

        let mut remap: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        for (new_index, old) in order.iter().enumerate() {
            remap[old.0] = Some(NodeId(new_index));
        }

        let mut slots: Vec<Option<Node<G>>> = self.nodes.into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old in order {
            let Some(mut node) = slots[old.0].take() else {
                continue;
            };
            node.parent = node.parent.and_then(|parent| remap[parent.0]);
            node.children = node
                .children
                .into_iter()
                .filter_map(|(action, child)| remap[child.0].map(|id| (action, id)))
                .collect();
            nodes.push(node);
        }

        if let Some(root) = nodes.first_mut() {
            root.action = None;
            root.parent = None;
        }

        Self { nodes }
    }
}
