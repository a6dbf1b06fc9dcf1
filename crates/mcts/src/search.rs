//! Monte Carlo Tree Search implementation.
//!
//! Each cycle walks the phase machine
//! Selecting → Expanding → Simulating → Backpropagating → Done.
//! The budget (wall-clock time and an optional cycle cap) is only checked
//! between cycles, so a cycle that has started always completes.

use crate::{
    clock::{Clock, SystemClock},
    config::MctsConfig,
    evaluator::Evaluator,
    node::NodeId,
    tree::Tree,
};
use duel_core::{Game, GameError, Outcome, Result};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, trace};

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult<A> {
    /// Most visited root child, ties broken by move-generation order.
    pub best_action: A,

    /// Visit count for each expanded action at the root.
    pub visit_counts: Vec<(A, u32)>,

    /// Win rate of the chosen child for the player to move at the root.
    pub root_value: f64,

    /// Cycles completed during this search.
    pub iterations: usize,

    /// Time spent according to the engine's clock.
    pub elapsed: Duration,

    /// Nodes in the tree when the search finished.
    pub tree_size: usize,
}

impl<A: Copy + PartialEq> SearchResult<A> {
    /// Visits recorded for `action` at the root (0 if never expanded).
    pub fn visits(&self, action: A) -> u32 {
        self.visit_counts
            .iter()
            .find(|(a, _)| *a == action)
            .map_or(0, |(_, visits)| *visits)
    }

    /// Sum of visits over all root children.
    pub fn total_visits(&self) -> u32 {
        self.visit_counts.iter().map(|(_, visits)| visits).sum()
    }
}

/// Stage of a single search cycle.
#[derive(Clone, Copy, Debug)]
enum Phase {
    Selecting,
    Expanding(NodeId),
    Simulating(NodeId),
    Backpropagating(NodeId, Outcome),
    Done,
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// Generic over:
/// - `G`: The game being played
/// - `E`: The simulation strategy
/// - `R`: The random number generator (rollouts and tie-breaking)
/// - `C`: The time source for the budget
pub struct Mcts<G: Game, E: Evaluator<G>, R: Rng, C: Clock = SystemClock> {
    config: MctsConfig,
    evaluator: E,
    rng: R,
    clock: C,
    tree: Option<Tree<G>>,
}

impl<G, E, R> Mcts<G, E, R, SystemClock>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
{
    /// Create a new MCTS instance measuring its budget in wall-clock time.
    pub fn new(config: MctsConfig, evaluator: E, rng: R) -> Self {
        Self::with_clock(config, evaluator, rng, SystemClock::new())
    }
}

impl<G, E, R, C> Mcts<G, E, R, C>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
    C: Clock,
{
    /// Create a new MCTS instance with an explicit time source.
    pub fn with_clock(config: MctsConfig, evaluator: E, rng: R, clock: C) -> Self {
        Self {
            config,
            evaluator,
            rng,
            clock,
            tree: None,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Get the search tree retained from the last search (for inspection).
    pub fn tree(&self) -> Option<&Tree<G>> {
        self.tree.as_ref()
    }

    /// Drop the retained tree; the next search starts from scratch.
    pub fn reset(&mut self) {
        self.tree = None;
    }

    /// Follow `action` in the retained tree.
    ///
    /// The child reached by `action` becomes the new root with its
    /// statistics intact and all its siblings are discarded. Without a
    /// matching child (or with reuse disabled) the tree is dropped.
    pub fn advance(&mut self, action: G::Action) {
        let Some(tree) = self.tree.take() else {
            return;
        };

        if !self.config.reuse_tree {
            return;
        }

        match tree.child(NodeId::ROOT, action) {
            Some(child) => {
                let tree = tree.promote(child);
                debug!(
                    ?action,
                    nodes = tree.len(),
                    visits = tree.root().stats().visits,
                    "Promoted subtree"
                );
                self.tree = Some(tree);
            }
            None => debug!(?action, "No subtree for action, tree discarded"),
        }
    }

    /// Run MCTS from the given state until the budget is spent.
    ///
    /// # Errors
    /// - `GameError::NoLegalMoves` if `state` is terminal
    /// - `GameError::InvalidConfig` if the configuration is unusable
    /// - Any error raised by the game or the evaluator during a cycle
    pub fn search(&mut self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        self.config.validate()?;

        let legal_actions = game.legal_actions(state);
        let Some(&first_action) = legal_actions.first() else {
            return Err(GameError::NoLegalMoves);
        };

        if legal_actions.len() == 1 {
            trace!(action = ?first_action, "Single legal action, search skipped");
            return Ok(SearchResult {
                best_action: first_action,
                visit_counts: vec![(first_action, 0)],
                root_value: 0.0,
                iterations: 0,
                elapsed: Duration::ZERO,
                tree_size: self.tree.as_ref().map_or(0, Tree::len),
            });
        }

        let mut tree = self.prepare_tree(game, state);

        let start = self.clock.now();
        let mut iterations = 0;
        loop {
            if self.config.iterations_exhausted(iterations) {
                break;
            }
            if self.clock.now().saturating_sub(start) >= self.config.time_budget {
                break;
            }
            if let Err(err) = self.run_cycle(game, &mut tree) {
                // A half-finished cycle leaves unbalanced statistics.
                debug!(%err, iterations, nodes = tree.len(), "MCTS cycle failed, tree discarded");
                return Err(err);
            }
            iterations += 1;
        }
        let elapsed = self.clock.now().saturating_sub(start);

        let result = Self::extract_results(&tree, first_action, iterations, elapsed);
        debug!(
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            tree_size = result.tree_size,
            depth = tree.depth(),
            best_action = ?result.best_action,
            root_value = result.root_value,
            "MCTS search complete"
        );

        self.tree = Some(tree);
        Ok(result)
    }

    /// Take the retained tree if it is rooted at `state`, else build a new one.
    fn prepare_tree(&mut self, game: &G, state: &G::State) -> Tree<G> {
        match self.tree.take() {
            Some(tree) if self.config.reuse_tree && tree.root().state() == state => {
                debug!(
                    nodes = tree.len(),
                    visits = tree.root().stats().visits,
                    "Reusing search tree"
                );
                tree
            }
            _ => Tree::new(game, state.clone()),
        }
    }

    /// Run one full cycle: select, expand, simulate, backpropagate.
    fn run_cycle(&mut self, game: &G, tree: &mut Tree<G>) -> Result<()> {
        let mut phase = Phase::Selecting;
        loop {
            phase = match phase {
                Phase::Selecting => Phase::Expanding(self.select(tree)),
                Phase::Expanding(id) => match tree.get(id).outcome() {
                    // Terminal: its winner is already known.
                    Some(outcome) => Phase::Backpropagating(id, outcome),
                    None => match tree.expand(game, id)? {
                        Some(child) => Phase::Simulating(child),
                        None => Phase::Simulating(id),
                    },
                },
                Phase::Simulating(id) => {
                    let outcome =
                        self.evaluator
                            .evaluate(game, tree.get(id).state(), &mut self.rng)?;
                    Phase::Backpropagating(id, outcome)
                }
                Phase::Backpropagating(id, outcome) => {
                    tree.backpropagate(id, outcome, self.config.draw_reward);
                    trace!(leaf = id.index(), %outcome, "MCTS cycle complete");
                    Phase::Done
                }
                Phase::Done => return Ok(()),
            };
        }
    }

    /// Descend from the root while nodes are fully expanded and not terminal.
    fn select(&mut self, tree: &Tree<G>) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = tree.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                return current;
            }
            match self.select_child(tree, current) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    fn select_child(&mut self, tree: &Tree<G>, id: NodeId) -> Option<NodeId> {
        let c = self.config.exploration_constant;
        if !self.config.randomize_ties {
            return tree.best_child(id, c);
        }

        let best = tree.best_children(id, c);
        if best.is_empty() {
            None
        } else {
            Some(best[self.rng.gen_range(0..best.len())])
        }
    }

    /// Extract search results from the root.
    fn extract_results(
        tree: &Tree<G>,
        fallback: G::Action,
        iterations: usize,
        elapsed: Duration,
    ) -> SearchResult<G::Action> {
        let visit_counts: Vec<(G::Action, u32)> = tree
            .root()
            .children()
            .iter()
            .map(|(action, id)| (*action, tree.get(*id).stats().visits))
            .collect();

        // Zero completed cycles leaves no statistics: fall back to the
        // first legal action.
        let (best_action, root_value) = match tree.most_visited_child(NodeId::ROOT) {
            Some((action, child)) => (action, tree.get(child).stats().mean_reward()),
            None => (fallback, 0.0),
        };

        SearchResult {
            best_action,
            visit_counts,
            root_value,
            iterations,
            elapsed,
            tree_size: tree.len(),
        }
    }
}
