use crate::board::{Board, Player};
use crate::config::{validate_exploration_constant, SearchConfig, DEFAULT_EXPLORATION_CONSTANT};
use crate::error::MctsError;
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::rollout::{rollout, Outcome};
use ego_tree::{NodeId, NodeRef, Tree};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It owns the search tree, the random number generator and the exploration constant.
/// The tree lives for one search and is dropped with this struct.
pub struct MonteCarloTreeSearch<T: Board, K: RandomGenerator> {
    tree: Tree<MctsNode<T>>,
    random: K,
    exploration_constant: f64,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
pub struct MonteCarloTreeSearchBuilder<T: Board, K: RandomGenerator> {
    board: T,
    player_to_move: Player,
    random_generator: K,
    exploration_constant: f64,
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearchBuilder<T, K> {
    /// Creates a new builder for a search from `board` with `player_to_move` on turn.
    pub fn new(board: T, player_to_move: Player) -> Self {
        Self {
            board,
            player_to_move,
            random_generator: K::default(),
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
        }
    }

    /// Sets the random number generator used by rollouts.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Sets the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builds the search. Fails if the constant is not positive or the root has no move to search.
    pub fn build(self) -> Result<MonteCarloTreeSearch<T, K>, MctsError> {
        MonteCarloTreeSearch::new(
            self.board,
            self.player_to_move,
            self.random_generator,
            self.exploration_constant,
        )
    }
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearch<T, K> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(board: T, player_to_move: Player) -> MonteCarloTreeSearchBuilder<T, K> {
        MonteCarloTreeSearchBuilder::new(board, player_to_move)
    }

    /// Creates a new search rooted at `board`.
    ///
    /// It is recommended to use the builder via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(
        board: T,
        player_to_move: Player,
        rg: K,
        exploration_constant: f64,
    ) -> Result<Self, MctsError> {
        validate_exploration_constant(exploration_constant)?;
        if board.is_terminal() || board.get_available_moves().is_empty() {
            return Err(MctsError::NoLegalMove);
        }

        Ok(Self {
            tree: Tree::new(MctsNode::new(board, player_to_move)),
            random: rg,
            exploration_constant,
        })
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<T>> {
        &self.tree
    }

    /// Returns the root node of the search tree.
    pub fn get_root(&self) -> NodeRef<'_, MctsNode<T>> {
        self.tree.root()
    }

    /// Number of nodes currently in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.tree.nodes().count()
    }

    /// Performs one full pass: selection, expansion, rollout and backpropagation.
    ///
    /// A frontier that is already decided is backpropagated with its known result
    /// instead of being expanded.
    pub fn do_iteration(&mut self) -> Result<(), MctsError> {
        let leaf_id = self.select_leaf();
        let leaf = self
            .tree
            .get(leaf_id)
            .ok_or(MctsError::TreeInvariant("selected node is not in the tree"))?;

        if let Some(winner) = leaf.value().outcome {
            let outcome = Outcome::from(winner);
            trace!(height = leaf.value().height, ?outcome, "terminal frontier");
            return self.backpropagate(leaf_id, outcome);
        }

        self.expand_node(leaf_id)?;

        let leaf = self
            .tree
            .get(leaf_id)
            .ok_or(MctsError::TreeInvariant("expanded node is not in the tree"))?;
        let child = Self::select_child(leaf, self.exploration_constant)
            .ok_or(MctsError::TreeInvariant("expanded node has no children"))?;
        let child_id = child.id();
        let data = child.value();
        let outcome = rollout(&data.board, data.player_to_move, &mut self.random)?;
        trace!(height = data.height, ?outcome, "rollout finished");

        self.backpropagate(child_id, outcome)
    }

    /// Runs exactly `n` iterations.
    pub fn iterate_n_times(&mut self, n: u32) -> Result<(), MctsError> {
        for _ in 0..n {
            self.do_iteration()?;
        }
        Ok(())
    }

    /// Runs iterations until `deadline` passes or `max_iterations` are done, whichever
    /// comes first. The deadline is checked after each pass, so at least one pass runs.
    /// Returns the number of passes performed.
    pub fn iterate_until(
        &mut self,
        deadline: Instant,
        max_iterations: u32,
    ) -> Result<u32, MctsError> {
        let mut done = 0;
        while done < max_iterations {
            self.do_iteration()?;
            done += 1;
            if Instant::now() >= deadline {
                break;
            }
        }
        Ok(done)
    }

    /// Returns the root child with the most visits, the first one on ties.
    pub fn get_best_child(&self) -> Option<NodeRef<'_, MctsNode<T>>> {
        let mut best: Option<NodeRef<'_, MctsNode<T>>> = None;
        for child in self.tree.root().children() {
            let better = match best {
                None => true,
                Some(current) => child.value().visits > current.value().visits,
            };
            if better {
                best = Some(child);
            }
        }
        best
    }

    /// Returns the board after the recommended move.
    pub fn get_best_board(&self) -> Result<T, MctsError> {
        self.get_best_child()
            .map(|child| child.value().board.clone())
            .ok_or(MctsError::NoLegalMove)
    }

    /// Walks from the root to the frontier: a decided node or one without children.
    fn select_leaf(&self) -> NodeId {
        let mut node = self.tree.root();
        loop {
            if node.value().is_terminal() || !node.has_children() {
                return node.id();
            }
            match Self::select_child(node, self.exploration_constant) {
                Some(child) => node = child,
                None => return node.id(),
            }
        }
    }

    /// Picks the first unvisited child, otherwise the child with the highest UCB1 score.
    /// Ties go to the earliest child.
    fn select_child(
        node: NodeRef<'_, MctsNode<T>>,
        exploration_constant: f64,
    ) -> Option<NodeRef<'_, MctsNode<T>>> {
        let parent_visits = node.value().visits;
        let mut best_child = None;
        let mut max_ucb = f64::NEG_INFINITY;

        for child in node.children() {
            if child.value().visits == 0 {
                return Some(child);
            }
            let current_ucb = child.value().ucb1(parent_visits, exploration_constant);
            if current_ucb > max_ucb {
                max_ucb = current_ucb;
                best_child = Some(child);
            }
        }

        best_child
    }

    /// Adds one child per legal move. Does nothing for decided or already expanded nodes.
    /// Returns the number of children created.
    fn expand_node(&mut self, node_id: NodeId) -> Result<usize, MctsError> {
        let children = {
            let node = self
                .tree
                .get(node_id)
                .ok_or(MctsError::TreeInvariant("expanding a node outside the tree"))?;
            let data = node.value();
            if node.has_children() || data.is_terminal() {
                warn!(height = data.height, "refusing to expand a node twice or a decided node");
                return Ok(0);
            }

            data.board
                .get_available_moves()
                .into_iter()
                .map(|possible_move| -> Result<MctsNode<T>, MctsError> {
                    let board = data.board.with_move(possible_move, data.player_to_move)?;
                    let mut child = MctsNode::new(board, data.player_to_move.opponent());
                    child.prev_move = Some(possible_move);
                    child.height = data.height + 1;
                    Ok(child)
                })
                .collect::<Result<Vec<_>, MctsError>>()?
        };

        let count = children.len();
        let mut node = self
            .tree
            .get_mut(node_id)
            .ok_or(MctsError::TreeInvariant("expanding a node outside the tree"))?;
        for child in children {
            node.append(child);
        }
        Ok(count)
    }

    /// Adds one visit and the outcome's reward to every node from `node_id` up to the root.
    ///
    /// The reward is scored for the player who moved into `node_id` and negated at
    /// each level, so every node holds value for the player to move at its parent.
    fn backpropagate(&mut self, node_id: NodeId, outcome: Outcome) -> Result<(), MctsError> {
        let (mut reward, branch) = {
            let node = self
                .tree
                .get(node_id)
                .ok_or(MctsError::TreeInvariant("backpropagating from outside the tree"))?;
            let reward = outcome.reward_for(node.value().mover());
            let branch: Vec<NodeId> = std::iter::once(node.id())
                .chain(node.ancestors().map(|ancestor| ancestor.id()))
                .collect();
            (reward, branch)
        };

        for id in branch {
            let mut node = self
                .tree
                .get_mut(id)
                .ok_or(MctsError::TreeInvariant("ancestor is not in the tree"))?;
            let mcts_node = node.value();
            mcts_node.visits += 1;
            mcts_node.value += reward;
            reward = -reward;
        }

        Ok(())
    }
}

impl<T: Board> MonteCarloTreeSearch<T, StandardRandomGenerator> {
    pub fn from_board(board: T, player_to_move: Player) -> Result<Self, MctsError> {
        MonteCarloTreeSearchBuilder::new(board, player_to_move).build()
    }
}

/// Searches `iterations` passes from `root_state` and returns the board after the
/// recommended move for `player_to_move`.
pub fn search<T: Board>(
    root_state: T,
    player_to_move: Player,
    iterations: u32,
    exploration_constant: f64,
) -> Result<T, MctsError> {
    let config = SearchConfig::default()
        .with_iterations(iterations)
        .with_exploration_constant(exploration_constant);
    search_with(root_state, player_to_move, &config, StandardRandomGenerator)
}

/// Like [`search`], with a full configuration and an injected random source.
pub fn search_with<T: Board, K: RandomGenerator>(
    root_state: T,
    player_to_move: Player,
    config: &SearchConfig,
    random: K,
) -> Result<T, MctsError> {
    config.validate()?;
    let mut mcts = MonteCarloTreeSearch::builder(root_state, player_to_move)
        .with_random_generator(random)
        .with_exploration_constant(config.exploration_constant)
        .build()?;

    let started = Instant::now();
    debug!(
        ?player_to_move,
        iterations = config.iterations,
        time_limit = ?config.time_limit,
        "starting search"
    );

    let passes = match config.time_limit {
        Some(limit) => mcts.iterate_until(started + limit, config.iterations)?,
        None => {
            mcts.iterate_n_times(config.iterations)?;
            config.iterations
        }
    };

    let best = mcts.get_best_child().ok_or(MctsError::NoLegalMove)?;
    debug!(
        passes,
        root_visits = mcts.get_root().value().visits,
        best_move = ?best.value().prev_move,
        best_visits = best.value().visits,
        nodes = mcts.node_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );

    Ok(best.value().board.clone())
}
