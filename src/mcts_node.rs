use crate::board::{Board, Player, Winner};

/// A single node of the search tree.
///
/// The tree owns its nodes in an arena, so the parent link is a lookup into
/// that arena rather than a pointer that keeps ancestors alive.
#[derive(Debug, Clone)]
pub struct MctsNode<T: Board> {
    /// Depth below the root.
    pub height: u32,
    /// The game state this node represents.
    pub board: T,
    /// The move that produced this state. `None` for the root.
    pub prev_move: Option<T::Move>,
    /// The player who moves next from this state.
    pub player_to_move: Player,
    /// Cached result of `board.winner()`.
    pub outcome: Option<Winner>,
    /// Number of backpropagations through this node.
    pub visits: u32,
    /// Sum of rewards for the player who moved into this node.
    pub value: f64,
}

impl<T: Board> MctsNode<T> {
    pub fn new(board: T, player_to_move: Player) -> Self {
        let outcome = board.winner();
        MctsNode {
            height: 0,
            board,
            prev_move: None,
            player_to_move,
            outcome,
            visits: 0,
            value: 0.0,
        }
    }

    /// The player whose move led here, i.e. the one to move at the parent.
    pub fn mover(&self) -> Player {
        self.player_to_move.opponent()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Average reward, or 0 for an unvisited node.
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / f64::from(self.visits)
        }
    }

    /// UCB1 score of this node as a child of a node with `parent_visits` visits.
    ///
    /// Unvisited nodes score infinity so they are always tried first.
    pub fn ucb1(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = f64::from(self.visits);
        self.mean_value()
            + exploration_constant * (f64::from(parent_visits).ln() / visits).sqrt()
    }
}
