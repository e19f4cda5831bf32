use crate::error::MctsError;
use std::fmt::Debug;

/// The interface a game state must provide for the tree search.
///
/// Whose turn it is is never inferred from the position: every move is applied
/// on behalf of an explicit [`Player`], and the search tracks the player to move
/// on each node.
pub trait Board: Clone {
    /// A single move. For gravity-drop games this is a column index.
    type Move: Copy + Debug + PartialEq;

    /// Returns every legal move in a deterministic order.
    fn get_available_moves(&self) -> Vec<Self::Move>;

    /// Applies a move for `player` in place.
    fn perform_move(&mut self, b_move: Self::Move, player: Player) -> Result<(), MctsError>;

    /// Returns the decided result of the position, or `None` while the game is still running.
    fn winner(&self) -> Option<Winner>;

    /// Returns a new board with the move applied, leaving `self` untouched.
    fn with_move(&self, b_move: Self::Move, player: Player) -> Result<Self, MctsError> {
        let mut next = self.clone();
        next.perform_move(b_move, player)?;
        Ok(next)
    }

    /// True once the game is won or drawn.
    fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }
}

/// One of the two sides of the game.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// Content of a single grid cell.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
pub enum Cell {
    #[default]
    Empty,
    Owned(Player),
}

/// The result of a finished game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Winner {
    Player(Player),
    Draw,
}
