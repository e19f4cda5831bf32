//! Monte Carlo tree search for gravity-drop connect-four games.
//!
//! The engine picks a move for one side of a two-player, perfect-information game by
//! repeating four steps: walk the tree with UCB1, expand the frontier, play a uniform
//! random game from a new child and back the result up with alternating signs.
//! After the budget is spent, the most visited child of the root is the recommendation.
//!
//! # Example
//!
//! ```rust
//! use connect_four_mcts::board::Player;
//! use connect_four_mcts::boards::connect_four::ConnectFourBoard;
//! use connect_four_mcts::config::SearchConfig;
//! use connect_four_mcts::mcts::search_with;
//! use connect_four_mcts::random::SeededRandomGenerator;
//!
//! let board = ConnectFourBoard::default();
//! let config = SearchConfig::default().with_iterations(500);
//!
//! let next = search_with(board, Player::First, &config, SeededRandomGenerator::new(7)).unwrap();
//! assert_eq!(next.token_count(), 1);
//! println!("{next}");
//! ```

/// Contains the `Board` trait and the player, cell and winner types shared by all games.
pub mod board;
/// Contains implementations of the `Board` trait.
pub mod boards;
/// Contains `SearchConfig`, the budget and tuning of a search call.
pub mod config;
/// Contains `MctsError`, the error type of boards and search.
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Contains the uniform random playout used to score new nodes.
pub mod rollout;

pub use board::{Board, Cell, Player, Winner};
pub use boards::connect_four::ConnectFourBoard;
pub use config::SearchConfig;
pub use error::MctsError;
pub use mcts::{search, search_with, MonteCarloTreeSearch};
pub use rollout::Outcome;
