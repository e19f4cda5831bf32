//! Uniform random playouts.

use crate::board::{Board, Player, Winner};
use crate::error::MctsError;
use crate::random::RandomGenerator;

/// Result of a finished playout.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Outcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl Outcome {
    /// Reward for `player`: 1 for a win, -1 for a loss, 0 for a draw.
    pub fn reward_for(self, player: Player) -> f64 {
        match (self, player) {
            (Outcome::Draw, _) => 0.0,
            (Outcome::FirstWins, Player::First) | (Outcome::SecondWins, Player::Second) => 1.0,
            _ => -1.0,
        }
    }
}

impl From<Winner> for Outcome {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::Player(Player::First) => Outcome::FirstWins,
            Winner::Player(Player::Second) => Outcome::SecondWins,
            Winner::Draw => Outcome::Draw,
        }
    }
}

/// Plays uniformly random legal moves from `board`, alternating players from
/// `player_to_move`, until the game is decided.
///
/// Works on a private copy. Every ply fills one cell, so the loop ends after at
/// most one ply per empty cell; running out of moves is a draw.
pub fn rollout<T: Board, K: RandomGenerator>(
    board: &T,
    player_to_move: Player,
    random: &mut K,
) -> Result<Outcome, MctsError> {
    let mut board = board.clone();
    let mut player = player_to_move;

    loop {
        if let Some(winner) = board.winner() {
            return Ok(winner.into());
        }

        let moves = board.get_available_moves();
        let Some(&random_move) = random.choose(&moves) else {
            return Ok(Outcome::Draw);
        };
        board.perform_move(random_move, player)?;
        player = player.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::connect_four::ConnectFourBoard;
    use crate::random::SeededRandomGenerator;

    #[test]
    fn decided_board_returns_its_winner() {
        let won = ConnectFourBoard::from_rows(&[
            vec![2, 2, 2, 2, 0],
            vec![1, 1, 1, 0, 0],
        ])
        .unwrap();
        let mut rng = SeededRandomGenerator::default();
        assert_eq!(
            rollout(&won, Player::First, &mut rng),
            Ok(Outcome::SecondWins)
        );
    }

    #[test]
    fn full_board_is_an_immediate_draw() {
        let full = ConnectFourBoard::from_rows(&[vec![1, 2, 1], vec![2, 1, 2]]).unwrap();
        let mut rng = SeededRandomGenerator::default();
        assert_eq!(rollout(&full, Player::First, &mut rng), Ok(Outcome::Draw));
    }

    #[test]
    fn random_games_always_finish() {
        let board = ConnectFourBoard::default();
        for seed in 0..50 {
            let mut rng = SeededRandomGenerator::new(seed);
            let outcome = rollout(&board, Player::First, &mut rng).unwrap();
            assert!(matches!(
                outcome,
                Outcome::FirstWins | Outcome::SecondWins | Outcome::Draw
            ));
        }
    }

    #[test]
    fn rollout_leaves_input_untouched() {
        let board = ConnectFourBoard::default().drop_token(2, Player::First).unwrap();
        let mut rng = SeededRandomGenerator::new(7);
        rollout(&board, Player::Second, &mut rng).unwrap();
        assert_eq!(board.token_count(), 1);
    }

    #[test]
    fn forced_single_move_is_played_by_the_right_player() {
        // Only column 3 is open; whoever fills it completes the bottom row.
        let board = ConnectFourBoard::from_rows(&[vec![2, 2, 2, 0]]).unwrap();
        let mut rng = SeededRandomGenerator::default();
        assert_eq!(
            rollout(&board, Player::Second, &mut rng),
            Ok(Outcome::SecondWins)
        );
        assert_eq!(rollout(&board, Player::First, &mut rng), Ok(Outcome::Draw));
    }

    #[test]
    fn rewards_are_zero_sum() {
        for outcome in [Outcome::FirstWins, Outcome::SecondWins, Outcome::Draw] {
            let total = outcome.reward_for(Player::First) + outcome.reward_for(Player::Second);
            assert_eq!(total, 0.0);
        }
        assert_eq!(Outcome::FirstWins.reward_for(Player::First), 1.0);
        assert_eq!(Outcome::FirstWins.reward_for(Player::Second), -1.0);
    }
}
