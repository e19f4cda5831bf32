extern crate connect_four_mcts;

use connect_four_mcts::board::{Player, Winner};
use connect_four_mcts::boards::connect_four::ConnectFourBoard;
use connect_four_mcts::config::SearchConfig;
use connect_four_mcts::error::MctsError;
use connect_four_mcts::mcts::search_with;
use connect_four_mcts::random::StandardRandomGenerator;
use std::time::Duration;

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<(), MctsError> {
    init_tracing("info");

    // The first player thinks harder than the second one
    let strong = SearchConfig::default()
        .with_iterations(1500)
        .with_time_limit(Duration::from_millis(500));
    let weak = SearchConfig::default().with_iterations(150);

    let mut board = ConnectFourBoard::default();
    let mut player = Player::First;

    while board.winner().is_none() {
        let config = match player {
            Player::First => &strong,
            Player::Second => &weak,
        };
        board = search_with(board, player, config, StandardRandomGenerator)?;
        println!("{player:?} moved:\n{board}");
        player = player.opponent();
    }

    match board.winner() {
        Some(Winner::Player(winner)) => println!("{winner:?} wins"),
        _ => println!("Draw"),
    }

    Ok(())
}
