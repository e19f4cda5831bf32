use connect_four_mcts::board::{Cell, Player, Winner};
use connect_four_mcts::boards::connect_four::ConnectFourBoard;
use connect_four_mcts::config::SearchConfig;
use connect_four_mcts::mcts::{MonteCarloTreeSearch, search_with};
use connect_four_mcts::random::SeededRandomGenerator;
use connect_four_mcts::rollout::{Outcome, rollout};
use proptest::prelude::*;

/// Plays column picks (reduced modulo the legal columns) until the game ends or the picks run out.
fn random_position(rows: usize, cols: usize, picks: &[usize]) -> (ConnectFourBoard, Player) {
    let mut board = ConnectFourBoard::new(rows, cols).unwrap();
    let mut player = Player::First;
    for &pick in picks {
        if board.winner().is_some() {
            break;
        }
        let legal = board.legal_columns();
        board = board.drop_token(legal[pick % legal.len()], player).unwrap();
        player = player.opponent();
    }
    (board, player)
}

proptest! {
    #[test]
    fn legal_columns_are_exactly_the_open_ones(
        rows in 1usize..8,
        cols in 1usize..9,
        picks in prop::collection::vec(0usize..16, 0..40),
    ) {
        let (board, _) = random_position(rows, cols, &picks);
        let legal = board.legal_columns();
        for col in 0..cols {
            let top_empty = board.cell(rows - 1, col) == Some(Cell::Empty);
            prop_assert_eq!(legal.contains(&col), top_empty);
        }
        prop_assert!(legal.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn drop_changes_exactly_one_cell(
        picks in prop::collection::vec(0usize..16, 0..30),
        choice in 0usize..16,
    ) {
        let (board, player) = random_position(6, 7, &picks);
        let legal = board.legal_columns();
        prop_assume!(!legal.is_empty());
        let col = legal[choice % legal.len()];
        let height = board.height(col).unwrap();

        let next = board.drop_token(col, player).unwrap();

        prop_assert_eq!(next.height(col).unwrap(), height + 1);
        prop_assert_eq!(next.cell(height, col), Some(Cell::Owned(player)));
        let mut differences = 0;
        for row in 0..6 {
            for c in 0..7 {
                if board.cell(row, c) != next.cell(row, c) {
                    differences += 1;
                }
            }
        }
        prop_assert_eq!(differences, 1);
    }

    #[test]
    fn rollouts_always_terminate(
        picks in prop::collection::vec(0usize..16, 0..20),
        seed in any::<u64>(),
    ) {
        let (board, player) = random_position(6, 7, &picks);
        let mut rng = SeededRandomGenerator::new(seed);
        let outcome = rollout(&board, player, &mut rng).unwrap();
        if board.legal_columns().is_empty() && board.winner() == Some(Winner::Draw) {
            prop_assert_eq!(outcome, Outcome::Draw);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn search_visit_accounting(
        picks in prop::collection::vec(0usize..16, 0..12),
        iterations in 1u32..150,
        seed in any::<u64>(),
    ) {
        let (board, player) = random_position(6, 7, &picks);
        prop_assume!(board.winner().is_none());

        let mut mcts = MonteCarloTreeSearch::builder(board.clone(), player)
            .with_random_generator(SeededRandomGenerator::new(seed))
            .build()
            .unwrap();
        mcts.iterate_n_times(iterations).unwrap();

        let root = mcts.get_root();
        prop_assert_eq!(root.value().visits, iterations);
        let child_visits: u32 = root.children().map(|c| c.value().visits).sum();
        prop_assert_eq!(child_visits, iterations);

        // Nobody is exploited before every sibling has been sampled once.
        let unvisited = root.children().filter(|c| c.value().visits == 0).count();
        if unvisited > 0 {
            prop_assert!(root.children().all(|c| c.value().visits <= 1));
        }
    }

    #[test]
    fn search_plays_one_legal_move(
        picks in prop::collection::vec(0usize..16, 0..12),
        seed in any::<u64>(),
    ) {
        let (board, player) = random_position(6, 7, &picks);
        prop_assume!(board.winner().is_none());
        let config = SearchConfig::default().with_iterations(60);

        let next = search_with(board.clone(), player, &config, SeededRandomGenerator::new(seed)).unwrap();

        prop_assert_eq!(next.token_count(), board.token_count() + 1);
        let before = board.legal_columns();
        prop_assert!(next.legal_columns().iter().all(|c| before.contains(c)));
    }
}
