//! 性質テスト: 任意の盤面・手順に対する勝利判定と手番の不変条件。

use proptest::prelude::*;
use trigrid_core::engine;

/// マス目の値（0 = 空き, 1..=3 = プレイヤー）を `Cell` に変換する。
fn cell_from_code(code: u8) -> engine::Cell {
    match code {
        1 => engine::Cell::PlayerOne,
        2 => engine::Cell::PlayerTwo,
        3 => engine::Cell::PlayerThree,
        _ => engine::Cell::Empty,
    }
}

/// 任意の盤面。
fn any_board() -> impl Strategy<Value = engine::Board> {
    prop::array::uniform5(prop::array::uniform5(0_u8..4)).prop_map(|codes| {
        engine::Board::from_cells(codes.map(|row| row.map(cell_from_code)))
    })
}

/// 任意のプレイヤー。
fn any_player() -> impl Strategy<Value = engine::Player> {
    prop::sample::select(engine::Player::ALL.to_vec())
}

/// 12本のラインの座標（行、列、主対角線、反対角線の順）。
fn line_coordinates() -> Vec<[(usize, usize); 5]> {
    let mut lines = Vec::new();
    for row in 0..5 {
        lines.push([0, 1, 2, 3, 4].map(|col| (row, col)));
    }
    for col in 0..5 {
        lines.push([0, 1, 2, 3, 4].map(|row| (row, col)));
    }
    lines.push([0, 1, 2, 3, 4].map(|index| (index, index)));
    lines.push([0, 1, 2, 3, 4].map(|index| (index, 4 - index)));
    lines
}

/// マス目を直接走査する参照実装。
fn reference_winner(board: engine::Board) -> Option<engine::Player> {
    let cells = board.to_cells();
    line_coordinates().into_iter().find_map(|line| {
        let first = cells[line[0].0][line[0].1];
        let uniform = line.iter().all(|&(row, col)| cells[row][col] == first);
        if uniform { first.player() } else { None }
    })
}

proptest! {
    #[test]
    fn check_winner_matches_reference_scan(board in any_board()) {
        prop_assert_eq!(engine::check_winner(board), reference_winner(board));
    }

    #[test]
    fn lone_uniform_line_names_its_owner(line in 0_usize..12, player in any_player()) {
        let mut cells = [[engine::Cell::Empty; 5]; 5];
        for (row, col) in line_coordinates()[line] {
            cells[row][col] = engine::Cell::from(player);
        }
        prop_assert_eq!(engine::check_winner(engine::Board::from_cells(cells)), Some(player));
    }

    #[test]
    fn turns_cycle_on_every_accepted_move(
        moves in prop::collection::vec((0_u8..5, 0_u8..5), 0..60)
    ) {
        let mut game = engine::Game::initial();
        let mut accepted = 0_usize;
        for (row, col) in moves {
            let before = game;
            let report = game.apply_move(row, col);
            prop_assert!(report.is_ok());
            let placed = report.map(|value| value.placed).unwrap_or(false);
            if placed {
                accepted += 1;
                prop_assert_eq!(game.side_to_move(), before.side_to_move().next());
            } else {
                // 埋まっているマスへの着手は何も変えない。
                prop_assert_eq!(game, before);
            }
            prop_assert_eq!(game.side_to_move(), engine::Player::ALL[accepted % 3]);
            prop_assert_eq!(game.board().occupied().count_ones() as usize, accepted);
        }
    }

    #[test]
    fn winner_is_never_overwritten(
        moves in prop::collection::vec((0_u8..5, 0_u8..5), 0..80)
    ) {
        let mut game = engine::Game::initial();
        let mut first_winner = None;
        for (row, col) in moves {
            let report = game.apply_move(row, col);
            if let Ok(value) = report {
                if let Some(player) = value.winner {
                    prop_assert!(first_winner.is_none());
                    first_winner = Some(player);
                }
            }
            prop_assert_eq!(game.winner(), first_winner);
        }
    }

    #[test]
    fn reset_always_restores_initial_state(
        moves in prop::collection::vec((0_u8..5, 0_u8..5), 0..40)
    ) {
        let mut game = engine::Game::initial();
        for (row, col) in moves {
            let _ = game.apply_move(row, col);
        }
        game.reset();
        prop_assert_eq!(game.board(), engine::Board::empty());
        prop_assert_eq!(game.side_to_move(), engine::Player::One);
        prop_assert_eq!(game.outcome(), engine::Outcome::InProgress);
    }
}
