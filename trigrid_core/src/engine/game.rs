use core::fmt;

use crate::engine::board::{Board, check_winner};
use crate::engine::rules::{AfterWin, Rules};
use crate::engine::types::{Player, Square};

/// ゲームの勝敗状態。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Outcome {
    /// 進行中（勝者なし）。
    #[default]
    InProgress,
    /// 勝者が決定した。リセットするまで変化しない。
    Won(Player),
}

/// 着手の適用に失敗した理由。
///
/// 埋まっているマスへの着手はエラーではなく、何もしない（`MoveReport::placed == false`）。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PlayError {
    /// `AfterWin::Locked` で、すでに勝敗が決まっている。
    GameOver,
    /// 座標が盤外。
    InvalidCoordinate {
        /// 指定された列。
        col: u8,
        /// 指定された行。
        row: u8,
    },
}

impl fmt::Display for PlayError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::GameOver => f.write_str("the game is already won"),
            Self::InvalidCoordinate { col, row } => write!(
                f,
                "coordinate ({row}, {col}) is outside the {len}x{len} board",
                len = Square::BOARD_LEN
            ),
        }
    }
}

impl core::error::Error for PlayError {}

/// 着手1回分の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct MoveReport {
    /// 着手後の盤面。
    pub board: Board,
    /// 石を置いたかどうか（埋まっているマスなら `false`）。
    pub placed: bool,
    /// 着手後の手番。
    pub side_to_move: Player,
    /// この着手で勝者が決まった場合、その勝者。
    pub winner: Option<Player>,
}

/// 1ゲームの進行を管理する構造体。
///
/// 盤面、手番、勝敗状態をまとめて保持し、常に一緒に更新・リセットされる。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Game {
    /// 現在の盤面。
    board: Board,
    /// 勝敗状態。
    outcome: Outcome,
    /// ルール設定。
    rules: Rules,
    /// 手番。
    side_to_move: Player,
}

impl Game {
    /// 着手を適用する。
    ///
    /// - 空きマスなら現手番の石を置き、勝利判定を行い、手番を進める。
    /// - 埋まっているマスなら何も変えずに `placed == false` を返す。
    /// - 勝者は最初に決まったものから上書きされない。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::InvalidCoordinate`: 座標が盤外の場合
    /// - `PlayError::GameOver`: `AfterWin::Locked` で勝敗が決まっている場合
    ///
    #[inline]
    pub fn apply_move(&mut self, row: u8, col: u8) -> Result<MoveReport, PlayError> {
        let Some(square) = Square::from_row_col(row, col) else {
            tracing::warn!(row, col, "rejected move outside the board");
            return Err(PlayError::InvalidCoordinate { col, row });
        };

        if self.is_won() && self.rules.after_win == AfterWin::Locked {
            tracing::debug!(row, col, "rejected move after the game was won");
            return Err(PlayError::GameOver);
        }

        if self.board.is_occupied(square) {
            tracing::debug!(row, col, "ignored move on occupied cell");
            return Ok(self.report(false, None));
        }

        let mover = self.side_to_move;
        self.board = self.board.with_stone(square, mover);
        tracing::debug!(row, col, player = %mover, "placed mark");

        let mut winner = None;
        if self.outcome == Outcome::InProgress {
            if let Some(player) = check_winner(self.board) {
                self.outcome = Outcome::Won(player);
                winner = Some(player);
                tracing::info!(player = %player, "game won");
            }
        }

        self.side_to_move = mover.next();
        Ok(self.report(true, winner))
    }

    /// 現在の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(self) -> Board {
        self.board
    }

    /// 初期状態（既定ルール）のゲームを返す。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::new(Rules::default())
    }

    /// 勝敗が決まっているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_won(self) -> bool {
        matches!(self.outcome, Outcome::Won(_))
    }

    /// 指定ルールで初期状態のゲームを返す。
    #[inline]
    #[must_use]
    pub const fn new(rules: Rules) -> Self {
        Self {
            board: Board::empty(),
            outcome: Outcome::InProgress,
            rules,
            side_to_move: Player::One,
        }
    }

    /// 勝敗状態を返す。
    #[inline]
    #[must_use]
    pub const fn outcome(self) -> Outcome {
        self.outcome
    }

    /// 着手結果を組み立てる。
    const fn report(self, placed: bool, winner: Option<Player>) -> MoveReport {
        MoveReport {
            board: self.board,
            placed,
            side_to_move: self.side_to_move,
            winner,
        }
    }

    /// 盤面、手番、勝敗状態を初期状態へ戻す（ルールは維持）。
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new(self.rules);
        tracing::info!("game reset");
    }

    /// ルール設定を返す。
    #[inline]
    #[must_use]
    pub const fn rules(self) -> Rules {
        self.rules
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub const fn side_to_move(self) -> Player {
        self.side_to_move
    }

    /// 勝者を返す（進行中なら `None`）。
    #[inline]
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self.outcome {
            Outcome::Won(player) => Some(player),
            Outcome::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Outcome, PlayError};
    use crate::engine::board::Board;
    use crate::engine::rules::{AfterWin, Rules};
    use crate::engine::types::{Cell, Player, Square};

    /// 手順を順に適用し、最後の結果の勝者を返す。
    fn play_all(game: &mut Game, moves: &[(u8, u8)]) -> Option<Player> {
        let mut last = None;
        for &(row, col) in moves {
            let report = game.apply_move(row, col);
            assert!(report.is_ok(), "move ({row}, {col}) failed: {report:?}");
            last = report.ok().and_then(|value| value.winner);
        }
        last
    }

    /// 行2を先手が揃える手順（最後の1手で勝つ）。
    const ROW_TWO_WIN: [(u8, u8); 13] = [
        (2, 0),
        (0, 0),
        (1, 0),
        (2, 1),
        (0, 1),
        (1, 1),
        (2, 2),
        (0, 2),
        (1, 2),
        (2, 3),
        (0, 3),
        (1, 3),
        (2, 4),
    ];

    fn cell(game: Game, row: u8, col: u8) -> Cell {
        Square::from_row_col(row, col).map_or(Cell::Empty, |square| game.board().cell_at(square))
    }

    #[test]
    fn first_move_marks_cell_and_passes_turn() {
        let mut game = Game::initial();
        let report = game.apply_move(0, 0);

        assert!(matches!(report, Ok(ref value) if value.placed && value.winner.is_none()));
        assert_eq!(cell(game, 0, 0), Cell::PlayerOne);
        assert_eq!(game.side_to_move(), Player::Two);
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn completing_row_two_wins_for_player_one() {
        let mut game = Game::initial();
        let winner = play_all(&mut game, &ROW_TWO_WIN);

        assert_eq!(winner, Some(Player::One));
        assert_eq!(game.outcome(), Outcome::Won(Player::One));
        // 勝った手でも手番は進む。
        assert_eq!(game.side_to_move(), Player::Two);
    }

    #[test]
    fn occupied_cell_is_a_silent_no_op() {
        let mut game = Game::initial();
        play_all(&mut game, &[(0, 0), (1, 1)]);
        let before = game;

        let report = game.apply_move(0, 0);
        assert!(matches!(report, Ok(ref value) if !value.placed && value.winner.is_none()));
        assert_eq!(game, before);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut game = Game::initial();
        assert_eq!(
            game.apply_move(5, 0),
            Err(PlayError::InvalidCoordinate { col: 0, row: 5 })
        );
        assert_eq!(
            game.apply_move(0, 9),
            Err(PlayError::InvalidCoordinate { col: 9, row: 0 })
        );
        assert_eq!(game, Game::initial());
    }

    #[test]
    fn permissive_rules_keep_first_winner_and_advance_turns() {
        let mut game = Game::initial();
        play_all(&mut game, &ROW_TWO_WIN);

        let report = game.apply_move(4, 4);
        assert!(matches!(report, Ok(ref value) if value.placed && value.winner.is_none()));
        assert_eq!(cell(game, 4, 4), Cell::PlayerTwo);
        assert_eq!(game.side_to_move(), Player::Three);
        assert_eq!(game.winner(), Some(Player::One));
    }

    #[test]
    fn permissive_rules_never_overwrite_winner_with_later_line() {
        let mut game = Game::initial();
        play_all(&mut game, &ROW_TWO_WIN);
        // 2番手は行0の4マスを持っている。最後の1マスで行が揃っても勝者は先手のまま。
        play_all(&mut game, &[(0, 4)]);

        assert_eq!(game.board().stones(Player::Two) & 0x1F, 0x1F);
        assert_eq!(game.outcome(), Outcome::Won(Player::One));
    }

    #[test]
    fn locked_rules_reject_moves_after_win() {
        let mut game = Game::new(Rules::with_after_win(AfterWin::Locked));
        play_all(&mut game, &ROW_TWO_WIN);
        let before = game;

        assert_eq!(game.apply_move(4, 4), Err(PlayError::GameOver));
        assert_eq!(game, before);
    }

    #[test]
    fn reset_restores_initial_state_and_keeps_rules() {
        let rules = Rules::with_after_win(AfterWin::Locked);
        let mut game = Game::new(rules);
        play_all(&mut game, &ROW_TWO_WIN);

        game.reset();
        assert_eq!(game.board(), Board::empty());
        assert_eq!(game.side_to_move(), Player::One);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.rules(), rules);
        assert!(game.apply_move(2, 2).is_ok());
    }

    #[test]
    fn error_messages_name_the_problem() {
        let message = PlayError::InvalidCoordinate { col: 7, row: 1 }.to_string();
        assert_eq!(message, "coordinate (1, 7) is outside the 5x5 board");
        assert_eq!(PlayError::GameOver.to_string(), "the game is already won");
    }
}
