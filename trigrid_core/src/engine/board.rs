use core::fmt;

use crate::engine::types::{Cell, Player, Square};

/// 盤面全体（25マス）のマスク。
const FULL_MASK: u32 = 0x01FF_FFFF;

/// 1行目（row = 0）のマスク。
const ROW_0: u32 = 0x0000_001F;

/// 1列目（col = 0）のマスク。
const COL_0: u32 = 0x0010_8421;

/// 主対角線（左上から右下）のマスク。
const DIAGONAL: u32 = 0x0104_1041;

/// 反対角線（右上から左下）のマスク。
const ANTI_DIAGONAL: u32 = 0x0011_1110;

/// 行1つ分のシフト量。
const SHIFT_ROW: u32 = 5;

/// 列1つ分のシフト量。
const SHIFT_COL: u32 = 1;

/// 勝利ラインの本数（5行、5列、対角線2本）。
const LINE_COUNT: usize = 12;

/// 勝利判定に使うラインのマスク（走査順：行、列、主対角線、反対角線）。
pub const LINES: [u32; LINE_COUNT] = [
    ROW_0,
    ROW_0 << SHIFT_ROW,
    ROW_0 << (SHIFT_ROW * 2),
    ROW_0 << (SHIFT_ROW * 3),
    ROW_0 << (SHIFT_ROW * 4),
    COL_0,
    COL_0 << SHIFT_COL,
    COL_0 << (SHIFT_COL * 2),
    COL_0 << (SHIFT_COL * 3),
    COL_0 << (SHIFT_COL * 4),
    DIAGONAL,
    ANTI_DIAGONAL,
];

/// 5x5 の盤面（プレイヤーごとのビットボード）。
///
/// `Copy` なので、呼び出し側へはスナップショットとして渡る。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Board {
    /// 先手の石。
    one: u32,
    /// 3番手の石。
    three: u32,
    /// 2番手の石。
    two: u32,
}

impl Board {
    /// 指定マスの状態を返す。
    #[inline]
    #[must_use]
    pub fn cell_at(self, square: Square) -> Cell {
        let mask = square.bit();
        Player::ALL
            .into_iter()
            .find(|player| self.stones(*player) & mask != u32::MIN)
            .map_or(Cell::Empty, Cell::from)
    }

    /// 空の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            one: u32::MIN,
            three: u32::MIN,
            two: u32::MIN,
        }
    }

    /// 行列形式のマス目から盤面を生成する。
    #[inline]
    #[must_use]
    pub fn from_cells(cells: [[Cell; 5]; 5]) -> Self {
        let mut board = Self::empty();
        for (row, line) in (u8::MIN..).zip(cells.iter()) {
            for (col, cell) in (u8::MIN..).zip(line.iter()) {
                let Some(square) = Square::from_row_col(row, col) else {
                    continue;
                };
                if let Some(player) = cell.player() {
                    board = board.with_stone(square, player);
                }
            }
        }
        board
    }

    /// 盤面がすべて埋まっているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.occupied() == FULL_MASK
    }

    /// 指定マスが埋まっているかを返す。
    #[inline]
    #[must_use]
    pub fn is_occupied(self, square: Square) -> bool {
        self.occupied() & square.bit() != u32::MIN
    }

    /// 盤面の占有ビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn occupied(self) -> u32 {
        self.one | self.two | self.three
    }

    /// 指定プレイヤーの石のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn stones(self, player: Player) -> u32 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
            Player::Three => self.three,
        }
    }

    /// 行列形式のマス目を返す（描画用）。
    #[inline]
    #[must_use]
    pub fn to_cells(self) -> [[Cell; 5]; 5] {
        core::array::from_fn(|row| {
            core::array::from_fn(|col| {
                let row_u8 = u8::try_from(row).unwrap_or(u8::MAX);
                let col_u8 = u8::try_from(col).unwrap_or(u8::MAX);
                Square::from_row_col(row_u8, col_u8)
                    .map_or(Cell::Empty, |square| self.cell_at(square))
            })
        })
    }

    /// 指定マスに石を置いた盤面を返す。
    ///
    /// 空きマスであることは呼び出し側が保証する。
    #[inline]
    #[must_use]
    pub fn with_stone(self, square: Square, player: Player) -> Self {
        let bit = square.bit();
        match player {
            Player::One => Self {
                one: self.one | bit,
                ..self
            },
            Player::Two => Self {
                two: self.two | bit,
                ..self
            },
            Player::Three => Self {
                three: self.three | bit,
                ..self
            },
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_cells() {
            let text: Vec<String> = line
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        ".".to_owned()
                    } else {
                        cell.symbol().to_string()
                    }
                })
                .collect();
            writeln!(f, "{}", text.join(" "))?;
        }
        Ok(())
    }
}

/// 盤面の勝者を返す（勝者なしは `None`）。
///
/// 行、列、主対角線、反対角線の順に走査し、最初に揃ったラインの記号を返す。
/// 盤面が埋まっていても引き分けは判定しない。
#[inline]
#[must_use]
pub fn check_winner(board: Board) -> Option<Player> {
    LINES.into_iter().find_map(|line| {
        Player::ALL
            .into_iter()
            .find(|player| board.stones(*player) & line == line)
    })
}
