use core::fmt;

/// 手番（プレイヤー）。
///
/// 手番は `One -> Two -> Three -> One` の順に固定で巡回する。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Player {
    /// 先手（記号 `X`）。
    #[default]
    One,
    /// 3番手（記号 `Z`）。
    Three,
    /// 2番手（記号 `O`）。
    Two,
}

impl Player {
    /// 全プレイヤー（手番順）。
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// 盤面に表示する記号を返す。
    #[inline]
    #[must_use]
    pub const fn mark(self) -> char {
        match self {
            Self::One => 'X',
            Self::Two => 'O',
            Self::Three => 'Z',
        }
    }

    /// 次の手番を返す。
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::Three,
            Self::Three => Self::One,
        }
    }
}

impl fmt::Display for Player {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// 盤面上の1マスの状態。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Cell {
    /// 空きマス。
    #[default]
    Empty,
    /// 先手の石。
    PlayerOne,
    /// 3番手の石。
    PlayerThree,
    /// 2番手の石。
    PlayerTwo,
}

impl Cell {
    /// 空きマスかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// マスを占めるプレイヤーを返す（空きなら `None`）。
    #[inline]
    #[must_use]
    pub const fn player(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::PlayerOne => Some(Player::One),
            Self::PlayerTwo => Some(Player::Two),
            Self::PlayerThree => Some(Player::Three),
        }
    }

    /// 表示用の記号を返す（空きは空白）。
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self.player() {
            Some(player) => player.mark(),
            None => ' ',
        }
    }
}

impl From<Player> for Cell {
    #[inline]
    fn from(player: Player) -> Self {
        match player {
            Player::One => Self::PlayerOne,
            Player::Two => Self::PlayerTwo,
            Player::Three => Self::PlayerThree,
        }
    }
}

/// 盤面上のマス（0..=24のインデックス）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Square(
    /// `row * 5 + col` に対応する0..=24の値。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 5;

    /// マスの総数。
    pub const COUNT: u8 = 25;

    /// そのマスを表すビット（`u32`）を返す。
    #[inline]
    #[must_use]
    pub fn bit(self) -> u32 {
        let one = u32::MIN.wrapping_add(1);
        let shift = u32::from(self.0);

        one.checked_shl(shift).unwrap_or(u32::MIN)
    }

    /// 列（0..=4）を返す。
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        match self.0.checked_rem(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// 0..=24 のインデックスから `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index >= Self::COUNT {
            return None;
        }
        Some(Self(index))
    }

    /// 盤面座標（row, col）から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row >= Self::BOARD_LEN || col >= Self::BOARD_LEN {
            return None;
        }

        let mut idx = match row.checked_mul(Self::BOARD_LEN) {
            Some(value) => value,
            None => return None,
        };

        idx = match idx.checked_add(col) {
            Some(value) => value,
            None => return None,
        };

        Some(Self(idx))
    }

    /// 0..=24 のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 行（0..=4）を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        match self.0.checked_div(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }
}
