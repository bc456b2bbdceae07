use core::fmt;
use core::str::FromStr;
use std::env::VarError;

/// 勝敗決定後の着手の扱いを指定する環境変数。
pub const AFTER_WIN_ENV: &str = "TRIGRID_AFTER_WIN";

/// 勝敗決定後の着手の扱い。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum AfterWin {
    /// 勝敗決定後の着手は `PlayError::GameOver` で拒否する。
    Locked,
    /// 勝敗決定後も着手を受け付け、手番も進める（勝者は上書きしない）。
    #[default]
    Permissive,
}

/// `AfterWin` の文字列表現が不正。
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseAfterWinError {
    /// 入力文字列。
    pub input: String,
}

impl fmt::Display for ParseAfterWinError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown after-win mode `{}` (expected `locked` or `permissive`)",
            self.input
        )
    }
}

impl core::error::Error for ParseAfterWinError {}

impl FromStr for AfterWin {
    type Err = ParseAfterWinError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locked" => Ok(Self::Locked),
            "permissive" => Ok(Self::Permissive),
            _ => Err(ParseAfterWinError {
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AfterWin {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Locked => f.write_str("locked"),
            Self::Permissive => f.write_str("permissive"),
        }
    }
}

/// ゲームのルール設定。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub struct Rules {
    /// 勝敗決定後の着手の扱い。
    pub after_win: AfterWin,
}

impl Rules {
    /// 環境変数 `TRIGRID_AFTER_WIN` からルールを読み込む。
    ///
    /// 未設定の場合は既定値を返す。
    ///
    /// # Errors
    ///
    /// 値が `locked` / `permissive` 以外（UTF-8 でない値を含む）の場合、
    /// `ParseAfterWinError` を返す。
    #[inline]
    pub fn from_env() -> Result<Self, ParseAfterWinError> {
        Self::from_var(std::env::var(AFTER_WIN_ENV))
    }

    /// 環境変数の読み取り結果からルールを決める。
    fn from_var(var: Result<String, VarError>) -> Result<Self, ParseAfterWinError> {
        match var {
            Ok(value) => match value.parse() {
                Ok(after_win) => Ok(Self { after_win }),
                Err(err) => Err(err),
            },
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(raw)) => Err(ParseAfterWinError {
                input: raw.to_string_lossy().into_owned(),
            }),
        }
    }

    /// `after_win` を指定したルールを返す。
    #[inline]
    #[must_use]
    pub const fn with_after_win(after_win: AfterWin) -> Self {
        Self { after_win }
    }
}
