use core::fmt;
use core::str::FromStr;

/// テキスト入力から解釈したコマンド。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Command {
    /// `move <row> <col>`: 指定マスへ着手する。
    Move {
        /// 列。
        col: u8,
        /// 行。
        row: u8,
    },
    /// `quit`: 終了する。
    Quit,
    /// `reset`: ゲームを初期状態へ戻す。
    Reset,
    /// `show`: 盤面を表示する。
    Show,
}

/// コマンドの解釈に失敗した理由。
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CommandError {
    /// 引数の個数が合わない。
    ArgumentCount {
        /// 期待する個数。
        expected: usize,
        /// コマンド名。
        keyword: String,
        /// 実際の個数。
        found: usize,
    },
    /// 空行。
    Empty,
    /// 座標が数値として読めない。
    InvalidNumber(String),
    /// 未知のコマンド。
    UnknownCommand(String),
}

impl fmt::Display for CommandError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentCount {
                expected,
                keyword,
                found,
            } => write!(f, "`{keyword}` takes {expected} argument(s), got {found}"),
            Self::Empty => f.write_str("empty command"),
            Self::InvalidNumber(text) => write!(f, "`{text}` is not a board coordinate"),
            Self::UnknownCommand(text) => write!(
                f,
                "unknown command `{text}` (expected move, reset, show or quit)"
            ),
        }
    }
}

impl core::error::Error for CommandError {}

impl FromStr for Command {
    type Err = CommandError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();
        let keyword_lower = keyword.to_ascii_lowercase();

        let expected = match keyword_lower.as_str() {
            "move" => 2,
            "quit" | "reset" | "show" => 0,
            _ => return Err(CommandError::UnknownCommand(keyword.to_owned())),
        };
        if args.len() != expected {
            return Err(CommandError::ArgumentCount {
                expected,
                keyword: keyword_lower,
                found: args.len(),
            });
        }

        match (keyword_lower.as_str(), args.as_slice()) {
            ("move", &[row_text, col_text]) => {
                let row = match parse_coordinate(row_text) {
                    Ok(value) => value,
                    Err(err) => return Err(err),
                };
                let col = match parse_coordinate(col_text) {
                    Ok(value) => value,
                    Err(err) => return Err(err),
                };
                Ok(Self::Move { col, row })
            }
            ("quit", _) => Ok(Self::Quit),
            ("reset", _) => Ok(Self::Reset),
            ("show", _) => Ok(Self::Show),
            _ => Err(CommandError::UnknownCommand(keyword.to_owned())),
        }
    }
}

/// 座標1つ分を数値として読む（範囲チェックは着手時に行う）。
fn parse_coordinate(text: &str) -> Result<u8, CommandError> {
    text.parse::<u8>()
        .map_err(|_err| CommandError::InvalidNumber(text.to_owned()))
}
