use core::fmt;
use core::str::FromStr;
use std::env::VarError;

use tracing::Level;

/// ログの出力形式を指定する環境変数（`pretty` / `json`）。
pub const FORMAT_ENV: &str = "TRIGRID_LOG_FORMAT";

/// ログレベルを指定する環境変数（`error` から `trace` まで）。
pub const LEVEL_ENV: &str = "TRIGRID_LOG";

/// ログの出力形式。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum LogFormat {
    /// 1行1イベントの JSON。
    Json,
    /// 人が読むためのテキスト。
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            _ => Err(LoggerError::InvalidFormat(s.to_owned())),
        }
    }
}

/// ログ出力の初期化に失敗した理由。
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LoggerError {
    /// すでにグローバルな subscriber が設定されている。
    AlreadyInitialized(String),
    /// 出力形式の指定が不正。
    InvalidFormat(String),
    /// ログレベルの指定が不正。
    InvalidLevel(String),
}

impl fmt::Display for LoggerError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized(reason) => {
                write!(f, "logger is already initialized: {reason}")
            }
            Self::InvalidFormat(text) => {
                write!(f, "unknown {FORMAT_ENV} `{text}` (expected pretty or json)")
            }
            Self::InvalidLevel(text) => write!(f, "unknown {LEVEL_ENV} `{text}`"),
        }
    }
}

impl core::error::Error for LoggerError {}

/// ログ出力の設定。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct LogConfig {
    /// 出力形式。
    pub format: LogFormat,
    /// 最大ログレベル。
    pub level: Level,
}

impl Default for LogConfig {
    #[inline]
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: Level::INFO,
        }
    }
}

impl LogConfig {
    /// 環境変数 `TRIGRID_LOG_FORMAT` / `TRIGRID_LOG` から設定を読み込む。
    ///
    /// 未設定の項目は既定値（`pretty`, `info`）になる。
    ///
    /// # Errors
    ///
    /// 値が解釈できない場合、`LoggerError::InvalidFormat` / `LoggerError::InvalidLevel` を返す。
    #[inline]
    pub fn from_env() -> Result<Self, LoggerError> {
        let format = read_var(FORMAT_ENV);
        let level = read_var(LEVEL_ENV);
        Self::from_values(format.as_deref(), level.as_deref())
    }

    /// 文字列の設定値から読み込む（`None` は既定値）。
    ///
    /// # Errors
    ///
    /// 値が解釈できない場合、`LoggerError::InvalidFormat` / `LoggerError::InvalidLevel` を返す。
    #[inline]
    pub fn from_values(format: Option<&str>, level: Option<&str>) -> Result<Self, LoggerError> {
        let mut config = Self::default();
        if let Some(text) = format {
            config.format = match text.parse() {
                Ok(value) => value,
                Err(err) => return Err(err),
            };
        }
        if let Some(text) = level {
            config.level = match text.trim().parse::<Level>() {
                Ok(value) => value,
                Err(_err) => return Err(LoggerError::InvalidLevel(text.to_owned())),
            };
        }
        Ok(config)
    }
}

/// 環境変数を読む（未設定は `None`）。
///
/// UTF-8 でない値は置換文字を含む文字列として返し、解釈の段階でエラーにする。
fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

/// グローバルな `tracing` subscriber を設定する（出力先は標準エラー）。
///
/// アプリ起動時に1回だけ呼ぶこと。
///
/// # Errors
///
/// すでに subscriber が設定されている場合、`LoggerError::AlreadyInitialized` を返す。
#[inline]
pub fn init(config: LogConfig) -> Result<(), LoggerError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|err| LoggerError::AlreadyInitialized(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{LogConfig, LogFormat, LoggerError, init, read_var};
    use tracing::Level;

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(LogConfig::from_values(None, None), Ok(LogConfig::default()));
    }

    #[test]
    fn parses_format_and_level() {
        let config = LogConfig::from_values(Some("JSON"), Some("debug"));
        assert_eq!(
            config.map(|value| (value.format, value.level)),
            Ok((LogFormat::Json, Level::DEBUG))
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(
            LogConfig::from_values(Some("xml"), None),
            Err(LoggerError::InvalidFormat("xml".to_owned()))
        );
        assert_eq!(
            LogConfig::from_values(None, Some("loud")),
            Err(LoggerError::InvalidLevel("loud".to_owned()))
        );
    }

    #[test]
    fn unset_variable_reads_as_none() {
        assert_eq!(read_var("TRIGRID_LOG_TEST_NEVER_SET"), None);
    }

    #[test]
    fn lossy_non_unicode_value_is_rejected() {
        let lossy = "js\u{fffd}n";
        assert_eq!(
            LogConfig::from_values(Some(lossy), None),
            Err(LoggerError::InvalidFormat(lossy.to_owned()))
        );
    }

    #[test]
    fn second_init_reports_already_initialized() {
        let first = init(LogConfig::default());
        assert!(first.is_ok(), "first={first:?}");
        let second = init(LogConfig::default());
        assert!(matches!(second, Err(LoggerError::AlreadyInitialized(_))));
    }
}
