/// 盤面（ビットボード）と勝利判定の実装。
pub mod board;
/// テキストコマンドの解釈。
pub mod command;
/// ゲーム進行（手番、勝敗状態、リセット）の実装。
pub mod game;
/// ルール設定。
pub mod rules;
pub mod types;

pub type Board = board::Board;
pub type Game = game::Game;
pub type Player = types::Player;
pub type Cell = types::Cell;
pub type Square = types::Square;
pub type Outcome = game::Outcome;
pub type MoveReport = game::MoveReport;
pub type PlayError = game::PlayError;
pub type Command = command::Command;
pub type CommandError = command::CommandError;
pub type Rules = rules::Rules;
pub type AfterWin = rules::AfterWin;

pub use board::check_winner;
