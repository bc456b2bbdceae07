//! 3人対戦の 5x5 三目並べ（5目揃え）のコアロジック。
//!
//! このクレートはゲーム進行を管理する `engine` と、勝利時の演出を計算する `effects`、
//! ログ出力を初期化する `logger`、
//! UI 共通の画面状態 `session` を提供します。
//! UI（`sdl` / `wasm` / `cli`）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// ゲームルール・盤面・進行を提供するモジュール。
pub mod engine;

/// 勝利時の演出（紙吹雪）を提供するモジュール。
pub mod effects;

/// `tracing` の出力設定。
pub mod logger;

/// 勝者表示と紙吹雪を含む、UI 向けの画面状態。
pub mod session;
