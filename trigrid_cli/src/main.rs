//! 標準入出力で遊ぶテキスト UI。
//!
//! 1行1コマンド（`move <row> <col>` / `reset` / `show` / `quit`）。

use std::io::{self, BufRead as _, Write as _};

use trigrid_core::{engine, logger};

/// 使い方。
const USAGE: &str = "usage: trigrid_cli [--after-win <locked|permissive>]";

/// コマンドライン引数と環境変数からルールを決める（引数が優先）。
fn rules_from_args(args: &[String]) -> Result<engine::Rules, Box<dyn std::error::Error>> {
    let mut rules = engine::Rules::from_env()?;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--after-win" => {
                let Some(value) = iter.next() else {
                    return Err(format!("--after-win needs a value\n{USAGE}").into());
                };
                rules = engine::Rules::with_after_win(value.parse()?);
            }
            "-h" | "--help" => return Err(USAGE.into()),
            other => return Err(format!("unexpected argument `{other}`\n{USAGE}").into()),
        }
    }
    Ok(rules)
}

/// 盤面と手番を表示する。
fn show(out: &mut impl io::Write, game: engine::Game) -> io::Result<()> {
    write!(out, "{}", game.board())?;
    writeln!(out, "Current Player: {}", game.side_to_move())
}

/// 1コマンドを実行する。`quit` なら `false` を返す。
fn execute(
    out: &mut impl io::Write,
    game: &mut engine::Game,
    command: engine::Command,
) -> io::Result<bool> {
    match command {
        engine::Command::Move { col, row } => match game.apply_move(row, col) {
            Ok(report) => {
                if !report.placed {
                    writeln!(out, "cell ({row}, {col}) is already taken")?;
                }
                show(out, *game)?;
                if let Some(winner) = report.winner {
                    writeln!(out, "Player {winner} Wins! (type `reset` to play again)")?;
                }
            }
            Err(err) => writeln!(out, "error: {err}")?,
        },
        engine::Command::Quit => return Ok(false),
        engine::Command::Reset => {
            game.reset();
            show(out, *game)?;
        }
        engine::Command::Show => show(out, *game)?,
        _ => writeln!(out, "unsupported command")?,
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(logger::LogConfig::from_env()?)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let rules = rules_from_args(&args)?;
    tracing::info!(after_win = %rules.after_win, "starting text game");

    let mut game = engine::Game::new(rules);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    show(&mut out, game)?;
    write!(out, "{}> ", game.side_to_move())?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match line.parse::<engine::Command>() {
                Ok(command) => {
                    if !execute(&mut out, &mut game, command)? {
                        break;
                    }
                }
                Err(err) => writeln!(out, "error: {err}")?,
            }
        }
        write!(out, "{}> ", game.side_to_move())?;
        out.flush()?;
    }

    Ok(())
}
