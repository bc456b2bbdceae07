//! SDL で動作するデスクトップ UI。

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::time::Duration;
use trigrid_core::{effects, engine, logger, session};

/// 盤面のオフセット（左上）。
const OFFSET: i32 = 16;

/// 1マスのピクセルサイズ。
const CELL_SIZE: i32 = 96;

/// 盤面の一辺の長さ（マス）。
const BOARD_LEN: i32 = engine::Square::BOARD_LEN as i32;

/// 盤面の一辺の長さ（ピクセル）。
const BOARD_PX: i32 = BOARD_LEN * CELL_SIZE;

/// ウィンドウ幅（ピクセル）。
const WINDOW_W: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// ウィンドウ高さ（ピクセル）。
const WINDOW_H: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// 記号の線の太さ（ピクセル）。
const STROKE: i32 = 5;

/// Close ボタン。
const CLOSE_BUTTON: (i32, i32, u32, u32) = (
    (WINDOW_W as i32 - 160) / 2,
    WINDOW_H as i32 / 2 + 24,
    160,
    44,
);

/// 使い方。
const USAGE: &str = "usage: trigrid_sdl [--after-win <locked|permissive>]";

#[derive(Debug)]
struct App {
    session: session::Session,
}

impl App {
    fn new(rules: engine::Rules) -> Self {
        Self {
            session: session::Session::new(rules, WINDOW_W, WINDOW_H),
        }
    }

    fn status_text(&self) -> String {
        let game = self.session.game();
        match game.winner() {
            Some(winner) if self.session.is_modal_open() => {
                format!("Player {winner} Wins! (Enter or Close to play again)")
            }
            _ => format!("Current Player: {}", game.side_to_move()),
        }
    }

    fn try_click(&mut self, x: i32, y: i32) -> bool {
        if self.session.is_modal_open() {
            if close_button_rect().contains_point(Point::new(x, y)) {
                self.session.close_modal();
                return true;
            }
            return false;
        }

        match cell_at_point(x, y) {
            Some((row, col)) => self.session.click(row, col),
            None => false,
        }
    }
}

/// ウィンドウ座標からマス（row, col）を求める（余白や盤外は `None`）。
fn cell_at_point(x: i32, y: i32) -> Option<(u8, u8)> {
    let file = x - OFFSET;
    let rank = y - OFFSET;
    if !(0..BOARD_PX).contains(&file) || !(0..BOARD_PX).contains(&rank) {
        return None;
    }

    let col = u8::try_from(file / CELL_SIZE).ok()?;
    let row = u8::try_from(rank / CELL_SIZE).ok()?;
    Some((row, col))
}

fn close_button_rect() -> Rect {
    let (x, y, w, h) = CLOSE_BUTTON;
    Rect::new(x, y, w, h)
}

fn mark_color(player: engine::Player) -> SdlColor {
    match player {
        engine::Player::One => SdlColor::RGB(239, 68, 68),
        engine::Player::Two => SdlColor::RGB(59, 130, 246),
        engine::Player::Three => SdlColor::RGB(34, 197, 94),
        _ => SdlColor::RGB(107, 114, 128),
    }
}

fn draw_thick_line(canvas: &mut Canvas<Window>, from: (i32, i32), to: (i32, i32)) {
    for t in 0..STROKE {
        let shift = t - STROKE / 2;
        let _: Result<(), String> = canvas.draw_line(
            Point::new(from.0 + shift, from.1),
            Point::new(to.0 + shift, to.1),
        );
    }
}

fn draw_mark(canvas: &mut Canvas<Window>, player: engine::Player, left: i32, top: i32) {
    let inset = CELL_SIZE / 4;
    let (l, t) = (left + inset, top + inset);
    let (r, b) = (left + CELL_SIZE - inset, top + CELL_SIZE - inset);

    canvas.set_draw_color(mark_color(player));
    match player {
        engine::Player::One => {
            draw_thick_line(canvas, (l, t), (r, b));
            draw_thick_line(canvas, (r, t), (l, b));
        }
        engine::Player::Two => {
            for t_inset in 0..STROKE {
                let size = (r - l - t_inset * 2) as u32;
                let _: Result<(), String> =
                    canvas.draw_rect(Rect::new(l + t_inset, t + t_inset, size, size));
            }
        }
        _ => {
            // Z: 上辺、対角線、下辺。
            for t_inset in 0..STROKE {
                let _: Result<(), String> =
                    canvas.draw_line(Point::new(l, t + t_inset), Point::new(r, t + t_inset));
                let _: Result<(), String> =
                    canvas.draw_line(Point::new(l, b - t_inset), Point::new(r, b - t_inset));
            }
            draw_thick_line(canvas, (r, t), (l, b));
        }
    }
}

fn draw_board(canvas: &mut Canvas<Window>, app: &App) {
    canvas.set_draw_color(SdlColor::RGB(243, 244, 246));
    canvas.clear();

    let cells = app.session.game().board().to_cells();
    for (y, line) in (0..BOARD_LEN).zip(cells.iter()) {
        for (x, cell) in (0..BOARD_LEN).zip(line.iter()) {
            let xx = OFFSET + x * CELL_SIZE;
            let yy = OFFSET + y * CELL_SIZE;
            let inset = CELL_SIZE / 16;
            let rect = Rect::new(
                xx + inset,
                yy + inset,
                (CELL_SIZE - inset * 2) as u32,
                (CELL_SIZE - inset * 2) as u32,
            );

            canvas.set_draw_color(SdlColor::RGB(255, 255, 255));
            let _: Result<(), String> = canvas.fill_rect(rect);

            canvas.set_draw_color(SdlColor::RGB(229, 231, 235));
            let _: Result<(), String> = canvas.draw_rect(rect);

            if let Some(player) = cell.player() {
                draw_mark(canvas, player, xx, yy);
            }
        }
    }
}

fn draw_confetti(canvas: &mut Canvas<Window>, burst: &effects::Burst) {
    for particle in burst.particles() {
        let [_, r, g, b] = particle.color().to_be_bytes();
        canvas.set_draw_color(SdlColor::RGB(r, g, b));
        let size = u32::from(particle.size_px());
        let _: Result<(), String> =
            canvas.fill_rect(Rect::new(particle.x_px(), particle.y_px(), size, size));
    }
}

fn draw_modal(canvas: &mut Canvas<Window>, winner: engine::Player) {
    canvas.set_draw_color(SdlColor::RGBA(107, 114, 128, 190));
    let _: Result<(), String> = canvas.fill_rect(Rect::new(0, 0, WINDOW_W, WINDOW_H));

    let panel_w = WINDOW_W * 4 / 5;
    let panel_h = WINDOW_H * 2 / 5;
    let panel = Rect::new(
        ((WINDOW_W - panel_w) / 2) as i32,
        ((WINDOW_H - panel_h) / 2) as i32,
        panel_w,
        panel_h,
    );
    canvas.set_draw_color(SdlColor::RGB(255, 255, 255));
    let _: Result<(), String> = canvas.fill_rect(panel);

    // フォントを使わず、勝者の記号を大きく描く。
    let mark_left = WINDOW_W as i32 / 2 - CELL_SIZE / 2;
    let mark_top = panel.y() + 8;
    draw_mark(canvas, winner, mark_left, mark_top);

    canvas.set_draw_color(SdlColor::RGB(37, 99, 235));
    let _: Result<(), String> = canvas.fill_rect(close_button_rect());
}

fn rules_from_args() -> Result<engine::Rules, String> {
    let mut rules = engine::Rules::from_env().map_err(|e| e.to_string())?;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--after-win" => {
                let value = args.next().ok_or_else(|| USAGE.to_string())?;
                let after_win = value.parse().map_err(|e: engine::rules::ParseAfterWinError| {
                    e.to_string()
                })?;
                rules = engine::Rules::with_after_win(after_win);
            }
            _ => return Err(USAGE.to_string()),
        }
    }
    Ok(rules)
}

fn main() -> Result<(), String> {
    let log_config = logger::LogConfig::from_env().map_err(|e| e.to_string())?;
    logger::init(log_config).map_err(|e| e.to_string())?;

    let rules = rules_from_args()?;
    tracing::info!(after_win = %rules.after_win, "starting SDL game");

    let sdl = sdl2::init()?;
    let video = sdl.video()?;

    let window = video
        .window("trigrid", WINDOW_W, WINDOW_H)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;
    canvas.set_blend_mode(BlendMode::Blend);

    let mut app = App::new(rules);
    let mut event_pump = sdl.event_pump()?;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Return),
                    ..
                } => {
                    if app.session.is_modal_open() {
                        app.session.close_modal();
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    let _: bool = app.try_click(x, y);
                }
                _ => {}
            }
        }

        let _: bool = app.session.step_effects();

        let title = app.status_text();
        let _ = canvas.window_mut().set_title(&title);
        draw_board(&mut canvas, &app);
        if let Some(burst) = app.session.burst() {
            draw_confetti(&mut canvas, burst);
        }
        let shown_winner = app.session.game().winner();
        if let Some(winner) = shown_winner.filter(|_| app.session.is_modal_open()) {
            draw_modal(&mut canvas, winner);
        }
        canvas.present();

        std::thread::sleep(Duration::from_millis(16));
    }

    Ok(())
}
