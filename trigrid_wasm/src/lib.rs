//! WASM (Canvas) 向けの UI。
//!
//! - `wasm32` ターゲットのみで `wasm-bindgen` / `web-sys` を有効化する。
//! - それ以外のターゲットでは、workspace の `cargo test` / `cargo clippy` を通すためにスタブを提供する。
//! - 表示用の文字列と色はターゲットに依存しない `view` にまとめる。

/// ターゲット非依存の表示ロジック。
pub mod view {
    use trigrid_core::engine;

    /// 盤面描画のオフセット。
    pub const OFFSET: f64 = 8.0;

    /// 紙吹雪のフレーム間隔（ミリ秒）。
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// 記号の色（X = 赤, O = 青, Z = 緑）。
    #[must_use]
    pub fn mark_color(player: engine::Player) -> &'static str {
        match player {
            engine::Player::One => "#ef4444",
            engine::Player::Two => "#3b82f6",
            engine::Player::Three => "#22c55e",
            _ => "#6b7280",
        }
    }

    /// `0xRRGGBB` を CSS の色文字列に変換する。
    #[must_use]
    pub fn css_color(rgb: u32) -> String {
        format!("#{rgb:06x}")
    }

    /// 手番表示の文字列を返す。
    #[must_use]
    pub fn status_text(game: engine::Game) -> String {
        format!("Current Player: {}", game.side_to_move())
    }

    /// 勝者表示の文字列を返す（勝者なしは空文字列）。
    #[must_use]
    pub fn winner_text(game: engine::Game) -> String {
        game.winner()
            .map_or_else(String::new, |winner| format!("Player {winner} Wins!"))
    }

    /// Close ボタンの高さ（ピクセル）。
    const BUTTON_H: f64 = 36.0;

    /// キャンバスの一辺（ピクセル）を返す。
    #[must_use]
    pub fn canvas_size(cell_size: f64) -> f64 {
        f64::from(engine::Square::BOARD_LEN) * cell_size + OFFSET * 2.0
    }

    /// Close ボタンの矩形（x, y, w, h）を返す。
    #[must_use]
    pub fn close_button_rect(full: f64) -> (f64, f64, f64, f64) {
        let button_w = full * 0.3;
        let x = (full - button_w) / 2.0;
        let y = full / 2.0 + full * 0.05;
        (x, y, button_w, BUTTON_H)
    }

    /// ピクセル座標が Close ボタン上かどうかを返す。
    #[must_use]
    pub fn hits_close_button(px: f64, py: f64, full: f64) -> bool {
        let (x, y, w, h) = close_button_rect(full);
        (x..x + w).contains(&px) && (y..y + h).contains(&py)
    }

    /// ピクセル座標からマス（row, col）を求める（盤外は `None`）。
    #[must_use]
    pub fn cell_at_point(px: f64, py: f64, cell_size: f64) -> Option<(u8, u8)> {
        if cell_size <= 0.0 {
            return None;
        }
        let col = ((px - OFFSET) / cell_size).floor();
        let row = ((py - OFFSET) / cell_size).floor();
        let len = f64::from(engine::Square::BOARD_LEN);
        if !(0.0..len).contains(&col) || !(0.0..len).contains(&row) {
            return None;
        }
        // 0..5 に収まっていることは上で確認済み。
        Some((row as u8, col as u8))
    }

    #[cfg(test)]
    mod tests {
        use super::{
            OFFSET, canvas_size, cell_at_point, close_button_rect, css_color, hits_close_button,
            status_text, winner_text,
        };
        use trigrid_core::engine;

        #[test]
        fn texts_follow_game_state() {
            let mut game = engine::Game::initial();
            assert_eq!(status_text(game), "Current Player: X");
            assert_eq!(winner_text(game), "");

            for (row, col) in [
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2),
                (0, 3),
                (1, 3),
                (2, 3),
                (0, 4),
            ] {
                let _ = game.apply_move(row, col);
            }
            assert_eq!(winner_text(game), "Player X Wins!");
            assert_eq!(status_text(game), "Current Player: O");
        }

        #[test]
        fn points_map_to_cells() {
            assert_eq!(cell_at_point(OFFSET + 1.0, OFFSET + 1.0, 64.0), Some((0, 0)));
            assert_eq!(cell_at_point(OFFSET + 64.0 * 4.5, OFFSET + 70.0, 64.0), Some((1, 4)));
            assert_eq!(cell_at_point(0.0, 0.0, 64.0), None);
            assert_eq!(cell_at_point(OFFSET + 64.0 * 5.0, OFFSET, 64.0), None);
        }

        #[test]
        fn close_button_sits_inside_the_canvas() {
            let full = canvas_size(64.0);
            assert!((full - 336.0).abs() < f64::EPSILON);
            let (x, y, w, h) = close_button_rect(full);
            assert!(x > 0.0 && y > 0.0 && x + w < full && y + h < full);
            assert!(hits_close_button(x + w / 2.0, y + h / 2.0, full));
            assert!(!hits_close_button(1.0, 1.0, full));
        }

        #[test]
        fn palette_colors_are_css_hex() {
            assert_eq!(css_color(0x0029_CDFF), "#29cdff");
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm32_app {
    use crate::view;
    use trigrid_core::{engine, session};
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::*;
    use web_sys::CanvasRenderingContext2d;

    /// ブラウザ上で進行するアプリ状態。
    #[wasm_bindgen]
    #[derive(Debug)]
    pub struct App {
        last_frame_ms: f64,
        session: session::Session,
    }

    #[wasm_bindgen]
    impl App {
        /// `locked_after_win` が true なら勝敗決定後の着手を拒否する。
        /// `width` / `height` は紙吹雪を描く画面サイズ（ピクセル）。
        #[wasm_bindgen(constructor)]
        pub fn new(locked_after_win: bool, width: u32, height: u32) -> Self {
            let after_win = if locked_after_win {
                engine::AfterWin::Locked
            } else {
                engine::AfterWin::Permissive
            };
            Self {
                last_frame_ms: -1.0,
                session: session::Session::new(
                    engine::Rules::with_after_win(after_win),
                    width,
                    height,
                ),
            }
        }

        /// 画面サイズの変更を反映する（次の紙吹雪から有効）。
        pub fn resize(&mut self, width: u32, height: u32) {
            self.session.resize(width, height);
        }

        /// クリック入力（盤面座標）。石を置けたら true。
        ///
        /// 勝者表示中はクリックを受け付けない。
        pub fn click(&mut self, row: u8, col: u8) -> bool {
            self.session.click(row, col)
        }

        /// キャンバス上のピクセル座標でクリックする。
        ///
        /// 勝者表示中は Close ボタンだけが反応し、押されたら表示を閉じてリセットする。
        pub fn click_at(&mut self, px: f64, py: f64, cell_size: f64) -> bool {
            if self.session.is_modal_open() {
                let full = view::canvas_size(cell_size);
                if view::hits_close_button(px, py, full) {
                    self.close_modal();
                    return true;
                }
                return false;
            }
            match view::cell_at_point(px, py, cell_size) {
                Some((row, col)) => self.click(row, col),
                None => false,
            }
        }

        /// 勝者表示を閉じ、ゲームをリセットする。
        pub fn close_modal(&mut self) {
            self.session.close_modal();
        }

        /// 勝者表示中かどうか。
        pub fn is_modal_open(&self) -> bool {
            self.session.is_modal_open()
        }

        /// 紙吹雪を進める（60fps 相当でフレームを刻む）。
        ///
        /// - `now_ms`: `performance.now()` 相当の単調増加時刻（ミリ秒）。
        /// - 進めたフレーム数を返す。
        pub fn tick(&mut self, now_ms: f64) -> u32 {
            if self.session.burst().is_none() {
                self.last_frame_ms = -1.0;
                return 0;
            }

            if self.last_frame_ms < 0.0 {
                self.last_frame_ms = now_ms;
                return 0;
            }

            let mut frames: u32 = 0;
            // 1回の呼び出しで進めるのは最大10フレーム。
            while now_ms - self.last_frame_ms >= view::FRAME_MS && frames < 10 {
                frames = frames.saturating_add(1);
                self.last_frame_ms += view::FRAME_MS;
                if !self.session.step_effects() {
                    break;
                }
            }
            if frames == 10 {
                self.last_frame_ms = now_ms;
            }
            frames
        }

        /// 手番表示用の文字列を返す。
        pub fn status_text(&self) -> String {
            view::status_text(self.session.game())
        }

        /// 勝者表示用の文字列を返す。
        pub fn winner_text(&self) -> String {
            view::winner_text(self.session.game())
        }

        /// Canvas へ盤面・紙吹雪・勝者表示を描画する。
        ///
        /// - `cell_size`: 1マスのピクセルサイズ（例: 64.0）
        pub fn render(&self, ctx: &CanvasRenderingContext2d, cell_size: f64) {
            let full = view::canvas_size(cell_size);

            ctx.set_fill_style(&JsValue::from_str("#f3f4f6"));
            ctx.fill_rect(0.0, 0.0, full, full);

            ctx.set_font(&format!("bold {}px sans-serif", (cell_size * 0.5).round()));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            let cells = self.session.game().board().to_cells();
            for (y, line) in cells.iter().enumerate() {
                for (x, cell) in line.iter().enumerate() {
                    let fx = x as f64;
                    let fy = y as f64;
                    let left = view::OFFSET + fx * cell_size;
                    let top = view::OFFSET + fy * cell_size;
                    let inset = cell_size * 0.06;

                    ctx.set_fill_style(&JsValue::from_str("#ffffff"));
                    ctx.fill_rect(
                        left + inset,
                        top + inset,
                        cell_size - inset * 2.0,
                        cell_size - inset * 2.0,
                    );
                    ctx.set_stroke_style(&JsValue::from_str("#e5e7eb"));
                    ctx.stroke_rect(
                        left + inset,
                        top + inset,
                        cell_size - inset * 2.0,
                        cell_size - inset * 2.0,
                    );

                    if let Some(player) = cell.player() {
                        ctx.set_fill_style(&JsValue::from_str(view::mark_color(player)));
                        let _: Result<(), JsValue> = ctx.fill_text(
                            &player.mark().to_string(),
                            left + cell_size / 2.0,
                            top + cell_size / 2.0,
                        );
                    }
                }
            }

            if let Some(burst) = self.session.burst() {
                for particle in burst.particles() {
                    let size = f64::from(particle.size_px());
                    ctx.set_fill_style(&JsValue::from_str(&view::css_color(particle.color())));
                    ctx.fill_rect(
                        f64::from(particle.x_px()),
                        f64::from(particle.y_px()),
                        size,
                        size,
                    );
                }
            }

            if self.session.is_modal_open() {
                self.render_modal(ctx, full);
            }
        }
    }

    impl App {
        /// 勝者表示（半透明の背景、メッセージ、Close ボタン）を描画する。
        fn render_modal(&self, ctx: &CanvasRenderingContext2d, full: f64) {
            ctx.set_fill_style(&JsValue::from_str("rgba(107, 114, 128, 0.75)"));
            ctx.fill_rect(0.0, 0.0, full, full);

            let panel_w = full * 0.8;
            let panel_h = full * 0.4;
            let panel_x = (full - panel_w) / 2.0;
            let panel_y = (full - panel_h) / 2.0;
            ctx.set_fill_style(&JsValue::from_str("#ffffff"));
            ctx.fill_rect(panel_x, panel_y, panel_w, panel_h);

            ctx.set_font("500 20px sans-serif");
            ctx.set_fill_style(&JsValue::from_str("#111827"));
            let _: Result<(), JsValue> =
                ctx.fill_text(&self.winner_text(), full / 2.0, panel_y + panel_h * 0.35);

            let (button_x, button_y, button_w, button_h) = view::close_button_rect(full);
            ctx.set_fill_style(&JsValue::from_str("#2563eb"));
            ctx.fill_rect(button_x, button_y, button_w, button_h);
            ctx.set_font("500 14px sans-serif");
            ctx.set_fill_style(&JsValue::from_str("#ffffff"));
            let _: Result<(), JsValue> = ctx.fill_text(
                "Close",
                button_x + button_w / 2.0,
                button_y + button_h / 2.0,
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm32_app::App;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm_stub {
    #[derive(Debug, Default)]
    pub struct App;

    impl App {
        pub fn new(_locked_after_win: bool, _width: u32, _height: u32) -> Self {
            Self
        }

        pub fn resize(&mut self, _width: u32, _height: u32) {}

        pub fn click(&mut self, _row: u8, _col: u8) -> bool {
            false
        }

        pub fn click_at(&mut self, _px: f64, _py: f64, _cell_size: f64) -> bool {
            false
        }

        pub fn close_modal(&mut self) {}

        pub fn is_modal_open(&self) -> bool {
            false
        }

        pub fn tick(&mut self, _now_ms: f64) -> u32 {
            0
        }

        pub fn status_text(&self) -> String {
            "wasm App is available only on wasm32".to_string()
        }

        pub fn winner_text(&self) -> String {
            String::new()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm_stub::App;
