use crate::effects::{Burst, BurstConfig};
use crate::engine::{Game, Rules};

/// UI から操作する1画面分の状態。
///
/// ゲーム本体に、勝者表示（モーダル）と紙吹雪を組み合わせる。
/// - 勝者表示中は盤面のクリックを受け付けない。
/// - 勝者表示を閉じるとゲームをリセットし、紙吹雪も止める。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    /// 再生中の紙吹雪。
    burst: Option<Burst>,
    /// 紙吹雪の設定。
    burst_config: BurstConfig,
    /// これまでに開始した紙吹雪の数（乱数のシードに使う）。
    bursts_started: u64,
    /// ゲーム本体。
    game: Game,
    /// 紙吹雪を描く画面の高さ（ピクセル）。
    height: u32,
    /// 勝者表示中かどうか。
    modal_open: bool,
    /// 紙吹雪を描く画面の幅（ピクセル）。
    width: u32,
}

impl Session {
    /// 再生中の紙吹雪を返す。
    #[inline]
    #[must_use]
    pub const fn burst(&self) -> Option<&Burst> {
        self.burst.as_ref()
    }

    /// 盤面のマスをクリックする。石を置けたら true。
    ///
    /// 勝者表示中、盤外、`AfterWin::Locked` で決着済みの場合は何もしない。
    /// この着手で勝者が決まったら勝者表示を開き、紙吹雪を開始する。
    #[inline]
    pub fn click(&mut self, row: u8, col: u8) -> bool {
        if self.modal_open {
            tracing::debug!(row, col, "click ignored while the winner is shown");
            return false;
        }

        let report = match self.game.apply_move(row, col) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(%err, "click ignored");
                return false;
            }
        };

        if report.winner.is_some() {
            self.modal_open = true;
            self.bursts_started = self.bursts_started.wrapping_add(1);
            self.burst = Some(Burst::new(
                self.bursts_started,
                self.width,
                self.height,
                self.burst_config,
            ));
        }
        report.placed
    }

    /// 勝者表示を閉じ、紙吹雪を止めてゲームをリセットする。
    #[inline]
    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.burst = None;
        self.game.reset();
    }

    /// ゲームの現在の状態を返す。
    #[inline]
    #[must_use]
    pub const fn game(&self) -> Game {
        self.game
    }

    /// 勝者表示中かどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// 指定ルールと画面サイズ（ピクセル）で開始する。
    #[inline]
    #[must_use]
    pub fn new(rules: Rules, width: u32, height: u32) -> Self {
        Self {
            burst: None,
            burst_config: BurstConfig::default(),
            bursts_started: 0,
            game: Game::new(rules),
            height,
            modal_open: false,
            width,
        }
    }

    /// 画面サイズの変更を反映する（次の紙吹雪から有効）。
    #[inline]
    pub const fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// 紙吹雪を1フレーム進める。再生中なら true。
    ///
    /// 終わった紙吹雪はここで破棄する。
    #[inline]
    pub fn step_effects(&mut self) -> bool {
        let finished = match self.burst.as_mut() {
            Some(burst) => {
                burst.step();
                burst.is_finished()
            }
            None => return false,
        };
        if finished {
            self.burst = None;
        }
        !finished
    }

    /// 紙吹雪の設定を差し替える。
    #[inline]
    #[must_use]
    pub fn with_burst_config(mut self, burst_config: BurstConfig) -> Self {
        self.burst_config = burst_config;
        self
    }
}
