use crate::effects::rng::Lcg64;

/// 紙吹雪の色（`0xRRGGBB`）。
pub const PALETTE: [u32; 5] = [0x00A8_64FD, 0x0029_CDFF, 0x0078_FF44, 0x00FF_718D, 0x00FD_FF6A];

/// 1ピクセルあたりの固定小数点単位。
const MILLI: i32 = 1000;

/// 千分率の分母。
const PERMILLE: i32 = 1000;

/// 生成位置（画面上端より上）の高さの幅（ピクセル）。
const SPAWN_BAND_PX: u32 = 10;

/// 紙片の最小サイズ（ピクセル）。
const MIN_SIZE_PX: u8 = 5;

/// 紙片サイズのばらつき（ピクセル）。
const SIZE_SPREAD_PX: u32 = 6;

/// 紙吹雪の設定（速度・加速度は 1/1000 ピクセル単位、1フレームあたり）。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct BurstConfig {
    /// 画面外に出た紙片を上端へ戻し続けるフレーム数。
    pub active_frames: u32,
    /// 1フレームごとに速度へ掛ける係数（千分率）。
    pub friction_permille: i32,
    /// 重力加速度。
    pub gravity: i32,
    /// 紙片の数。
    pub pieces: u16,
    /// 初速（横方向）の最大値。
    pub speed_x: i32,
    /// 初速（下方向）の最大値。
    pub speed_y: i32,
}

impl Default for BurstConfig {
    /// 3秒間（60fps）、200枚。
    #[inline]
    fn default() -> Self {
        Self {
            active_frames: 180,
            friction_permille: 990,
            gravity: 100,
            pieces: 200,
            speed_x: 4 * MILLI,
            speed_y: 10 * MILLI,
        }
    }
}

impl BurstConfig {
    /// 紙片の数を変更した設定を返す。
    #[inline]
    #[must_use]
    pub const fn with_pieces(self, pieces: u16) -> Self {
        Self { pieces, ..self }
    }

    /// 有効フレーム数を変更した設定を返す。
    #[inline]
    #[must_use]
    pub const fn with_active_frames(self, active_frames: u32) -> Self {
        Self {
            active_frames,
            ..self
        }
    }
}

/// 紙吹雪の紙片1枚。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Particle {
    /// 色（`0xRRGGBB`）。
    color: u32,
    /// 一辺の長さ（ピクセル）。
    size_px: u8,
    /// 横方向の速度。
    vx: i32,
    /// 縦方向の速度（下向きが正）。
    vy: i32,
    /// 横位置。
    x: i32,
    /// 縦位置。
    y: i32,
}

impl Particle {
    /// 色（`0xRRGGBB`）を返す。
    #[inline]
    #[must_use]
    pub const fn color(self) -> u32 {
        self.color
    }

    /// 一辺の長さ（ピクセル）を返す。
    #[inline]
    #[must_use]
    pub const fn size_px(self) -> u8 {
        self.size_px
    }

    /// 横位置（ピクセル）を返す。
    #[inline]
    #[must_use]
    pub const fn x_px(self) -> i32 {
        match self.x.checked_div(MILLI) {
            Some(value) => value,
            None => i32::MIN,
        }
    }

    /// 縦位置（ピクセル）を返す。
    #[inline]
    #[must_use]
    pub const fn y_px(self) -> i32 {
        match self.y.checked_div(MILLI) {
            Some(value) => value,
            None => i32::MIN,
        }
    }
}

/// 勝利時の紙吹雪。
///
/// 乱数は `seed` から決まるので、同じ引数なら同じ動きを再現する。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Burst {
    /// 設定。
    config: BurstConfig,
    /// 経過フレーム数。
    frame: u32,
    /// 画面の高さ。
    height: i32,
    /// 紙片。
    particles: Vec<Particle>,
    /// 乱数生成器。
    rng: Lcg64,
    /// 画面の幅（ピクセル）。
    width_px: u32,
}

impl Burst {
    /// 経過フレーム数を返す。
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// 有効期間が過ぎ、すべての紙片が画面下へ抜けたかを返す。
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.frame >= self.config.active_frames
            && self
                .particles
                .iter()
                .all(|particle| particle.y > self.height)
    }

    /// 画面サイズ（ピクセル）を指定して紙吹雪を開始する。
    #[inline]
    #[must_use]
    pub fn new(seed: u64, width_px: u32, height_px: u32, config: BurstConfig) -> Self {
        let mut rng = Lcg64::new(seed);
        let particles = (u16::MIN..config.pieces)
            .map(|_| spawn(&mut rng, width_px, config))
            .collect();
        let height = i32::try_from(height_px)
            .unwrap_or(i32::MAX)
            .saturating_mul(MILLI);

        tracing::debug!(seed, pieces = config.pieces, "confetti burst started");

        Self {
            config,
            frame: u32::MIN,
            height,
            particles,
            rng,
            width_px,
        }
    }

    /// 紙片を返す。
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// 1フレーム進める。
    ///
    /// 有効期間中は画面下へ抜けた紙片を上端から再投入する。
    #[inline]
    pub fn step(&mut self) {
        self.frame = self.frame.saturating_add(1);
        let recycling = self.frame < self.config.active_frames;

        for particle in &mut self.particles {
            particle.vx = scale_permille(particle.vx, self.config.friction_permille);
            particle.vy = scale_permille(particle.vy, self.config.friction_permille)
                .saturating_add(self.config.gravity);
            particle.x = particle.x.saturating_add(particle.vx);
            particle.y = particle.y.saturating_add(particle.vy);

            if recycling && particle.y > self.height {
                *particle = spawn(&mut self.rng, self.width_px, self.config);
            }
        }
    }
}

/// `value * permille / 1000` を返す。
fn scale_permille(value: i32, permille: i32) -> i32 {
    value
        .saturating_mul(permille)
        .checked_div(PERMILLE)
        .unwrap_or(i32::MIN)
}

/// 画面上端のすぐ上に紙片を1枚生成する。
fn spawn(rng: &mut Lcg64, width_px: u32, config: BurstConfig) -> Particle {
    let x_px = i32::try_from(rng.next_below(width_px)).unwrap_or(i32::MAX);
    let above_px = i32::try_from(rng.next_below(SPAWN_BAND_PX).saturating_add(1)).unwrap_or(1);
    let vy_bound = u32::try_from(config.speed_y).unwrap_or(u32::MIN);
    let palette_index = usize::try_from(rng.next_below(5)).unwrap_or(usize::MIN);
    let size_extra = u8::try_from(rng.next_below(SIZE_SPREAD_PX)).unwrap_or(u8::MIN);

    Particle {
        color: PALETTE.get(palette_index).copied().unwrap_or(0x00A8_64FD),
        size_px: MIN_SIZE_PX.saturating_add(size_extra),
        vx: rng.next_signed(config.speed_x),
        vy: i32::try_from(rng.next_below(vy_bound)).unwrap_or(i32::MIN),
        x: x_px.saturating_mul(MILLI),
        y: above_px.saturating_neg().saturating_mul(MILLI),
    }
}
