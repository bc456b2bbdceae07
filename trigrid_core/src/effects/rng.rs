/// 64-bit 線形合同法 (LCG) の簡易 RNG。
/// - rand クレート不使用
/// - `seed` で決定的に再現可能
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Lcg64 {
    /// 内部状態。
    state: u64,
}

impl Lcg64 {
    /// LCG の内部状態を `seed` から初期化する。
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // seed が 0 でも偏らないように攪拌する。
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// `0..bound` の一様な値を返す（`bound == 0` なら 0）。
    #[inline]
    pub fn next_below(&mut self, bound: u32) -> u32 {
        let product = u64::from(self.next_u32()).wrapping_mul(u64::from(bound));
        u32::try_from(product.wrapping_shr(32)).unwrap_or(u32::MIN)
    }

    /// `-magnitude..=magnitude` の値を返す。
    #[inline]
    pub fn next_signed(&mut self, magnitude: i32) -> i32 {
        let span = magnitude.unsigned_abs().saturating_mul(2).saturating_add(1);
        let offset = i32::try_from(self.next_below(span)).unwrap_or(i32::MAX);
        offset.saturating_sub(magnitude.saturating_abs())
    }

    /// 次の u32 を生成する（上位 32bit を返す）。
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        // 2^64 mod の LCG: state = state * A + C（PCG 系で採用される定数）
        const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
        const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);

        u32::try_from(self.state >> 32).unwrap_or(u32::MAX)
    }
}
