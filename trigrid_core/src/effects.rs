/// 勝利時の紙吹雪（パーティクル）。
pub mod confetti;
/// 演出用の決定的な乱数生成器。
pub mod rng;

pub type Burst = confetti::Burst;
pub type BurstConfig = confetti::BurstConfig;
pub type Particle = confetti::Particle;
