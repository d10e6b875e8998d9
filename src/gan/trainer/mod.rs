/*
 * @Date         : 2026-10-05
 * @Description  : 对抗训练器
 */

mod phase;
mod simultaneous;

pub use phase::{PhaseObserver, StepPhase};
pub use simultaneous::{SimultaneousTrainer, StepLosses};
