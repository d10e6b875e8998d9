/*
 * @Date         : 2026-10-03
 * @Description  : 梯度优化器：SGD、Adam 以及对抗训练用的 Adamirror
 */

mod adam;
mod adamirror;
mod core;
mod sgd;

pub use adam::{Adam, AdamState};
pub use adamirror::{Adamirror, AdamirrorState};
pub use core::Optimizer;
pub use sgd::SGD;
