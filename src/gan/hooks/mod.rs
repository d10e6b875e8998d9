/*
 * @Date         : 2026-10-05
 * @Description  : 训练钩子：每步可在前向之前调整训练状态，并为两侧损失各贡献一个附加项
 */

mod learning_rate_decay;
mod parameter_penalty;

pub use learning_rate_decay::LearningRateDecayHook;
pub use parameter_penalty::ParameterPenaltyHook;

use super::TrainError;
use crate::nn::{Optimizer, Var};
use crate::tensor::Tensor;

/// `before_step`可见的训练状态
pub struct StepContext<'a> {
    /// 本步开始前已完成的步数
    pub step: u64,
    pub batch: &'a Tensor,
    optimizer: &'a mut dyn Optimizer,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(step: u64, batch: &'a Tensor, optimizer: &'a mut dyn Optimizer) -> Self {
        Self {
            step,
            batch,
            optimizer,
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.optimizer.learning_rate()
    }

    pub fn set_learning_rate(&mut self, lr: f32) {
        self.optimizer.set_learning_rate(lr);
    }
}

/// 训练钩子
///
/// `forward`返回 (判别器附加损失, 生成器附加损失)，任一侧可为 None。
/// 附加损失必须和模型损失在同一个图上，形状为标量或与对应的基础损失一致；
/// 训练器只会把它们加到基础损失上，不会替换。
pub trait TrainHook {
    fn name(&self) -> &str;

    /// 前向之前调用，不得执行反向传播
    fn before_step(&mut self, _ctx: &mut StepContext<'_>) -> Result<(), TrainError> {
        Ok(())
    }

    fn forward(&self) -> (Option<Var>, Option<Var>);
}
