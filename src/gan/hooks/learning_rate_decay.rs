/*
 * @Date         : 2026-10-05
 * @Description  : 学习率线性衰减钩子，不贡献损失
 */

use super::{StepContext, TrainHook};
use crate::gan::TrainError;
use crate::nn::Var;

/// 在`[start_step, end_step]`内把学习率从初始值线性降到`end_lr`，之后保持`end_lr`。
/// 初始值取第一次调用时优化器的学习率
pub struct LearningRateDecayHook {
    start_step: u64,
    end_step: u64,
    end_lr: f32,
    initial_lr: Option<f32>,
}

impl LearningRateDecayHook {
    pub fn new(start_step: u64, end_step: u64, end_lr: f32) -> Result<Self, TrainError> {
        if start_step >= end_step {
            return Err(TrainError::Config(format!(
                "学习率衰减区间非法：start_step={start_step}，end_step={end_step}"
            )));
        }
        if !(end_lr.is_finite() && end_lr >= 0.0) {
            return Err(TrainError::Config(format!(
                "衰减终点学习率必须是非负有限值，得到{end_lr}"
            )));
        }
        Ok(Self {
            start_step,
            end_step,
            end_lr,
            initial_lr: None,
        })
    }

    /// 第`step`步应使用的学习率
    pub fn learning_rate_at(&self, initial_lr: f32, step: u64) -> f32 {
        if step <= self.start_step {
            return initial_lr;
        }
        if step >= self.end_step {
            return self.end_lr;
        }
        let progress = (step - self.start_step) as f32 / (self.end_step - self.start_step) as f32;
        initial_lr + (self.end_lr - initial_lr) * progress
    }
}

impl TrainHook for LearningRateDecayHook {
    fn name(&self) -> &str {
        "learning_rate_decay"
    }

    fn before_step(&mut self, ctx: &mut StepContext<'_>) -> Result<(), TrainError> {
        let initial_lr = *self.initial_lr.get_or_insert(ctx.learning_rate());
        let lr = self.learning_rate_at(initial_lr, ctx.step);
        log::debug!("第{}步学习率：{lr}", ctx.step);
        ctx.set_learning_rate(lr);
        Ok(())
    }

    fn forward(&self) -> (Option<Var>, Option<Var>) {
        (None, None)
    }
}
