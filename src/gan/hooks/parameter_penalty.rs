/*
 * @Date         : 2026-10-05
 * @Description  : 参数惩罚钩子：γ · Σ mean(θ²)，只加到所选一侧的损失上
 */

use super::TrainHook;
use crate::gan::{Side, TrainError};
use crate::nn::{Var, VarLossOps};

pub struct ParameterPenaltyHook {
    side: Side,
    penalty: Var,
}

impl ParameterPenaltyHook {
    /// 惩罚项在构造时一次建好，之后每步随参数值重新计算
    pub fn new(params: &[Var], side: Side, gamma: f32) -> Result<Self, TrainError> {
        if !(gamma.is_finite() && gamma >= 0.0) {
            return Err(TrainError::Config(format!(
                "参数惩罚系数必须是非负有限值，得到{gamma}"
            )));
        }
        let Some((first, rest)) = params.split_first() else {
            return Err(TrainError::Config("参数惩罚至少需要一个参数".to_string()));
        };

        let mut total = first.square()?.mean()?;
        for param in rest {
            total = total.try_add(&param.square()?.mean()?)?;
        }
        let penalty = total.scale(gamma)?;
        Ok(Self { side, penalty })
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub const fn penalty(&self) -> &Var {
        &self.penalty
    }
}

impl TrainHook for ParameterPenaltyHook {
    fn name(&self) -> &str {
        "parameter_penalty"
    }

    fn forward(&self) -> (Option<Var>, Option<Var>) {
        match self.side {
            Side::Discriminator => (Some(self.penalty.clone()), None),
            Side::Generator => (None, Some(self.penalty.clone())),
        }
    }
}
