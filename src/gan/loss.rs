/*
 * @Date         : 2026-10-05
 * @Description  : 对抗损失：由判别器在真/假样本上的输出构造 (d_loss, g_loss)
 *
 * 返回的损失保留逐样本形状，由训练器反向传播时做均值归约。
 */

use serde::{Deserialize, Serialize};

use super::LossPair;
use crate::nn::{GraphError, Var, VarActivationOps};

pub trait AdversarialLoss {
    fn name(&self) -> &'static str;

    /// `d_real`/`d_fake`：判别器对真实数据和生成数据的原始输出（logit）
    fn build(&self, d_real: &Var, d_fake: &Var) -> Result<LossPair, GraphError>;
}

/// 标准 GAN 损失（sigmoid 交叉熵形式，生成器用非饱和版本）
/// - d = softplus(-d_real) + softplus(d_fake)
/// - g = softplus(-d_fake)
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLoss;

impl AdversarialLoss for StandardLoss {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn build(&self, d_real: &Var, d_fake: &Var) -> Result<LossPair, GraphError> {
        let d_loss = d_real.neg()?.softplus()?.try_add(&d_fake.softplus()?)?;
        let g_loss = d_fake.neg()?.softplus()?;
        Ok(LossPair { d_loss, g_loss })
    }
}

/// 最小二乘 GAN 损失
/// - d = (d_real - b)² + (d_fake - a)²
/// - g = (d_fake - c)²
#[derive(Debug, Clone, Copy)]
pub struct LeastSquaresLoss {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Default for LeastSquaresLoss {
    fn default() -> Self {
        Self {
            a: -1.0,
            b: 1.0,
            c: 1.0,
        }
    }
}

impl AdversarialLoss for LeastSquaresLoss {
    fn name(&self) -> &'static str {
        "least_squares"
    }

    fn build(&self, d_real: &Var, d_fake: &Var) -> Result<LossPair, GraphError> {
        let real_term = d_real.shift(-self.b)?.square()?;
        let fake_term = d_fake.shift(-self.a)?.square()?;
        let d_loss = real_term.try_add(&fake_term)?;
        let g_loss = d_fake.shift(-self.c)?.square()?;
        Ok(LossPair { d_loss, g_loss })
    }
}

/// 可从配置选择的损失种类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    #[default]
    Standard,
    LeastSquares,
}

impl LossKind {
    pub fn provider(self) -> Box<dyn AdversarialLoss> {
        match self {
            Self::Standard => Box::new(StandardLoss),
            Self::LeastSquares => Box::new(LeastSquaresLoss::default()),
        }
    }
}
