/*
 * @Date         : 2026-10-03
 * @Description  : Var 激活函数扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 激活函数扩展 trait
///
/// # 使用示例
/// ```ignore
/// use hypergan::nn::{Var, VarActivationOps};
///
/// let h = x.leaky_relu(0.2)?;
/// let p = logits.sigmoid()?;
/// ```
pub trait VarActivationOps {
    /// Sigmoid 激活：1 / (1 + exp(-x))
    fn sigmoid(&self) -> Result<Var, GraphError>;

    /// Tanh 激活
    fn tanh(&self) -> Result<Var, GraphError>;

    /// `LeakyReLU` 激活：x if x > 0 else alpha * x
    fn leaky_relu(&self, alpha: f32) -> Result<Var, GraphError>;

    /// `SoftPlus` 激活：log(1 + exp(x))
    fn softplus(&self) -> Result<Var, GraphError>;
}

impl VarActivationOps for Var {
    fn sigmoid(&self) -> Result<Var, GraphError> {
        self.derive(|g| g.new_sigmoid_node(self.node_id(), None))
    }

    fn tanh(&self) -> Result<Var, GraphError> {
        self.derive(|g| g.new_tanh_node(self.node_id(), None))
    }

    fn leaky_relu(&self, alpha: f32) -> Result<Var, GraphError> {
        self.derive(|g| g.new_leaky_relu_node(self.node_id(), alpha, None))
    }

    fn softplus(&self) -> Result<Var, GraphError> {
        self.derive(|g| g.new_softplus_node(self.node_id(), None))
    }
}
