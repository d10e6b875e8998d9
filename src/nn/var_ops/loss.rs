/*
 * @Date         : 2026-10-03
 * @Description  : Var 损失相关扩展 trait
 */

use crate::nn::{GraphError, Var};

pub trait VarLossOps {
    /// 全部元素的均值，输出`[1, 1]`
    fn mean(&self) -> Result<Var, GraphError>;

    /// 均方误差：mean((self - target)²)
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn mean(&self) -> Result<Var, GraphError> {
        self.derive(|g| g.new_mean_node(self.node_id(), None))
    }

    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError> {
        self.try_sub(target)?.square()?.mean()
    }
}
