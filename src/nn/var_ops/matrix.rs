/*
 * @Date         : 2026-10-03
 * @Description  : Var 的矩阵运算
 */

use crate::nn::{GraphError, Var};

pub trait VarMatrixOps {
    /// [m, k] @ [k, n] -> [m, n]
    fn matmul(&self, other: &Var) -> Result<Var, GraphError>;
}

impl VarMatrixOps for Var {
    fn matmul(&self, other: &Var) -> Result<Var, GraphError> {
        self.derive_binary(other, "矩阵乘法", |g, a, b| g.new_mat_mul_node(a, b, None))
    }
}
