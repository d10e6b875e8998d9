/*
 * @Date         : 2026-10-03
 * @Description  : 训练/推理模式、参数梯度开关与保留中间结果的作用域
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;

impl GraphInner {
    pub const fn set_train_mode(&mut self) {
        self.is_eval_mode = false;
    }

    pub const fn set_eval_mode(&mut self) {
        self.is_eval_mode = true;
    }

    pub const fn is_train_mode(&self) -> bool {
        !self.is_eval_mode
    }

    /// 评估模式下调用 backward 只会记一条 warn!，梯度照常累积
    pub const fn is_grad_enabled(&self) -> bool {
        !self.is_eval_mode
    }

    /// 关掉开关只影响之后的反向传播，已累积的梯度保持原样
    pub fn set_node_requires_grad(&mut self, node_id: NodeId, requires_grad: bool) -> Result<(), GraphError> {
        self.get_node_mut(node_id)?.set_requires_grad(requires_grad)
    }

    pub fn is_node_requires_grad(&self, node_id: NodeId) -> Result<bool, GraphError> {
        Ok(self.get_node(node_id)?.requires_grad())
    }

    /// 临时切到推理模式执行`f`，结束后恢复原模式
    pub fn no_grad_scope<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let previous = self.is_eval_mode;
        self.is_eval_mode = true;
        let result = f(self);
        self.is_eval_mode = previous;
        result
    }

    /// 作用域内的所有 backward 都保留中间结果，最外层作用域结束时统一释放。
    /// `f`返回 Err 也照样释放
    pub fn with_retained_graph<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.retain_depth += 1;
        let result = f(self);
        self.retain_depth -= 1;
        if self.retain_depth == 0 {
            self.release_intermediate_results();
        }
        result
    }

    pub const fn is_retaining_graph(&self) -> bool {
        self.retain_depth > 0
    }
}
