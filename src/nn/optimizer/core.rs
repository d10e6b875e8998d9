/*
 * @Date         : 2026-10-03
 * @Description  : 优化器公共部分：Optimizer 接口、超参数校验、参数组
 *
 * 所有优化器都遵守同一条规则：更新前先检查绑定参数的全部梯度，
 * 任一含 NaN/无穷就整步放弃（返回 GraphError::Numerical），参数与内部状态原样保留。
 * 没有梯度的参数直接跳过。
 */

use std::cell::RefCell;
use std::rc::Rc;

use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// 一阶优化器
///
/// ```ignore
/// let mut optimizer = Adamirror::new(&graph, &model.parameters(), 1e-3)?;
/// optimizer.zero_grad()?;
/// loss.backward()?;
/// optimizer.step()?;
/// ```
pub trait Optimizer {
    /// 用于日志与配置的小写名称
    fn name(&self) -> &'static str;

    fn params(&self) -> &[Var];

    fn zero_grad(&mut self) -> Result<(), GraphError>;

    /// 用已累积的梯度更新参数
    fn step(&mut self) -> Result<(), GraphError>;

    /// zero_grad + backward + step，返回损失值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        self.zero_grad()?;
        let value = loss.backward()?;
        self.step()?;
        Ok(value)
    }

    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, lr: f32);

    /// 丢弃所有按参数累积的状态
    fn reset(&mut self);
}

/// 学习率允许为 0（相当于冻结），但不能为负或非有限
pub(super) fn check_learning_rate(lr: f32) -> Result<(), GraphError> {
    if lr.is_finite() && lr >= 0.0 {
        return Ok(());
    }
    Err(GraphError::InvalidHyperparameter(format!(
        "学习率必须是非负有限值，得到{lr}"
    )))
}

pub(super) fn check_betas((beta1, beta2): (f32, f32)) -> Result<(), GraphError> {
    match [("beta1", beta1), ("beta2", beta2)]
        .into_iter()
        .find(|(_, beta)| !(0.0..1.0).contains(beta))
    {
        Some((name, beta)) => Err(GraphError::InvalidHyperparameter(format!(
            "{name}必须在[0, 1)内，得到{beta}"
        ))),
        None => Ok(()),
    }
}

pub(super) fn check_non_negative(name: &str, value: f32) -> Result<(), GraphError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(GraphError::InvalidHyperparameter(format!(
        "{name}必须是非负有限值，得到{value}"
    )))
}

/// ε 用作分母的保护项，必须严格为正
pub(super) fn check_positive(name: &str, value: f32) -> Result<(), GraphError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(GraphError::InvalidHyperparameter(format!(
        "{name}必须是正的有限值，得到{value}"
    )))
}

/// 一个优化器所绑定的参数：都在同一张图上，且都是参数节点
pub(super) struct ParamGroup {
    graph: Rc<RefCell<GraphInner>>,
    params: Vec<Var>,
}

impl std::fmt::Debug for ParamGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.params).finish()
    }
}

impl ParamGroup {
    pub(super) fn new(graph: &Graph, params: &[Var]) -> Result<Self, GraphError> {
        {
            let g = graph.inner();
            for param in params {
                let id = param.node_id();
                if !param.belongs_to(graph) {
                    return Err(GraphError::InvalidOperation(format!(
                        "参数{id:?}不属于优化器所绑定的图"
                    )));
                }
                if !g.is_parameter_node(id)? {
                    return Err(GraphError::InvalidOperation(format!(
                        "节点{id:?}不是参数节点，不能交给优化器"
                    )));
                }
            }
        }
        Ok(Self {
            graph: graph.inner_rc(),
            params: params.to_vec(),
        })
    }

    pub(super) fn params(&self) -> &[Var] {
        &self.params
    }

    pub(super) fn clear_grads(&self) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        self.params
            .iter()
            .try_for_each(|param| g.clear_node_grad(param.node_id()))
    }

    /// 对每个有梯度的参数调用`rule(节点, 当前值, 梯度)`，把返回的新值写回。
    /// 任何写回之前先确认全部梯度有限
    pub(super) fn apply<F>(&self, mut rule: F) -> Result<(), GraphError>
    where
        F: FnMut(NodeId, &Tensor, Tensor) -> Tensor,
    {
        let mut g = self.graph.borrow_mut();
        let pending = self.finite_grads(&g)?;
        for (id, current, grad) in pending {
            let updated = rule(id, &current, grad);
            g.set_node_value(id, Some(&updated))?;
        }
        Ok(())
    }

    fn finite_grads(&self, g: &GraphInner) -> Result<Vec<(NodeId, Tensor, Tensor)>, GraphError> {
        let mut pending = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let id = param.node_id();
            let Some(grad) = g.get_node_grad(id)? else {
                continue;
            };
            if !grad.is_all_finite() {
                return Err(GraphError::Numerical(format!(
                    "参数`{}`的梯度含 NaN 或无穷，放弃本次更新",
                    g.get_node_name(id)?
                )));
            }
            let current = g
                .get_node_value(id)?
                .cloned()
                .ok_or_else(|| GraphError::ComputationError(format!("参数{id:?}没有值")))?;
            pending.push((id, current, grad));
        }
        Ok(pending)
    }
}

/// L2 权重衰减：把`wd * θ`并入梯度
pub(super) fn decayed(grad: Tensor, current: &Tensor, weight_decay: f32) -> Tensor {
    if weight_decay == 0.0 {
        grad
    } else {
        &grad + &(current * weight_decay)
    }
}
