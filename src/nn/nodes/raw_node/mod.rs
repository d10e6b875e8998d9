/*
 * @Date         : 2026-10-03
 * @Description  : 原始节点：所有具体节点类型及其公共特性。
 *                 每个节点保存自己的值与梯度（梯度形状与值一致，即“批梯度”而非雅可比矩阵），
 *                 父节点的有序列表由 Graph 保存，反向传播时按父节点下标求梯度。
 */

mod input;
mod ops;
mod parameter;

pub(crate) use input::Input;
pub(crate) use ops::*;
pub(crate) use parameter::Parameter;

use enum_dispatch::enum_dispatch;

use super::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

#[enum_dispatch]
#[derive(Clone)]
pub(crate) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    MatMul(MatMul),
    Affine(Affine),
    Sigmoid(Sigmoid),
    Tanh(Tanh),
    LeakyRelu(LeakyRelu),
    Softplus(Softplus),
    Mean(Mean),
}

/// 所有节点共有的状态
#[derive(Clone, Default)]
pub(crate) struct NodeCore {
    id: Option<NodeId>,
    name: Option<String>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
}

impl NodeCore {
    pub(crate) fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            ..Self::default()
        }
    }
}

#[enum_dispatch(NodeType)]
pub(crate) trait TraitNode {
    fn core(&self) -> &NodeCore;

    fn core_mut(&mut self) -> &mut NodeCore;

    fn type_name(&self) -> &'static str;

    fn id(&self) -> NodeId {
        self.core().id.unwrap_or(NodeId(0))
    }

    fn set_id(&mut self, id: NodeId) {
        self.core_mut().id = Some(id);
    }

    fn name(&self) -> &str {
        self.core().name.as_deref().unwrap_or_default()
    }

    fn set_name(&mut self, name: &str) {
        self.core_mut().name = Some(name.to_string());
    }

    /// 节点创建时即确定的值形状
    fn value_expected_shape(&self) -> &[usize] {
        &self.core().shape
    }

    fn value(&self) -> Option<&Tensor> {
        self.core().value.as_ref()
    }

    fn set_value(&mut self, _value: Option<&Tensor>) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}类型节点的值不应该被手动设置",
            self.type_name()
        )))
    }

    fn clear_value(&mut self) {
        self.core_mut().value = None;
    }

    fn grad(&self) -> Option<&Tensor> {
        self.core().grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) {
        self.core_mut().grad = grad.cloned();
    }

    // 根据父节点的值计算本节点的值（由 Graph 保证调用时所有父节点的值都已算好）
    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError>;

    /// 给定本节点的上游梯度（形状同本节点的值），求对第`parent_index`个父节点的梯度（形状同该父节点的值）
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError>;
}

/// 检查父节点个数
pub(in crate::nn::nodes) fn check_parents_count(
    type_name: &str,
    parents: &[&NodeHandle],
    expected: usize,
) -> Result<(), GraphError> {
    if parents.len() == expected {
        Ok(())
    } else {
        Err(GraphError::InvalidOperation(format!(
            "{type_name}节点需要{expected}个父节点，但得到{}个",
            parents.len()
        )))
    }
}

/// 取第`index`个父节点的值
pub(in crate::nn::nodes) fn parent_value<'a>(
    type_name: &str,
    parents: &[&'a NodeHandle],
    index: usize,
) -> Result<&'a Tensor, GraphError> {
    let parent = parents.get(index).ok_or_else(|| {
        GraphError::InvalidOperation(format!("{type_name}节点没有第{index}个父节点"))
    })?;
    parent.value().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{type_name}节点的父节点{parent}没有值。不该触及本错误，否则说明crate代码有问题"
        ))
    })
}
