/*
 * @Date         : 2026-10-03
 * @Description  : 节点句柄：Graph 中实际存放的对象。
 *                 包装具体的原始节点（NodeType），并记录该节点的值是在哪一“版本”的叶子值下算出的，
 *                 以便前向传播跳过未失效的节点。
 */

use super::NodeId;
use super::raw_node::{NodeType, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;

#[derive(Clone)]
pub(crate) struct NodeHandle {
    raw_node: NodeType,
    /// 本节点值计算时 Graph 的叶子值版本号；叶子节点（Input/Parameter）不使用
    computed_version: Option<u64>,
}

impl NodeHandle {
    pub(crate) fn new<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            raw_node: raw_node.into(),
            computed_version: None,
        }
    }

    pub(crate) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.raw_node.set_id(id);
        self.raw_node.set_name(name);
    }

    pub(crate) fn id(&self) -> NodeId {
        self.raw_node.id()
    }

    pub(crate) fn name(&self) -> &str {
        self.raw_node.name()
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(crate) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    pub(crate) fn value(&self) -> Option<&Tensor> {
        self.raw_node.value()
    }

    pub(crate) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if let Some(value) = value {
            if value.shape() != self.value_expected_shape() {
                return Err(GraphError::ShapeMismatch {
                    expected: self.value_expected_shape().to_vec(),
                    got: value.shape().to_vec(),
                    message: format!("{self}的值形状与节点声明的形状不一致"),
                });
            }
        }
        self.raw_node.set_value(value)
    }

    pub(crate) fn clear_value(&mut self) {
        self.raw_node.clear_value();
        self.computed_version = None;
    }

    pub(crate) fn grad(&self) -> Option<&Tensor> {
        self.raw_node.grad()
    }

    pub(crate) fn clear_grad(&mut self) {
        self.raw_node.set_grad(None);
    }

    /// 把`grad`累加到本节点已有的梯度上（没有则直接设置）
    pub(crate) fn accumulate_grad(&mut self, grad: &Tensor) {
        let merged = match self.raw_node.grad() {
            Some(existing) => existing + grad,
            None => grad.clone(),
        };
        self.raw_node.set_grad(Some(&merged));
    }

    pub(crate) const fn computed_version(&self) -> Option<u64> {
        self.computed_version
    }

    pub(crate) fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        version: u64,
    ) -> Result<(), GraphError> {
        self.raw_node.calc_value_by_parents(parents)?;
        self.computed_version = Some(version);
        Ok(())
    }

    pub(crate) fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        self.raw_node
            .calc_grad_to_parent(parent_index, parents, upstream_grad)
    }

    /// 是否为叶子节点（没有父节点，值只能由外部设置）
    pub(crate) const fn is_leaf(&self) -> bool {
        matches!(self.raw_node, NodeType::Input(_) | NodeType::Parameter(_))
    }

    pub(crate) const fn is_parameter(&self) -> bool {
        matches!(self.raw_node, NodeType::Parameter(_))
    }

    /// 仅参数节点可能需要梯度
    pub(crate) fn requires_grad(&self) -> bool {
        match &self.raw_node {
            NodeType::Parameter(p) => p.requires_grad(),
            _ => false,
        }
    }

    pub(crate) fn set_requires_grad(&mut self, requires_grad: bool) -> Result<(), GraphError> {
        if let NodeType::Parameter(p) = &mut self.raw_node {
            p.set_requires_grad(requires_grad);
            return Ok(());
        }
        Err(GraphError::InvalidOperation(format!(
            "{self}不是参数节点，无法设置是否需要梯度"
        )))
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "节点[id={}, name={}, type={}]",
            self.id(),
            self.name(),
            self.type_name()
        )
    }
}
