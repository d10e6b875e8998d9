use super::super::{NodeCore, TraitNode, parent_value};
use super::broadcast_parents_shape;
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 逐元素相乘 a ⊙ b（支持广播）
///
/// backward: d(a⊙b)/da = upstream ⊙ b，再按需求和还原到 a 的形状。
/// 两个父节点可以是同一个节点（如 x ⊙ x），此时 Graph 会把两份梯度累加。
#[derive(Clone)]
pub(crate) struct Multiply {
    core: NodeCore,
}

impl Multiply {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        let shape = broadcast_parents_shape("Multiply", parents)?;
        Ok(Self {
            core: NodeCore::new(&shape),
        })
    }
}

impl TraitNode for Multiply {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Multiply"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value("Multiply", parents, 0)?;
        let b = parent_value("Multiply", parents, 1)?;
        self.core.value = Some(a * b);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let parent = parent_value("Multiply", parents, parent_index)?;
        let other = parent_value("Multiply", parents, 1 - parent_index.min(1))?;
        Ok((upstream_grad * other).sum_to_shape(parent.shape()))
    }
}
