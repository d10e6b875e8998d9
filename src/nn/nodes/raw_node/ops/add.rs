use super::super::{NodeCore, TraitNode, parent_value};
use super::broadcast_parents_shape;
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 逐元素相加（支持广播）
///
/// 反向时，广播出来的维度需要把上游梯度求和还原回父节点形状
#[derive(Clone)]
pub(crate) struct Add {
    core: NodeCore,
}

impl Add {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        let shape = broadcast_parents_shape("Add", parents)?;
        Ok(Self {
            core: NodeCore::new(&shape),
        })
    }
}

impl TraitNode for Add {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Add"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value("Add", parents, 0)?;
        let b = parent_value("Add", parents, 1)?;
        self.core.value = Some(a + b);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let parent = parent_value("Add", parents, parent_index)?;
        Ok(upstream_grad.sum_to_shape(parent.shape()))
    }
}
