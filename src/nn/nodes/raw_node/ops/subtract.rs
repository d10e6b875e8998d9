use super::super::{NodeCore, TraitNode, parent_value};
use super::broadcast_parents_shape;
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 逐元素相减 a - b（支持广播）
#[derive(Clone)]
pub(crate) struct Subtract {
    core: NodeCore,
}

impl Subtract {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        let shape = broadcast_parents_shape("Subtract", parents)?;
        Ok(Self {
            core: NodeCore::new(&shape),
        })
    }
}

impl TraitNode for Subtract {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Subtract"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value("Subtract", parents, 0)?;
        let b = parent_value("Subtract", parents, 1)?;
        self.core.value = Some(a - b);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let parent = parent_value("Subtract", parents, parent_index)?;
        let grad = upstream_grad.sum_to_shape(parent.shape());
        Ok(if parent_index == 0 { grad } else { grad * -1.0 })
    }
}
