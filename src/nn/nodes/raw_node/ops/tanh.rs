use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// Tanh 激活函数节点
///
/// backward: d(tanh)/dx = 1 - tanh²(x)
#[derive(Clone)]
pub(crate) struct Tanh {
    core: NodeCore,
}

impl Tanh {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Tanh", parents, 1)?;
        Ok(Self {
            core: NodeCore::new(parents[0].value_expected_shape()),
        })
    }
}

impl TraitNode for Tanh {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Tanh"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value("Tanh", parents, 0)?;
        self.core.value = Some(x.tanh());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let y = self.core.value.as_ref().ok_or_else(|| {
            GraphError::ComputationError("Tanh节点没有值，无法反向传播".to_string())
        })?;
        Ok(upstream_grad * &y.map(|t| 1.0 - t * t))
    }
}
