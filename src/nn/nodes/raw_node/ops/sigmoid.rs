use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// Sigmoid 激活函数节点
///
/// forward: sigmoid(x) = 1 / (1 + e^(-x))
/// backward: d(sigmoid)/dx = sigmoid(x) * (1 - sigmoid(x))
#[derive(Clone)]
pub(crate) struct Sigmoid {
    core: NodeCore,
}

impl Sigmoid {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Sigmoid", parents, 1)?;
        Ok(Self {
            core: NodeCore::new(parents[0].value_expected_shape()),
        })
    }
}

impl TraitNode for Sigmoid {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Sigmoid"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value("Sigmoid", parents, 0)?;
        self.core.value = Some(x.sigmoid());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let y = self.core.value.as_ref().ok_or_else(|| {
            GraphError::ComputationError("Sigmoid节点没有值，无法反向传播".to_string())
        })?;
        Ok(upstream_grad * &y.map(|s| s * (1.0 - s)))
    }
}
