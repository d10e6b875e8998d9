use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// Softplus 激活函数节点：ln(1 + e^x)，数值稳定实现
///
/// backward: d(softplus)/dx = sigmoid(x)
#[derive(Clone)]
pub(crate) struct Softplus {
    core: NodeCore,
}

impl Softplus {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Softplus", parents, 1)?;
        Ok(Self {
            core: NodeCore::new(parents[0].value_expected_shape()),
        })
    }
}

impl TraitNode for Softplus {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Softplus"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value("Softplus", parents, 0)?;
        self.core.value = Some(x.softplus());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let x = parent_value("Softplus", parents, 0)?;
        Ok(upstream_grad * &x.sigmoid())
    }
}
