use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 对父节点全部元素求均值，输出形状为`[1, 1]`的标量
///
/// backward: 每个元素得到 upstream / n
#[derive(Clone)]
pub(crate) struct Mean {
    core: NodeCore,
}

impl Mean {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Mean", parents, 1)?;
        Ok(Self {
            core: NodeCore::new(&[1, 1]),
        })
    }
}

impl TraitNode for Mean {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Mean"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value("Mean", parents, 0)?;
        self.core.value = Some(x.mean());
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let x = parent_value("Mean", parents, 0)?;
        let upstream = upstream_grad.get_data_number().ok_or_else(|| {
            GraphError::ComputationError("Mean节点的上游梯度必须是标量".to_string())
        })?;
        Ok(Tensor::full(upstream / x.size() as f32, x.shape()))
    }
}
