use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 与常数的仿射变换 y = scale * x + shift。取反、数乘、平移常数都由它表示
#[derive(Clone)]
pub(crate) struct Affine {
    core: NodeCore,
    scale: f32,
    shift: f32,
}

impl Affine {
    pub(crate) fn new(parents: &[&NodeHandle], scale: f32, shift: f32) -> Result<Self, GraphError> {
        check_parents_count("Affine", parents, 1)?;
        if !scale.is_finite() || !shift.is_finite() {
            return Err(GraphError::InvalidOperation(format!(
                "Affine节点的系数必须是有限值，得到scale={scale}，shift={shift}"
            )));
        }
        Ok(Self {
            core: NodeCore::new(parents[0].value_expected_shape()),
            scale,
            shift,
        })
    }
}

impl TraitNode for Affine {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Affine"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value("Affine", parents, 0)?;
        let (scale, shift) = (self.scale, self.shift);
        self.core.value = Some(x.map(|v| scale * v + shift));
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * self.scale)
    }
}
