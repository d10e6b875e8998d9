use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// LeakyReLU 激活函数节点：x > 0 时为 x，否则为 negative_slope * x
#[derive(Clone)]
pub(crate) struct LeakyRelu {
    core: NodeCore,
    negative_slope: f32,
}

impl LeakyRelu {
    pub(crate) fn new(parents: &[&NodeHandle], negative_slope: f32) -> Result<Self, GraphError> {
        check_parents_count("LeakyRelu", parents, 1)?;
        if !negative_slope.is_finite() || negative_slope < 0.0 {
            return Err(GraphError::InvalidOperation(format!(
                "LeakyRelu节点的负半轴斜率必须是非负有限值，得到{negative_slope}"
            )));
        }
        Ok(Self {
            core: NodeCore::new(parents[0].value_expected_shape()),
            negative_slope,
        })
    }
}

impl TraitNode for LeakyRelu {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "LeakyRelu"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let x = parent_value("LeakyRelu", parents, 0)?;
        let slope = self.negative_slope;
        self.core.value = Some(x.map(|v| if v > 0.0 { v } else { slope * v }));
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        // LeakyReLU 的梯度: upstream_grad * (1 if x > 0 else negative_slope)
        let x = parent_value("LeakyRelu", parents, 0)?;
        let slope = self.negative_slope;
        Ok(upstream_grad * &x.map(|v| if v > 0.0 { 1.0 } else { slope }))
    }
}
