use super::{NodeCore, TraitNode};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 输入节点：值由外部在每次前向传播前设置（如一个批次的样本、噪声），不参与梯度计算
#[derive(Clone)]
pub(crate) struct Input {
    core: NodeCore,
}

impl Input {
    pub(crate) fn new(shape: &[usize]) -> Result<Self, GraphError> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(GraphError::InvalidOperation(format!(
                "输入节点的形状{shape:?}非法"
            )));
        }
        Ok(Self {
            core: NodeCore::new(shape),
        })
    }
}

impl TraitNode for Input {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Input"
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.core.value = value.cloned();
        Ok(())
    }

    fn calc_value_by_parents(&mut self, _parents: &[&NodeHandle]) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "输入节点`{}`被执行了前向传播。不该触及本错误，否则说明crate代码有问题",
            self.name()
        )))
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&NodeHandle],
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "输入节点`{}`没有父节点。不该触及本错误，否则说明crate代码有问题",
            self.name()
        )))
    }
}
