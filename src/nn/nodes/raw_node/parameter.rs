use super::{NodeCore, TraitNode};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 参数节点：可训练的叶子节点。
/// `requires_grad`为 false 时（被“冻结”），反向传播不会给它写入梯度，也不会为它而遍历其所在子图；
/// 冻结前已有的梯度保留，以便交替冻结两组参数分别反向传播。
#[derive(Clone)]
pub(crate) struct Parameter {
    core: NodeCore,
    requires_grad: bool,
}

impl Parameter {
    pub(crate) fn new(initial_value: Tensor) -> Result<Self, GraphError> {
        if initial_value.size() == 0 {
            return Err(GraphError::InvalidOperation(
                "参数节点不能是空张量".to_string(),
            ));
        }
        let mut core = NodeCore::new(initial_value.shape());
        core.value = Some(initial_value);
        Ok(Self {
            core,
            requires_grad: true,
        })
    }

    pub(crate) const fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// 只影响之后的反向传播，已有的梯度保持不变
    pub(crate) const fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }
}

impl TraitNode for Parameter {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Parameter"
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        match value {
            Some(value) => {
                self.core.value = Some(value.clone());
                Ok(())
            }
            None => Err(GraphError::InvalidOperation(format!(
                "参数节点`{}`的值不能被清空",
                self.name()
            ))),
        }
    }

    // 参数的值在整个训练过程中常驻
    fn clear_value(&mut self) {}

    fn calc_value_by_parents(&mut self, _parents: &[&NodeHandle]) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "参数节点`{}`被执行了前向传播。不该触及本错误，否则说明crate代码有问题",
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
            "参数节点`{}`没有父节点。不该触及本错误，否则说明crate代码有问题",
            self.name()
        )))
    }
}
