use super::super::{NodeCore, TraitNode, check_parents_count, parent_value};
use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;

/// 矩阵乘法 C = A @ B，A 为[m, k]，B 为[k, n]
///
/// backward: dL/dA = dL/dC @ Bᵀ，dL/dB = Aᵀ @ dL/dC
#[derive(Clone)]
pub(crate) struct MatMul {
    core: NodeCore,
}

impl MatMul {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("MatMul", parents, 2)?;
        let a = parents[0].value_expected_shape();
        let b = parents[1].value_expected_shape();
        if a.len() != 2 || b.len() != 2 || a[1] != b[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![a.get(1).copied().unwrap_or(0), b.get(1).copied().unwrap_or(0)],
                got: b.to_vec(),
                message: format!("MatMul节点的父节点形状{a:?}与{b:?}无法做矩阵乘法"),
            });
        }
        Ok(Self {
            core: NodeCore::new(&[a[0], b[1]]),
        })
    }
}

impl TraitNode for MatMul {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "MatMul"
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let a = parent_value("MatMul", parents, 0)?;
        let b = parent_value("MatMul", parents, 1)?;
        self.core.value = Some(a.mat_mul(b));
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index == 0 {
            let b = parent_value("MatMul", parents, 1)?;
            Ok(upstream_grad.mat_mul(&b.transpose()))
        } else {
            let a = parent_value("MatMul", parents, 0)?;
            Ok(a.transpose().mat_mul(upstream_grad))
        }
    }
}
