/*
 * @Date         : 2026-10-03
 * @Description  : 随机梯度下降 θ ← θ - lr·g
 */

use super::core::{ParamGroup, check_learning_rate};
use super::Optimizer;
use crate::nn::{Graph, GraphError, Var};

#[derive(Debug)]
pub struct SGD {
    group: ParamGroup,
    lr: f32,
}

impl SGD {
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Result<Self, GraphError> {
        check_learning_rate(lr)?;
        Ok(Self {
            group: ParamGroup::new(graph, params)?,
            lr,
        })
    }
}

impl Optimizer for SGD {
    fn name(&self) -> &'static str {
        "sgd"
    }

    fn params(&self) -> &[Var] {
        self.group.params()
    }

    fn zero_grad(&mut self) -> Result<(), GraphError> {
        self.group.clear_grads()
    }

    fn step(&mut self) -> Result<(), GraphError> {
        let lr = self.lr;
        self.group.apply(|_, current, grad| current - &(grad * lr))
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {}
}
