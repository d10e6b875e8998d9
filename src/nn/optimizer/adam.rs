/*
 * @Date         : 2026-10-03
 * @Description  : Adam 优化器，以及 Adam 系共用的按参数矩估计
 */

use std::collections::HashMap;

use super::core::{ParamGroup, check_betas, check_learning_rate, check_non_negative, check_positive, decayed};
use super::Optimizer;
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// 单个参数的一阶/二阶矩，第一次拿到梯度时才创建
#[derive(Debug, Clone, PartialEq)]
pub struct AdamState {
    /// 该参数已被更新的次数
    pub step: u64,
    /// m
    pub exp_avg: Tensor,
    /// v
    pub exp_avg_sq: Tensor,
}

impl AdamState {
    pub(super) fn zeros(shape: &[usize]) -> Self {
        Self {
            step: 0,
            exp_avg: Tensor::zeros(shape),
            exp_avg_sq: Tensor::zeros(shape),
        }
    }

    /// 吸收一次梯度并返回偏差修正后的`(m̂, v̂)`
    pub(super) fn absorb(&mut self, grad: &Tensor, (beta1, beta2): (f32, f32)) -> (Tensor, Tensor) {
        self.step += 1;
        self.exp_avg *= beta1;
        self.exp_avg += &(grad * (1.0 - beta1));
        self.exp_avg_sq *= beta2;
        self.exp_avg_sq += &(grad.square() * (1.0 - beta2));

        let t = self.step as f32;
        (
            &self.exp_avg / (1.0 - beta1.powf(t)),
            &self.exp_avg_sq / (1.0 - beta2.powf(t)),
        )
    }
}

/// θ ← θ - lr·m̂/(√v̂ + ε)
#[derive(Debug)]
pub struct Adam {
    group: ParamGroup,
    lr: f32,
    betas: (f32, f32),
    epsilon: f32,
    weight_decay: f32,
    state: HashMap<NodeId, AdamState>,
}

impl Adam {
    pub const DEFAULT_BETAS: (f32, f32) = (0.9, 0.999);

    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Result<Self, GraphError> {
        Self::new_with_config(graph, params, lr, Self::DEFAULT_BETAS, 1e-8, 0.0)
    }

    pub fn new_with_config(
        graph: &Graph,
        params: &[Var],
        lr: f32,
        betas: (f32, f32),
        epsilon: f32,
        weight_decay: f32,
    ) -> Result<Self, GraphError> {
        check_learning_rate(lr)?;
        check_betas(betas)?;
        check_positive("epsilon", epsilon)?;
        check_non_negative("weight_decay", weight_decay)?;
        Ok(Self {
            group: ParamGroup::new(graph, params)?,
            lr,
            betas,
            epsilon,
            weight_decay,
            state: HashMap::new(),
        })
    }

    pub fn state(&self, param: &Var) -> Option<&AdamState> {
        self.state.get(&param.node_id())
    }
}

impl Optimizer for Adam {
    fn name(&self) -> &'static str {
        "adam"
    }

    fn params(&self) -> &[Var] {
        self.group.params()
    }

    fn zero_grad(&mut self) -> Result<(), GraphError> {
        self.group.clear_grads()
    }

    fn step(&mut self) -> Result<(), GraphError> {
        let Self {
            group,
            lr,
            betas,
            epsilon,
            weight_decay,
            state,
        } = self;
        group.apply(|id, current, grad| {
            let grad = decayed(grad, current, *weight_decay);
            let moments = state.entry(id).or_insert_with(|| AdamState::zeros(grad.shape()));
            let (m_hat, v_hat) = moments.absorb(&grad, *betas);
            current - &(&m_hat / &(v_hat.sqrt() + *epsilon) * *lr)
        })
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}
