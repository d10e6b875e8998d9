/*
 * @Date         : 2026-10-03
 * @Description  : Adamirror 优化器：带“镜像”（乐观）修正的 Adam，常用于 GAN 的对抗训练。
 *
 * 对每个有梯度 g 的参数 θ（t 为该参数自己的更新次数，从 1 开始）：
 * - m = β1 * m + (1 - β1) * g
 * - v = β2 * v + (1 - β2) * g²
 * - u_t = lr * (m / (1 - β1^t)) / max(√(v / (1 - β2^t)) + ε, TINY)
 * - θ = θ - (2 * u_t - u_{t-1})，其中 u_0 = 0
 *
 * 即先按 Adam 方向走两倍步长，再撤回上一步的更新。weight_decay 非零时先把 wd * θ 加到梯度上。
 */

use std::collections::HashMap;

use super::adam::AdamState;
use super::core::{ParamGroup, check_betas, check_learning_rate, check_non_negative, check_positive, decayed};
use super::Optimizer;
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// 分母下限
const TINY: f32 = 1e-12;

/// 单个参数的优化器状态，在该参数第一次有梯度时惰性创建
#[derive(Debug, Clone, PartialEq)]
pub struct AdamirrorState {
    pub moments: AdamState,
    /// 上一次的更新量 u_{t-1}
    pub prev_update: Tensor,
}

/// ```ignore
/// let mut optimizer = Adamirror::new(&graph, &params, 1e-3)?;
/// let loss_value = optimizer.minimize(&loss)?;
/// ```
#[derive(Debug)]
pub struct Adamirror {
    group: ParamGroup,
    lr: f32,
    betas: (f32, f32),
    epsilon: f32,
    weight_decay: f32,
    state: HashMap<NodeId, AdamirrorState>,
}

impl Adamirror {
    pub const DEFAULT_BETAS: (f32, f32) = (0.907_453, 0.997);
    pub const DEFAULT_EPSILON: f32 = 1e-8;

    /// 以默认超参数创建：betas = (0.907453, 0.997)，eps = 1e-8，weight_decay = 0
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Result<Self, GraphError> {
        Self::new_with_config(
            graph,
            params,
            lr,
            Self::DEFAULT_BETAS,
            Self::DEFAULT_EPSILON,
            0.0,
        )
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

    /// 该参数从未被更新过则为 None
    pub fn state(&self, param: &Var) -> Option<&AdamirrorState> {
        self.state.get(&param.node_id())
    }

    pub const fn betas(&self) -> (f32, f32) {
        self.betas
    }

    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub const fn weight_decay(&self) -> f32 {
        self.weight_decay
    }
}

impl Optimizer for Adamirror {
    fn name(&self) -> &'static str {
        "adamirror"
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
            let entry = state.entry(id).or_insert_with(|| AdamirrorState {
                moments: AdamState::zeros(grad.shape()),
                prev_update: Tensor::zeros(grad.shape()),
            });
            let (m_hat, v_hat) = entry.moments.absorb(&grad, *betas);
            let denom = (v_hat.sqrt() + *epsilon).maximum_scalar(TINY);
            let update = &m_hat / &denom * *lr;
            let next = current - &(&(&update * 2.0) - &entry.prev_update);
            entry.prev_update = update;
            next
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
