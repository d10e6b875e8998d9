/*
 * @Date         : 2026-10-05
 * @Description  : 训练器所需的模型接口
 */

use super::Metrics;
use crate::nn::{Graph, GraphError, Var};
use crate::tensor::Tensor;

/// 一次前向得到的判别器/生成器损失。两者可以不是标量，反向传播时按均值归约
#[derive(Debug, Clone)]
pub struct LossPair {
    pub d_loss: Var,
    pub g_loss: Var,
}

/// 可被对抗训练的模型
///
/// 生成器与判别器的参数必须位于同一个图上且互不相交
pub trait AdversarialModel {
    /// 模型所在的计算图
    fn graph(&self) -> &Graph;

    /// 喂入一个批次并完成前向，返回本步的损失
    fn forward_loss(&mut self, batch: &Tensor) -> Result<LossPair, GraphError>;

    fn g_parameters(&self) -> Vec<Var>;

    fn d_parameters(&self) -> Vec<Var>;

    /// 最近一次前向的指标。训练器在前向之后、反向之前读取
    fn metrics(&self) -> Metrics {
        Metrics::new()
    }
}
