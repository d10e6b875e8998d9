/*
 * @Date         : 2026-10-05
 * @Description  : 用全连接层搭建的玩具 GAN（生成器与判别器均为两层 MLP），
 *                 整个模型在一张静态图上，每步只更换真实数据与隐变量噪声。
 */

use serde::{Deserialize, Serialize};

use super::{AdversarialModel, LossKind, LossPair, Metrics};
use crate::nn::{
    Graph, GraphError, Linear, Module, Var, VarActivationOps, VarLossOps,
};
use crate::tensor::Tensor;

const LEAKY_RELU_SLOPE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpGanConfig {
    pub latent_dim: usize,
    pub hidden_dim: usize,
    pub data_dim: usize,
    pub batch_size: usize,
    #[serde(default)]
    pub loss: LossKind,
    /// 设置后参数初始化与噪声采样均可复现
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MlpGanConfig {
    fn default() -> Self {
        Self {
            latent_dim: 2,
            hidden_dim: 16,
            data_dim: 2,
            batch_size: 32,
            loss: LossKind::Standard,
            seed: None,
        }
    }
}

struct Mlp {
    fc1: Linear,
    fc2: Linear,
}

impl Mlp {
    fn new(graph: &Graph, input: usize, hidden: usize, output: usize, prefix: &str) -> Result<Self, GraphError> {
        Ok(Self {
            fc1: Linear::new(graph, input, hidden, true, &format!("{prefix}_fc1"))?,
            fc2: Linear::new(graph, hidden, output, true, &format!("{prefix}_fc2"))?,
        })
    }

    fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let h = self.fc1.forward(x)?.leaky_relu(LEAKY_RELU_SLOPE)?;
        self.fc2.forward(&h)
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Var> {
        let mut params = self.fc1.parameters();
        params.extend(self.fc2.parameters());
        params
    }
}

pub struct MlpGan {
    config: MlpGanConfig,
    graph: Graph,
    generator: Mlp,
    discriminator: Mlp,
    x: Var,
    z: Var,
    fake: Var,
    losses: LossPair,
    d_real_mean: Var,
    d_fake_mean: Var,
}

impl MlpGan {
    pub fn new(config: MlpGanConfig) -> Result<Self, GraphError> {
        if config.batch_size == 0 || config.latent_dim == 0 || config.hidden_dim == 0 || config.data_dim == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "MlpGan 的各维度都必须大于 0：{config:?}"
            )));
        }
        let graph = config.seed.map_or_else(Graph::new, Graph::new_with_seed);

        let x = graph.placeholder(&[config.batch_size, config.data_dim], Some("x"))?;
        let z = graph.placeholder(&[config.batch_size, config.latent_dim], Some("z"))?;

        let generator = Mlp::new(&graph, config.latent_dim, config.hidden_dim, config.data_dim, "g")?;
        let discriminator = Mlp::new(&graph, config.data_dim, config.hidden_dim, 1, "d")?;

        let fake = generator.forward(&z)?;
        let d_real = discriminator.forward(&x)?;
        let d_fake = discriminator.forward(&fake)?;
        let losses = config.loss.provider().build(&d_real, &d_fake)?;

        log::info!(
            "创建 MlpGan：隐变量{}维，隐藏层{}，数据{}维，批大小{}，损失{:?}",
            config.latent_dim,
            config.hidden_dim,
            config.data_dim,
            config.batch_size,
            config.loss
        );

        Ok(Self {
            d_real_mean: d_real.mean()?,
            d_fake_mean: d_fake.mean()?,
            config,
            graph,
            generator,
            discriminator,
            x,
            z,
            fake,
            losses,
        })
    }

    pub const fn config(&self) -> &MlpGanConfig {
        &self.config
    }

    /// 采样一批隐变量噪声（来自图的随机数生成器）
    fn feed_noise(&self) -> Result<(), GraphError> {
        let shape = [self.config.batch_size, self.config.latent_dim];
        let noise = self.graph.inner_mut().randn(0.0, 1.0, &shape);
        self.z.set_value(&noise)
    }

    /// 生成一批样本，形状`[batch_size, data_dim]`
    pub fn sample(&mut self) -> Result<Tensor, GraphError> {
        self.feed_noise()?;
        self.fake.forward()?;
        self.fake.value()?.ok_or_else(|| {
            GraphError::ComputationError("生成器前向后没有输出".to_string())
        })
    }
}

impl AdversarialModel for MlpGan {
    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn forward_loss(&mut self, batch: &Tensor) -> Result<LossPair, GraphError> {
        self.x.set_value(batch)?;
        self.feed_noise()?;
        self.graph.forward(&[
            &self.losses.d_loss,
            &self.losses.g_loss,
            &self.d_real_mean,
            &self.d_fake_mean,
        ])?;
        Ok(self.losses.clone())
    }

    fn g_parameters(&self) -> Vec<Var> {
        self.generator.parameters()
    }

    fn d_parameters(&self) -> Vec<Var> {
        self.discriminator.parameters()
    }

    fn metrics(&self) -> Metrics {
        let mut metrics = Metrics::new();
        for (name, var) in [("d_real", &self.d_real_mean), ("d_fake", &self.d_fake_mean)] {
            if let Ok(value) = var.item() {
                metrics.insert(name, value);
            }
        }
        metrics
    }
}

impl Module for MlpGan {
    fn parameters(&self) -> Vec<Var> {
        let mut params = self.generator.parameters();
        params.extend(self.discriminator.parameters());
        params
    }
}
