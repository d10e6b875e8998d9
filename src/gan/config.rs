/*
 * @Date         : 2026-10-05
 * @Description  : 训练器配置（JSON，serde 反序列化）
 *
 * 示例：
 * {
 *   "optimizer": { "class": "adamirror", "learn_rate": 0.0001, "betas": [0.907453, 0.997] },
 *   "report_interval": 10
 * }
 */

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TrainError;
use crate::nn::{Adam, Adamirror, Graph, Optimizer, SGD, Var};

/// 优化器种类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerClass {
    #[default]
    Adamirror,
    Adam,
    Sgd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub class: OptimizerClass,
    /// 学习率，必填
    pub learn_rate: f32,
    #[serde(default = "default_betas")]
    pub betas: [f32; 2],
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
    /// L2 权重衰减，Adam 与 Adamirror 使用，SGD 忽略
    #[serde(default)]
    pub weight_decay: f32,
}

const fn default_betas() -> [f32; 2] {
    [Adamirror::DEFAULT_BETAS.0, Adamirror::DEFAULT_BETAS.1]
}

const fn default_epsilon() -> f32 {
    Adamirror::DEFAULT_EPSILON
}

const fn default_report_interval() -> u64 {
    10
}

impl OptimizerConfig {
    /// 以默认超参数构造某类优化器的配置
    pub const fn new(class: OptimizerClass, learn_rate: f32) -> Self {
        Self {
            class,
            learn_rate,
            betas: default_betas(),
            epsilon: default_epsilon(),
            weight_decay: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), TrainError> {
        if !(self.learn_rate.is_finite() && self.learn_rate > 0.0) {
            return Err(TrainError::Config(format!(
                "optimizer.learn_rate 必须是正的有限值，得到{}",
                self.learn_rate
            )));
        }
        for (name, beta) in [("betas[0]", self.betas[0]), ("betas[1]", self.betas[1])] {
            if !(0.0..1.0).contains(&beta) {
                return Err(TrainError::Config(format!(
                    "optimizer.{name} 必须在[0, 1)内，得到{beta}"
                )));
            }
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(TrainError::Config(format!(
                "optimizer.epsilon 必须是正的有限值，得到{}",
                self.epsilon
            )));
        }
        if !(self.weight_decay.is_finite() && self.weight_decay >= 0.0) {
            return Err(TrainError::Config(format!(
                "optimizer.weight_decay 必须是非负有限值，得到{}",
                self.weight_decay
            )));
        }
        Ok(())
    }

    /// 按配置为给定参数构造优化器
    pub fn build(&self, graph: &Graph, params: &[Var]) -> Result<Box<dyn Optimizer>, TrainError> {
        self.validate()?;
        let [beta1, beta2] = self.betas;
        let optimizer: Box<dyn Optimizer> = match self.class {
            OptimizerClass::Adamirror => Box::new(Adamirror::new_with_config(
                graph,
                params,
                self.learn_rate,
                (beta1, beta2),
                self.epsilon,
                self.weight_decay,
            )?),
            OptimizerClass::Adam => Box::new(Adam::new_with_config(
                graph,
                params,
                self.learn_rate,
                (beta1, beta2),
                self.epsilon,
                self.weight_decay,
            )?),
            OptimizerClass::Sgd => Box::new(SGD::new(graph, params, self.learn_rate)?),
        };
        Ok(optimizer)
    }
}

/// 训练器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub optimizer: OptimizerConfig,
    /// 每隔多少步报告一次指标
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
}

impl TrainerConfig {
    pub const fn new(optimizer: OptimizerConfig) -> Self {
        Self {
            optimizer,
            report_interval: default_report_interval(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, TrainError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TrainError::Config(format!("无法解析训练器配置：{e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TrainError::Config(format!("无法读取配置文件`{}`：{e}", path.display())))?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), TrainError> {
        if self.report_interval == 0 {
            return Err(TrainError::Config(
                "report_interval 必须至少为 1".to_string(),
            ));
        }
        self.optimizer.validate()
    }
}
