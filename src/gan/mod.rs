/*
 * @Date         : 2026-10-05
 * @Description  : 对抗训练核心：模型接口、参数划分、训练钩子、对抗损失与同时训练器
 */

mod config;
mod error;
pub mod hooks;
mod loss;
mod metrics;
mod model;
mod network;
mod partition;
pub mod trainer;

pub use config::{OptimizerClass, OptimizerConfig, TrainerConfig};
pub use error::TrainError;
pub use hooks::{LearningRateDecayHook, ParameterPenaltyHook, StepContext, TrainHook};
pub use loss::{AdversarialLoss, LeastSquaresLoss, LossKind, StandardLoss};
pub use metrics::{Metrics, MetricsReporter, PrintReporter};
pub use model::{AdversarialModel, LossPair};
pub use network::{MlpGan, MlpGanConfig};
pub use partition::{ParameterPartition, Side};
pub use trainer::{SimultaneousTrainer, StepLosses, StepPhase};

#[cfg(test)]
mod tests;
