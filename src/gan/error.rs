/*
 * @Date         : 2026-10-05
 * @Description  : 对抗训练的错误类型
 */

use thiserror::Error;

use crate::nn::GraphError;

/// 训练错误。任何一种都会让当前这一步作废，不做重试
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainError {
    /// 配置缺失或非法（构造训练器时即报出）
    #[error("配置错误：{0}")]
    Config(String),

    /// 损失或梯度出现 NaN/无穷
    #[error("数值异常：{0}")]
    Numerical(String),

    /// 训练钩子返回的损失不满足约定（不在同一个图上、形状不对等）
    #[error("钩子`{hook}`违反约定：{message}")]
    HookContract { hook: String, message: String },

    #[error(transparent)]
    Graph(GraphError),
}

impl From<GraphError> for TrainError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Numerical(msg) => Self::Numerical(msg),
            GraphError::InvalidHyperparameter(msg) => Self::Config(msg),
            other => Self::Graph(other),
        }
    }
}
