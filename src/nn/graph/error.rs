/*
 * @Date         : 2026-10-03
 * @Description  : Graph 模块的错误类型
 */

use thiserror::Error;

use crate::nn::NodeId;

/// Graph 操作错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("节点{0:?}不存在")]
    NodeNotFound(NodeId),

    #[error("非法操作：{0}")]
    InvalidOperation(String),

    #[error("{message}：期望形状{expected:?}，实际形状{got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    #[error("计算错误：{0}")]
    ComputationError(String),

    #[error("节点名称`{0}`已存在")]
    DuplicateNodeName(String),

    /// 超参数非法（学习率为负、beta 不在 [0, 1) 等）
    #[error("超参数非法：{0}")]
    InvalidHyperparameter(String),

    /// 数值异常（NaN/无穷）。出现时不应对任何参数或优化器状态做修改
    #[error("数值异常：{0}")]
    Numerical(String),
}
