/*
 * @Date         : 2026-10-02
 * @Description  : 张量层面的错误类型。张量运算属于“契约式”接口，形状误用直接 panic，
 *                 panic 信息统一由本模块的错误类型格式化。
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不兼容，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },

    #[error("数据长度{data_len}与形状{shape:?}所需的元素个数不一致")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },

    #[error("{operator}要求张量为{expected}阶，但得到{got}阶")]
    DimensionMismatch {
        operator: Operator,
        expected: usize,
        got: usize,
    },

    #[error("形状{from:?}无法归约到{to:?}")]
    IncompatibleReduction { from: Vec<usize>, to: Vec<usize> },
}
