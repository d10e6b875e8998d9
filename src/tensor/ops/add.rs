/*
 * @Date         : 2026-10-02
 * @Description  : 张量的加法，实现了两个张量“逐元素”（或张量与纯数）相加的运算，并返回一个新的张量。
 *                 两个操作数均为张量时支持 NumPy 风格的广播（broadcasting）。
 *                 本文件同时提供四则运算共用的广播工具，及生成各种所有权组合实现的宏。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::{IxDyn, Zip};

/// 计算两个形状广播后的形状，无法广播则返回 None
///
/// # 广播规则
/// - 从右向左对齐维度
/// - 每个维度必须相等，或其中一个为 1
/// - 维度数不同时，较短的形状前面补 1
pub(crate) fn broadcast_shape(shape_1: &[usize], shape_2: &[usize]) -> Option<Vec<usize>> {
    let rank = shape_1.len().max(shape_2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        let d1 = dim_from_right(shape_1, rank, i);
        let d2 = dim_from_right(shape_2, rank, i);
        result[i] = match (d1, d2) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => return None,
        };
    }
    Some(result)
}

fn dim_from_right(shape: &[usize], rank: usize, i: usize) -> usize {
    let offset = rank - shape.len();
    if i < offset { 1 } else { shape[i - offset] }
}

/// 逐元素二元运算（带广播）。形状不兼容时 panic。
pub(in crate::tensor) fn broadcast_zip(
    tensor_1: &Tensor,
    tensor_2: &Tensor,
    operator: Operator,
    f: impl Fn(f32, f32) -> f32,
) -> Tensor {
    if tensor_1.is_same_shape(tensor_2) {
        let data = Zip::from(tensor_1.array())
            .and(tensor_2.array())
            .map_collect(|&a, &b| f(a, b));
        return Tensor::from_array(data);
    }

    let shape = broadcast_shape(tensor_1.shape(), tensor_2.shape())
        .unwrap_or_else(|| panic_incompatible(tensor_1, tensor_2, operator));
    let view_1 = tensor_1
        .array()
        .broadcast(IxDyn(&shape))
        .unwrap_or_else(|| panic_incompatible(tensor_1, tensor_2, operator));
    let view_2 = tensor_2
        .array()
        .broadcast(IxDyn(&shape))
        .unwrap_or_else(|| panic_incompatible(tensor_1, tensor_2, operator));
    let data = Zip::from(&view_1)
        .and(&view_2)
        .map_collect(|&a, &b| f(a, b));
    Tensor::from_array(data)
}

fn panic_incompatible(tensor_1: &Tensor, tensor_2: &Tensor, operator: Operator) -> ! {
    panic!(
        "{}",
        TensorError::OperatorError {
            operator,
            tensor1_shape: tensor_1.shape().to_vec(),
            tensor2_shape: tensor_2.shape().to_vec(),
        }
    )
}

/// 为某个逐元素运算生成“（不）带引用的张量 ⊕ （不）带引用的张量”以及与`f32`组合的全部实现
macro_rules! impl_elementwise_op {
    ($trait:ident, $method:ident, $operator:expr, $f:expr) => {
        impl std::ops::$trait for Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                $crate::tensor::ops::add::broadcast_zip(&self, &other, $operator, $f)
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for Tensor {
            type Output = Tensor;
            fn $method(self, other: &'a Tensor) -> Tensor {
                $crate::tensor::ops::add::broadcast_zip(&self, other, $operator, $f)
            }
        }
        impl std::ops::$trait<Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                $crate::tensor::ops::add::broadcast_zip(self, &other, $operator, $f)
            }
        }
        impl<'b> std::ops::$trait<&'b Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: &'b Tensor) -> Tensor {
                $crate::tensor::ops::add::broadcast_zip(self, other, $operator, $f)
            }
        }
        impl std::ops::$trait<f32> for Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                let f = $f;
                Tensor::from_array(self.array().mapv(|x| f(x, scalar)))
            }
        }
        impl std::ops::$trait<f32> for &Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                let f = $f;
                Tensor::from_array(self.array().mapv(|x| f(x, scalar)))
            }
        }
        impl std::ops::$trait<Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: Tensor) -> Tensor {
                let f = $f;
                Tensor::from_array(tensor.array().mapv(|x| f(self, x)))
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: &'a Tensor) -> Tensor {
                let f = $f;
                Tensor::from_array(tensor.array().mapv(|x| f(self, x)))
            }
        }
    };
}
pub(crate) use impl_elementwise_op;

impl_elementwise_op!(Add, add, Operator::Add, |a: f32, b: f32| a + b);
