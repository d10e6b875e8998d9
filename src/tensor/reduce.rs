/*
 * @Date         : 2026-10-02
 * @Description  : 张量的归约运算。损失统一归约为形状`[1, 1]`的标量；
 *                 `sum_to_shape`用于把广播运算的梯度还原到参与广播的原始形状。
 */

use super::Tensor;
use crate::errors::TensorError;
use ndarray::Axis;

impl Tensor {
    /// 对所有元素求和，返回形状为`[1, 1]`的标量
    pub fn sum(&self) -> Self {
        Self::scalar(self.data.sum())
    }

    /// 对所有元素求均值，返回形状为`[1, 1]`的标量（空张量的均值视为0）
    pub fn mean(&self) -> Self {
        if self.size() == 0 {
            return Self::scalar(0.0);
        }
        Self::scalar(self.data.sum() / self.size() as f32)
    }

    /// 将（广播后的）张量沿被广播的维度求和，得到指定形状
    ///
    /// 例：形状[4, 3]归约到[1, 3]时沿第0维求和；归约到[3]时先去掉多出的前导维度。
    pub fn sum_to_shape(&self, shape: &[usize]) -> Self {
        if self.shape() == shape {
            return self.clone();
        }
        // 目标是单元素张量（常见于标量参与广播）时直接求和
        if shape.iter().product::<usize>() == 1 {
            return Self::full(self.data.sum(), shape);
        }

        let mut data = self.data.clone();
        while data.ndim() > shape.len() {
            data = data.sum_axis(Axis(0));
        }
        for (axis, &dim) in shape.iter().enumerate() {
            if dim == 1 && data.shape()[axis] != 1 {
                data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
            }
        }
        assert!(
            data.shape() == shape,
            "{}",
            TensorError::IncompatibleReduction {
                from: self.shape().to_vec(),
                to: shape.to_vec(),
            }
        );
        Self { data }
    }

    /// 所有元素绝对值的最大值
    pub fn max_abs(&self) -> f32 {
        self.data.iter().fold(0.0_f32, |acc, x| acc.max(x.abs()))
    }
}
